//! Per-cell statistic computation and ensemble aggregation.

use okeanos_io::GriddedField;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::PointwiseError;
use crate::maps::StatisticMaps;

/// Which univariate test to run at each grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticKind {
    /// Pearson correlation coefficient r.
    Correlation,
    /// Ordinary least squares slope of the cell series on the reference.
    Regression,
}

impl StatisticKind {
    /// Stable lowercase name, used in output metadata.
    pub fn name(&self) -> &'static str {
        match self {
            StatisticKind::Correlation => "correlation",
            StatisticKind::Regression => "regression",
        }
    }
}

/// Compute a coefficient and p-value at every grid cell of a field.
///
/// For each cell, pairs the cell's time series with the reference series,
/// keeps only timesteps where both values are finite, and runs the chosen
/// test on the surviving pairs. Cells with too few valid pairs or a
/// degenerate reference get NaN in both grids; a bad cell never aborts the
/// scan. Cells are processed in parallel.
///
/// # Errors
///
/// Returns [`PointwiseError::TimeLengthMismatch`] if the reference series
/// length differs from the field's time axis.
pub fn compute_statistic(
    reference: &[f64],
    field: &GriddedField,
    kind: StatisticKind,
) -> Result<StatisticMaps, PointwiseError> {
    if reference.len() != field.n_timesteps() {
        return Err(PointwiseError::TimeLengthMismatch {
            expected: field.n_timesteps(),
            got: reference.len(),
        });
    }
    debug!(
        n_cells = field.n_cells(),
        n_timesteps = field.n_timesteps(),
        statistic = kind.name(),
        "scanning grid cells"
    );

    let results: Vec<(f64, f64)> = (0..field.n_cells())
        .into_par_iter()
        .map(|cell| {
            let series = field.cell_series(cell);
            let outcome = match kind {
                StatisticKind::Correlation => okeanos_stats::pearson_test(reference, &series),
                StatisticKind::Regression => okeanos_stats::regression_test(reference, &series),
            };
            outcome.unwrap_or((f64::NAN, f64::NAN))
        })
        .collect();

    let (coefficient, p_value): (Vec<f64>, Vec<f64>) = results.into_iter().unzip();
    let n_missing = coefficient.iter().filter(|c| c.is_nan()).count();
    info!(
        n_cells = coefficient.len(),
        n_missing,
        statistic = kind.name(),
        "statistic maps computed"
    );

    StatisticMaps::new(coefficient, p_value, field.ny(), field.nx())
}

/// Average per-member statistic maps into a single ensemble map.
///
/// Each cell is averaged over the members that produced a finite value
/// there; a cell where no member did stays NaN. Coefficient and p-value
/// grids are averaged independently.
///
/// # Errors
///
/// Returns [`PointwiseError::NoMembers`] for an empty slice and
/// [`PointwiseError::MemberShapeMismatch`] if members disagree on shape.
pub fn average_members(members: &[StatisticMaps]) -> Result<StatisticMaps, PointwiseError> {
    let first = members.first().ok_or(PointwiseError::NoMembers)?;
    let (ny, nx) = (first.ny(), first.nx());
    for member in &members[1..] {
        if member.ny() != ny || member.nx() != nx {
            return Err(PointwiseError::MemberShapeMismatch {
                expected_ny: ny,
                expected_nx: nx,
                got_ny: member.ny(),
                got_nx: member.nx(),
            });
        }
    }

    let coefficient = mean_grid(members, ny * nx, StatisticMaps::coefficient);
    let p_value = mean_grid(members, ny * nx, StatisticMaps::p_value);
    info!(n_members = members.len(), "ensemble maps averaged");

    StatisticMaps::new(coefficient, p_value, ny, nx)
}

/// Per-cell mean of one grid over members with a finite value there.
fn mean_grid(
    members: &[StatisticMaps],
    n_cells: usize,
    grid: fn(&StatisticMaps) -> &[f64],
) -> Vec<f64> {
    (0..n_cells)
        .map(|cell| {
            let mut sum = 0.0;
            let mut count = 0usize;
            for member in members {
                let v = grid(member)[cell];
                if v.is_finite() {
                    sum += v;
                    count += 1;
                }
            }
            if count == 0 { f64::NAN } else { sum / count as f64 }
        })
        .collect()
}
