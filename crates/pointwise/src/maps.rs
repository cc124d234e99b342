//! Result container for per-cell statistic grids.

use crate::error::PointwiseError;

/// Per-cell statistic results on a spatial grid.
///
/// Both grids are flat row-major `[lat, lon]` vectors of length `ny * nx`,
/// matching the cell indexing of the input field. Cells where the statistic
/// could not be computed hold NaN in both grids.
#[derive(Debug, Clone)]
pub struct StatisticMaps {
    coefficient: Vec<f64>,
    p_value: Vec<f64>,
    ny: usize,
    nx: usize,
}

impl StatisticMaps {
    /// Create a result container, validating grid lengths against the shape.
    ///
    /// # Errors
    ///
    /// Returns [`PointwiseError::GridLengthMismatch`] if either grid length
    /// differs from `ny * nx`.
    pub fn new(
        coefficient: Vec<f64>,
        p_value: Vec<f64>,
        ny: usize,
        nx: usize,
    ) -> Result<Self, PointwiseError> {
        let n_cells = ny * nx;
        if coefficient.len() != n_cells {
            return Err(PointwiseError::GridLengthMismatch {
                name: "coefficient".to_string(),
                expected: n_cells,
                got: coefficient.len(),
            });
        }
        if p_value.len() != n_cells {
            return Err(PointwiseError::GridLengthMismatch {
                name: "p_value".to_string(),
                expected: n_cells,
                got: p_value.len(),
            });
        }
        Ok(Self {
            coefficient,
            p_value,
            ny,
            nx,
        })
    }

    /// Flat coefficient grid (correlation r or regression slope).
    pub fn coefficient(&self) -> &[f64] {
        &self.coefficient
    }

    /// Flat two-sided p-value grid.
    pub fn p_value(&self) -> &[f64] {
        &self.p_value
    }

    /// Number of latitude rows.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of longitude columns.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Total number of grid cells.
    pub fn n_cells(&self) -> usize {
        self.ny * self.nx
    }

    /// Boolean stippling mask: true where `p_value < threshold`.
    ///
    /// NaN p-values are never flagged.
    pub fn significant_cells(&self, threshold: f64) -> Vec<bool> {
        self.p_value.iter().map(|&p| p < threshold).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_grid_lengths() {
        assert!(StatisticMaps::new(vec![0.0; 6], vec![0.0; 6], 2, 3).is_ok());

        let err = StatisticMaps::new(vec![0.0; 5], vec![0.0; 6], 2, 3).unwrap_err();
        assert!(matches!(
            err,
            PointwiseError::GridLengthMismatch { ref name, .. } if name == "coefficient"
        ));

        let err = StatisticMaps::new(vec![0.0; 6], vec![0.0; 7], 2, 3).unwrap_err();
        assert!(matches!(
            err,
            PointwiseError::GridLengthMismatch { ref name, .. } if name == "p_value"
        ));
    }

    #[test]
    fn significant_cells_thresholds_strictly() {
        let maps =
            StatisticMaps::new(vec![0.0; 4], vec![0.01, 0.05, 0.2, f64::NAN], 1, 4).unwrap();
        assert_eq!(
            maps.significant_cells(0.05),
            vec![true, false, false, false]
        );
    }
}
