//! JSON output structures for run summaries.

use std::path::PathBuf;

use serde::Serialize;

/// Top-level summary of a `map` run.
#[derive(Debug, Serialize)]
pub struct MapSummary {
    /// Statistic that was computed.
    pub statistic: String,
    /// p-value threshold used for the significance mask.
    pub significance_level: f64,
    /// Number of ensemble members averaged.
    pub n_members: usize,
    /// Number of timesteps per member.
    pub n_timesteps: usize,
    /// Grid shape.
    pub ny: usize,
    pub nx: usize,
    /// Cells with no computable statistic in the averaged map.
    pub n_missing_cells: usize,
    /// Cells below the significance threshold in the averaged map.
    pub n_significant_cells: usize,
    /// Path of the NetCDF map that was written.
    pub output: PathBuf,
}

/// Top-level summary of an `index` run.
#[derive(Debug, Serialize)]
pub struct IndexSummary {
    /// Region the index was averaged over.
    pub region: RegionSummary,
    /// One entry per ensemble member, in input order.
    pub members: Vec<IndexMemberSummary>,
}

/// Bounds of the averaging region.
#[derive(Debug, Serialize)]
pub struct RegionSummary {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

/// Index series for a single ensemble member.
#[derive(Debug, Serialize)]
pub struct IndexMemberSummary {
    /// Source file the member was read from.
    pub file: PathBuf,
    /// Calendar stamp per timestep, "YYYY-MM".
    pub time: Vec<String>,
    /// Anomaly index value per timestep; null where undefined.
    pub values: Vec<Option<f64>>,
}

/// Wrap a series for JSON, mapping NaN to null.
pub fn nullable(values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|&v| if v.is_finite() { Some(v) } else { None })
        .collect()
}
