//! Gridded, time-indexed field container.

use crate::error::IoError;
use crate::time::MonthStamp;

/// A gridded field with a shared monthly time axis.
///
/// Data is stored time-major in a flat vector: `data[t * n_cells + cell]`
/// gives the value at timestep `t` for the given flat cell index. Cells are
/// row-major with latitude varying slowest (`cell = iy * nx + ix`), matching
/// the `[time, lat, lon]` variable ordering of CF-convention NetCDF files.
/// Missing values are `NaN`.
#[derive(Debug, Clone)]
pub struct GriddedField {
    /// Flat data, length `nt * ny * nx`.
    data: Vec<f64>,
    /// Latitude axis (length `ny`).
    lats: Vec<f64>,
    /// Longitude axis (length `nx`).
    lons: Vec<f64>,
    /// Time axis (length `nt`).
    time: Vec<MonthStamp>,
    /// Month of each timestep (1..=12), derived from `time`.
    months: Vec<u8>,
}

impl GriddedField {
    /// Creates a new `GriddedField` after validating shapes.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if either coordinate axis is empty, or
    /// [`IoError::DimensionMismatch`] if `data.len()` does not equal
    /// `time.len() * lats.len() * lons.len()`.
    pub fn new(
        data: Vec<f64>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        time: Vec<MonthStamp>,
    ) -> Result<Self, IoError> {
        if lats.is_empty() || lons.is_empty() {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "coordinate axes must be non-empty (ny = {}, nx = {})",
                    lats.len(),
                    lons.len()
                ),
            });
        }

        let expected = time.len() * lats.len() * lons.len();
        if data.len() != expected {
            return Err(IoError::DimensionMismatch {
                name: "data".into(),
                expected,
                got: data.len(),
            });
        }

        let months: Vec<u8> = time.iter().map(|t| t.month()).collect();

        Ok(Self {
            data,
            lats,
            lons,
            time,
            months,
        })
    }

    /// Number of timesteps.
    pub fn n_timesteps(&self) -> usize {
        self.time.len()
    }

    /// Number of latitude rows.
    pub fn ny(&self) -> usize {
        self.lats.len()
    }

    /// Number of longitude columns.
    pub fn nx(&self) -> usize {
        self.lons.len()
    }

    /// Total number of grid cells.
    pub fn n_cells(&self) -> usize {
        self.ny() * self.nx()
    }

    /// Latitude axis values.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude axis values.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Time axis.
    pub fn time(&self) -> &[MonthStamp] {
        &self.time
    }

    /// Month of each timestep (1..=12).
    pub fn months(&self) -> &[u8] {
        &self.months
    }

    /// Flat time-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Value at timestep `t` and flat cell index `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `t` or `cell` is out of bounds.
    pub fn value(&self, t: usize, cell: usize) -> f64 {
        assert!(t < self.n_timesteps(), "timestep {t} out of bounds");
        assert!(cell < self.n_cells(), "cell {cell} out of bounds");
        self.data[t * self.n_cells() + cell]
    }

    /// The time series at a flat cell index, gathered into a new vector.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is out of bounds.
    pub fn cell_series(&self, cell: usize) -> Vec<f64> {
        assert!(cell < self.n_cells(), "cell {cell} out of bounds");
        let n_cells = self.n_cells();
        (0..self.n_timesteps())
            .map(|t| self.data[t * n_cells + cell])
            .collect()
    }

    /// Latitude of a flat cell index.
    pub fn cell_lat(&self, cell: usize) -> f64 {
        self.lats[cell / self.nx()]
    }

    /// Longitude of a flat cell index.
    pub fn cell_lon(&self, cell: usize) -> f64 {
        self.lons[cell % self.nx()]
    }
}
