//! NetCDF output for computed statistic maps.

use std::path::Path;

use tracing::info;

use crate::error::IoError;

/// Configuration for writing statistic maps to NetCDF.
///
/// Uses a builder pattern with sensible defaults.
#[derive(Debug, Clone)]
pub struct MapWriterConfig {
    /// Name of the statistic stored as a global attribute.
    statistic_name: String,
    /// p-value threshold below which a cell is marked significant.
    significance_level: f64,
}

impl Default for MapWriterConfig {
    fn default() -> Self {
        Self {
            statistic_name: "correlation".into(),
            significance_level: 0.10,
        }
    }
}

impl MapWriterConfig {
    /// Set the statistic name recorded in the output file.
    pub fn with_statistic_name(mut self, name: impl Into<String>) -> Self {
        self.statistic_name = name.into();
        self
    }

    /// Set the significance threshold for the `significant` mask.
    pub fn with_significance_level(mut self, level: f64) -> Self {
        self.significance_level = level;
        self
    }

    /// Returns the statistic name.
    pub fn statistic_name(&self) -> &str {
        &self.statistic_name
    }

    /// Returns the significance threshold.
    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `significance_level` is outside
    /// (0, 1).
    pub fn validate(&self) -> Result<(), IoError> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "significance_level must be in (0, 1), got {}",
                    self.significance_level
                ),
            });
        }
        Ok(())
    }
}

/// Write coefficient and p-value maps to a NetCDF file.
///
/// Creates `lat`/`lon` dimensions with coordinate variables, `coefficient`
/// and `p_value` variables (`_FillValue = NaN`), and a `significant` byte
/// mask set to 1 wherever `p_value < significance_level`. NaN p-values are
/// never marked significant. The statistic name and threshold are recorded
/// as global attributes for downstream map renderers.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if the map lengths do not equal
/// `lats.len() * lons.len()`, or [`IoError::Netcdf`] on file creation
/// failures.
pub fn write_map_netcdf(
    path: &Path,
    coefficient: &[f64],
    p_value: &[f64],
    lats: &[f64],
    lons: &[f64],
    config: &MapWriterConfig,
) -> Result<(), IoError> {
    config.validate()?;

    let n_cells = lats.len() * lons.len();
    if coefficient.len() != n_cells {
        return Err(IoError::DimensionMismatch {
            name: "coefficient".into(),
            expected: n_cells,
            got: coefficient.len(),
        });
    }
    if p_value.len() != n_cells {
        return Err(IoError::DimensionMismatch {
            name: "p_value".into(),
            expected: n_cells,
            got: p_value.len(),
        });
    }

    let mut file = netcdf::create(path)?;

    file.add_dimension("lat", lats.len())?;
    file.add_dimension("lon", lons.len())?;

    {
        let mut var = file.add_variable::<f64>("lat", &["lat"])?;
        var.put_values(lats, ..)?;
        var.put_attribute("units", "degrees_north")?;
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"])?;
        var.put_values(lons, ..)?;
        var.put_attribute("units", "degrees_east")?;
    }
    {
        let mut var = file.add_variable::<f64>("coefficient", &["lat", "lon"])?;
        var.put_attribute("_FillValue", f64::NAN)?;
        var.put_values(coefficient, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("p_value", &["lat", "lon"])?;
        var.put_attribute("_FillValue", f64::NAN)?;
        var.put_values(p_value, ..)?;
    }
    {
        let mask: Vec<u8> = p_value
            .iter()
            .map(|&p| u8::from(p < config.significance_level))
            .collect();
        let mut var = file.add_variable::<u8>("significant", &["lat", "lon"])?;
        var.put_attribute(
            "description",
            format!("1 where p_value < {}", config.significance_level),
        )?;
        var.put_values(&mask, ..)?;
    }

    file.add_attribute("statistic", config.statistic_name.as_str())?;
    file.add_attribute("significance_level", config.significance_level)?;

    info!(path = %path.display(), n_cells, "statistic map written");
    Ok(())
}
