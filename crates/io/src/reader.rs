//! High-level NetCDF field reader configuration and orchestration.

use std::path::Path;

use tracing::{debug, info};

use crate::error::IoError;
use crate::field::GriddedField;
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// FieldReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a gridded field from a NetCDF file.
///
/// Use the builder methods (`with_*`) to customise coordinate aliases and
/// the time variable name. The [`Default`] implementation supplies
/// CF-convention names suitable for CMIP-style climate data.
#[derive(Debug, Clone)]
pub struct FieldReaderConfig {
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// NetCDF variable name for the time axis.
    time_var: String,
}

impl Default for FieldReaderConfig {
    fn default() -> Self {
        Self {
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            time_var: "time".into(),
        }
    }
}

impl FieldReaderConfig {
    /// Set the longitude coordinate aliases.
    pub fn with_lon_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lon_aliases = aliases;
        self
    }

    /// Set the latitude coordinate aliases.
    pub fn with_lat_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lat_aliases = aliases;
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any alias list is empty.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.lon_aliases.is_empty() {
            problems.push("lon_aliases must not be empty".to_string());
        }
        if self.lat_aliases.is_empty() {
            problems.push("lat_aliases must not be empty".to_string());
        }
        if !problems.is_empty() {
            return Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// read_field
// ---------------------------------------------------------------------------

/// Read a gridded field variable from a NetCDF file.
///
/// The variable must be 3-D in `[time, lat, lon]` order; coordinate axes are
/// looked up via the configured alias lists and the time axis is decoded from
/// its CF `units` attribute into monthly timesteps. Fill values are replaced
/// with `NaN` during the read.
///
/// # Errors
///
/// Returns [`IoError`] on missing variables, dimension mismatches, or time
/// parsing failures.
pub fn read_field(
    path: &Path,
    var_name: &str,
    config: &FieldReaderConfig,
) -> Result<GriddedField, IoError> {
    config.validate()?;

    let file = netcdf_read::open_file(path)?;

    // -- Coordinates --------------------------------------------------------

    let lon_alias_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();
    let lat_alias_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();

    let lons = netcdf_read::read_1d_f64(&file, &lon_alias_refs, path)?;
    let lats = netcdf_read::read_1d_f64(&file, &lat_alias_refs, path)?;

    // -- Time ---------------------------------------------------------------

    let time_offsets = netcdf_read::read_1d_f64(&file, &[&config.time_var], path)?;
    let base_date = netcdf_read::read_time_units(&file, &config.time_var, path)?;
    let time = netcdf_read::time_offsets_to_months(base_date, &time_offsets)?;

    // -- 3-D data -----------------------------------------------------------

    let (data, [nt, ny, nx]) = netcdf_read::read_3d_f64(&file, var_name, path)?;
    debug!(var = var_name, nt, ny, nx, "read 3-D variable");

    if time.len() != nt {
        return Err(IoError::DimensionMismatch {
            name: "time".into(),
            expected: nt,
            got: time.len(),
        });
    }
    if lats.len() != ny {
        return Err(IoError::DimensionMismatch {
            name: "lat".into(),
            expected: ny,
            got: lats.len(),
        });
    }
    if lons.len() != nx {
        return Err(IoError::DimensionMismatch {
            name: "lon".into(),
            expected: nx,
            got: lons.len(),
        });
    }

    let field = GriddedField::new(data, lats, lons, time)?;
    info!(
        var = var_name,
        n_timesteps = field.n_timesteps(),
        n_cells = field.n_cells(),
        "gridded field loaded"
    );
    Ok(field)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FieldReaderConfig::default();
        assert_eq!(cfg.lon_aliases, vec!["lon", "longitude", "x"]);
        assert_eq!(cfg.lat_aliases, vec!["lat", "latitude", "y"]);
        assert_eq!(cfg.time_var, "time");
    }

    #[test]
    fn builder_methods() {
        let cfg = FieldReaderConfig::default()
            .with_lon_aliases(vec!["nav_lon".into()])
            .with_lat_aliases(vec!["nav_lat".into()])
            .with_time_var("time_counter");

        assert_eq!(cfg.lon_aliases, vec!["nav_lon"]);
        assert_eq!(cfg.lat_aliases, vec!["nav_lat"]);
        assert_eq!(cfg.time_var, "time_counter");
    }

    #[test]
    fn validate_default_ok() {
        assert!(FieldReaderConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_aliases_rejected() {
        let cfg = FieldReaderConfig::default().with_lon_aliases(vec![]);
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, IoError::Validation { .. }));
    }

    #[test]
    fn read_missing_file() {
        let err = read_field(
            Path::new("/nonexistent/sst.nc"),
            "tos",
            &FieldReaderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
