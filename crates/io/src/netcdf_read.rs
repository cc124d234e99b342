//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::NaiveDate;
use netcdf::AttributeValue;

use crate::error::IoError;
use crate::time::MonthStamp;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 3-D `f64` variable and return the flattened data together with
/// the shape `[nt, ny, nx]` derived from the variable's dimensions.
///
/// Values equal to the variable's `_FillValue` or `missing_value` attribute
/// (when present) are replaced with `NaN`.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }

    let nt = dims[0].len();
    let ny = dims[1].len();
    let nx = dims[2].len();

    let mut data = var.get_values::<f64, _>(..)?;

    if let Some(fill) = read_fill_value(&var) {
        for v in &mut data {
            if *v == fill {
                *v = f64::NAN;
            }
        }
    }

    Ok((data, [nt, ny, nx]))
}

/// Read the fill value of a variable from its `_FillValue` or
/// `missing_value` attribute, if either is a numeric scalar.
fn read_fill_value(var: &netcdf::Variable<'_>) -> Option<f64> {
    for name in ["_FillValue", "missing_value"] {
        let value = var.attribute_value(name).and_then(|res| res.ok());
        match value {
            Some(AttributeValue::Double(v)) => return Some(v),
            Some(AttributeValue::Float(v)) => return Some(f64::from(v)),
            _ => continue,
        }
    }
    None
}

/// Read the `units` attribute from a time variable.
///
/// Parses CF-convention strings like `"days since YYYY-MM-DD"` or
/// `"days since YYYY-MM-DD HH:MM:SS"` and returns the parsed base date.
pub(crate) fn read_time_units(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<NaiveDate, IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    // Expected format: "days since YYYY-MM-DD" or "days since YYYY-MM-DD HH:MM:SS"
    let parts: Vec<&str> = units_str.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units_str}'"),
        });
    }

    // Take only the date portion (first 10 characters of parts[2]).
    let date_str = if parts[2].len() >= 10 {
        &parts[2][..10]
    } else {
        parts[2]
    };

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
        reason: format!("failed to parse base date '{date_str}': {e}"),
    })
}

/// Convert floating-point day offsets from a base date into [`MonthStamp`]s.
///
/// Each offset is truncated to an integer number of days, added to
/// `base_date` with chrono arithmetic, and reduced to its year and month.
pub(crate) fn time_offsets_to_months(
    base_date: NaiveDate,
    offsets: &[f64],
) -> Result<Vec<MonthStamp>, IoError> {
    use chrono::Datelike;

    offsets
        .iter()
        .map(|&offset| {
            let days = offset as i64;
            let date = base_date
                .checked_add_signed(chrono::TimeDelta::days(days))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("date overflow adding {days} days to {base_date}"),
                })?;

            MonthStamp::new(date.year(), date.month() as u8)
        })
        .collect()
}
