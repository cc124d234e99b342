//! Regional box selection and area averaging.

use okeanos_io::GriddedField;
use tracing::debug;

use crate::error::IndexError;

/// A latitude/longitude box used to select grid cells for area averaging.
///
/// Longitudes are interpreted on the [0, 360) circle; bounds and grid
/// coordinates given in -180..180 convention are normalized before
/// containment checks, so both grid conventions work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

/// Map a longitude to [0, 360).
fn normalize_lon(lon: f64) -> f64 {
    lon.rem_euclid(360.0)
}

impl RegionBounds {
    /// Create validated bounds.
    ///
    /// Latitudes are degrees north, longitudes degrees east in either
    /// -180..180 or 0..360 convention.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidBounds`] if latitudes are outside
    /// [-90, 90], `lat_min >= lat_max`, or `lon_min == lon_max` after
    /// normalization.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Result<Self, IndexError> {
        for (name, lat) in [("lat_min", lat_min), ("lat_max", lat_max)] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(IndexError::InvalidBounds {
                    details: format!("{name} ({lat}) outside [-90, 90]"),
                });
            }
        }
        if lat_min >= lat_max {
            return Err(IndexError::InvalidBounds {
                details: format!("lat_min ({lat_min}) must be below lat_max ({lat_max})"),
            });
        }
        for (name, lon) in [("lon_min", lon_min), ("lon_max", lon_max)] {
            if !lon.is_finite() {
                return Err(IndexError::InvalidBounds {
                    details: format!("{name} ({lon}) is not finite"),
                });
            }
        }
        let lon_min = normalize_lon(lon_min);
        let lon_max = normalize_lon(lon_max);
        if lon_min == lon_max {
            return Err(IndexError::InvalidBounds {
                details: format!("longitude bounds collapse to a single meridian ({lon_min})"),
            });
        }

        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    /// The NINO3.4 region: 5°S-5°N, 170°W-120°W.
    pub fn nino34() -> Self {
        Self {
            lat_min: -5.0,
            lat_max: 5.0,
            lon_min: 190.0,
            lon_max: 240.0,
        }
    }

    /// Southern bound in degrees north.
    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    /// Northern bound in degrees north.
    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    /// Western bound in degrees east, normalized to [0, 360).
    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    /// Eastern bound in degrees east, normalized to [0, 360).
    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    /// Whether a coordinate falls inside the box (bounds inclusive).
    ///
    /// Handles boxes that straddle the prime meridian after normalization
    /// (`lon_min > lon_max` wraps around 0°).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        if !(self.lat_min..=self.lat_max).contains(&lat) {
            return false;
        }
        let lon = normalize_lon(lon);
        if self.lon_min <= self.lon_max {
            (self.lon_min..=self.lon_max).contains(&lon)
        } else {
            lon >= self.lon_min || lon <= self.lon_max
        }
    }
}

/// Flat cell indices of a field falling inside the bounds.
fn cells_in_region(field: &GriddedField, bounds: &RegionBounds) -> Vec<usize> {
    (0..field.n_cells())
        .filter(|&cell| bounds.contains(field.cell_lat(cell), field.cell_lon(cell)))
        .collect()
}

/// Unweighted area mean of a field over a region, per timestep.
///
/// Non-finite cell values are skipped; a timestep with no finite in-box
/// value yields NaN so downstream validity filtering drops it.
///
/// # Errors
///
/// Returns [`IndexError::EmptyRegion`] if no grid cell falls inside the
/// bounds.
pub fn region_mean(field: &GriddedField, bounds: &RegionBounds) -> Result<Vec<f64>, IndexError> {
    let cells = cells_in_region(field, bounds);
    if cells.is_empty() {
        return Err(IndexError::EmptyRegion {
            lat_min: bounds.lat_min,
            lat_max: bounds.lat_max,
            lon_min: bounds.lon_min,
            lon_max: bounds.lon_max,
        });
    }
    debug!(n_cells = cells.len(), "averaging over region cells");

    let means = (0..field.n_timesteps())
        .map(|t| {
            let mut sum = 0.0;
            let mut count = 0usize;
            for &cell in &cells {
                let v = field.value(t, cell);
                if v.is_finite() {
                    sum += v;
                    count += 1;
                }
            }
            if count == 0 { f64::NAN } else { sum / count as f64 }
        })
        .collect();

    Ok(means)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use okeanos_io::MonthStamp;

    fn stamps(n: usize) -> Vec<MonthStamp> {
        (0..n)
            .map(|i| MonthStamp::new(2000 + (i / 12) as i32, (i % 12) as u8 + 1).unwrap())
            .collect()
    }

    fn field(data: Vec<f64>, lats: Vec<f64>, lons: Vec<f64>, nt: usize) -> GriddedField {
        GriddedField::new(data, lats, lons, stamps(nt)).unwrap()
    }

    #[test]
    fn nino34_preset_bounds() {
        let b = RegionBounds::nino34();
        assert_relative_eq!(b.lat_min(), -5.0);
        assert_relative_eq!(b.lat_max(), 5.0);
        assert_relative_eq!(b.lon_min(), 190.0);
        assert_relative_eq!(b.lon_max(), 240.0);
    }

    #[test]
    fn new_rejects_inverted_latitudes() {
        assert!(RegionBounds::new(10.0, -10.0, 0.0, 50.0).is_err());
        assert!(RegionBounds::new(0.0, 0.0, 0.0, 50.0).is_err());
    }

    #[test]
    fn new_rejects_out_of_range_latitude() {
        assert!(RegionBounds::new(-95.0, 5.0, 0.0, 50.0).is_err());
        assert!(RegionBounds::new(-5.0, 95.0, 0.0, 50.0).is_err());
    }

    #[test]
    fn new_normalizes_negative_longitudes() {
        // 170W..120W expressed in -180..180 convention.
        let b = RegionBounds::new(-5.0, 5.0, -170.0, -120.0).unwrap();
        assert_relative_eq!(b.lon_min(), 190.0);
        assert_relative_eq!(b.lon_max(), 240.0);
        assert_eq!(b, RegionBounds::nino34());
    }

    #[test]
    fn contains_both_longitude_conventions() {
        let b = RegionBounds::nino34();
        assert!(b.contains(0.0, 200.0));
        assert!(b.contains(0.0, -160.0)); // 200E in -180..180
        assert!(!b.contains(0.0, 120.0));
        assert!(!b.contains(10.0, 200.0));
    }

    #[test]
    fn contains_bounds_inclusive() {
        let b = RegionBounds::nino34();
        assert!(b.contains(-5.0, 190.0));
        assert!(b.contains(5.0, 240.0));
    }

    #[test]
    fn contains_wraps_prime_meridian() {
        let b = RegionBounds::new(-10.0, 10.0, 350.0, 10.0).unwrap();
        assert!(b.contains(0.0, 355.0));
        assert!(b.contains(0.0, 5.0));
        assert!(!b.contains(0.0, 180.0));
    }

    #[test]
    fn region_mean_selects_in_box_cells() {
        // 2x2 grid: lats [-2, 20], lons [200, 300]. Only cell 0 is in box.
        let lats = vec![-2.0, 20.0];
        let lons = vec![200.0, 300.0];
        let data = vec![
            1.0, 10.0, 100.0, 1000.0, // t = 0
            3.0, 10.0, 100.0, 1000.0, // t = 1
        ];
        let f = field(data, lats, lons, 2);

        let means = region_mean(&f, &RegionBounds::nino34()).unwrap();
        assert_eq!(means, vec![1.0, 3.0]);
    }

    #[test]
    fn region_mean_averages_multiple_cells() {
        let lats = vec![-2.0, 2.0];
        let lons = vec![200.0, 210.0];
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let f = field(data, lats, lons, 1);

        let means = region_mean(&f, &RegionBounds::nino34()).unwrap();
        assert_relative_eq!(means[0], 2.5);
    }

    #[test]
    fn region_mean_skips_nan_cells() {
        let lats = vec![-2.0, 2.0];
        let lons = vec![200.0, 210.0];
        let data = vec![
            1.0,
            f64::NAN,
            3.0,
            5.0, // t = 0: mean of [1, 3, 5]
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN, // t = 1: no finite value
        ];
        let f = field(data, lats, lons, 2);

        let means = region_mean(&f, &RegionBounds::nino34()).unwrap();
        assert_relative_eq!(means[0], 3.0);
        assert!(means[1].is_nan());
    }

    #[test]
    fn region_mean_empty_region_is_error() {
        let lats = vec![40.0, 50.0];
        let lons = vec![0.0, 10.0];
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let f = field(data, lats, lons, 1);

        let err = region_mean(&f, &RegionBounds::nino34()).unwrap_err();
        assert!(matches!(err, IndexError::EmptyRegion { .. }));
    }
}
