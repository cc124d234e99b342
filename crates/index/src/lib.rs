//! Regional climate index construction.
//!
//! Builds a reference time series from a gridded field: select the cells
//! inside a latitude/longitude box, take the unweighted area mean at each
//! timestep, then remove the monthly climatology. The NINO3.4 box over
//! sea-surface temperature is the canonical use.

mod anomaly;
mod error;
mod region;

pub use anomaly::monthly_anomalies;
pub use error::IndexError;
pub use region::{RegionBounds, region_mean};

use okeanos_io::GriddedField;
use tracing::info;

/// Area-mean anomaly index of a field over a region.
///
/// Composition of [`region_mean`] and [`monthly_anomalies`]; the returned
/// series has one value per field timestep, NaN where the region had no
/// finite data.
///
/// # Errors
///
/// Returns [`IndexError::EmptyRegion`] if the bounds select no grid cell.
pub fn index_series(field: &GriddedField, bounds: &RegionBounds) -> Result<Vec<f64>, IndexError> {
    let means = region_mean(field, bounds)?;
    let anomalies = monthly_anomalies(&means, field.months());
    info!(
        n_timesteps = anomalies.len(),
        "computed regional anomaly index"
    );
    Ok(anomalies)
}
