//! Error types for okeanos-index.

/// Error type for regional index construction.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Returned when region bounds are not a valid box.
    #[error("invalid region bounds: {details}")]
    InvalidBounds {
        /// Description of the offending bound.
        details: String,
    },

    /// Returned when no grid cell falls inside the requested region.
    #[error("region contains no grid cells (lat {lat_min}..{lat_max}, lon {lon_min}..{lon_max})")]
    EmptyRegion {
        /// Southern bound in degrees north.
        lat_min: f64,
        /// Northern bound in degrees north.
        lat_max: f64,
        /// Western bound in degrees east.
        lon_min: f64,
        /// Eastern bound in degrees east.
        lon_max: f64,
    },
}
