//! Pointwise statistic engine.
//!
//! Runs a univariate test (Pearson correlation or OLS regression) between a
//! reference time series and every grid cell of a field, producing flat
//! coefficient and p-value maps. Invalid cells become NaN instead of
//! aborting the scan. Also averages per-member maps into an ensemble map.

mod engine;
mod error;
mod maps;

pub use engine::{StatisticKind, average_members, compute_statistic};
pub use error::PointwiseError;
pub use maps::StatisticMaps;
