//! # okeanos-io
//!
//! Read gridded, time-indexed climate fields from NetCDF files and write
//! computed statistic maps back out. Bridges external file formats into
//! Okeanos's internal `&[f64]` slice-based APIs.

mod error;
mod field;
mod netcdf_read;
mod reader;
mod time;
mod writer;

pub use error::IoError;
pub use field::GriddedField;
pub use reader::{FieldReaderConfig, read_field};
pub use time::MonthStamp;
pub use writer::{MapWriterConfig, write_map_netcdf};
