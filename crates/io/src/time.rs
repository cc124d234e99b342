//! Monthly timestep representation.

use std::fmt;

use crate::error::IoError;

/// A single monthly timestep: calendar year plus month (1..=12).
///
/// The mapping archive is monthly, so a day-resolution date would only
/// carry noise from each file's day-of-month convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthStamp {
    year: i32,
    month: u8,
}

impl MonthStamp {
    /// Creates a new `MonthStamp`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidTime`] if `month` is outside 1..=12.
    pub fn new(year: i32, month: u8) -> Result<Self, IoError> {
        if !(1..=12).contains(&month) {
            return Err(IoError::InvalidTime {
                reason: format!("month must be 1..=12, got {month}"),
            });
        }
        Ok(Self { year, month })
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of year (1..=12).
    pub fn month(&self) -> u8 {
        self.month
    }
}

impl fmt::Display for MonthStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
