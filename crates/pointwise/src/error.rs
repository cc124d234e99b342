//! Error types for okeanos-pointwise.

/// Error type for the pointwise statistic engine.
#[derive(Debug, thiserror::Error)]
pub enum PointwiseError {
    /// Returned when the reference series and the field time axis differ in
    /// length.
    #[error("reference series length {got} does not match field time axis length {expected}")]
    TimeLengthMismatch {
        /// Field time axis length.
        expected: usize,
        /// Reference series length.
        got: usize,
    },

    /// Returned when a result grid does not match the spatial shape.
    #[error("grid '{name}' has length {got}, expected {expected}")]
    GridLengthMismatch {
        /// Name of the offending grid.
        name: String,
        /// Expected cell count (`ny * nx`).
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when ensemble members disagree on spatial shape.
    #[error("member shape ({got_ny}, {got_nx}) does not match ({expected_ny}, {expected_nx})")]
    MemberShapeMismatch {
        /// Row count of the first member.
        expected_ny: usize,
        /// Column count of the first member.
        expected_nx: usize,
        /// Row count of the offending member.
        got_ny: usize,
        /// Column count of the offending member.
        got_nx: usize,
    },

    /// Returned when averaging is requested over zero members.
    #[error("cannot average an empty member list")]
    NoMembers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_time_length_mismatch() {
        let err = PointwiseError::TimeLengthMismatch {
            expected: 120,
            got: 119,
        };
        assert_eq!(
            err.to_string(),
            "reference series length 119 does not match field time axis length 120"
        );
    }

    #[test]
    fn display_grid_length_mismatch() {
        let err = PointwiseError::GridLengthMismatch {
            name: "p_value".to_string(),
            expected: 6,
            got: 5,
        };
        assert_eq!(err.to_string(), "grid 'p_value' has length 5, expected 6");
    }

    #[test]
    fn display_member_shape_mismatch() {
        let err = PointwiseError::MemberShapeMismatch {
            expected_ny: 2,
            expected_nx: 3,
            got_ny: 2,
            got_nx: 4,
        };
        assert_eq!(err.to_string(), "member shape (2, 4) does not match (2, 3)");
    }

    #[test]
    fn display_no_members() {
        assert_eq!(
            PointwiseError::NoMembers.to_string(),
            "cannot average an empty member list"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<PointwiseError>();
    }
}
