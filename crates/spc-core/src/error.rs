//! Error types for statistical process control analysis
//!
//! Provides a unified error type for all spc-stats crates. Every variant is
//! fatal to the analysis that raised it; malformed individual records are not
//! errors (they are dropped by the extractor).

use thiserror::Error;

/// Core error type for SPC operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Fewer valid measurements than the operation needs
    #[error("Insufficient data: expected at least {expected} valid measurements, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Specification limits are inverted or equal
    #[error("Invalid specification limits: lsl ({lsl}) must be less than usl ({usl})")]
    InvalidLimits { lsl: f64, usl: f64 },

    /// A record in the batch carries different specification limits
    #[error(
        "Inconsistent specification limits at record {index}: expected ({expected_lsl}, {expected_usl}), found ({lsl}, {usl})"
    )]
    InconsistentLimits {
        index: usize,
        expected_lsl: f64,
        expected_usl: f64,
        lsl: f64,
        usl: f64,
    },

    /// No range samples could be formed from the subgroups
    #[error("Empty range series: no subgroup produced a range sample")]
    EmptyRangeSeries,

    /// Too few measurements to estimate a variance
    #[error("Degenerate sample: variance needs at least 2 measurements, got {actual}")]
    DegenerateSample { actual: usize },

    /// The measurement sequence is empty
    #[error("Empty measurement sequence")]
    EmptySequence,

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an input with no usable measurements
    pub fn empty_input(expected: usize) -> Self {
        Self::InsufficientData {
            expected: expected.max(1),
            actual: 0,
        }
    }

    /// Create an error for a subgroup size outside `1..=5`
    pub fn invalid_subgroup_size(size: usize) -> Self {
        Self::InvalidParameter(format!("subgroup size {size} must be in 1..=5"))
    }

    /// Number of valid measurements reported by the error, if it carries one
    pub fn measurement_count(&self) -> Option<usize> {
        match self {
            Self::InsufficientData { actual, .. } | Self::DegenerateSample { actual } => {
                Some(*actual)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InsufficientData {
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 5 valid measurements, got 3"
        );

        let err = Error::InvalidLimits { lsl: 10.5, usl: 10.0 };
        assert_eq!(
            err.to_string(),
            "Invalid specification limits: lsl (10.5) must be less than usl (10)"
        );

        let err = Error::EmptyRangeSeries;
        assert_eq!(
            err.to_string(),
            "Empty range series: no subgroup produced a range sample"
        );

        let err = Error::DegenerateSample { actual: 1 };
        assert_eq!(
            err.to_string(),
            "Degenerate sample: variance needs at least 2 measurements, got 1"
        );

        let err = Error::EmptySequence;
        assert_eq!(err.to_string(), "Empty measurement sequence");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::empty_input(3);
        assert_eq!(
            err,
            Error::InsufficientData {
                expected: 3,
                actual: 0
            }
        );

        // An empty request still needs at least one measurement
        assert_eq!(
            Error::empty_input(0),
            Error::InsufficientData {
                expected: 1,
                actual: 0
            }
        );

        let err = Error::invalid_subgroup_size(7);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: subgroup size 7 must be in 1..=5"
        );
    }

    #[test]
    fn test_measurement_count() {
        let err = Error::InsufficientData {
            expected: 5,
            actual: 4,
        };
        assert_eq!(err.measurement_count(), Some(4));
        assert_eq!(Error::DegenerateSample { actual: 1 }.measurement_count(), Some(1));
        assert_eq!(Error::EmptyRangeSeries.measurement_count(), None);
    }

    #[test]
    fn test_inconsistent_limits_display() {
        let err = Error::InconsistentLimits {
            index: 3,
            expected_lsl: 10.0,
            expected_usl: 10.5,
            lsl: 9.0,
            usl: 10.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("record 3"));
        assert!(msg.contains("(10, 10.5)"));
        assert!(msg.contains("(9, 10.5)"));
    }

    #[test]
    fn test_result_type_alias() {
        fn check_sample_size(data: &[f64], min_size: usize) -> Result<()> {
            if data.len() < min_size {
                return Err(Error::InsufficientData {
                    expected: min_size,
                    actual: data.len(),
                });
            }
            Ok(())
        }

        assert!(check_sample_size(&[1.0, 2.0], 5).is_err());
        assert!(check_sample_size(&[1.0, 2.0, 3.0, 4.0, 5.0], 5).is_ok());
    }
}
