//! Configuration for the analysis pipeline

use serde::{Deserialize, Serialize};
use spc_chart::PatternParameters;
use spc_core::{Error, LimitsPolicy, RangePolicy, Result, DEFAULT_SIGMA_FLOOR};
use spc_histogram::DEFAULT_MIN_BIN_WIDTH;

/// Pipeline configuration
///
/// Every field has a default, so a partial JSON object is accepted:
///
/// ```rust
/// use spc_stats::{AnalysisConfig, RangePolicy};
///
/// let config: AnalysisConfig = serde_json::from_str(r#"{ "range_policy": "zero_fill" }"#).unwrap();
/// assert_eq!(config.range_policy, RangePolicy::ZeroFill);
/// assert_eq!(config.patterns.shift_length, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Treatment of a trailing single-member subgroup in the range series
    pub range_policy: RangePolicy,
    /// Reconciliation of specification limits across records
    pub limits_policy: LimitsPolicy,
    /// Replacement for a sigma estimate of exactly zero
    pub sigma_floor: f64,
    /// Histogram bin width used when all measurements are identical
    pub min_bin_width: f64,
    /// Run lengths for the pattern rules
    pub patterns: PatternParameters,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            range_policy: RangePolicy::Skip,
            limits_policy: LimitsPolicy::RequireUniform,
            sigma_floor: DEFAULT_SIGMA_FLOOR,
            min_bin_width: DEFAULT_MIN_BIN_WIDTH,
            patterns: PatternParameters::default(),
        }
    }
}

impl AnalysisConfig {
    /// Default configuration with Nelson's run lengths
    pub fn nelson() -> Self {
        Self {
            patterns: PatternParameters::nelson(),
            ..Self::default()
        }
    }

    /// Lenient configuration for legacy data: zero-filled singleton ranges
    /// and limits taken from the first record
    pub fn lenient() -> Self {
        Self {
            range_policy: RangePolicy::ZeroFill,
            limits_policy: LimitsPolicy::FirstRecord,
            ..Self::default()
        }
    }

    /// Reject non-positive floors and unusable run lengths
    pub fn validate(&self) -> Result<()> {
        if !(self.sigma_floor.is_finite() && self.sigma_floor > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "sigma_floor must be positive and finite, got {}",
                self.sigma_floor
            )));
        }
        if !(self.min_bin_width.is_finite() && self.min_bin_width > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "min_bin_width must be positive and finite, got {}",
                self.min_bin_width
            )));
        }
        self.patterns.validate()
    }
}
