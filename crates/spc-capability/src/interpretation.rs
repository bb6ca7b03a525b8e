//! Plain-language verdicts derived from capability indices

use crate::indices::CapabilityIndices;
use crate::types::{DecisionRemark, ProcessRating, ProcessStability, SpecialCause, YesNo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ratio below which Cpk (or Pp) is considered well short of Cp
pub const CENTERING_RATIO: f64 = 0.75;

/// Control-chart signals the stability verdict depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSignals {
    /// Points beyond the mean chart's control limits
    pub out_of_control_points: usize,
    /// Whether a shift pattern was detected
    pub shift_detected: bool,
}

/// Verdicts for one capability study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    /// Yes when Cpk < 0.75 Cp (process off center)
    pub process_shift: YesNo,
    /// Yes when Cp < 1 (spread wider than tolerance)
    pub process_spread: YesNo,
    /// Compares long-term to short-term spread
    pub special_cause: SpecialCause,
    /// Action graded on Cpk
    pub decision_remark: DecisionRemark,
    /// Rating of Cp
    pub process_potential: ProcessRating,
    /// Rating of Cpk
    pub process_performance: ProcessRating,
    /// Stable with no out-of-control points and no shift
    pub process_stability: ProcessStability,
}

impl Interpretation {
    /// Derive every verdict
    ///
    /// Pass full-precision indices; thresholds are compared against
    /// unrounded values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spc_capability::{CapabilityIndices, ControlSignals, DecisionRemark, Interpretation};
    /// use spc_core::SpecificationLimits;
    ///
    /// let limits = SpecificationLimits::new(9.0, 11.0).unwrap();
    /// let indices = CapabilityIndices::from_sigmas(&limits, 10.0, 0.1, 0.1);
    /// let verdict = Interpretation::new(&indices, ControlSignals::default());
    ///
    /// assert_eq!(verdict.decision_remark, DecisionRemark::Excellent);
    /// ```
    pub fn new(indices: &CapabilityIndices, signals: ControlSignals) -> Self {
        let stable = signals.out_of_control_points == 0 && !signals.shift_detected;
        Self {
            process_shift: YesNo::from_bool(indices.cpk < CENTERING_RATIO * indices.cp),
            process_spread: YesNo::from_bool(indices.cp < 1.0),
            special_cause: special_cause(indices.pp, indices.cp),
            decision_remark: DecisionRemark::from_cpk(indices.cpk),
            process_potential: ProcessRating::from_index(indices.cp),
            process_performance: ProcessRating::from_index(indices.cpk),
            process_stability: if stable {
                ProcessStability::Stable
            } else {
                ProcessStability::Unstable
            },
        }
    }
}

fn special_cause(pp: f64, cp: f64) -> SpecialCause {
    if pp >= cp {
        SpecialCause::Undetectable
    } else if pp < CENTERING_RATIO * cp {
        SpecialCause::Yes
    } else {
        SpecialCause::No
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (potential {}, performance {}, {})",
            self.decision_remark,
            self.process_potential,
            self.process_performance,
            self.process_stability
        )
    }
}
