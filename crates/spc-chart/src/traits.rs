//! Core traits for special-cause detection

use crate::limits::ControlLimits;
use crate::types::{PatternFinding, PatternKind};

/// Properties of a pattern rule that don't depend on the data
pub trait PatternRuleProperties {
    /// Which pattern this rule reports
    fn kind(&self) -> PatternKind;

    /// Fewest points on which the rule can fire
    fn minimum_points(&self) -> usize;
}

/// A single special-cause test applied to a mean chart
///
/// Rules are independent: each sees the full series and limits and returns
/// exactly one finding, whether or not the pattern is present.
pub trait PatternRule: PatternRuleProperties + Send + Sync {
    /// Evaluate the rule on `points` (chart order) against `limits`
    fn evaluate(&self, points: &[f64], limits: &ControlLimits) -> PatternFinding;
}
