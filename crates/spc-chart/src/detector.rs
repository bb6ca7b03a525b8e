//! Runs every configured rule over a mean chart

use crate::limits::{ControlChart, ControlLimits};
use crate::rules::{
    OscillationRule, OutOfControlRule, ShiftRule, SideRunRule, StratificationRule, TrendRule,
};
use crate::traits::PatternRule;
use crate::types::{PatternParameters, PatternReport};
use tracing::debug;

/// Special-cause detector for mean charts
///
/// The standard rule set is, in order: out-of-control, run above, run below,
/// trend, shift, oscillation, stratification. Rules are evaluated
/// independently and every rule contributes one finding to the report.
///
/// # Examples
///
/// ```rust
/// use spc_chart::{ControlLimits, PatternDetector, PatternKind};
///
/// let limits = ControlLimits { center: 10.0, ucl: 20.0, lcl: 0.0 };
/// let report = PatternDetector::default().detect(&[5.0; 8], &limits);
///
/// assert!(report.is_detected(PatternKind::Shift));
/// assert_eq!(report.out_of_control_count, 0);
/// ```
pub struct PatternDetector {
    rules: Vec<Box<dyn PatternRule>>,
}

impl PatternDetector {
    /// Detector with the standard rule set at the given run lengths
    pub fn new(params: PatternParameters) -> Self {
        Self {
            rules: vec![
                Box::new(OutOfControlRule),
                Box::new(SideRunRule::above(params.run_length)),
                Box::new(SideRunRule::below(params.run_length)),
                Box::new(TrendRule::new(params.trend_length)),
                Box::new(ShiftRule::new(params.shift_length)),
                Box::new(OscillationRule::new(params.oscillation_length)),
                Box::new(StratificationRule::new(params.stratification_length)),
            ],
        }
    }

    /// Detector with no rules; add them with [`PatternDetector::with_rule`]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule
    pub fn with_rule(mut self, rule: impl PatternRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of configured rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate every rule on `points`
    pub fn detect(&self, points: &[f64], limits: &ControlLimits) -> PatternReport {
        let findings = self
            .rules
            .iter()
            .map(|rule| {
                let finding = rule.evaluate(points, limits);
                if points.len() < rule.minimum_points() {
                    debug!(
                        rule = %rule.kind(),
                        points = points.len(),
                        needed = rule.minimum_points(),
                        "series shorter than rule window"
                    );
                }
                finding
            })
            .collect();

        let report = PatternReport::new(findings);
        debug!(
            detected = report.detected_count,
            out_of_control = report.out_of_control_count,
            "pattern detection complete"
        );
        report
    }

    /// Evaluate every rule on a chart's own values and limits
    pub fn detect_chart(&self, chart: &ControlChart) -> PatternReport {
        self.detect(&chart.values, &chart.limits)
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new(PatternParameters::default())
    }
}

impl std::fmt::Debug for PatternDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternDetector")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, PatternKind};

    #[test]
    fn test_standard_rule_set() {
        let detector = PatternDetector::default();
        assert_eq!(detector.rule_count(), 7);

        let limits = ControlLimits {
            center: 0.0,
            ucl: 1.0,
            lcl: -1.0,
        };
        let report = detector.detect(&[0.1, -0.2], &limits);
        assert_eq!(report.findings.len(), 7);
        assert_eq!(report.detected_count, 0);
        let kinds: Vec<PatternKind> = report.findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PatternKind::OutOfControl,
                PatternKind::RunAbove,
                PatternKind::RunBelow,
                PatternKind::Trend,
                PatternKind::Shift,
                PatternKind::Oscillation,
                PatternKind::Stratification,
            ]
        );
    }

    #[test]
    fn test_increasing_sequence_reports_trend() {
        let limits = ControlLimits {
            center: 4.0,
            ucl: 100.0,
            lcl: -100.0,
        };
        let points: Vec<f64> = (1..=7).map(f64::from).collect();
        let report = PatternDetector::default().detect(&points, &limits);

        let trend = report.finding(PatternKind::Trend).unwrap();
        assert!(trend.detected);
        assert_eq!(trend.point_indices, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(report.out_of_control_count, 0);
    }

    #[test]
    fn test_eight_below_center() {
        let limits = ControlLimits {
            center: 10.0,
            ucl: 20.0,
            lcl: 0.0,
        };
        let report = PatternDetector::default().detect(&[5.0; 8], &limits);

        let shift = report.finding(PatternKind::Shift).unwrap();
        assert!(shift.detected);
        assert_eq!(shift.direction, Some(Direction::Below));
        // Eight points below also satisfy the shorter run rule
        assert!(report.is_detected(PatternKind::RunBelow));
        assert!(!report.is_detected(PatternKind::RunAbove));
    }

    #[test]
    fn test_custom_rule_set() {
        let detector = PatternDetector::empty().with_rule(OutOfControlRule);
        let limits = ControlLimits {
            center: 0.0,
            ucl: 1.0,
            lcl: -1.0,
        };
        let report = detector.detect(&[0.0, 2.0, -2.0], &limits);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.out_of_control_count, 2);
    }

    #[test]
    fn test_nelson_parameters_shorter_trend() {
        let limits = ControlLimits {
            center: 3.5,
            ucl: 100.0,
            lcl: -100.0,
        };
        let points: Vec<f64> = (1..=6).map(f64::from).collect();
        assert!(!PatternDetector::default()
            .detect(&points, &limits)
            .is_detected(PatternKind::Trend));
        assert!(PatternDetector::new(PatternParameters::nelson())
            .detect(&points, &limits)
            .is_detected(PatternKind::Trend));
    }
}
