//! Types used for special-cause pattern detection

use serde::{Deserialize, Serialize};
use spc_core::{Error, Result};
use std::fmt;

/// The non-random patterns checked on a mean chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    /// Point beyond a control limit
    OutOfControl,
    /// Run of points above the center line
    RunAbove,
    /// Run of points below the center line
    RunBelow,
    /// Steadily increasing or decreasing run
    Trend,
    /// Sustained run on one side of the center line
    Shift,
    /// Points alternating up and down
    Oscillation,
    /// Points hugging the center line
    Stratification,
}

impl PatternKind {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::OutOfControl => "Out of Control",
            Self::RunAbove => "Run Above",
            Self::RunBelow => "Run Below",
            Self::Trend => "Trend",
            Self::Shift => "Shift",
            Self::Oscillation => "Oscillation",
            Self::Stratification => "Stratification",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Side of the center line, or direction of travel for a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
    Increasing,
    Decreasing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Above => "above",
            Direction::Below => "below",
            Direction::Increasing => "increasing",
            Direction::Decreasing => "decreasing",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one pattern check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFinding {
    /// Which pattern was checked
    pub kind: PatternKind,
    /// Whether the pattern was found
    pub detected: bool,
    /// Plain-language description of the outcome
    pub description: String,
    /// 1-based indices of the points involved, ascending
    pub point_indices: Vec<usize>,
    /// Direction of the first qualifying run, where meaningful
    pub direction: Option<Direction>,
}

impl PatternFinding {
    /// A check that found nothing
    pub fn clear(kind: PatternKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            detected: false,
            description: description.into(),
            point_indices: Vec::new(),
            direction: None,
        }
    }

    /// A check that found the pattern at the given points
    pub fn detected(
        kind: PatternKind,
        description: impl Into<String>,
        point_indices: Vec<usize>,
        direction: Option<Direction>,
    ) -> Self {
        Self {
            kind,
            detected: true,
            description: description.into(),
            point_indices,
            direction,
        }
    }
}

impl fmt::Display for PatternFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.detected { "detected" } else { "not detected" };
        write!(f, "{} ({}): {}", self.kind, status, self.description)
    }
}

/// Aggregate of all pattern checks on one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    /// One finding per rule, in rule order
    pub findings: Vec<PatternFinding>,
    /// Number of points beyond the control limits
    pub out_of_control_count: usize,
    /// Number of rules that fired
    pub detected_count: usize,
}

impl PatternReport {
    /// Build a report, deriving the aggregate counts
    pub fn new(findings: Vec<PatternFinding>) -> Self {
        let out_of_control_count = findings
            .iter()
            .filter(|f| f.kind == PatternKind::OutOfControl)
            .map(|f| f.point_indices.len())
            .sum();
        let detected_count = findings.iter().filter(|f| f.detected).count();
        Self {
            findings,
            out_of_control_count,
            detected_count,
        }
    }

    /// Finding for a given pattern, if that rule ran
    pub fn finding(&self, kind: PatternKind) -> Option<&PatternFinding> {
        self.findings.iter().find(|f| f.kind == kind)
    }

    /// Whether a given pattern was detected
    pub fn is_detected(&self, kind: PatternKind) -> bool {
        self.finding(kind).is_some_and(|f| f.detected)
    }

    /// Whether any special-cause pattern was detected
    pub fn any_detected(&self) -> bool {
        self.detected_count > 0
    }
}

/// Run lengths for the pattern rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternParameters {
    /// Points in a row on one side of center for a run
    pub run_length: usize,
    /// Points in a row steadily moving one way for a trend
    pub trend_length: usize,
    /// Points in a row on one side of center for a shift
    pub shift_length: usize,
    /// Points in a row alternating up and down
    pub oscillation_length: usize,
    /// Points in a row within one zone width of center
    pub stratification_length: usize,
}

impl Default for PatternParameters {
    fn default() -> Self {
        Self {
            run_length: 7,
            trend_length: 7,
            shift_length: 8,
            oscillation_length: 14,
            stratification_length: 15,
        }
    }
}

impl PatternParameters {
    /// Run lengths from Nelson's tests for special causes
    pub fn nelson() -> Self {
        Self {
            run_length: 9,
            trend_length: 6,
            shift_length: 9,
            oscillation_length: 14,
            stratification_length: 15,
        }
    }

    /// Reject lengths that cannot describe a run
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("run_length", self.run_length, 1),
            ("trend_length", self.trend_length, 2),
            ("shift_length", self.shift_length, 1),
            ("oscillation_length", self.oscillation_length, 3),
            ("stratification_length", self.stratification_length, 1),
        ];
        for (name, value, min) in lengths {
            if value < min {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be at least {min}, got {value}"
                )));
            }
        }
        Ok(())
    }
}
