//! Special-cause rules for mean charts
//!
//! Each rule scans the chart for maximal runs of points sharing a property
//! (side of the center line, direction of travel, closeness to center) and
//! fires when a run reaches the configured length. Indices in findings are
//! 1-based chart positions.
//!
//! # References
//!
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - Nelson, L.S. (1984). "The Shewhart Control Chart - Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.

use crate::limits::ControlLimits;
use crate::traits::{PatternRule, PatternRuleProperties};
use crate::types::{Direction, PatternFinding, PatternKind};

/// A maximal run of consecutive items sharing a label
#[derive(Debug, Clone, Copy, PartialEq)]
struct Run<L> {
    start: usize,
    len: usize,
    label: L,
}

impl<L> Run<L> {
    fn end(&self) -> usize {
        self.start + self.len
    }
}

fn side_of(value: f64, center: f64) -> Option<Direction> {
    if value > center {
        Some(Direction::Above)
    } else if value < center {
        Some(Direction::Below)
    } else {
        None
    }
}

fn step_of(from: f64, to: f64) -> Option<Direction> {
    if to > from {
        Some(Direction::Increasing)
    } else if to < from {
        Some(Direction::Decreasing)
    } else {
        None
    }
}

/// Point-to-point directions; `steps[i]` joins points `i` and `i + 1`
fn steps(points: &[f64]) -> Vec<Option<Direction>> {
    points.windows(2).map(|w| step_of(w[0], w[1])).collect()
}

/// Split a label sequence into maximal runs; `None` breaks any run
fn label_runs<L: Copy + PartialEq>(labels: impl IntoIterator<Item = Option<L>>) -> Vec<Run<L>> {
    let mut runs = Vec::new();
    let mut current: Option<Run<L>> = None;

    for (i, label) in labels.into_iter().enumerate() {
        current = match (current, label) {
            (Some(mut run), Some(l)) if run.label == l => {
                run.len += 1;
                Some(run)
            }
            (prev, next) => {
                runs.extend(prev);
                next.map(|label| Run { start: i, len: 1, label })
            }
        };
    }
    runs.extend(current);
    runs
}

/// Maximal runs of steps where each step reverses the previous one
fn alternating_runs(steps: &[Option<Direction>]) -> Vec<Run<()>> {
    let mut runs = Vec::new();
    let mut current: Option<Run<()>> = None;

    for (i, step) in steps.iter().enumerate() {
        let reverses = i > 0 && step.is_some() && steps[i - 1].is_some() && *step != steps[i - 1];
        current = match current {
            Some(mut run) if reverses => {
                run.len += 1;
                Some(run)
            }
            prev => {
                runs.extend(prev);
                step.map(|_| Run { start: i, len: 1, label: () })
            }
        };
    }
    runs.extend(current);
    runs
}

/// 1-based point indices covered by inclusive zero-based spans
fn collect_points(spans: impl IntoIterator<Item = (usize, usize)>) -> Vec<usize> {
    let mut points: Vec<usize> = spans
        .into_iter()
        .flat_map(|(first, last)| (first + 1)..=(last + 1))
        .collect();
    points.sort_unstable();
    points.dedup();
    points
}

fn describe_runs(count: usize, first: (usize, usize), what: &str) -> String {
    let (first, last) = (first.0 + 1, first.1 + 1);
    let points = last - first + 1;
    if count == 1 {
        format!("{points} consecutive points {what} (points {first}-{last})")
    } else {
        format!(
            "{count} runs found; first has {points} consecutive points {what} (points {first}-{last})"
        )
    }
}

// ---------------------------------------------------------------------------
// Out of control
// ---------------------------------------------------------------------------

/// Any point above the UCL or below the LCL
#[derive(Debug, Clone, Copy, Default)]
pub struct OutOfControlRule;

impl PatternRuleProperties for OutOfControlRule {
    fn kind(&self) -> PatternKind {
        PatternKind::OutOfControl
    }

    fn minimum_points(&self) -> usize {
        1
    }
}

impl PatternRule for OutOfControlRule {
    fn evaluate(&self, points: &[f64], limits: &ControlLimits) -> PatternFinding {
        let offending: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, &v)| limits.is_beyond(v))
            .map(|(i, _)| i + 1)
            .collect();

        if offending.is_empty() {
            return PatternFinding::clear(self.kind(), "All points within control limits");
        }
        let above = points.iter().filter(|&&v| v > limits.ucl).count();
        let below = offending.len() - above;
        let direction = match (above, below) {
            (0, _) => Some(Direction::Below),
            (_, 0) => Some(Direction::Above),
            _ => None,
        };
        PatternFinding::detected(
            self.kind(),
            format!(
                "{} point(s) beyond control limits ({above} above UCL, {below} below LCL)",
                offending.len()
            ),
            offending,
            direction,
        )
    }
}

// ---------------------------------------------------------------------------
// Runs on one side of the center line
// ---------------------------------------------------------------------------

/// A run of points on one given side of the center line
#[derive(Debug, Clone, Copy)]
pub struct SideRunRule {
    side: Direction,
    length: usize,
}

impl SideRunRule {
    /// Run of `length` points strictly above center
    pub fn above(length: usize) -> Self {
        Self {
            side: Direction::Above,
            length,
        }
    }

    /// Run of `length` points strictly below center
    pub fn below(length: usize) -> Self {
        Self {
            side: Direction::Below,
            length,
        }
    }
}

impl PatternRuleProperties for SideRunRule {
    fn kind(&self) -> PatternKind {
        match self.side {
            Direction::Below => PatternKind::RunBelow,
            _ => PatternKind::RunAbove,
        }
    }

    fn minimum_points(&self) -> usize {
        self.length
    }
}

impl PatternRule for SideRunRule {
    fn evaluate(&self, points: &[f64], limits: &ControlLimits) -> PatternFinding {
        let runs: Vec<Run<Direction>> = label_runs(points.iter().map(|&v| side_of(v, limits.center)))
            .into_iter()
            .filter(|r| r.label == self.side && r.len >= self.length)
            .collect();

        match runs.first() {
            None => PatternFinding::clear(
                self.kind(),
                format!(
                    "No run of {} or more points {} the center line",
                    self.length, self.side
                ),
            ),
            Some(first) => PatternFinding::detected(
                self.kind(),
                describe_runs(
                    runs.len(),
                    (first.start, first.end() - 1),
                    &format!("{} the center line", self.side),
                ),
                collect_points(runs.iter().map(|r| (r.start, r.end() - 1))),
                Some(self.side),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Shift
// ---------------------------------------------------------------------------

/// A sustained run on either side of the center line
#[derive(Debug, Clone, Copy)]
pub struct ShiftRule {
    length: usize,
}

impl ShiftRule {
    /// Shift after `length` points in a row on one side of center
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl PatternRuleProperties for ShiftRule {
    fn kind(&self) -> PatternKind {
        PatternKind::Shift
    }

    fn minimum_points(&self) -> usize {
        self.length
    }
}

impl PatternRule for ShiftRule {
    fn evaluate(&self, points: &[f64], limits: &ControlLimits) -> PatternFinding {
        let runs: Vec<Run<Direction>> = label_runs(points.iter().map(|&v| side_of(v, limits.center)))
            .into_iter()
            .filter(|r| r.len >= self.length)
            .collect();

        match runs.first() {
            None => PatternFinding::clear(
                self.kind(),
                format!(
                    "No run of {} or more points on one side of the center line",
                    self.length
                ),
            ),
            Some(first) => PatternFinding::detected(
                self.kind(),
                describe_runs(
                    runs.len(),
                    (first.start, first.end() - 1),
                    &format!("{} the center line", first.label),
                ),
                collect_points(runs.iter().map(|r| (r.start, r.end() - 1))),
                Some(first.label),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Points steadily increasing or steadily decreasing; ties break the run
#[derive(Debug, Clone, Copy)]
pub struct TrendRule {
    length: usize,
}

impl TrendRule {
    /// Trend after `length` points in a row strictly rising or falling
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl PatternRuleProperties for TrendRule {
    fn kind(&self) -> PatternKind {
        PatternKind::Trend
    }

    fn minimum_points(&self) -> usize {
        self.length
    }
}

impl PatternRule for TrendRule {
    fn evaluate(&self, points: &[f64], _limits: &ControlLimits) -> PatternFinding {
        // k same-direction steps span k + 1 points
        let runs: Vec<Run<Direction>> = label_runs(steps(points))
            .into_iter()
            .filter(|r| r.len + 1 >= self.length)
            .collect();

        match runs.first() {
            None => PatternFinding::clear(
                self.kind(),
                format!("No run of {} or more steadily moving points", self.length),
            ),
            Some(first) => PatternFinding::detected(
                self.kind(),
                describe_runs(
                    runs.len(),
                    (first.start, first.end()),
                    &first.label.to_string(),
                ),
                collect_points(runs.iter().map(|r| (r.start, r.end()))),
                Some(first.label),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Oscillation
// ---------------------------------------------------------------------------

/// Points alternating up and down without two moves in the same direction
#[derive(Debug, Clone, Copy)]
pub struct OscillationRule {
    length: usize,
}

impl OscillationRule {
    /// Oscillation after `length` points in a row alternating up and down
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl PatternRuleProperties for OscillationRule {
    fn kind(&self) -> PatternKind {
        PatternKind::Oscillation
    }

    fn minimum_points(&self) -> usize {
        self.length
    }
}

impl PatternRule for OscillationRule {
    fn evaluate(&self, points: &[f64], _limits: &ControlLimits) -> PatternFinding {
        let runs: Vec<Run<()>> = alternating_runs(&steps(points))
            .into_iter()
            .filter(|r| r.len + 1 >= self.length)
            .collect();

        match runs.first() {
            None => PatternFinding::clear(
                self.kind(),
                format!("No run of {} or more alternating points", self.length),
            ),
            Some(first) => PatternFinding::detected(
                self.kind(),
                describe_runs(
                    runs.len(),
                    (first.start, first.end()),
                    "alternating up and down",
                ),
                collect_points(runs.iter().map(|r| (r.start, r.end()))),
                None,
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Stratification
// ---------------------------------------------------------------------------

/// Points clustered within one zone width (a sixth of UCL - LCL) of center
#[derive(Debug, Clone, Copy)]
pub struct StratificationRule {
    length: usize,
}

impl StratificationRule {
    /// Stratification after `length` points in a row within one zone of center
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl PatternRuleProperties for StratificationRule {
    fn kind(&self) -> PatternKind {
        PatternKind::Stratification
    }

    fn minimum_points(&self) -> usize {
        self.length
    }
}

impl PatternRule for StratificationRule {
    fn evaluate(&self, points: &[f64], limits: &ControlLimits) -> PatternFinding {
        let band = limits.zone_width();
        let runs: Vec<Run<()>> = label_runs(
            points
                .iter()
                .map(|&v| ((v - limits.center).abs() <= band).then_some(())),
        )
        .into_iter()
        .filter(|r| r.len >= self.length)
        .collect();

        match runs.first() {
            None => PatternFinding::clear(
                self.kind(),
                format!(
                    "No run of {} or more points hugging the center line",
                    self.length
                ),
            ),
            Some(first) => PatternFinding::detected(
                self.kind(),
                describe_runs(
                    runs.len(),
                    (first.start, first.end() - 1),
                    &format!("within {band:.4} of the center line"),
                ),
                collect_points(runs.iter().map(|r| (r.start, r.end() - 1))),
                None,
            ),
        }
    }
}
