//! Control charts and special-cause detection
//!
//! This crate turns subgroup statistics into mean and range control charts
//! and scans the mean chart for non-random patterns.
//!
//! # Control limits
//!
//! - Mean chart: CL = grand mean, UCL/LCL = CL ± A2 * R-bar
//! - Range chart: CL = R-bar, UCL = D4 * R-bar, LCL = max(0, D3 * R-bar)
//!
//! # Pattern rules
//!
//! | Rule            | Fires on                                          |
//! |-----------------|---------------------------------------------------|
//! | Out of control  | any point beyond UCL or LCL                       |
//! | Run above/below | 7 points in a row on one side of center           |
//! | Trend           | 7 points in a row strictly rising or falling      |
//! | Shift           | 8 points in a row on one side of center           |
//! | Oscillation     | 14 points in a row alternating up and down        |
//! | Stratification  | 15 points in a row within (UCL - LCL) / 6 of center |
//!
//! Run lengths are configurable through [`PatternParameters`].
//!
//! # Example
//!
//! ```rust
//! use spc_chart::{control_limits, PatternDetector, PatternKind};
//! use spc_core::SubgroupSize;
//!
//! let means = [10.0, 10.1, 9.9, 10.0, 10.2];
//! let moving_ranges = [0.1, 0.2, 0.1, 0.2];
//! let charts = control_limits(&means, &moving_ranges, SubgroupSize::INDIVIDUALS).unwrap();
//!
//! let report = PatternDetector::default().detect_chart(&charts.mean_chart);
//! assert!(!report.is_detected(PatternKind::OutOfControl));
//! ```

pub mod detector;
pub mod limits;
pub mod rules;
pub mod traits;
pub mod types;

pub use detector::PatternDetector;
pub use limits::{control_limits, control_limits_for, ControlChart, ControlCharts, ControlLimits};
pub use rules::{
    OscillationRule, OutOfControlRule, ShiftRule, SideRunRule, StratificationRule, TrendRule,
};
pub use traits::{PatternRule, PatternRuleProperties};
pub use types::{Direction, PatternFinding, PatternKind, PatternParameters, PatternReport};

pub use spc_core::Result;
