//! Process capability and performance indices
//!
//! This crate turns measurements, specification limits and control-chart
//! statistics into capability indices and plain-language verdicts.
//!
//! # Overview
//!
//! Capability indices compare the width of the tolerance band to the natural
//! spread of the process. Two spread estimates are used:
//!
//! - **Within-subgroup sigma** (R-bar / d2): short-term variation, giving the
//!   Cp family.
//! - **Overall sigma** (sample standard deviation): long-term variation,
//!   giving the Pp family.
//!
//! A large gap between the two families hints at special causes acting
//! between subgroups.
//!
//! # Verdicts
//!
//! [`Interpretation`] grades a set of indices:
//!
//! | Cpk           | Decision remark                                          |
//! |---------------|----------------------------------------------------------|
//! | >= 1.67       | Process Excellent                                        |
//! | [1.45, 1.67)  | Process is more capable, Scope for Further Improvement   |
//! | [1.33, 1.45)  | Process is capable, Scope for Further Improvement        |
//! | [1.00, 1.33)  | Process is slightly capable, need 100% inspection        |
//! | < 1.00        | Stop Process change, process design                      |
//!
//! # Examples
//!
//! ```rust
//! use spc_capability::{ControlSignals, Interpretation, ProcessCapability, ProcessStability};
//! use spc_core::{SpecificationLimits, SubgroupSize};
//!
//! let limits = SpecificationLimits::new(9.0, 11.0).unwrap();
//! let data = [9.9, 10.0, 10.1, 10.0, 9.95, 10.05];
//!
//! let report = ProcessCapability::new(limits)
//!     .compute(&data, 10.0, 0.1, SubgroupSize::INDIVIDUALS)
//!     .unwrap();
//! let verdict = Interpretation::new(&report.indices, ControlSignals::default());
//!
//! assert_eq!(verdict.process_stability, ProcessStability::Stable);
//! println!("{} -> {}", report.indices.for_presentation(), verdict.decision_remark);
//! ```

mod indices;
mod interpretation;
mod types;

pub use indices::{
    CapabilityIndices, CapabilityReport, Conformance, ExpectedPpm, ProcessCapability,
    PRESENTATION_DECIMALS,
};
pub use interpretation::{ControlSignals, Interpretation, CENTERING_RATIO};
pub use types::{DecisionRemark, ProcessRating, ProcessStability, SpecialCause, YesNo};

pub use spc_core::{Error, Result};
