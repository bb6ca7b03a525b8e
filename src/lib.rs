//! Statistical process control toolkit
//!
//! `spc-stats` turns a batch of dimensional inspection records into control
//! charts, capability indices, a distribution histogram, special-cause
//! findings and plain-language verdicts.
//!
//! # Crates
//!
//! | Crate            | Provides                                             |
//! |------------------|------------------------------------------------------|
//! | `spc-core`       | records, extraction, subgrouping, constants, errors  |
//! | `spc-chart`      | X-bar/R and individuals/MR limits, pattern rules     |
//! | `spc-capability` | Cp/Cpk, Pp/Ppk, expected PPM, verdicts               |
//! | `spc-histogram`  | spec-anchored distribution histogram                 |
//!
//! This crate re-exports all of them and adds the [`analyze`] pipeline.
//!
//! # Examples
//!
//! ```rust
//! use spc_stats::{analyze, AnalysisRequest, MeasurementRecord, SubgroupSize};
//!
//! let values = [10.02, 10.01, 10.03, 9.99, 10.00, 10.02, 10.01, 10.00, 10.02, 10.03];
//! let records: Vec<MeasurementRecord> = values
//!     .iter()
//!     .map(|&v| MeasurementRecord::new(1, v, "9.95", "10.05"))
//!     .collect();
//!
//! let result = analyze(&AnalysisRequest::new(records, SubgroupSize::INDIVIDUALS)).unwrap();
//! println!("Cpk = {:.2}: {}", result.metrics.indices.cpk, result.verdict());
//! for finding in result.detected_patterns() {
//!     println!("  {finding}");
//! }
//! ```
//!
//! # Features
//!
//! - `parallel`: run [`Analyzer::analyze_batch`] on the rayon thread pool

mod analysis;
mod config;

pub use analysis::{
    analyze, analyze_batch, AnalysisRequest, AnalysisResult, Analyzer, ProcessMetrics,
};
pub use config::AnalysisConfig;

// Re-export member crates
pub use spc_capability;
pub use spc_chart;
pub use spc_core;
pub use spc_histogram;

pub use spc_capability::{
    CapabilityIndices, DecisionRemark, Interpretation, ProcessRating, ProcessStability,
    SpecialCause, YesNo,
};
pub use spc_chart::{
    ControlCharts, ControlLimits, Direction, PatternFinding, PatternKind, PatternParameters,
};
pub use spc_core::{
    Error, LimitsPolicy, MeasurementRecord, RangePolicy, RawValue, Result, SpecificationLimits,
    SubgroupSize,
};
pub use spc_histogram::{DistributionHistogram, DistributionSummary, HistogramBin};
