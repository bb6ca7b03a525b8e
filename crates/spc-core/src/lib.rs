//! Core types for statistical process control
//!
//! This crate holds the pieces every other spc-stats crate builds on:
//!
//! - [`error`]: the unified [`Error`] type and [`Result`] alias
//! - [`constants`]: the A2/D3/D4/d2 table and the validated [`SubgroupSize`]
//! - [`measurement`]: raw inspection records and their extraction into a
//!   numeric sequence with one pair of [`SpecificationLimits`]
//! - [`subgroup`]: partitioning into rational subgroups (means and ranges)
//! - [`stats`]: small descriptive statistics helpers
//!
//! Everything here is a pure function of its inputs.
//!
//! # Example
//!
//! ```rust
//! use spc_core::{extract, subgroup, LimitsPolicy, MeasurementRecord, RangePolicy, SubgroupSize};
//!
//! let records: Vec<MeasurementRecord> = ["10.1", "10.3", "10.2", "10.4", "n/a"]
//!     .iter()
//!     .map(|v| MeasurementRecord::new(1, *v, "10.0", "10.5"))
//!     .collect();
//!
//! let size = SubgroupSize::new(2).unwrap();
//! let measurements = extract(&records, size, LimitsPolicy::default()).unwrap();
//! assert_eq!(measurements.discarded, 1);
//!
//! let groups = subgroup(&measurements.values, size, RangePolicy::default()).unwrap();
//! assert_eq!(groups.means.len(), 2);
//! ```

pub mod constants;
pub mod error;
pub mod measurement;
pub mod stats;
pub mod subgroup;

pub use constants::{constants_for, ChartConstants, SubgroupSize, MAX_SUBGROUP_SIZE};
pub use error::{Error, Result};
pub use measurement::{
    extract, LimitsPolicy, MeasurementRecord, Measurements, RawValue, SpecificationLimits,
};
pub use stats::DEFAULT_SIGMA_FLOOR;
pub use subgroup::{moving_ranges, subgroup, RangePolicy, Subgroups};
