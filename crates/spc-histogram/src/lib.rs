//! Distribution histograms for process measurements
//!
//! This crate bins raw measurements into a frequency histogram that is
//! anchored at the lower specification limit, so the tolerance band and the
//! process spread can be drawn on the same axis.
//!
//! # Key Features
//!
//! - **Square-root rule**: `ceil(sqrt(N))` equal-width bins by default
//! - **Spec anchoring**: the first bin starts at `min(data_min, LSL)`
//! - **Degenerate data**: identical values get a minimal positive bin width
//! - **Summary statistics**: count, mean, standard deviation, extremes,
//!   limits and target travel with the bins
//!
//! # Examples
//!
//! ```rust
//! use spc_core::SpecificationLimits;
//! use spc_histogram::{HistogramBuilder, SpecAnchoredBuilder};
//!
//! let limits = SpecificationLimits::new(9.9, 10.1).unwrap();
//! let data = vec![9.95, 9.98, 10.0, 10.0, 10.01, 10.02, 10.03, 10.05];
//! let histogram = SpecAnchoredBuilder::new(limits).build(&data).unwrap();
//!
//! for (center, frequency) in histogram.pairs() {
//!     println!("{center:.3}: {}", "#".repeat(frequency));
//! }
//! assert_eq!(histogram.total_frequency(), data.len());
//! ```

mod builders;
mod traits;
mod types;

pub use builders::{sqrt_bin_count, SpecAnchoredBuilder, DEFAULT_MIN_BIN_WIDTH};
pub use traits::HistogramBuilder;
pub use types::{DistributionHistogram, DistributionSummary, HistogramBin};

pub use spc_core::{Error, Result};
