//! Core traits for histogram building

use crate::types::DistributionHistogram;
use spc_core::Result;

/// Strategy for binning a set of measurements
pub trait HistogramBuilder {
    /// Build a histogram from the measurements, in any order
    fn build(&self, data: &[f64]) -> Result<DistributionHistogram>;

    /// Number of bins the builder would use for `n` values, if fixed in advance
    fn target_bins(&self, _n: usize) -> Option<usize> {
        None
    }
}
