//! Histogram building strategies

use crate::traits::HistogramBuilder;
use crate::types::{DistributionHistogram, DistributionSummary, HistogramBin};
use spc_core::{stats, Error, Result, SpecificationLimits};
use tracing::debug;

/// Bin width used when every measurement is identical
pub const DEFAULT_MIN_BIN_WIDTH: f64 = 1e-6;

/// Square-root rule: ceil(sqrt(n)) bins, at least one
pub fn sqrt_bin_count(n: usize) -> usize {
    ((n as f64).sqrt().ceil() as usize).max(1)
}

/// Histogram anchored at the lower specification limit
///
/// Bins start at `min(data_min, lsl)` and have width `(max - min) / bins`,
/// so the lower tolerance edge is always visible. Values past the last edge
/// fall into the last bin and the largest value always does.
///
/// # Examples
///
/// ```rust
/// use spc_core::SpecificationLimits;
/// use spc_histogram::{HistogramBuilder, SpecAnchoredBuilder};
///
/// let limits = SpecificationLimits::new(0.0, 10.0).unwrap();
/// let data = [2.0, 3.0, 3.5, 4.0, 5.0, 6.0, 6.5, 8.0, 9.0];
/// let hist = SpecAnchoredBuilder::new(limits).build(&data).unwrap();
///
/// assert_eq!(hist.bin_count(), 3);
/// assert_eq!(hist.total_frequency(), data.len());
/// assert_eq!(hist.summary().target, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecAnchoredBuilder {
    limits: SpecificationLimits,
    min_bin_width: f64,
    bin_count: Option<usize>,
}

impl SpecAnchoredBuilder {
    /// Builder using the square-root rule for the bin count
    pub fn new(limits: SpecificationLimits) -> Self {
        Self {
            limits,
            min_bin_width: DEFAULT_MIN_BIN_WIDTH,
            bin_count: None,
        }
    }

    /// Override the width used for zero-range data
    pub fn with_min_bin_width(mut self, width: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "minimum bin width must be positive and finite, got {width}"
            )));
        }
        self.min_bin_width = width;
        Ok(self)
    }

    /// Use a fixed number of bins instead of the square-root rule
    pub fn with_bin_count(mut self, bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(Error::InvalidParameter(
                "bin count must be at least 1".to_string(),
            ));
        }
        self.bin_count = Some(bins);
        Ok(self)
    }

    fn summary(&self, data: &[f64], min: f64, max: f64) -> Result<DistributionSummary> {
        let std_dev = if data.len() < 2 {
            0.0
        } else {
            stats::sample_std_dev(data)?
        };
        Ok(DistributionSummary {
            count: data.len(),
            mean: stats::mean(data)?,
            std_dev,
            min,
            max,
            lsl: self.limits.lsl,
            usl: self.limits.usl,
            target: self.limits.target(),
        })
    }
}

impl HistogramBuilder for SpecAnchoredBuilder {
    fn build(&self, data: &[f64]) -> Result<DistributionHistogram> {
        let (min, max) = stats::min_max(data)?;
        let bin_count = self.bin_count.unwrap_or_else(|| sqrt_bin_count(data.len()));

        let bin_start = min.min(self.limits.lsl);
        let mut bin_width = (max - min) / bin_count as f64;
        if bin_width == 0.0 {
            bin_width = self.min_bin_width;
        }
        debug!(bin_count, bin_start, bin_width, "histogram geometry");

        let last = bin_count - 1;
        let mut frequencies = vec![0usize; bin_count];
        for &value in data {
            let index = if value == max {
                last
            } else {
                ((value - bin_start) / bin_width)
                    .floor()
                    .clamp(0.0, last as f64) as usize
            };
            frequencies[index] += 1;
        }

        let bins = frequencies
            .into_iter()
            .enumerate()
            .map(|(i, frequency)| HistogramBin {
                center: bin_start + i as f64 * bin_width + bin_width / 2.0,
                frequency,
            })
            .collect();

        let summary = self.summary(data, min, max)?;
        Ok(DistributionHistogram::new(bins, bin_start, bin_width, summary))
    }

    fn target_bins(&self, n: usize) -> Option<usize> {
        Some(self.bin_count.unwrap_or_else(|| sqrt_bin_count(n)))
    }
}
