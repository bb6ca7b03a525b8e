//! Core types for distribution histograms

use serde::Serialize;
use spc_core::SpecificationLimits;
use std::fmt;

/// A single histogram bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Midpoint of the bin
    pub center: f64,
    /// Number of measurements assigned to the bin
    pub frequency: usize,
}

impl HistogramBin {
    /// Relative frequency (frequency / total)
    pub fn relative_frequency(&self, total: usize) -> f64 {
        if total > 0 {
            self.frequency as f64 / total as f64
        } else {
            0.0
        }
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}: {}", self.center, self.frequency)
    }
}

/// Summary statistics shown alongside the histogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, 0 for fewer than two values
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub lsl: f64,
    pub usl: f64,
    /// Midpoint of the specification limits
    pub target: f64,
}

impl DistributionSummary {
    /// Whether every measurement lies within the specification limits
    pub fn within_spec(&self) -> bool {
        self.min >= self.lsl && self.max <= self.usl
    }

    /// Specification limits as a validated pair, if `lsl < usl`
    pub fn limits(&self) -> Option<SpecificationLimits> {
        SpecificationLimits::new(self.lsl, self.usl).ok()
    }
}

/// Binned distribution of the measurements
///
/// Immutable once built; bins are ordered by center.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionHistogram {
    bins: Vec<HistogramBin>,
    bin_start: f64,
    bin_width: f64,
    summary: DistributionSummary,
}

impl DistributionHistogram {
    pub(crate) fn new(
        bins: Vec<HistogramBin>,
        bin_start: f64,
        bin_width: f64,
        summary: DistributionSummary,
    ) -> Self {
        Self {
            bins,
            bin_start,
            bin_width,
            summary,
        }
    }

    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Left edge of the first bin
    pub fn bin_start(&self) -> f64 {
        self.bin_start
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn summary(&self) -> &DistributionSummary {
        &self.summary
    }

    /// Sum of all bin frequencies
    pub fn total_frequency(&self) -> usize {
        self.bins.iter().map(|b| b.frequency).sum()
    }

    /// Bin with the highest frequency (first one on ties)
    pub fn modal_bin(&self) -> Option<&HistogramBin> {
        self.bins
            .iter()
            .reduce(|best, b| if b.frequency > best.frequency { b } else { best })
    }

    /// (center, frequency) pairs in bin order
    pub fn pairs(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.bins.iter().map(|b| (b.center, b.frequency))
    }
}

impl fmt::Display for DistributionHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Histogram: {} bins of width {:.6}, n={}, mean={:.4}, sd={:.4}",
            self.bin_count(),
            self.bin_width,
            self.summary.count,
            self.summary.mean,
            self.summary.std_dev
        )?;
        for bin in &self.bins {
            writeln!(f, "  {}", bin)?;
        }
        Ok(())
    }
}
