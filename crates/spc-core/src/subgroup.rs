//! Rational subgrouping of a measurement sequence
//!
//! For subgroup size 1 every measurement is its own subgroup and the range
//! series is the two-point moving range. For larger sizes the sequence is cut
//! into consecutive chunks; a trailing chunk may be shorter than the
//! configured size.

use crate::constants::SubgroupSize;
use crate::error::{Error, Result};
use crate::stats;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a trailing single-member subgroup contributes to the range series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// No range sample (avoids biasing R-bar toward zero)
    #[default]
    Skip,
    /// A range sample of `0.0`
    ZeroFill,
}

/// Per-subgroup means and ranges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subgroups {
    /// Subgroup size used for partitioning
    pub size: SubgroupSize,
    /// Mean of each subgroup, in order
    pub means: Vec<f64>,
    /// Range samples; moving ranges when `size` is 1
    pub ranges: Vec<f64>,
    /// Number of members in each subgroup
    pub sizes: Vec<usize>,
}

impl Subgroups {
    /// Number of subgroups
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Whether there are no subgroups
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Whether the last subgroup is shorter than the configured size
    pub fn has_partial_tail(&self) -> bool {
        self.sizes
            .last()
            .is_some_and(|&last| last < self.size.get())
    }
}

/// Partition measurements into subgroups
pub fn subgroup(measurements: &[f64], size: SubgroupSize, policy: RangePolicy) -> Result<Subgroups> {
    if measurements.is_empty() {
        return Err(Error::EmptySequence);
    }

    let result = if size.is_individuals() {
        Subgroups {
            size,
            means: measurements.to_vec(),
            ranges: moving_ranges(measurements),
            sizes: vec![1; measurements.len()],
        }
    } else {
        let chunks = measurements.chunks(size.get());
        let mut means = Vec::with_capacity(chunks.len());
        let mut ranges = Vec::with_capacity(chunks.len());
        let mut sizes = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            means.push(stats::mean(chunk)?);
            sizes.push(chunk.len());
            match (stats::range(chunk), policy) {
                (Some(r), _) => ranges.push(r),
                (None, RangePolicy::ZeroFill) => ranges.push(0.0),
                (None, RangePolicy::Skip) => {}
            }
        }

        Subgroups {
            size,
            means,
            ranges,
            sizes,
        }
    };

    debug!(
        subgroups = result.len(),
        ranges = result.ranges.len(),
        partial_tail = result.has_partial_tail(),
        "partitioned measurements"
    );
    Ok(result)
}

/// Absolute differences between consecutive values
pub fn moving_ranges(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn size(n: usize) -> SubgroupSize {
        SubgroupSize::new(n).unwrap()
    }

    #[test]
    fn test_individuals_use_moving_range() {
        let data = [10.0, 12.0, 11.0, 15.0];
        let groups = subgroup(&data, size(1), RangePolicy::Skip).unwrap();
        assert_eq!(groups.means, data.to_vec());
        assert_eq!(groups.ranges, vec![2.0, 1.0, 4.0]);
        assert_eq!(groups.sizes, vec![1, 1, 1, 1]);
        assert!(!groups.has_partial_tail());
    }

    #[test]
    fn test_single_individual_has_no_range() {
        let groups = subgroup(&[4.2], size(1), RangePolicy::Skip).unwrap();
        assert_eq!(groups.means, vec![4.2]);
        assert!(groups.ranges.is_empty());
    }

    #[test]
    fn test_twelve_in_fives_keeps_trailing_pair() {
        let data: Vec<f64> = (1..=12).map(f64::from).collect();
        let groups = subgroup(&data, size(5), RangePolicy::Skip).unwrap();
        assert_eq!(groups.sizes, vec![5, 5, 2]);
        assert_eq!(groups.means, vec![3.0, 8.0, 11.5]);
        assert_eq!(groups.ranges, vec![4.0, 4.0, 1.0]);
        assert!(groups.has_partial_tail());
    }

    #[test]
    fn test_trailing_singleton_policy() {
        let data = [1.0, 3.0, 2.0, 6.0, 9.0];

        let skipped = subgroup(&data, size(2), RangePolicy::Skip).unwrap();
        assert_eq!(skipped.means, vec![2.0, 4.0, 9.0]);
        assert_eq!(skipped.ranges, vec![2.0, 4.0]);

        let filled = subgroup(&data, size(2), RangePolicy::ZeroFill).unwrap();
        assert_eq!(filled.ranges, vec![2.0, 4.0, 0.0]);
    }

    #[test]
    fn test_chunk_mean_and_range() {
        let data = [25.0, 26.0, 24.5, 25.5, 25.0, 25.2, 24.8, 25.1];
        let groups = subgroup(&data, size(4), RangePolicy::Skip).unwrap();
        assert_eq!(groups.len(), 2);
        assert_relative_eq!(groups.means[0], 25.25);
        assert_relative_eq!(groups.ranges[0], 1.5);
        assert_relative_eq!(groups.means[1], 25.025, epsilon = 1e-12);
        assert_relative_eq!(groups.ranges[1], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(
            subgroup(&[], size(3), RangePolicy::Skip),
            Err(Error::EmptySequence)
        );
    }
}
