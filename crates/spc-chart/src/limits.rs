//! Mean and range chart control limits
//!
//! Limits are computed from subgroup statistics with the tabulated factors:
//!
//! - Mean chart: CL = grand mean, UCL/LCL = CL ± A2 * R-bar
//! - Range chart: CL = R-bar, UCL = D4 * R-bar, LCL = max(0, D3 * R-bar)

use serde::Serialize;
use spc_core::{stats, Error, Result, SubgroupSize, Subgroups};
use std::fmt;
use tracing::debug;

/// Center line and control limits of one chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlLimits {
    /// Center line
    pub center: f64,
    /// Upper control limit
    pub ucl: f64,
    /// Lower control limit
    pub lcl: f64,
}

impl ControlLimits {
    /// Whether a value falls strictly outside the limits
    pub fn is_beyond(&self, value: f64) -> bool {
        value > self.ucl || value < self.lcl
    }

    /// Distance between the limits
    pub fn width(&self) -> f64 {
        self.ucl - self.lcl
    }

    /// One sixth of the limit width, i.e. one sigma for 3-sigma limits
    pub fn zone_width(&self) -> f64 {
        self.width() / 6.0
    }
}

impl fmt::Display for ControlLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LCL={:.4}, CL={:.4}, UCL={:.4}",
            self.lcl, self.center, self.ucl
        )
    }
}

/// A plotted series with its limits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlChart {
    /// Plotted statistic per point
    pub values: Vec<f64>,
    /// Limits for this chart
    pub limits: ControlLimits,
}

impl ControlChart {
    /// 1-based indices of points beyond the limits
    pub fn out_of_limits(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &v)| self.limits.is_beyond(v))
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Number of plotted points
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the chart has no points
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The mean chart and range chart of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlCharts {
    /// Subgroup size the limits were computed for
    pub subgroup_size: SubgroupSize,
    /// Mean (or individuals) chart
    pub mean_chart: ControlChart,
    /// Range (or moving range) chart
    pub range_chart: ControlChart,
}

impl ControlCharts {
    /// Grand mean of the subgroup means
    pub fn grand_mean(&self) -> f64 {
        self.mean_chart.limits.center
    }

    /// Average range, R-bar
    pub fn average_range(&self) -> f64 {
        self.range_chart.limits.center
    }
}

/// Compute mean and range chart limits from subgroup statistics
///
/// Fails with [`Error::EmptyRangeSeries`] when no range sample exists, since
/// neither chart nor any sigma estimate can be formed without R-bar.
pub fn control_limits(means: &[f64], ranges: &[f64], size: SubgroupSize) -> Result<ControlCharts> {
    if ranges.is_empty() {
        return Err(Error::EmptyRangeSeries);
    }
    let grand_mean = stats::mean(means)?;
    let avg_range = stats::mean(ranges)?;
    let constants = size.constants();

    let mean_limits = ControlLimits {
        center: grand_mean,
        ucl: grand_mean + constants.a2 * avg_range,
        lcl: grand_mean - constants.a2 * avg_range,
    };
    let range_limits = ControlLimits {
        center: avg_range,
        ucl: constants.d4 * avg_range,
        lcl: (constants.d3 * avg_range).max(0.0),
    };
    debug!(%mean_limits, %range_limits, subgroup_size = %size, "computed control limits");

    Ok(ControlCharts {
        subgroup_size: size,
        mean_chart: ControlChart {
            values: means.to_vec(),
            limits: mean_limits,
        },
        range_chart: ControlChart {
            values: ranges.to_vec(),
            limits: range_limits,
        },
    })
}

/// Convenience wrapper taking the subgrouper's output directly
pub fn control_limits_for(groups: &Subgroups) -> Result<ControlCharts> {
    control_limits(&groups.means, &groups.ranges, groups.size)
}
