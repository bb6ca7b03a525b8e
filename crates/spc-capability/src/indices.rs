//! Process capability (Cp family) and performance (Pp family) indices
//!
//! Short-term indices use the within-subgroup sigma estimated from R-bar;
//! long-term indices use the overall sample standard deviation.
//!
//! | Index | Formula                         |
//! |-------|---------------------------------|
//! | Cp    | (USL - LSL) / (6 sigma_within)  |
//! | Cpu   | (USL - mean) / (3 sigma_within) |
//! | Cpl   | (mean - LSL) / (3 sigma_within) |
//! | Cpk   | min(Cpu, Cpl)                   |
//!
//! Pp, Ppu, Ppl and Ppk substitute sigma_overall.
//!
//! A sigma of exactly zero (perfectly uniform data) is replaced by a small
//! floor so every index stays finite.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.

use serde::Serialize;
use spc_core::{stats, Error, Result, SpecificationLimits, SubgroupSize, DEFAULT_SIGMA_FLOOR};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;
use std::fmt;
use tracing::{debug, warn};

/// Decimal places used for presentation
pub const PRESENTATION_DECIMALS: u32 = 2;

/// Capability and performance indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapabilityIndices {
    pub cp: f64,
    pub cpu: f64,
    pub cpl: f64,
    /// min(Cpu, Cpl)
    pub cpk: f64,
    pub pp: f64,
    pub ppu: f64,
    pub ppl: f64,
    /// min(Ppu, Ppl)
    pub ppk: f64,
}

impl CapabilityIndices {
    /// Compute all eight indices from the two sigma estimates
    ///
    /// Both sigmas must already be positive.
    pub fn from_sigmas(
        limits: &SpecificationLimits,
        mean: f64,
        sigma_within: f64,
        sigma_overall: f64,
    ) -> Self {
        let (cp, cpu, cpl) = ratios(limits, mean, sigma_within);
        let (pp, ppu, ppl) = ratios(limits, mean, sigma_overall);
        Self {
            cp,
            cpu,
            cpl,
            cpk: cpu.min(cpl),
            pp,
            ppu,
            ppl,
            ppk: ppu.min(ppl),
        }
    }

    /// Copy with every index rounded to `decimals` places
    pub fn rounded(&self, decimals: u32) -> Self {
        let r = |v: f64| stats::round_to(v, decimals);
        Self {
            cp: r(self.cp),
            cpu: r(self.cpu),
            cpl: r(self.cpl),
            cpk: r(self.cpk),
            pp: r(self.pp),
            ppu: r(self.ppu),
            ppl: r(self.ppl),
            ppk: r(self.ppk),
        }
    }

    /// Copy rounded for presentation (two decimals)
    pub fn for_presentation(&self) -> Self {
        self.rounded(PRESENTATION_DECIMALS)
    }
}

fn ratios(limits: &SpecificationLimits, mean: f64, sigma: f64) -> (f64, f64, f64) {
    let spread = limits.width() / (6.0 * sigma);
    let upper = (limits.usl - mean) / (3.0 * sigma);
    let lower = (mean - limits.lsl) / (3.0 * sigma);
    (spread, upper, lower)
}

impl fmt::Display for CapabilityIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cp={:.2} Cpk={:.2} Pp={:.2} Ppk={:.2}",
            self.cp, self.cpk, self.pp, self.ppk
        )
    }
}

/// Expected nonconforming parts per million under a normal model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedPpm {
    pub below_lsl: f64,
    pub above_usl: f64,
}

impl ExpectedPpm {
    fn new(limits: &SpecificationLimits, mean: f64, sigma: f64) -> Self {
        let z_lower = (limits.lsl - mean) / sigma;
        let z_upper = (limits.usl - mean) / sigma;
        Self {
            below_lsl: normal_cdf(z_lower) * 1e6,
            above_usl: normal_cdf(-z_upper) * 1e6,
        }
    }

    /// Total expected PPM outside either limit
    pub fn total(&self) -> f64 {
        self.below_lsl + self.above_usl
    }
}

/// Standard normal CDF via the complementary error function
fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Observed and expected conformance to the specification
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conformance {
    /// Measurements below LSL
    pub observed_below: usize,
    /// Measurements above USL
    pub observed_above: usize,
    /// Observed nonconforming parts per million
    pub observed_ppm: f64,
    /// Expected PPM using the within-subgroup sigma
    pub expected_within: ExpectedPpm,
    /// Expected PPM using the overall sigma
    pub expected_overall: ExpectedPpm,
}

/// Full output of a capability study
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityReport {
    /// Full-precision indices
    pub indices: CapabilityIndices,
    /// Grand mean used as the process center
    pub grand_mean: f64,
    /// Within-subgroup sigma after clamping
    pub within_std_dev: f64,
    /// Overall sample sigma after clamping
    pub overall_std_dev: f64,
    /// Whether either sigma was exactly zero and replaced by the floor
    pub sigma_clamped: bool,
    /// Specification limits the indices refer to
    pub limits: SpecificationLimits,
    /// Out-of-spec counts and expected PPM
    pub conformance: Conformance,
}

/// Capability study for one set of specification limits
///
/// # Examples
///
/// ```rust
/// use spc_capability::ProcessCapability;
/// use spc_core::{SpecificationLimits, SubgroupSize};
///
/// let limits = SpecificationLimits::new(9.0, 11.0).unwrap();
/// let data = [9.8, 10.1, 10.0, 9.9, 10.2, 10.0, 9.9, 10.1];
/// let size = SubgroupSize::new(2).unwrap();
///
/// // grand mean 10.0, R-bar 0.2
/// let report = ProcessCapability::new(limits)
///     .compute(&data, 10.0, 0.2, size)
///     .unwrap();
/// assert!(report.indices.cp > 1.0);
/// assert_eq!(report.indices.cpk, report.indices.cpu.min(report.indices.cpl));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessCapability {
    limits: SpecificationLimits,
    sigma_floor: f64,
}

impl ProcessCapability {
    /// Create a study with the default sigma floor
    pub fn new(limits: SpecificationLimits) -> Self {
        Self {
            limits,
            sigma_floor: DEFAULT_SIGMA_FLOOR,
        }
    }

    /// Override the value substituted for a zero sigma
    pub fn with_sigma_floor(mut self, floor: f64) -> Result<Self> {
        if !(floor.is_finite() && floor > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "sigma floor must be positive and finite, got {floor}"
            )));
        }
        self.sigma_floor = floor;
        Ok(self)
    }

    /// Specification limits of this study
    pub fn limits(&self) -> &SpecificationLimits {
        &self.limits
    }

    /// Compute indices for `measurements`
    ///
    /// `grand_mean` and `avg_range` come from the control chart. For subgroup
    /// size 1 the within sigma is taken to be the overall sigma.
    pub fn compute(
        &self,
        measurements: &[f64],
        grand_mean: f64,
        avg_range: f64,
        size: SubgroupSize,
    ) -> Result<CapabilityReport> {
        let overall_raw = stats::sample_std_dev(measurements)?;
        let within_raw = if size.is_individuals() {
            overall_raw
        } else {
            avg_range / size.constants().d2
        };

        let sigma_clamped = within_raw == 0.0 || overall_raw == 0.0;
        if sigma_clamped {
            warn!(
                within = within_raw,
                overall = overall_raw,
                floor = self.sigma_floor,
                "zero sigma replaced by floor"
            );
        }
        let within = stats::clamp_sigma(within_raw, self.sigma_floor);
        let overall = stats::clamp_sigma(overall_raw, self.sigma_floor);
        debug!(within, overall, grand_mean, "sigma estimates");

        let indices = CapabilityIndices::from_sigmas(&self.limits, grand_mean, within, overall);
        let conformance = self.conformance(measurements, grand_mean, within, overall);

        Ok(CapabilityReport {
            indices,
            grand_mean,
            within_std_dev: within,
            overall_std_dev: overall,
            sigma_clamped,
            limits: self.limits,
            conformance,
        })
    }

    fn conformance(&self, measurements: &[f64], mean: f64, within: f64, overall: f64) -> Conformance {
        let observed_below = measurements.iter().filter(|&&x| x < self.limits.lsl).count();
        let observed_above = measurements.iter().filter(|&&x| x > self.limits.usl).count();
        let observed_ppm =
            (observed_below + observed_above) as f64 / measurements.len() as f64 * 1e6;

        Conformance {
            observed_below,
            observed_above,
            observed_ppm,
            expected_within: ExpectedPpm::new(&self.limits, mean, within),
            expected_overall: ExpectedPpm::new(&self.limits, mean, overall),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn limits() -> SpecificationLimits {
        SpecificationLimits::new(10.0, 10.5).unwrap()
    }

    fn size(n: usize) -> SubgroupSize {
        SubgroupSize::new(n).unwrap()
    }

    #[test]
    fn test_centered_indices() {
        let limits = SpecificationLimits::new(9.0, 11.0).unwrap();
        let idx = CapabilityIndices::from_sigmas(&limits, 10.0, 0.2, 0.25);
        assert_relative_eq!(idx.cp, 2.0 / 1.2, epsilon = 1e-12);
        assert_relative_eq!(idx.cpu, idx.cpl, epsilon = 1e-12);
        assert_relative_eq!(idx.cpk, idx.cp, epsilon = 1e-12);
        assert_relative_eq!(idx.pp, 2.0 / 1.5, epsilon = 1e-12);
        assert_relative_eq!(idx.ppk, idx.pp, epsilon = 1e-12);
    }

    #[test]
    fn test_off_center_uses_nearer_limit() {
        let limits = SpecificationLimits::new(9.0, 11.0).unwrap();
        let idx = CapabilityIndices::from_sigmas(&limits, 10.5, 0.2, 0.2);
        assert_relative_eq!(idx.cpu, 0.5 / 0.6, epsilon = 1e-12);
        assert_relative_eq!(idx.cpl, 1.5 / 0.6, epsilon = 1e-12);
        assert_eq!(idx.cpk, idx.cpu);
        assert_eq!(idx.ppk, idx.ppu);
    }

    #[test]
    fn test_subgrouped_within_sigma_uses_d2() {
        let data = [10.1, 10.2, 10.15, 10.25, 10.2, 10.3];
        let report = ProcessCapability::new(limits())
            .compute(&data, 10.2, 0.1, size(3))
            .unwrap();
        assert_relative_eq!(report.within_std_dev, 0.1 / 1.693, epsilon = 1e-12);
        assert!(!report.sigma_clamped);
    }

    #[test]
    fn test_individuals_within_equals_overall() {
        let data = [10.1, 10.2, 10.15, 10.25, 10.2, 10.3];
        let report = ProcessCapability::new(limits())
            .compute(&data, 10.2, 0.07, size(1))
            .unwrap();
        assert_eq!(report.within_std_dev, report.overall_std_dev);
        assert_eq!(report.indices.cp, report.indices.pp);
        assert_eq!(report.indices.cpk, report.indices.ppk);
    }

    #[test]
    fn test_uniform_data_is_clamped_and_finite() {
        let data = [10.2; 5];
        let report = ProcessCapability::new(limits())
            .compute(&data, 10.2, 0.0, size(1))
            .unwrap();
        assert!(report.sigma_clamped);
        assert_eq!(report.overall_std_dev, DEFAULT_SIGMA_FLOOR);
        assert!(report.indices.cp.is_finite());
        assert!(report.indices.cpk.is_finite());
        assert_relative_eq!(report.indices.cp, 0.5 / 6e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_uniform_gauge_readings_are_clamped() {
        for data in [vec![10.013; 12], vec![10.2; 12], vec![10.013; 10]] {
            let mean = stats::mean(&data).unwrap();
            let report = ProcessCapability::new(limits())
                .compute(&data, mean, 0.0, size(1))
                .unwrap();
            assert!(report.sigma_clamped);
            assert_eq!(report.overall_std_dev, DEFAULT_SIGMA_FLOOR);
            assert_eq!(report.within_std_dev, DEFAULT_SIGMA_FLOOR);
            assert_relative_eq!(report.indices.pp, 0.5 / 6e-6, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_sample() {
        let err = ProcessCapability::new(limits())
            .compute(&[10.2], 10.2, 0.0, size(1))
            .unwrap_err();
        assert_eq!(err, Error::DegenerateSample { actual: 1 });
    }

    #[test]
    fn test_custom_sigma_floor() {
        let study = ProcessCapability::new(limits()).with_sigma_floor(1e-3).unwrap();
        let report = study.compute(&[10.2, 10.2], 10.2, 0.0, size(2)).unwrap();
        assert_eq!(report.within_std_dev, 1e-3);
        assert!(ProcessCapability::new(limits()).with_sigma_floor(0.0).is_err());
        assert!(ProcessCapability::new(limits()).with_sigma_floor(f64::NAN).is_err());
    }

    #[test]
    fn test_rounding_for_presentation() {
        let limits = SpecificationLimits::new(9.0, 11.0).unwrap();
        let idx = CapabilityIndices::from_sigmas(&limits, 10.0, 0.3, 0.3).for_presentation();
        assert_eq!(idx.cp, 1.11);
        assert_eq!(idx.cpk, 1.11);
    }

    #[test]
    fn test_conformance() {
        let data = [9.9, 10.1, 10.2, 10.3, 10.6];
        let report = ProcessCapability::new(limits())
            .compute(&data, 10.22, 0.2, size(1))
            .unwrap();
        let c = report.conformance;
        assert_eq!(c.observed_below, 1);
        assert_eq!(c.observed_above, 1);
        assert_relative_eq!(c.observed_ppm, 400_000.0);
        assert!(c.expected_overall.total() > 0.0);
    }

    #[test]
    fn test_expected_ppm_symmetric_three_sigma() {
        let limits = SpecificationLimits::new(-3.0, 3.0).unwrap();
        let ppm = ExpectedPpm::new(&limits, 0.0, 1.0);
        // Two-sided tail beyond 3 sigma is ~2700 PPM
        assert_relative_eq!(ppm.below_lsl, ppm.above_usl, epsilon = 1e-6);
        assert_relative_eq!(ppm.total(), 2699.8, epsilon = 0.1);
    }
}
