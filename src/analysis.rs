//! End-to-end SPC analysis of one measurement batch
//!
//! The pipeline runs extraction, subgrouping, control limits, capability,
//! distribution, pattern detection and interpretation in that order. Any
//! failure aborts the whole analysis; there are no partial results.

use crate::config::AnalysisConfig;
use serde::{Deserialize, Serialize};
use spc_capability::{
    CapabilityIndices, Conformance, ControlSignals, DecisionRemark, Interpretation,
    ProcessCapability,
};
use spc_chart::{control_limits_for, ControlCharts, PatternDetector, PatternFinding, PatternKind};
use spc_core::{extract, subgroup, MeasurementRecord, Result, SubgroupSize};
use spc_histogram::{DistributionHistogram, HistogramBuilder, SpecAnchoredBuilder};
use tracing::{debug, instrument};

/// One batch of records to analyze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub records: Vec<MeasurementRecord>,
    pub subgroup_size: SubgroupSize,
}

impl AnalysisRequest {
    pub fn new(records: Vec<MeasurementRecord>, subgroup_size: SubgroupSize) -> Self {
        Self {
            records,
            subgroup_size,
        }
    }
}

/// Capability indices and the statistics behind them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    /// Indices rounded to two decimals for display
    pub indices: CapabilityIndices,
    /// Full-precision indices the verdicts were derived from
    pub raw_indices: CapabilityIndices,
    pub grand_mean: f64,
    pub avg_range: f64,
    pub within_std_dev: f64,
    pub overall_std_dev: f64,
    /// Whether a zero sigma was replaced by the configured floor
    pub sigma_clamped: bool,
    pub lsl: f64,
    pub usl: f64,
    pub target: f64,
    /// Valid measurements analyzed
    pub measurement_count: usize,
    /// Records dropped as malformed
    pub discarded_records: usize,
    pub subgroup_count: usize,
    /// 1-based indices of range-chart points beyond its limits
    pub range_out_of_control: Vec<usize>,
    pub conformance: Conformance,
}

/// Everything produced for one analysis request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub metrics: ProcessMetrics,
    pub control_charts: ControlCharts,
    pub distribution: DistributionHistogram,
    pub pattern_findings: Vec<PatternFinding>,
    pub interpretation: Interpretation,
}

impl AnalysisResult {
    /// Final verdict: the decision remark
    pub fn verdict(&self) -> DecisionRemark {
        self.interpretation.decision_remark
    }

    /// Findings whose pattern was detected
    pub fn detected_patterns(&self) -> impl Iterator<Item = &PatternFinding> {
        self.pattern_findings.iter().filter(|f| f.detected)
    }

    pub fn finding(&self, kind: PatternKind) -> Option<&PatternFinding> {
        self.pattern_findings.iter().find(|f| f.kind == kind)
    }
}

/// Runs the pipeline with a fixed configuration
///
/// # Examples
///
/// ```rust
/// use spc_stats::{AnalysisConfig, AnalysisRequest, Analyzer, MeasurementRecord, SubgroupSize};
///
/// let records: Vec<MeasurementRecord> = [10.01, 10.02, 9.99, 10.0, 10.03, 9.98]
///     .iter()
///     .map(|&v| MeasurementRecord::new(1, v, 9.9, 10.1))
///     .collect();
/// let request = AnalysisRequest::new(records, SubgroupSize::new(2).unwrap());
///
/// let result = Analyzer::new(AnalysisConfig::default())
///     .unwrap()
///     .analyze(&request)
///     .unwrap();
/// assert_eq!(result.control_charts.mean_chart.len(), 3);
/// println!("{}", result.verdict());
/// ```
#[derive(Debug)]
pub struct Analyzer {
    config: AnalysisConfig,
    detector: PatternDetector,
}

impl Analyzer {
    /// Validate `config` and build the pattern detector it describes
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            detector: PatternDetector::new(config.patterns),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one batch
    #[instrument(skip_all, fields(records = request.records.len(), subgroup_size = %request.subgroup_size))]
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let size = request.subgroup_size;
        let measurements = extract(&request.records, size, self.config.limits_policy)?;
        let limits = measurements.limits;
        let values = &measurements.values;

        let groups = subgroup(values, size, self.config.range_policy)?;
        let charts = control_limits_for(&groups)?;
        let grand_mean = charts.grand_mean();
        let avg_range = charts.average_range();
        debug!(grand_mean, avg_range, subgroups = groups.len(), "control charts ready");

        let capability = ProcessCapability::new(limits)
            .with_sigma_floor(self.config.sigma_floor)?
            .compute(values, grand_mean, avg_range, size)?;

        let distribution = SpecAnchoredBuilder::new(limits)
            .with_min_bin_width(self.config.min_bin_width)?
            .build(values)?;

        let patterns = self.detector.detect_chart(&charts.mean_chart);
        let signals = ControlSignals {
            out_of_control_points: patterns.out_of_control_count,
            shift_detected: patterns.is_detected(PatternKind::Shift),
        };
        let interpretation = Interpretation::new(&capability.indices, signals);
        debug!(
            cpk = capability.indices.cpk,
            remark = %interpretation.decision_remark,
            "analysis complete"
        );

        let metrics = ProcessMetrics {
            indices: capability.indices.for_presentation(),
            raw_indices: capability.indices,
            grand_mean,
            avg_range,
            within_std_dev: capability.within_std_dev,
            overall_std_dev: capability.overall_std_dev,
            sigma_clamped: capability.sigma_clamped,
            lsl: limits.lsl,
            usl: limits.usl,
            target: limits.target(),
            measurement_count: measurements.len(),
            discarded_records: measurements.discarded,
            subgroup_count: groups.len(),
            range_out_of_control: charts.range_chart.out_of_limits(),
            conformance: capability.conformance,
        };

        Ok(AnalysisResult {
            metrics,
            control_charts: charts,
            distribution,
            pattern_findings: patterns.findings,
            interpretation,
        })
    }

    /// Analyze independent batches, each with its own outcome
    ///
    /// With the `parallel` feature the batches are spread over the rayon
    /// thread pool; results keep the order of `requests`.
    #[instrument(skip_all, fields(batches = requests.len()))]
    pub fn analyze_batch(&self, requests: &[AnalysisRequest]) -> Vec<Result<AnalysisResult>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            requests.par_iter().map(|r| self.analyze(r)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            requests.iter().map(|r| self.analyze(r)).collect()
        }
    }
}

/// Analyze one batch with the default configuration
pub fn analyze(request: &AnalysisRequest) -> Result<AnalysisResult> {
    Analyzer::new(AnalysisConfig::default())?.analyze(request)
}

/// Analyze independent batches with the default configuration
pub fn analyze_batch(requests: &[AnalysisRequest]) -> Result<Vec<Result<AnalysisResult>>> {
    Ok(Analyzer::new(AnalysisConfig::default())?.analyze_batch(requests))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spc_capability::ProcessStability;
    use spc_core::Error;

    fn records(values: &[f64], lsl: f64, usl: f64) -> Vec<MeasurementRecord> {
        values
            .iter()
            .map(|&v| MeasurementRecord::new(7, v, lsl, usl))
            .collect()
    }

    fn size(n: usize) -> SubgroupSize {
        SubgroupSize::new(n).unwrap()
    }

    #[test]
    fn test_metrics_carry_limits_and_counts() {
        let values = [5.0, 5.2, 4.9, 5.1, 5.0, 4.8, 5.1, 5.2, 4.9, 5.0, 5.1];
        let request = AnalysisRequest::new(records(&values, 4.0, 6.0), size(5));
        let result = analyze(&request).unwrap();
        let m = &result.metrics;

        assert_eq!((m.lsl, m.usl, m.target), (4.0, 6.0, 5.0));
        assert_eq!(m.measurement_count, 11);
        assert_eq!(m.discarded_records, 0);
        // 5 + 5 + 1; the singleton tail has no range sample
        assert_eq!(m.subgroup_count, 3);
        assert_eq!(result.control_charts.range_chart.len(), 2);
        assert_eq!(result.pattern_findings.len(), 7);
        assert_eq!(result.distribution.total_frequency(), 11);
    }

    #[test]
    fn test_zero_fill_policy_changes_range_series() {
        let values = [5.0, 5.2, 4.9, 5.1, 5.0, 4.8, 5.1, 5.2, 4.9, 5.0, 5.1];
        let request = AnalysisRequest::new(records(&values, 4.0, 6.0), size(5));
        let lenient = Analyzer::new(AnalysisConfig::lenient()).unwrap();
        let result = lenient.analyze(&request).unwrap();
        assert_eq!(result.control_charts.range_chart.len(), 3);
        assert_eq!(result.control_charts.range_chart.values[2], 0.0);
    }

    #[test]
    fn test_single_subgroup_without_range_fails() {
        // One valid value with n = 1 yields no moving range
        let request = AnalysisRequest::new(records(&[5.0], 4.0, 6.0), size(1));
        assert_eq!(analyze(&request).unwrap_err(), Error::EmptyRangeSeries);
    }

    #[test]
    fn test_out_of_control_marks_unstable() {
        let mut values = vec![10.0, 10.1, 9.9, 10.0, 10.1, 9.9, 10.0, 10.1, 9.9, 10.0];
        values.push(14.0);
        let request = AnalysisRequest::new(records(&values, 5.0, 15.0), size(1));
        let result = analyze(&request).unwrap();

        let ooc = result.finding(PatternKind::OutOfControl).unwrap();
        assert!(ooc.detected);
        assert_eq!(ooc.point_indices, vec![11]);
        assert_eq!(
            result.interpretation.process_stability,
            ProcessStability::Unstable
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            sigma_floor: -1.0,
            ..Default::default()
        };
        assert!(Analyzer::new(config).is_err());
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let good = AnalysisRequest::new(records(&[1.0, 1.1, 0.9, 1.0], 0.0, 2.0), size(2));
        let bad = AnalysisRequest::new(records(&[1.0], 0.0, 2.0), size(2));
        let results = analyze_batch(&[good.clone(), bad, good]).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(Error::InsufficientData {
                expected: 2,
                actual: 1
            })
        ));
        assert!(results[2].is_ok());
    }
}
