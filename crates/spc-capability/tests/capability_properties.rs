//! Property-based tests for the capability engine
//!
//! The k-indices must always equal the worse of their one-sided
//! counterparts, and the verdicts must stay consistent with the indices
//! they were derived from.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use spc_capability::{
    ControlSignals, DecisionRemark, Interpretation, ProcessCapability, ProcessRating, SpecialCause,
    YesNo,
};
use spc_core::{stats, SpecificationLimits, SubgroupSize};

proptest! {
    #[test]
    fn prop_k_indices_are_minimum_of_one_sided(
        data in prop::collection::vec(0.0f64..20.0, 2..100),
        lsl in -5.0f64..10.0,
        width in 0.1f64..20.0,
        avg_range in 0.0f64..5.0,
        n in 1usize..=5,
    ) {
        let limits = SpecificationLimits::new(lsl, lsl + width).unwrap();
        let mean = stats::mean(&data).unwrap();
        let size = SubgroupSize::new(n).unwrap();
        let report = ProcessCapability::new(limits)
            .compute(&data, mean, avg_range, size)
            .unwrap();
        let idx = report.indices;

        prop_assert_eq!(idx.cpk, idx.cpu.min(idx.cpl));
        prop_assert_eq!(idx.ppk, idx.ppu.min(idx.ppl));
        prop_assert!(idx.cp > 0.0 && idx.cp.is_finite());
        prop_assert!(idx.pp > 0.0 && idx.pp.is_finite());
        prop_assert!(report.within_std_dev > 0.0);
        prop_assert!(report.overall_std_dev > 0.0);
    }

    #[test]
    fn prop_verdicts_follow_indices(
        data in prop::collection::vec(0.0f64..20.0, 2..100),
        width in 0.1f64..40.0,
        avg_range in 0.0f64..5.0,
    ) {
        let limits = SpecificationLimits::new(0.0, width).unwrap();
        let mean = stats::mean(&data).unwrap();
        let size = SubgroupSize::new(3).unwrap();
        let idx = ProcessCapability::new(limits)
            .compute(&data, mean, avg_range, size)
            .unwrap()
            .indices;
        let v = Interpretation::new(&idx, ControlSignals::default());

        prop_assert_eq!(v.decision_remark, DecisionRemark::from_cpk(idx.cpk));
        prop_assert_eq!(v.process_performance, ProcessRating::from_index(idx.cpk));
        prop_assert_eq!(v.process_spread == YesNo::Yes, idx.cp < 1.0);
        prop_assert_eq!(v.special_cause == SpecialCause::Undetectable, idx.pp >= idx.cp);
    }
}

#[test]
fn test_normal_process_matches_theory() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let normal = Normal::new(10.0, 0.1).unwrap();
    let data: Vec<f64> = (0..5000).map(|_| normal.sample(&mut rng)).collect();

    let limits = SpecificationLimits::new(9.4, 10.6).unwrap();
    let mean = stats::mean(&data).unwrap();
    let report = ProcessCapability::new(limits)
        .compute(&data, mean, 0.0, SubgroupSize::INDIVIDUALS)
        .unwrap();

    // Tolerance is +/- 6 sigma, so Cp and Pp are close to 2
    assert_relative_eq!(report.indices.pp, 2.0, max_relative = 0.05);
    assert_relative_eq!(report.indices.cp, report.indices.pp);
    assert!(report.conformance.expected_overall.total() < 1.0);
    assert_eq!(report.conformance.observed_below, 0);
    assert_eq!(report.conformance.observed_above, 0);
}
