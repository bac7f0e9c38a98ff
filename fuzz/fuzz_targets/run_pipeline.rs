#![no_main]

use affinity_core::{AnalysisConfig, AnalysisError, Projection, WeightedPair};
use affinity_metrics::run_analysis;
use libfuzzer_sys::fuzz_target;

// Each 3-byte chunk is (source id, target id, weight byte). Weight byte 0xFF
// maps to NaN so the invalid-weight path is exercised too.
fuzz_target!(|data: &[u8]| {
    let pairs: Vec<WeightedPair> = data
        .chunks_exact(3)
        .take(64)
        .map(|c| {
            let weight = if c[2] == 0xFF { f64::NAN } else { f64::from(c[2]) - 8.0 };
            WeightedPair::new(format!("s{}", c[0] % 16), format!("t{}", c[1] % 16), weight)
        })
        .collect();

    match run_analysis(&pairs, &AnalysisConfig::default()) {
        Ok(run) => {
            for (_, graph, report) in run.reports() {
                assert_eq!(report.node_count, graph.node_count());
                assert!((0.0..=1.0).contains(&report.density));
            }
            assert!(run.similarity().table().is_symmetric());
        }
        Err(AnalysisError::EmptyInput) => assert!(pairs.is_empty()),
        Err(_) => {}
    }
});
