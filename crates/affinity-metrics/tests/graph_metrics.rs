//! Known-topology regression tests for graph metrics.
//!
//! Each test uses a hand-crafted graph with known properties. Expected
//! metric values are computed analytically and hardcoded, so any algorithm
//! change that shifts values will be caught.

use affinity_core::{ClusteringAverage, MetricsConfig, NodeRole, WeightedGraph};
use affinity_metrics::metrics::basic::{degree_centrality, degree_stats, density};
use affinity_metrics::metrics::betweenness::betweenness_centrality;
use affinity_metrics::metrics::clustering::average_clustering;
use affinity_metrics::metrics::paths::{closeness_centrality, is_connected, path_summary};
use affinity_metrics::{Measure, UndefinedReason, analyze_graph};

// ---------------------------------------------------------------------------
// Helper: build a unipartite graph from an edge list
// ---------------------------------------------------------------------------

fn build_graph(nodes: &[&str], edges: &[(&str, &str)]) -> WeightedGraph {
    let nodes: Vec<(&str, NodeRole)> = nodes.iter().map(|n| (*n, NodeRole::Source)).collect();
    let edges: Vec<(&str, &str, f64)> = edges.iter().map(|(a, b)| (*a, *b, 1.0)).collect();
    WeightedGraph::from_parts(&nodes, &edges).expect("valid graph")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn defined<T: std::fmt::Debug + Copy>(m: &Measure<T>) -> T {
    *m.value().unwrap_or_else(|| panic!("expected defined measure, got {m:?}"))
}

// ===========================================================================
// Topology 1: Path of four (A - B - C - D), unit weights
//
// Properties:
//   - diameter 3, average shortest path (1+2+3+1+2+1)/6 = 10/6
//   - B and C tie on every centrality
//   - no triangles
// ===========================================================================

#[test]
fn path4_distances() {
    let g = build_graph(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);
    assert!(is_connected(&g));

    let summary = defined(&path_summary(&g));
    assert_eq!(summary.diameter, 3);
    assert!(close(summary.average_length, 10.0 / 6.0));
}

#[test]
fn path4_density_and_degree() {
    let g = build_graph(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);
    assert!(close(density(&g), 0.5));

    let stats = degree_stats(&g);
    assert_eq!(stats.degrees, vec![1, 2, 2, 1]);
    assert_eq!(stats.max, 2);
    let labels: Vec<&str> = stats.max_nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, ["B", "C"]);
    assert!(close(stats.mean, 1.5));
}

#[test]
fn path4_centralities() {
    let g = build_graph(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);

    let dc = degree_centrality(&g);
    assert!(close(dc[1], 2.0 / 3.0));

    let bc = betweenness_centrality(&g);
    assert!(close(bc[1], 2.0 / 3.0));
    assert!(close(bc[2], 2.0 / 3.0));

    // B: distances 1,1,2 → 3/4. A: 1,2,3 → 3/6.
    let cc = closeness_centrality(&g);
    assert!(close(cc[0], 0.5));
    assert!(close(cc[1], 0.75));
}

#[test]
fn path4_report_asserts_values_at_ties() {
    let g = build_graph(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);
    let report = analyze_graph(&g, &MetricsConfig::default());

    // B and C tie: only the score is part of the contract.
    let degree = defined_leader(&report.degree_centrality);
    assert!(close(degree.score, 2.0 / 3.0));
    assert!(["B", "C"].contains(&degree.label.as_str()));

    let betweenness = defined_leader(&report.betweenness);
    assert!(close(betweenness.score, 2.0 / 3.0));

    let closeness = defined_leader(&report.closeness);
    assert!(close(closeness.score, 0.75));

    assert_eq!(report.diameter, Measure::Defined(3));
    assert!(close(defined(&report.average_path_length), 10.0 / 6.0));
    assert!(close(defined(&report.average_clustering), 0.0));
}

fn defined_leader(m: &Measure<affinity_metrics::Leader>) -> affinity_metrics::Leader {
    m.value()
        .cloned()
        .unwrap_or_else(|| panic!("expected a leader, got {m:?}"))
}

// ===========================================================================
// Topology 2: Star (hub + 4 leaves)
//
// Properties:
//   - unique leader on every centrality: hub
//   - diameter 2
// ===========================================================================

#[test]
fn star_has_unique_leader() {
    let g = build_graph(
        &["a", "b", "hub", "c", "d"],
        &[("hub", "a"), ("hub", "b"), ("hub", "c"), ("hub", "d")],
    );
    let report = analyze_graph(&g, &MetricsConfig::default());

    for leader in [
        defined_leader(&report.degree_centrality),
        defined_leader(&report.betweenness),
        defined_leader(&report.closeness),
    ] {
        assert_eq!(leader.label, "hub");
        assert!(close(leader.score, 1.0));
    }
    assert_eq!(report.max_degree, 4);
    assert_eq!(report.max_degree_nodes.len(), 1);
    assert_eq!(report.diameter, Measure::Defined(2));
    // leaves: 1 + 2*3 = 7 over 4 others; hub 4 → (4*7 + 4) / 20
    assert!(close(defined(&report.average_path_length), 32.0 / 20.0));
}

// ===========================================================================
// Topology 3: Two disconnected edges (A - B, C - D)
// ===========================================================================

#[test]
fn two_components_are_undefined_for_distances() {
    let g = build_graph(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D")]);
    let report = analyze_graph(&g, &MetricsConfig::default());

    assert_eq!(
        report.diameter,
        Measure::Undefined(UndefinedReason::Disconnected)
    );
    assert_eq!(
        report.average_path_length,
        Measure::Undefined(UndefinedReason::Disconnected)
    );

    // Closeness is still computed per component: reach 1 of 3 at distance 1.
    let closeness = defined_leader(&report.closeness);
    assert!(close(closeness.score, 1.0 / 3.0));
    assert!(close(defined_leader(&report.betweenness).score, 0.0));
}

// ===========================================================================
// Topology 4: Triangle with a pendant (A-B-C triangle, C-D)
// ===========================================================================

#[test]
fn triangle_with_pendant_clustering_modes() {
    let g = build_graph(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("B", "C"), ("A", "C"), ("C", "D")],
    );

    let eligible = defined(&average_clustering(&g, ClusteringAverage::EligibleOnly));
    assert!(close(eligible, 7.0 / 9.0));

    let all = defined(&average_clustering(&g, ClusteringAverage::AllNodes));
    assert!(close(all, 7.0 / 12.0));

    let config = MetricsConfig {
        clustering: ClusteringAverage::AllNodes,
        ..MetricsConfig::default()
    };
    let report = analyze_graph(&g, &config);
    assert!(close(defined(&report.average_clustering), 7.0 / 12.0));

    // C bridges D to both A and B: 2 of C(3,2)=3 pairs.
    let betweenness = defined_leader(&report.betweenness);
    assert_eq!(betweenness.label, "C");
    assert!(close(betweenness.score, 2.0 / 3.0));
}

// ===========================================================================
// Topology 5: Complete graph K4
// ===========================================================================

#[test]
fn complete_graph() {
    let g = build_graph(
        &["A", "B", "C", "D"],
        &[
            ("A", "B"),
            ("A", "C"),
            ("A", "D"),
            ("B", "C"),
            ("B", "D"),
            ("C", "D"),
        ],
    );
    let report = analyze_graph(&g, &MetricsConfig::default());

    assert!(close(report.density, 1.0));
    assert!(close(defined(&report.average_clustering), 1.0));
    assert_eq!(report.diameter, Measure::Defined(1));
    assert!(close(defined(&report.average_path_length), 1.0));
    assert!(close(defined_leader(&report.betweenness).score, 0.0));
    assert!(close(defined_leader(&report.closeness).score, 1.0));
    assert_eq!(report.max_degree_nodes.len(), 4);
}

// ===========================================================================
// Weights do not affect path metrics
// ===========================================================================

#[test]
fn weights_are_ignored_for_paths() {
    let nodes = [
        ("A", NodeRole::Source),
        ("B", NodeRole::Source),
        ("C", NodeRole::Source),
    ];
    let light =
        WeightedGraph::from_parts(&nodes, &[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 1.0)])
            .expect("valid graph");
    let heavy =
        WeightedGraph::from_parts(&nodes, &[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 50.0)])
            .expect("valid graph");

    let config = MetricsConfig::default();
    let a = analyze_graph(&light, &config);
    let b = analyze_graph(&heavy, &config);
    assert_eq!(a.diameter, b.diameter);
    assert_eq!(a.average_path_length, b.average_path_length);
    assert_eq!(betweenness_centrality(&light), betweenness_centrality(&heavy));
}
