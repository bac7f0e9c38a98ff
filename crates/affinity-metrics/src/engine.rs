//! The metrics engine: one [`MetricsReport`] per graph.
//!
//! Metrics are computed in a fixed order (counts, density, degree
//! statistics, degree/betweenness/closeness centrality, clustering,
//! distances). The engine holds no state between calls.

use tracing::{info, instrument, warn};

use affinity_core::{MetricsConfig, WeightedGraph};

use crate::metrics::{basic, betweenness, clustering, paths};
use crate::report::{Leader, Measure, MetricsReport, UndefinedReason};

/// Compute every metric for `g`.
#[must_use]
#[instrument(skip(g, config), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn analyze_graph(g: &WeightedGraph, config: &MetricsConfig) -> MetricsReport {
    let node_count = g.node_count();
    let edge_count = g.edge_count();

    let density = basic::density(g);
    let degrees = basic::degree_stats(g);
    let degree_centrality = leader_of(g, &basic::degree_centrality(g));

    let within_limit = config
        .path_metrics_node_limit
        .is_none_or(|limit| node_count <= limit);
    if !within_limit {
        warn!(
            nodes = node_count,
            limit = ?config.path_metrics_node_limit,
            "graph exceeds path-metrics node limit; skipping betweenness, closeness and distances"
        );
    }
    let skipped = Measure::Undefined(UndefinedReason::NodeLimitExceeded);

    let (betweenness, closeness) = if within_limit {
        (
            leader_of(g, &betweenness::betweenness_centrality(g)),
            leader_of(g, &paths::closeness_centrality(g)),
        )
    } else {
        (skipped.clone(), skipped)
    };

    let average_clustering = clustering::average_clustering(g, config.clustering);

    let summary = if within_limit {
        paths::path_summary(g)
    } else {
        Measure::Undefined(UndefinedReason::NodeLimitExceeded)
    };

    let report = MetricsReport {
        node_count,
        edge_count,
        density,
        mean_degree: degrees.mean,
        max_degree: degrees.max,
        max_degree_nodes: degrees.max_nodes,
        degree_centrality,
        betweenness,
        closeness,
        average_clustering,
        diameter: summary.map(|s| s.diameter),
        average_path_length: summary.map(|s| s.average_length),
    };

    info!(
        nodes = report.node_count,
        edges = report.edge_count,
        density = report.density,
        connected = report.diameter.is_defined(),
        "graph metrics computed"
    );
    report
}

fn leader_of(g: &WeightedGraph, scores: &[f64]) -> Measure<Leader> {
    Leader::from_scores(g.nodes(), scores)
        .map_or(Measure::Undefined(UndefinedReason::EmptyGraph), Measure::Defined)
}
