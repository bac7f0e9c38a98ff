//! Counting metrics: density, degree statistics and degree centrality.
//!
//! These are linear in the graph size and always defined; empty and
//! single-node graphs resolve to documented zero values instead of dividing
//! by zero.

use affinity_core::{GraphNode, WeightedGraph};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Density
// ---------------------------------------------------------------------------

/// Density of an undirected simple graph: `edges / (n * (n - 1) / 2)`.
///
/// Returns 0.0 for graphs with fewer than 2 nodes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn density(g: &WeightedGraph) -> f64 {
    let n = g.node_count();
    if n < 2 {
        return 0.0_f64;
    }
    let max_edges = (n * (n - 1) / 2) as f64;
    g.edge_count() as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Degree statistics
// ---------------------------------------------------------------------------

/// Degree distribution summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeStats {
    /// Degree per node position.
    pub degrees: Vec<usize>,
    /// Total degree / node count; 0.0 for the empty graph.
    pub mean: f64,
    /// Largest degree; 0 for the empty graph.
    pub max: usize,
    /// Every node whose degree equals `max`, in node order. Ties are all
    /// reported.
    pub max_nodes: Vec<GraphNode>,
}

/// Compute per-node degrees (edge counts, weights ignored) and their summary.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_stats(g: &WeightedGraph) -> DegreeStats {
    let inner = g.inner();
    let degrees: Vec<usize> = inner.node_indices().map(|idx| g.degree(idx)).collect();

    let n = degrees.len();
    let mean = if n == 0 {
        0.0
    } else {
        degrees.iter().sum::<usize>() as f64 / n as f64
    };
    let max = degrees.iter().copied().max().unwrap_or(0);

    let max_nodes = if n == 0 {
        Vec::new()
    } else {
        g.nodes()
            .zip(&degrees)
            .filter(|&(_, &d)| d == max)
            .map(|(node, _)| node.clone())
            .collect()
    };

    DegreeStats {
        degrees,
        mean,
        max,
        max_nodes,
    }
}

// ---------------------------------------------------------------------------
// Degree centrality
// ---------------------------------------------------------------------------

/// Normalized degree centrality: `degree / (n - 1)` per node position.
///
/// A single isolated node scores 1.0; the empty graph yields an empty vec.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(g: &WeightedGraph) -> Vec<f64> {
    let n = g.node_count();
    if n <= 1 {
        return vec![1.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    g.inner()
        .node_indices()
        .map(|idx| g.degree(idx) as f64 * scale)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
