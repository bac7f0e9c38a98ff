//! Shortest-path metrics: connectivity, closeness, diameter, average length.
//!
//! # Overview
//!
//! Every metric here is built on one BFS per node (edges count as one hop,
//! weights ignored), so the cost is O(V * (V + E)).
//!
//! - **Closeness** is defined per component: a node only sums distances to
//!   the nodes it can reach, then the score is scaled by the fraction of the
//!   graph it reaches (Wasserman & Faust). On a connected graph this is the
//!   classic `(n - 1) / Σ d(v, u)`.
//! - **Diameter** and **average shortest-path length** need every pair to be
//!   reachable. Connectivity is checked first; empty, single-node and
//!   disconnected graphs come back as [`Measure::Undefined`] instead of an
//!   error.

use petgraph::algo::connected_components;
use serde::Serialize;
use tracing::instrument;

use affinity_core::WeightedGraph;

use super::{adjacency, bfs_distances};
use crate::report::{Measure, UndefinedReason};

/// Number of connected components (0 for the empty graph).
#[must_use]
pub fn component_count(g: &WeightedGraph) -> usize {
    connected_components(g.inner())
}

/// `true` iff the graph has at least one node and a single component.
#[must_use]
pub fn is_connected(g: &WeightedGraph) -> bool {
    component_count(g) == 1
}

/// Closeness centrality per node position.
///
/// For node `v` reaching `r` other nodes at total distance `D`:
/// `(r / D) * (r / (n - 1))`. Isolated nodes and single-node graphs score 0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(g: &WeightedGraph) -> Vec<f64> {
    let adj = adjacency(g);
    let n = adj.len();

    (0..n)
        .map(|v| {
            let (reachable, total) = bfs_distances(&adj, v)
                .into_iter()
                .flatten()
                .filter(|&d| d > 0)
                .fold((0usize, 0usize), |(r, t), d| (r + 1, t + d));

            if total == 0 {
                return 0.0;
            }
            let r = reachable as f64;
            (r / total as f64) * (r / (n - 1) as f64)
        })
        .collect()
}

/// Distance summary of a connected graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathSummary {
    /// Longest shortest-path distance between any two nodes.
    pub diameter: usize,
    /// Mean shortest-path distance over all ordered pairs of distinct nodes.
    pub average_length: f64,
}

/// Diameter and average shortest-path length, defined only for connected
/// graphs with at least two nodes.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn path_summary(g: &WeightedGraph) -> Measure<PathSummary> {
    let n = g.node_count();
    match n {
        0 => return Measure::Undefined(UndefinedReason::EmptyGraph),
        1 => return Measure::Undefined(UndefinedReason::SingleNode),
        _ => {}
    }
    if !is_connected(g) {
        return Measure::Undefined(UndefinedReason::Disconnected);
    }

    let adj = adjacency(g);
    let mut diameter = 0usize;
    let mut total = 0usize;

    for v in 0..n {
        // Connected: every distance is Some.
        for d in bfs_distances(&adj, v).into_iter().flatten() {
            diameter = diameter.max(d);
            total += d;
        }
    }

    Measure::Defined(PathSummary {
        diameter,
        average_length: total as f64 / (n * (n - 1)) as f64,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
