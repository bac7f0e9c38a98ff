//! Local and average clustering coefficients.
//!
//! The local coefficient of a node with degree `k >= 2` is `2T / (k(k-1))`
//! where `T` is the number of edges among its neighbors (triangles through
//! the node). Below degree 2 the coefficient is undefined; how those nodes
//! enter the average is chosen by [`ClusteringAverage`].

use fixedbitset::FixedBitSet;
use tracing::instrument;

use affinity_core::{ClusteringAverage, WeightedGraph};

use super::adjacency;
use crate::report::{Measure, UndefinedReason};

/// Local clustering coefficient per node position; `None` for nodes with
/// degree below 2.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn local_clustering(g: &WeightedGraph) -> Vec<Option<f64>> {
    let adj = adjacency(g);
    let mut marks = FixedBitSet::with_capacity(adj.len());

    adj.iter()
        .map(|neighbors| {
            let k = neighbors.len();
            if k < 2 {
                return None;
            }

            marks.clear();
            for &u in neighbors {
                marks.insert(u);
            }

            // Each neighbor-neighbor edge is seen from both ends.
            let links: usize = neighbors
                .iter()
                .map(|&u| adj[u].iter().filter(|&&w| marks.contains(w)).count())
                .sum();
            let triangles = links / 2;

            Some((2 * triangles) as f64 / (k * (k - 1)) as f64)
        })
        .collect()
}

/// Mean clustering coefficient.
///
/// Undefined for graphs with at most one node. With
/// [`ClusteringAverage::EligibleOnly`] the mean runs over nodes of degree
/// >= 2 (0.0 when there are none); with [`ClusteringAverage::AllNodes`] every
/// node counts, low-degree nodes as 0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn average_clustering(g: &WeightedGraph, mode: ClusteringAverage) -> Measure<f64> {
    match g.node_count() {
        0 => return Measure::Undefined(UndefinedReason::EmptyGraph),
        1 => return Measure::Undefined(UndefinedReason::SingleNode),
        _ => {}
    }

    let local = local_clustering(g);
    let (sum, count) = match mode {
        ClusteringAverage::EligibleOnly => local
            .iter()
            .flatten()
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1)),
        ClusteringAverage::AllNodes => (
            local.iter().map(|v| v.unwrap_or(0.0)).sum::<f64>(),
            local.len(),
        ),
    };

    if count == 0 {
        Measure::Defined(0.0)
    } else {
        Measure::Defined(sum / count as f64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
