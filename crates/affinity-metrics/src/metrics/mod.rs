//! Structural metrics over a [`WeightedGraph`].
//!
//! # Overview
//!
//! Each submodule answers one question about the graph:
//!
//! - **`basic`**: counts, density, degree statistics and degree centrality.
//! - **`betweenness`**: which nodes mediate shortest paths (Brandes).
//! - **`paths`**: connectivity, closeness centrality, diameter and average
//!   shortest-path length (BFS from every node).
//! - **`clustering`**: local and average clustering coefficients (triangle
//!   counting).
//!
//! All path-based metrics treat the graph as unweighted: edge weights are
//! stored for renderers but every edge counts as one hop.
//!
//! Per-node scores are returned as `Vec<f64>` indexed by node position
//! (`NodeIndex::index()`), which is the same order as
//! [`WeightedGraph::nodes`].
//!
//! ```rust,ignore
//! use affinity_metrics::metrics::{basic, betweenness, clustering, paths};
//!
//! let dc = basic::degree_centrality(&g);
//! let bc = betweenness::betweenness_centrality(&g);
//! let cc = paths::closeness_centrality(&g);
//! let avg = clustering::average_clustering(&g, ClusteringAverage::EligibleOnly);
//! ```

use std::collections::VecDeque;

use affinity_core::WeightedGraph;

pub mod basic;
pub mod betweenness;
pub mod clustering;
pub mod paths;

/// Neighbor lists by node position.
pub(crate) fn adjacency(g: &WeightedGraph) -> Vec<Vec<usize>> {
    let inner = g.inner();
    inner
        .node_indices()
        .map(|idx| inner.neighbors(idx).map(|n| n.index()).collect())
        .collect()
}

/// Hop distances from `source` to every node; `None` for unreachable nodes.
pub(crate) fn bfs_distances(adj: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; adj.len()];
    dist[source] = Some(0);

    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        let next = dist[v].map_or(0, |d| d + 1);
        for &w in &adj[v] {
            if dist[w].is_none() {
                dist[w] = Some(next);
                queue.push_back(w);
            }
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bfs_on_path_and_isolated_node() {
        // 0 - 1 - 2    3
        let adj = vec![vec![1], vec![0, 2], vec![1], vec![]];
        let dist = bfs_distances(&adj, 0);
        assert_eq!(dist, vec![Some(0), Some(1), Some(2), None]);
    }
}
