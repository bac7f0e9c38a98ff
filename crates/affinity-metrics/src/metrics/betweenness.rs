//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness nodes are bridges between
//! otherwise separate groups.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! The graph is undirected, so every unordered pair `{s, t}` is accumulated
//! twice (once from each endpoint). Dividing by `(n-1)(n-2)` therefore gives
//! the fraction of the `C(n-1, 2)` pairs not involving the node whose
//! shortest paths run through it. Scores lie in `[0, 1]`. Graphs with two
//! nodes or fewer score 0 everywhere.

use tracing::instrument;

use affinity_core::WeightedGraph;

use super::adjacency;

/// Normalized betweenness centrality per node position.
///
/// Edge weights are ignored: every edge is one hop. Disconnected nodes and
/// nodes on no shortest path score 0.0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(g: &WeightedGraph) -> Vec<f64> {
    let adj = adjacency(g);
    let n = adj.len();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in 0..n {
        // Stack: nodes in order of discovery (farthest popped first).
        let mut stack: Vec<usize> = Vec::with_capacity(n);

        // predecessors[w] = nodes immediately preceding w on shortest paths
        // from s.
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[s] = 1.0;

        // dist[t]: distance from s to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[s] = 0;

        let mut queue = std::collections::VecDeque::from([s]);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &w in &adj[v] {
                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for score in &mut cb {
            *score *= scale;
        }
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
