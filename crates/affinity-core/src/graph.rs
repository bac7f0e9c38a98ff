//! Graph construction from incidence and projection matrices.
//!
//! # Overview
//!
//! Every matrix produced by [`crate::matrix`] becomes an undirected,
//! weighted, simple graph:
//!
//! - the **incidence graph** is bipartite: one node per source (role
//!   [`NodeRole::Source`]) and one per target ([`NodeRole::Target`]), with an
//!   edge wherever the summed weight is positive;
//! - each **projection graph** has one node per matrix label and an edge for
//!   every positive cell strictly above the diagonal. Reading only the upper
//!   triangle turns a symmetric matrix into an edge set without
//!   double-counting.
//!
//! Zero cells never produce edges: sparsity in the matrix is meaningful.
//!
//! ## Node identity
//!
//! A node is identified by `(role, label)`. A source and a target that share
//! a label are two different nodes in the incidence graph.
//!
//! Graphs are immutable once built; the metrics engine only reads them.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::AnalysisError;
use crate::matrix::{IncidenceMatrix, LabeledMatrix, Projection};
use crate::model::NodeRole;

/// Node payload: the label it came from and which side of the log it is on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphNode {
    pub label: String,
    pub role: NodeRole,
}

/// An undirected weighted simple graph derived from one matrix.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    graph: UnGraph<GraphNode, f64>,
    node_map: HashMap<(NodeRole, String), NodeIndex>,
}

impl WeightedGraph {
    fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
            node_map: HashMap::with_capacity(nodes),
        }
    }

    fn push_node(&mut self, label: &str, role: NodeRole) -> NodeIndex {
        let idx = self.graph.add_node(GraphNode {
            label: label.to_owned(),
            role,
        });
        self.node_map.insert((role, label.to_owned()), idx);
        idx
    }

    /// Build the bipartite incidence graph.
    ///
    /// Rows become [`NodeRole::Source`] nodes (first, in row order), columns
    /// become [`NodeRole::Target`] nodes (after, in column order). An edge
    /// `(row, col, w)` exists iff `w > 0`.
    #[must_use]
    #[instrument(skip(inc))]
    pub fn from_incidence(inc: &IncidenceMatrix) -> Self {
        let table = inc.table();
        let mut g = Self::with_capacity(table.nrows() + table.ncols(), table.nonzero_count());

        let rows: Vec<NodeIndex> = table
            .row_labels()
            .iter()
            .map(|label| g.push_node(label, NodeRole::Source))
            .collect();
        let cols: Vec<NodeIndex> = table
            .col_labels()
            .iter()
            .map(|label| g.push_node(label, NodeRole::Target))
            .collect();

        for (i, &row) in rows.iter().enumerate() {
            for (j, &col) in cols.iter().enumerate() {
                let weight = table.at(i, j);
                if weight > 0.0 {
                    g.graph.add_edge(row, col, weight);
                }
            }
        }

        debug!(
            nodes = g.node_count(),
            edges = g.edge_count(),
            "built incidence graph"
        );
        g
    }

    /// Build a unipartite graph from a projection matrix.
    ///
    /// Every label becomes a node tagged `role`. Only cells strictly above
    /// the diagonal are read, and only positive ones become edges.
    #[must_use]
    #[instrument(skip(mat))]
    pub fn from_projection<P: Projection>(mat: &P, role: NodeRole) -> Self {
        let g = Self::from_upper_triangle(mat.table(), role);
        debug!(
            nodes = g.node_count(),
            edges = g.edge_count(),
            "built projection graph"
        );
        g
    }

    fn from_upper_triangle(table: &LabeledMatrix, role: NodeRole) -> Self {
        let n = table.nrows();
        let mut g = Self::with_capacity(n, table.nonzero_count() / 2);

        let nodes: Vec<NodeIndex> = table
            .row_labels()
            .iter()
            .map(|label| g.push_node(label, role))
            .collect();

        for i in 0..n {
            for j in (i + 1)..n {
                let weight = table.at(i, j);
                if weight > 0.0 {
                    g.graph.add_edge(nodes[i], nodes[j], weight);
                }
            }
        }
        g
    }

    /// Assemble a graph from explicit nodes and edges.
    ///
    /// Edge endpoints are resolved by label, so labels must be unique across
    /// roles here.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidGraph`] for a duplicate node label, an
    /// edge naming an unknown node, a self-loop, a repeated unordered pair, or
    /// a weight that is not finite and positive.
    pub fn from_parts(
        nodes: &[(&str, NodeRole)],
        edges: &[(&str, &str, f64)],
    ) -> Result<Self, AnalysisError> {
        let mut g = Self::with_capacity(nodes.len(), edges.len());
        let mut by_label: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());

        for &(label, role) in nodes {
            if by_label.contains_key(label) {
                return Err(AnalysisError::InvalidGraph(format!(
                    "duplicate node '{label}'"
                )));
            }
            let idx = g.push_node(label, role);
            by_label.insert(label, idx);
        }

        for &(a, b, weight) in edges {
            let resolve = |label: &str| {
                by_label.get(label).copied().ok_or_else(|| {
                    AnalysisError::InvalidGraph(format!("edge references unknown node '{label}'"))
                })
            };
            let ia = resolve(a)?;
            let ib = resolve(b)?;

            if ia == ib {
                return Err(AnalysisError::InvalidGraph(format!("self-loop on '{a}'")));
            }
            if !weight.is_finite() || weight <= 0.0 {
                return Err(AnalysisError::InvalidGraph(format!(
                    "edge ({a}, {b}) has non-positive weight {weight}"
                )));
            }
            if g.graph.contains_edge(ia, ib) {
                return Err(AnalysisError::InvalidGraph(format!(
                    "duplicate edge ({a}, {b})"
                )));
            }
            g.graph.add_edge(ia, ib, weight);
        }

        Ok(g)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.graph.node_weights()
    }

    /// Node payload at `idx`.
    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(idx)
    }

    /// Label of the node at `idx`.
    #[must_use]
    pub fn label(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|n| n.label.as_str())
    }

    /// Look up a node by role and label.
    #[must_use]
    pub fn node_index(&self, role: NodeRole, label: &str) -> Option<NodeIndex> {
        self.node_map.get(&(role, label.to_owned())).copied()
    }

    /// Nodes carrying `role`, in index order.
    pub fn nodes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &GraphNode> + '_ {
        self.nodes().filter(move |n| n.role == role)
    }

    /// Edges as `(endpoint, endpoint, weight)`, endpoints in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode, f64)> + '_ {
        self.graph.edge_references().map(|e| {
            (
                &self.graph[e.source()],
                &self.graph[e.target()],
                *e.weight(),
            )
        })
    }

    /// Weight of the edge between `a` and `b`, if any.
    #[must_use]
    pub fn edge_weight(&self, a: NodeIndex, b: NodeIndex) -> Option<f64> {
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// Number of edges touching `idx` (weights ignored).
    #[must_use]
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.graph.edge_weights().sum()
    }

    /// The underlying petgraph graph.
    #[must_use]
    pub const fn inner(&self) -> &UnGraph<GraphNode, f64> {
        &self.graph
    }
}

#[derive(Serialize)]
struct EdgeRecord<'a> {
    source: &'a str,
    target: &'a str,
    weight: f64,
}

impl Serialize for WeightedGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let nodes: Vec<&GraphNode> = self.nodes().collect();
        let edges: Vec<EdgeRecord<'_>> = self
            .edges()
            .map(|(a, b, weight)| EdgeRecord {
                source: &a.label,
                target: &b.label,
                weight,
            })
            .collect();

        let mut state = serializer.serialize_struct("WeightedGraph", 2)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
