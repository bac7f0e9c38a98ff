//! Metrics report value object and the "undefined" sentinel.

use std::fmt;

use affinity_core::{GraphNode, NodeRole};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Measure
// ---------------------------------------------------------------------------

/// Why a metric has no value for a given graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    EmptyGraph,
    SingleNode,
    Disconnected,
    /// Skipped because the graph exceeds `path_metrics_node_limit`.
    NodeLimitExceeded,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyGraph => "graph is empty",
            Self::SingleNode => "graph has a single node",
            Self::Disconnected => "graph is disconnected",
            Self::NodeLimitExceeded => "graph exceeds the path-metrics node limit",
        })
    }
}

/// A metric value, or the reason it is undefined on this graph.
///
/// Degenerate graphs (empty, single node, disconnected) are valid input:
/// metrics that make no sense there come back as `Undefined` rather than as
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Measure<T> {
    Defined(T),
    Undefined(UndefinedReason),
}

impl<T> Measure<T> {
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined(_) => None,
        }
    }

    #[must_use]
    pub const fn reason(&self) -> Option<UndefinedReason> {
        match self {
            Self::Defined(_) => None,
            Self::Undefined(reason) => Some(*reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Measure<U> {
        match self {
            Self::Defined(v) => Measure::Defined(f(v)),
            Self::Undefined(reason) => Measure::Undefined(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Leader
// ---------------------------------------------------------------------------

/// The node holding the maximum score for one centrality measure.
///
/// When several nodes tie for the maximum, the first in node order is
/// reported. Which node wins a tie is not part of the contract; only
/// `score` is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leader {
    pub label: String,
    pub role: NodeRole,
    pub score: f64,
}

impl Leader {
    /// Pick the first node attaining the maximum of `scores`.
    ///
    /// `scores` is indexed by node position, matching `nodes`.
    pub(crate) fn from_scores<'a>(
        nodes: impl Iterator<Item = &'a GraphNode>,
        scores: &[f64],
    ) -> Option<Self> {
        nodes
            .zip(scores.iter().copied())
            .fold(None, |best: Option<(&GraphNode, f64)>, (node, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((node, score)),
            })
            .map(|(node, score)| Self {
                label: node.label.clone(),
                role: node.role,
                score,
            })
    }
}

// ---------------------------------------------------------------------------
// MetricsReport
// ---------------------------------------------------------------------------

/// Structural metrics for one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub node_count: usize,
    pub edge_count: usize,
    /// `edges / (n(n-1)/2)`; 0 for graphs with fewer than 2 nodes.
    pub density: f64,
    pub mean_degree: f64,
    pub max_degree: usize,
    /// All nodes attaining `max_degree`.
    pub max_degree_nodes: Vec<GraphNode>,
    pub degree_centrality: Measure<Leader>,
    pub betweenness: Measure<Leader>,
    pub closeness: Measure<Leader>,
    pub average_clustering: Measure<f64>,
    pub diameter: Measure<usize>,
    pub average_path_length: Measure<f64>,
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes: {}", self.node_count)?;
        writeln!(f, "Edges: {}", self.edge_count)?;
        writeln!(f, "Density: {:.4}", self.density)?;
        writeln!(f, "Mean degree: {:.2}", self.mean_degree)?;

        let max_nodes: Vec<&str> = self
            .max_degree_nodes
            .iter()
            .map(|n| n.label.as_str())
            .collect();
        writeln!(
            f,
            "Max degree: {} (nodes: {})",
            self.max_degree,
            max_nodes.join(", ")
        )?;

        for (name, measure) in [
            ("degree centrality", &self.degree_centrality),
            ("betweenness", &self.betweenness),
            ("closeness", &self.closeness),
        ] {
            match measure {
                Measure::Defined(leader) => {
                    writeln!(f, "Top {name}: {} ({:.4})", leader.label, leader.score)?;
                }
                Measure::Undefined(reason) => writeln!(f, "Top {name}: undefined ({reason})")?,
            }
        }

        match self.average_clustering {
            Measure::Defined(v) => writeln!(f, "Mean clustering: {v:.4}")?,
            Measure::Undefined(reason) => writeln!(f, "Mean clustering: undefined ({reason})")?,
        }

        match (self.diameter, self.average_path_length) {
            (Measure::Defined(d), Measure::Defined(avg)) => {
                writeln!(f, "Diameter: {d}")?;
                write!(f, "Mean shortest path: {avg:.4}")
            }
            (Measure::Undefined(reason), _) | (_, Measure::Undefined(reason)) => {
                write!(f, "Diameter / mean shortest path: undefined ({reason})")
            }
        }
    }
}
