//! One end-to-end analysis run.
//!
//! ## Pipeline
//!
//! ```text
//! &[WeightedPair]
//!        ↓  build_incidence (sum of weights per (source, target))
//! IncidenceMatrix ─┬─ build_similarity   → SimilarityMatrix
//!                  └─ build_cooccurrence → CoOccurrenceMatrix
//!        ↓  WeightedGraph::from_incidence / from_projection
//! incidence graph, similarity graph, co-occurrence graph
//!        ↓  engine::analyze_graph
//! three MetricsReports
//! ```
//!
//! The first failing stage aborts the run; nothing partial is returned.

use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};

use affinity_core::{
    AnalysisConfig, AnalysisError, CoOccurrenceMatrix, IncidenceMatrix, NodeRole,
    SimilarityMatrix, WeightedGraph, WeightedPair, build_cooccurrence, build_incidence,
    build_similarity,
};

use crate::engine::analyze_graph;
use crate::report::MetricsReport;

/// The three graphs a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphKind {
    /// Bipartite sources × targets graph.
    Incidence,
    /// Sources linked by shared targets.
    Similarity,
    /// Targets linked by shared sources.
    CoOccurrence,
}

impl GraphKind {
    pub const ALL: [Self; 3] = [Self::Incidence, Self::Similarity, Self::CoOccurrence];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Incidence => "Incidence graph (sources x targets)",
            Self::Similarity => "Similarity graph (sources)",
            Self::CoOccurrence => "Co-occurrence graph (targets)",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Everything one analysis produced. Owned by the caller; never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRun {
    incidence: IncidenceMatrix,
    similarity: SimilarityMatrix,
    cooccurrence: CoOccurrenceMatrix,
    incidence_graph: WeightedGraph,
    similarity_graph: WeightedGraph,
    cooccurrence_graph: WeightedGraph,
    incidence_report: MetricsReport,
    similarity_report: MetricsReport,
    cooccurrence_report: MetricsReport,
}

impl AnalysisRun {
    #[must_use]
    pub const fn incidence(&self) -> &IncidenceMatrix {
        &self.incidence
    }

    #[must_use]
    pub const fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    #[must_use]
    pub const fn cooccurrence(&self) -> &CoOccurrenceMatrix {
        &self.cooccurrence
    }

    #[must_use]
    pub const fn graph(&self, kind: GraphKind) -> &WeightedGraph {
        match kind {
            GraphKind::Incidence => &self.incidence_graph,
            GraphKind::Similarity => &self.similarity_graph,
            GraphKind::CoOccurrence => &self.cooccurrence_graph,
        }
    }

    #[must_use]
    pub const fn report(&self, kind: GraphKind) -> &MetricsReport {
        match kind {
            GraphKind::Incidence => &self.incidence_report,
            GraphKind::Similarity => &self.similarity_report,
            GraphKind::CoOccurrence => &self.cooccurrence_report,
        }
    }

    /// `(kind, graph, report)` in pipeline order.
    pub fn reports(
        &self,
    ) -> impl Iterator<Item = (GraphKind, &WeightedGraph, &MetricsReport)> + '_ {
        GraphKind::ALL
            .into_iter()
            .map(|kind| (kind, self.graph(kind), self.report(kind)))
    }
}

impl fmt::Display for AnalysisRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, _, report)) in self.reports().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            writeln!(f, "== {kind} ==")?;
            write!(f, "{report}")?;
        }
        Ok(())
    }
}

/// Run the full pipeline over `pairs`.
///
/// # Errors
///
/// - [`AnalysisError::EmptyInput`] if `pairs` is empty.
/// - [`AnalysisError::InvalidWeight`] if a weight is negative or not finite.
#[instrument(skip(pairs, config), fields(pairs = pairs.len()))]
pub fn run_analysis(
    pairs: &[WeightedPair],
    config: &AnalysisConfig,
) -> Result<AnalysisRun, AnalysisError> {
    let incidence = build_incidence(pairs, config.labels.order)?;
    let similarity = build_similarity(&incidence);
    let cooccurrence = build_cooccurrence(&incidence);

    let incidence_graph = WeightedGraph::from_incidence(&incidence);
    let similarity_graph = WeightedGraph::from_projection(&similarity, NodeRole::Source);
    let cooccurrence_graph = WeightedGraph::from_projection(&cooccurrence, NodeRole::Target);
    debug!(
        incidence_edges = incidence_graph.edge_count(),
        similarity_edges = similarity_graph.edge_count(),
        cooccurrence_edges = cooccurrence_graph.edge_count(),
        "graphs built"
    );

    let incidence_report = analyze_graph(&incidence_graph, &config.metrics);
    let similarity_report = analyze_graph(&similarity_graph, &config.metrics);
    let cooccurrence_report = analyze_graph(&cooccurrence_graph, &config.metrics);

    Ok(AnalysisRun {
        incidence,
        similarity,
        cooccurrence,
        incidence_graph,
        similarity_graph,
        cooccurrence_graph,
        incidence_report,
        similarity_report,
        cooccurrence_report,
    })
}
