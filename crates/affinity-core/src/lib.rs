#![forbid(unsafe_code)]
//! affinity-core library.
//!
//! Turns a weighted bipartite interaction log into an incidence matrix, its
//! two projections (similarity among sources, co-occurrence among targets)
//! and one undirected graph per matrix. Metrics over those graphs live in
//! `affinity-metrics`.
//!
//! # Conventions
//!
//! - **Errors**: pipeline stages return [`error::AnalysisError`]; config
//!   loading uses `anyhow::Result` with context.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod model;

pub use config::{AnalysisConfig, ClusteringAverage, LabelOrder, MetricsConfig, load_config};
pub use error::{AnalysisError, ErrorCode};
pub use graph::{GraphNode, WeightedGraph};
pub use matrix::{
    CoOccurrenceMatrix, IncidenceMatrix, LabeledMatrix, Projection, SimilarityMatrix,
    build_cooccurrence, build_incidence, build_similarity,
};
pub use model::{NodeRole, WeightedPair};
