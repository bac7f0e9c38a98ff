#![forbid(unsafe_code)]
//! affinity-metrics library.
//!
//! Structural metrics over the graphs built by `affinity-core`, and the
//! pipeline that runs a whole analysis from raw pairs to reports.
//!
//! # Conventions
//!
//! - **Errors**: fallible entry points return `affinity_core::AnalysisError`;
//!   degenerate graphs yield [`report::Measure::Undefined`], never an error.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod engine;
pub mod metrics;
pub mod pipeline;
pub mod report;

pub use engine::analyze_graph;
pub use pipeline::{AnalysisRun, GraphKind, run_analysis};
pub use report::{Leader, Measure, MetricsReport, UndefinedReason};
