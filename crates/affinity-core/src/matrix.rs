//! Incidence and projection matrices.
//!
//! # Overview
//!
//! The interaction log is aggregated into an incidence matrix `A` (rows =
//! distinct sources, columns = distinct targets, cell = summed weight). Two
//! square projections are derived from it:
//!
//! ```text
//! WeightedPair*  ──build_incidence──▶  A            (sources × targets)
//!                                      ├─ A · Aᵗ ──▶ SimilarityMatrix   (sources × sources)
//!                                      └─ Aᵗ · A ──▶ CoOccurrenceMatrix (targets × targets)
//! ```
//!
//! Both projections have their diagonal forced to zero: self-similarity is
//! excluded. Values are raw dot products with no normalization, so they are
//! only comparable within one run.
//!
//! ## Label order
//!
//! Labels are ordered according to [`LabelOrder`]. Either way the order is
//! a pure function of the input, so serializing the same log twice yields the
//! same table and the same [`IncidenceMatrix::content_hash`].

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use nalgebra::DMatrix;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, instrument};

use crate::config::LabelOrder;
use crate::error::AnalysisError;
use crate::model::WeightedPair;

// ---------------------------------------------------------------------------
// LabeledMatrix
// ---------------------------------------------------------------------------

/// A dense `f64` matrix with string labels on both axes.
///
/// This is the shape every matrix takes at the persistence boundary: it
/// serializes as `{ "rows": [...], "columns": [...], "values": [[...], ...] }`
/// with `values` in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    row_index: HashMap<String, usize>,
    col_index: HashMap<String, usize>,
    values: DMatrix<f64>,
}

impl LabeledMatrix {
    fn new(row_labels: Vec<String>, col_labels: Vec<String>, values: DMatrix<f64>) -> Self {
        debug_assert_eq!(values.nrows(), row_labels.len());
        debug_assert_eq!(values.ncols(), col_labels.len());
        let row_index = index_of(&row_labels);
        let col_index = index_of(&col_labels);
        Self {
            row_labels,
            col_labels,
            row_index,
            col_index,
            values,
        }
    }

    #[must_use]
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    #[must_use]
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    #[must_use]
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    #[must_use]
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Look up a cell by its row and column labels.
    ///
    /// Returns `None` if either label is not part of the matrix. Label
    /// pairs that never occurred together return `Some(0.0)`.
    #[must_use]
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = *self.row_index.get(row)?;
        let j = *self.col_index.get(col)?;
        Some(self.values[(i, j)])
    }

    /// Cell at positional index `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrows()` or `j >= ncols()`.
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    /// The underlying numeric matrix.
    #[must_use]
    pub const fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Values copied out in row-major order.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    /// Number of cells with a value other than zero.
    #[must_use]
    pub fn nonzero_count(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }

    #[must_use]
    pub fn is_square(&self) -> bool {
        self.values.is_square()
    }

    /// `true` when the matrix is square and `m[i][j] == m[j][i]` exactly.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows();
        (0..n).all(|i| (i + 1..n).all(|j| self.values[(i, j)] == self.values[(j, i)]))
    }
}

impl Serialize for LabeledMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LabeledMatrix", 3)?;
        state.serialize_field("rows", &self.row_labels)?;
        state.serialize_field("columns", &self.col_labels)?;
        state.serialize_field("values", &self.rows())?;
        state.end()
    }
}

impl fmt::Display for LabeledMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows()
            .into_iter()
            .map(|row| row.into_iter().map(|v| v.to_string()).collect())
            .collect();

        let label_width = self
            .row_labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let col_widths: Vec<usize> = self
            .col_labels
            .iter()
            .enumerate()
            .map(|(j, label)| {
                cells
                    .iter()
                    .map(|row| row[j].chars().count())
                    .chain(std::iter::once(label.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (label, width) in self.col_labels.iter().zip(&col_widths) {
            write!(f, "  {label:>width$}")?;
        }
        writeln!(f)?;

        for (label, row) in self.row_labels.iter().zip(&cells) {
            write!(f, "{label:<label_width$}")?;
            for (cell, width) in row.iter().zip(&col_widths) {
                write!(f, "  {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Typed matrices
// ---------------------------------------------------------------------------

/// Sources × targets matrix of summed interaction weights.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IncidenceMatrix {
    table: LabeledMatrix,
    /// BLAKE3 hash of labels and values, formatted `blake3:<hex>`.
    content_hash: String,
}

impl IncidenceMatrix {
    #[must_use]
    pub const fn table(&self) -> &LabeledMatrix {
        &self.table
    }

    /// Hash of the labels and values in serialization order.
    ///
    /// Identical inputs (under the same [`LabelOrder`]) always produce the
    /// same hash.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

/// Sources × sources matrix `A · Aᵗ` with a zero diagonal.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SimilarityMatrix {
    table: LabeledMatrix,
}

/// Targets × targets matrix `Aᵗ · A` with a zero diagonal.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CoOccurrenceMatrix {
    table: LabeledMatrix,
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::SimilarityMatrix {}
    impl Sealed for super::CoOccurrenceMatrix {}
}

/// A square, symmetric, zero-diagonal projection of the incidence matrix.
///
/// Only [`SimilarityMatrix`] and [`CoOccurrenceMatrix`] implement this, so
/// graph construction can rely on both invariants.
pub trait Projection: sealed::Sealed {
    fn table(&self) -> &LabeledMatrix;
}

impl Projection for SimilarityMatrix {
    fn table(&self) -> &LabeledMatrix {
        &self.table
    }
}

impl Projection for CoOccurrenceMatrix {
    fn table(&self) -> &LabeledMatrix {
        &self.table
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Aggregate raw pairs into the incidence matrix, summing the weights of
/// repeated `(source, target)` pairs.
///
/// # Errors
///
/// - [`AnalysisError::EmptyInput`] if `pairs` is empty.
/// - [`AnalysisError::InvalidWeight`] if any weight is negative, NaN or
///   infinite, or if a summed cell overflows.
#[instrument(skip(pairs), fields(pairs = pairs.len()))]
pub fn build_incidence(
    pairs: &[WeightedPair],
    order: LabelOrder,
) -> Result<IncidenceMatrix, AnalysisError> {
    if pairs.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    if let Some(bad) = pairs
        .iter()
        .find(|p| !p.weight.is_finite() || p.weight < 0.0)
    {
        return Err(AnalysisError::InvalidWeight {
            source_label: bad.source.clone(),
            target_label: bad.target.clone(),
            weight: bad.weight,
        });
    }

    let row_labels = collect_labels(pairs.iter().map(|p| p.source.as_str()), order);
    let col_labels = collect_labels(pairs.iter().map(|p| p.target.as_str()), order);
    let row_index = index_of(&row_labels);
    let col_index = index_of(&col_labels);

    let mut values = DMatrix::<f64>::zeros(row_labels.len(), col_labels.len());
    for pair in pairs {
        // Both lookups succeed: labels were collected from these same pairs.
        if let (Some(&i), Some(&j)) = (row_index.get(&pair.source), col_index.get(&pair.target)) {
            values[(i, j)] += pair.weight;
        }
    }

    // Finite weights can still overflow once summed.
    if let Some((i, j)) = first_non_finite(&values) {
        return Err(AnalysisError::InvalidWeight {
            source_label: row_labels[i].clone(),
            target_label: col_labels[j].clone(),
            weight: values[(i, j)],
        });
    }

    let content_hash = compute_content_hash(&row_labels, &col_labels, &values);
    debug!(
        rows = row_labels.len(),
        cols = col_labels.len(),
        %content_hash,
        "built incidence matrix"
    );

    Ok(IncidenceMatrix {
        table: LabeledMatrix {
            row_labels,
            col_labels,
            row_index,
            col_index,
            values,
        },
        content_hash,
    })
}

/// Similarity among sources: `A · Aᵗ` with the diagonal set to zero.
#[must_use]
#[instrument(skip(inc))]
pub fn build_similarity(inc: &IncidenceMatrix) -> SimilarityMatrix {
    let a = inc.table.values();
    let values = symmetric_zero_diagonal(a * a.transpose());
    let labels = inc.table.row_labels.clone();
    debug!(size = labels.len(), "built similarity matrix");
    SimilarityMatrix {
        table: LabeledMatrix::new(labels.clone(), labels, values),
    }
}

/// Co-occurrence among targets: `Aᵗ · A` with the diagonal set to zero.
#[must_use]
#[instrument(skip(inc))]
pub fn build_cooccurrence(inc: &IncidenceMatrix) -> CoOccurrenceMatrix {
    let a = inc.table.values();
    let values = symmetric_zero_diagonal(a.transpose() * a);
    let labels = inc.table.col_labels.clone();
    debug!(size = labels.len(), "built co-occurrence matrix");
    CoOccurrenceMatrix {
        table: LabeledMatrix::new(labels.clone(), labels, values),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn collect_labels<'a>(labels: impl Iterator<Item = &'a str>, order: LabelOrder) -> Vec<String> {
    match order {
        LabelOrder::Sorted => labels
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect(),
        LabelOrder::FirstSeen => {
            let mut seen = HashSet::new();
            labels
                .filter(|label| seen.insert(*label))
                .map(str::to_owned)
                .collect()
        }
    }
}

/// Position of the first non-finite cell in row-major order.
fn first_non_finite(values: &DMatrix<f64>) -> Option<(usize, usize)> {
    (0..values.nrows())
        .flat_map(|i| (0..values.ncols()).map(move |j| (i, j)))
        .find(|&(i, j)| !values[(i, j)].is_finite())
}

fn index_of(labels: &[String]) -> HashMap<String, usize> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.clone(), i))
        .collect()
}

/// Zero the diagonal and mirror the upper triangle onto the lower one.
///
/// A Gram matrix is symmetric in exact arithmetic, but a blocked matrix
/// product may sum `(i, j)` and `(j, i)` in different orders.
fn symmetric_zero_diagonal(mut m: DMatrix<f64>) -> DMatrix<f64> {
    let n = m.nrows();
    for i in 0..n {
        m[(i, i)] = 0.0;
        for j in (i + 1)..n {
            m[(j, i)] = m[(i, j)];
        }
    }
    m
}

fn compute_content_hash(rows: &[String], cols: &[String], values: &DMatrix<f64>) -> String {
    let mut hasher = blake3::Hasher::new();
    for label in rows {
        hasher.update(label.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for label in cols {
        hasher.update(label.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for row in values.row_iter() {
        for v in row.iter() {
            hasher.update(&v.to_le_bytes());
        }
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
