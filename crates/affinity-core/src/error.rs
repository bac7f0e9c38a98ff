use std::fmt;

/// Machine-readable error codes for callers that branch on failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    EmptyInput,
    InvalidWeight,
    InvalidGraph,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::EmptyInput => "E2001",
            Self::InvalidWeight => "E2002",
            Self::InvalidGraph => "E2003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::EmptyInput => "Interaction log is empty",
            Self::InvalidWeight => "Interaction weight is negative or not finite",
            Self::InvalidGraph => "Graph definition is malformed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix the TOML syntax in the analysis config and retry."),
            Self::EmptyInput => Some("Provide at least one (source, target, weight) record."),
            Self::InvalidWeight => Some("Weights must be finite and >= 0."),
            Self::InvalidGraph => {
                Some("Edges need two distinct known endpoints and a positive weight.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failure raised by a pipeline stage.
///
/// A stage either returns a complete value or one of these; no partially
/// built matrix or graph ever escapes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// The input pair collection had no records.
    #[error("interaction log is empty: nothing to aggregate")]
    EmptyInput,

    /// A record carried a negative, NaN or infinite weight.
    #[error("invalid weight {weight} for pair ({source_label}, {target_label})")]
    InvalidWeight {
        source_label: String,
        target_label: String,
        weight: f64,
    },

    /// A hand-assembled graph violated the simple-graph invariants.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
}

impl AnalysisError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyInput => ErrorCode::EmptyInput,
            Self::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            Self::InvalidGraph(_) => ErrorCode::InvalidGraph,
        }
    }
}
