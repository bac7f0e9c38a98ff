//! Input records and node roles shared by every pipeline stage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the interaction log: `source` interacted with `target` with
/// the given non-negative `weight`.
///
/// The same `(source, target)` may appear many times; the incidence matrix
/// sums all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPair {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl WeightedPair {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

impl<S: Into<String>, T: Into<String>> From<(S, T, f64)> for WeightedPair {
    fn from((source, target, weight): (S, T, f64)) -> Self {
        Self::new(source, target, weight)
    }
}

/// Which side of the interaction log a graph node came from.
///
/// Renderers use the role to color or size nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeRole {
    /// A distinct `source` value (incidence-matrix row).
    #[serde(rename = "source-type")]
    Source,
    /// A distinct `target` value (incidence-matrix column).
    #[serde(rename = "target-type")]
    Target,
}

impl NodeRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source-type",
            Self::Target => "target-type",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_from_tuple() {
        let pair: WeightedPair = ("alice", "rock", 2.5).into();
        assert_eq!(pair, WeightedPair::new("alice", "rock", 2.5));
    }

    #[test]
    fn role_serializes_with_type_suffix() {
        let json = serde_json::to_string(&NodeRole::Source).expect("serialize role");
        assert_eq!(json, "\"source-type\"");
        let back: NodeRole = serde_json::from_str("\"target-type\"").expect("parse role");
        assert_eq!(back, NodeRole::Target);
        assert_eq!(NodeRole::Target.to_string(), "target-type");
    }
}
