use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default)]
    pub order: LabelOrder,
}

/// Ordering of matrix row/column labels.
///
/// Both variants are deterministic for identical input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelOrder {
    /// Lexicographic order of the label strings.
    #[default]
    Sorted,
    /// Order in which each label first appears in the input.
    FirstSeen,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub clustering: ClusteringAverage,
    /// Skip betweenness, closeness and distance metrics on graphs with more
    /// nodes than this.
    #[serde(default)]
    pub path_metrics_node_limit: Option<usize>,
}

/// Which nodes enter the mean clustering coefficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusteringAverage {
    /// Only nodes with degree >= 2 (the coefficient is undefined below that).
    #[default]
    EligibleOnly,
    /// Every node, with degree < 2 nodes contributing 0.
    AllNodes,
}

impl AnalysisConfig {
    /// Parse a config from TOML text. Missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).with_context(|| {
            let code = ErrorCode::ConfigParseError;
            format!("{code}: {}", code.message())
        })
    }
}

/// Load an [`AnalysisConfig`] from `path`, falling back to defaults when the
/// file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no analysis config, using defaults");
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    AnalysisConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
