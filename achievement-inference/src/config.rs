//! Configuration for the achievement inferencer.

use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};

/// Diagnostics settings for an [`AchievementInferencer`](crate::AchievementInferencer).
///
/// None of these change query results; they only control what is logged when the
/// derived index is rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferencerConfig {
    /// Log prerequisite and goal ids that do not resolve to a record
    pub warn_on_dangling_references: bool,
    /// Log achievements that are reachable from themselves
    pub warn_on_cycles: bool,
}

impl Default for InferencerConfig {
    fn default() -> Self {
        Self {
            warn_on_dangling_references: true,
            warn_on_cycles: true,
        }
    }
}

impl InferencerConfig {
    /// Config with every diagnostic disabled.
    pub fn quiet() -> Self {
        Self {
            warn_on_dangling_references: false,
            warn_on_cycles: false,
        }
    }

    /// Load config from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| InferenceError::Config(e.to_string()))
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
