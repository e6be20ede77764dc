//! Extension configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for the HTML box extension. Every field has a default, so an
/// empty JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Preferred interface language.
    pub lang: String,
    /// Block-level tag the editor wraps paragraphs in.
    pub block_tag: String,
    /// Text placed in a freshly drawn region.
    pub placeholder: String,
    /// Inline style of the editable region.
    pub region_style: String,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            block_tag: "p".to_string(),
            placeholder: "this is a text node".to_string(),
            region_style: "overflow: hidden; border-style: dashed; height: 100%; display: block; text-align: start"
                .to_string(),
        }
    }
}

impl ExtensionConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
