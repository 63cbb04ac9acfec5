//! Client configuration.
//!
//! Read from TOML; every field is optional and falls back to the defaults
//! below.
//!
//! ```toml
//! base_url = "http://localhost:3000"
//! resync = "merge"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL of the hosted collection used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://todoapptheonlykmac.herokuapp.com";

/// How the screen brings its list back in line with the server after a
/// successful create or update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResyncMode {
    /// Re-fetch the whole collection.
    #[default]
    Refetch,
    /// Merge the entity returned by the server, re-fetching only when the
    /// response carries none.
    Merge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub resync: ResyncMode,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resync: ResyncMode::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ClientConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
