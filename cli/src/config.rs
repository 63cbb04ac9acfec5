//! Resolve the client configuration for a run.
//!
//! Precedence, lowest first: built-in defaults, the config file
//! (`--config`, else `<config dir>/tasklist/config.toml` when present),
//! then command-line flags and `TASKLIST_BASE_URL`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tasklist_core::{ClientConfig, ResyncMode};

/// Default config file location.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tasklist").join("config.toml"))
}

/// Load the config file. An explicit path must exist; the default one is
/// optional.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<ClientConfig> {
    match explicit {
        Some(path) => read(path),
        None => match default_path() {
            Some(path) if path.exists() => read(&path),
            _ => Ok(ClientConfig::default()),
        },
    }
}

fn read(path: &Path) -> anyhow::Result<ClientConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = ClientConfig::from_toml_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Apply command-line overrides on top of `config`.
pub fn apply_overrides(mut config: ClientConfig, base_url: Option<String>, merge: bool) -> ClientConfig {
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if merge {
        config.resync = ResyncMode::Merge;
    }
    config
}
