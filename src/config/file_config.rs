//! Writing configuration files.
//!
//! `bib2wos --write-config bib2wos.toml` dumps the effective settings so
//! they can be edited and picked up on the next run:
//!
//! ```toml
//! [files]
//! input = "mendeley.bib"
//! output = "wos_converted.bib"
//!
//! [crossref]
//! base_url = "https://api.crossref.org"
//! mailto = "you@example.org"
//! timeout_secs = 30
//!
//! [enrichment]
//! enabled = true
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use super::Config;

/// Serialize `config` as TOML and write it to `path`
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigFileError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
