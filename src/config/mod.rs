//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `BIB2WOS_*` environment variables (use `__` between section and
//! key, e.g. `BIB2WOS_CROSSREF__MAILTO`), then command-line flags.

mod file_config;

pub use file_config::{save_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sources::CROSSREF_API_BASE;
use crate::utils::DEFAULT_TIMEOUT_SECS;

/// Input file read when nothing else is configured
pub const DEFAULT_INPUT_FILE: &str = "mendeley.bib";

/// Output file written when nothing else is configured
pub const DEFAULT_OUTPUT_FILE: &str = "wos_converted.bib";

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "bib2wos.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input and output files
    #[serde(default)]
    pub files: FileConfig,

    /// CrossRef API settings
    #[serde(default)]
    pub crossref: CrossRefConfig,

    /// Enrichment settings
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input and output files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Mendeley BibTeX export to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Web of Science BibTeX file to write (overwritten)
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_FILE)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

/// CrossRef API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossRefConfig {
    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Contact address sent in the user agent (CrossRef "polite pool")
    #[serde(default)]
    pub mailto: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for CrossRefConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mailto: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    CROSSREF_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Enrichment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Look up DOIs at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level for the `bib2wos` target when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from an optional file plus `BIB2WOS_*` environment variables
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    load_layered(path, environment())
}

/// `BIB2WOS_SECTION__KEY` variables
fn environment() -> config::Environment {
    config::Environment::with_prefix("BIB2WOS")
        .prefix_separator("_")
        .separator("__")
}

/// The file is always read as TOML, whatever its extension
fn load_layered(
    path: Option<&Path>,
    environment: config::Environment,
) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
    }

    builder.add_source(environment).build()?.try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("bib2wos").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Get the default configuration
pub fn get_config() -> Config {
    Config::default()
}
