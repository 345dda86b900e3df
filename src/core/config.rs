//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.jotlist/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::entry::ListTag;
use crate::core::store::StoreOptions;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct JotlistConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub lists: ListsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
    pub backend: Option<StorageBackend>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListsConfig {
    pub reject_whitespace_only: Option<bool>,
    pub default_list: Option<String>,
}

/// Where list data is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON files under the data directory.
    #[default]
    File,
    /// In memory only; everything is lost on exit.
    Memory,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
const APP_DIR_NAME: &str = ".jotlist";
const LOG_FILE_NAME: &str = "jotlist.log";

// ============================================================================
// CLI overrides
// ============================================================================

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub ephemeral: bool,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub reject_whitespace_only: bool,
    pub default_list: ListTag,
}

impl ResolvedConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            reject_whitespace_only: self.reject_whitespace_only,
            default_list: self.default_list,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.jotlist`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DIR_NAME))
}

/// Returns the path to `~/.jotlist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `path`, or from `~/.jotlist/config.toml` when `None`.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `JotlistConfig::default()`. An explicitly given path that doesn't
/// exist is an error. A malformed file returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<JotlistConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => {
                if !p.exists() {
                    info!("No config file found, generating default at {}", p.display());
                    generate_default_config(&p);
                    return Ok(JotlistConfig::default());
                }
                p
            }
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(JotlistConfig::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<JotlistConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Jotlist Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_file = "~/.jotlist/jotlist.log"   # Or set JOTLIST_LOG_FILE
# log_level = "debug"                   # "error", "warn", "info", "debug", "trace", "off"

# [storage]
# data_dir = "~/.local/share/jotlist"   # Or set JOTLIST_DATA_DIR
# backend = "file"                      # "file" or "memory"

# [lists]
# reject_whitespace_only = false        # Also ignore entries made only of spaces
# default_list = "work"                 # "work" or "travel", used until you switch lists
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &JotlistConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Data dir: CLI → env → config → default
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| std::env::var("JOTLIST_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.storage.data_dir.as_deref().map(expand_home))
        .unwrap_or_else(default_data_dir);

    // Backend: --ephemeral → config → default
    let backend = if cli.ephemeral {
        StorageBackend::Memory
    } else {
        config.storage.backend.unwrap_or_default()
    };

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| std::env::var("JOTLIST_LOG_FILE").ok().map(PathBuf::from))
        .or_else(|| config.general.log_file.as_deref().map(expand_home))
        .unwrap_or_else(default_log_file);

    // Log level: env → config → default
    let log_level = std::env::var("JOTLIST_LOG_LEVEL")
        .ok()
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| parse_level(&level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let default_list = match config.lists.default_list.as_deref() {
        Some(name) => parse_list(name).unwrap_or_else(|| {
            warn!("Unknown default_list '{}', using Work", name);
            ListTag::Work
        }),
        None => ListTag::Work,
    };

    ResolvedConfig {
        data_dir,
        backend,
        log_file,
        log_level,
        reject_whitespace_only: config.lists.reject_whitespace_only.unwrap_or(false),
        default_list,
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.parse() {
        Ok(filter) => Some(filter),
        Err(_) => {
            warn!("Unknown log level '{}'", level);
            None
        }
    }
}

fn parse_list(name: &str) -> Option<ListTag> {
    match name.trim().to_ascii_lowercase().as_str() {
        "work" => Some(ListTag::Work),
        "travel" => Some(ListTag::Travel),
        _ => None,
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("jotlist"))
        .or_else(|| app_dir().map(|d| d.join("data")))
        .unwrap_or_else(|| PathBuf::from(APP_DIR_NAME).join("data"))
}

fn default_log_file() -> PathBuf {
    app_dir()
        .map(|d| d.join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}
