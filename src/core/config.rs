//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.toolshelf/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ToolshelfConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub catalog_file: Option<String>,
    pub autosave: Option<bool>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub sidebar_open: Option<bool>,
    pub show_pinned_section: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "toolshelf.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub catalog_path: Option<PathBuf>,
    pub autosave: bool,
    pub log_file: PathBuf,
    pub log_level: log::LevelFilter,
    pub sidebar_open: Option<bool>,
    pub show_pinned_section: bool,
}

/// Values taken from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub catalog: Option<PathBuf>,
    pub no_autosave: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the `~/.toolshelf/` directory.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".toolshelf"))
}

/// Returns the path to `~/.toolshelf/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.toolshelf/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ToolshelfConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ToolshelfConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ToolshelfConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ToolshelfConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ToolshelfConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: ToolshelfConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Toolshelf Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# catalog_file = "~/.toolshelf/catalog.json"   # Or set TOOLSHELF_CATALOG
# autosave = true                              # Save the catalog on quit
# log_file = "toolshelf.log"
# log_level = "info"                           # "error", "warn", "info", "debug", "trace"

# [display]
# sidebar_open = true                          # Overrides the saved sidebar state
# show_pinned_section = true
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ToolshelfConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Catalog: CLI → env → config → default
    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| std::env::var("TOOLSHELF_CATALOG").ok().map(expand_home))
        .or_else(|| config.general.catalog_file.clone().map(expand_home))
        .or_else(crate::core::catalog::default_catalog_path);

    // Log level: env → config → default
    let level_name = std::env::var("TOOLSHELF_LOG_LEVEL")
        .ok()
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let log_level = level_name.parse().unwrap_or_else(|_| {
        warn!("Unknown log level {:?}, using {}", level_name, DEFAULT_LOG_LEVEL);
        log::LevelFilter::Info
    });

    let log_file = config
        .general
        .log_file
        .clone()
        .map(expand_home)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        catalog_path,
        autosave: !cli.no_autosave && config.general.autosave.unwrap_or(true),
        log_file,
        log_level,
        sidebar_open: config.display.sidebar_open,
        show_pinned_section: config.display.show_pinned_section.unwrap_or(true),
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(raw: String) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}
