//! Settings loader
//!
//! File candidates are checked in priority order:
//! 1. ./.bedtools-mcp.toml (project-specific)
//! 2. $BEDTOOLS_MCP_CONFIG (environment variable)
//! 3. ~/.config/bedtools-mcp/config.toml (user-global)
//!
//! Environment variables use the `BIO_MCP_` prefix and override the file.

use crate::config::settings::{FileConfig, Settings};
use crate::types::BedtoolsError;
use std::path::PathBuf;
use tracing::debug;

const ENV_PREFIX: &str = "BIO_MCP_";

impl Settings {
    /// Load settings from config file and environment.
    pub fn load() -> Result<Self, BedtoolsError> {
        let mut settings = Settings::default();

        if let Some(file) = load_config_file()? {
            settings.merge_file(file);
        }

        apply_env(&mut settings)?;

        Ok(settings)
    }
}

fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(".bedtools-mcp.toml"));
    }

    if let Ok(config_path) = std::env::var("BEDTOOLS_MCP_CONFIG") {
        candidates.push(PathBuf::from(config_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("bedtools-mcp").join("config.toml"));
    }

    candidates
}

fn load_config_file() -> Result<Option<FileConfig>, BedtoolsError> {
    for path in config_file_candidates() {
        if path.exists() {
            debug!("Loading config from: {}", path.display());
            let content = std::fs::read_to_string(&path).map_err(|e| {
                BedtoolsError::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;

            let config: FileConfig = toml::from_str(&content).map_err(|e| {
                BedtoolsError::Config(format!("Failed to parse {}: {}", path.display(), e))
            })?;

            return Ok(Some(config));
        }
    }

    debug!("No config file found");
    Ok(None)
}

fn apply_env(settings: &mut Settings) -> Result<(), BedtoolsError> {
    if let Some(value) = env_var("MAX_FILE_SIZE") {
        settings.max_file_size = value.parse().map_err(|_| {
            BedtoolsError::Config(format!("{}MAX_FILE_SIZE must be an integer: {}", ENV_PREFIX, value))
        })?;
    }

    if let Some(value) = env_var("TEMP_DIR") {
        settings.temp_dir = Some(PathBuf::from(value));
    }

    if let Some(value) = env_var("TIMEOUT") {
        settings.timeout = value.parse().map_err(|_| {
            BedtoolsError::Config(format!("{}TIMEOUT must be an integer: {}", ENV_PREFIX, value))
        })?;
    }

    if let Some(value) = env_var("BEDTOOLS_PATH") {
        settings.bedtools_path = value;
    }

    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(format!("{}{}", ENV_PREFIX, name))
        .ok()
        .filter(|v| !v.is_empty())
}
