//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::StationConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate the station configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<StationConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate the station configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<StationConfig, ConfigError> {
    let config: StationConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the `<digipeater>` block file named by the station config.
///
/// Relative paths are taken relative to the station file's directory.
pub fn digipeater_file(station_path: &Path, config: &StationConfig) -> Option<PathBuf> {
    let named = Path::new(config.station.digipeaters.as_deref()?);
    if named.is_absolute() {
        return Some(named.to_path_buf());
    }
    let base = station_path.parent().unwrap_or_else(|| Path::new(""));
    Some(base.join(named))
}
