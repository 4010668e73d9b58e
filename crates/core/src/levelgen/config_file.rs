//! JSON preset files for generation configs.
//!
//! Presets are whole-file pretty JSON. Loading validates strictly, so a
//! hand-edited preset cannot smuggle an invalid range into generation.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use super::config::{ConfigError, GenerationConfig};

#[derive(Debug)]
pub enum ConfigFileError {
    Io(io::Error),
    Parse(String),
    Invalid(ConfigError),
}

impl fmt::Display for ConfigFileError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(formatter, "config file i/o error: {error}"),
            Self::Parse(message) => write!(formatter, "config file is not valid JSON: {message}"),
            Self::Invalid(error) => write!(formatter, "config file failed validation: {error}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Parse(_) => None,
            Self::Invalid(error) => Some(error),
        }
    }
}

pub fn save_config_to_file(path: &Path, config: &GenerationConfig) -> Result<(), ConfigFileError> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|error| ConfigFileError::Parse(error.to_string()))?;
    fs::write(path, json).map_err(ConfigFileError::Io)
}

pub fn load_config_from_file(path: &Path) -> Result<GenerationConfig, ConfigFileError> {
    let content = fs::read_to_string(path).map_err(ConfigFileError::Io)?;
    let config: GenerationConfig =
        serde_json::from_str(&content).map_err(|error| ConfigFileError::Parse(error.to_string()))?;
    config.validate().map_err(ConfigFileError::Invalid)?;
    Ok(config)
}
