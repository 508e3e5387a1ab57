#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! xhttpgen Configuration
//!
//! This crate provides configuration management for the xhttp generator.
//! It handles loading, saving, and layering the settings that control:
//! - Route generation (rules-only mode, output file suffix)
//! - Logging configuration
//! - Output location
//!
//! Configuration is stored in TOML format. The plugin parameter string passed by
//! protoc (`omitempty=false`) is parsed here as well, so every layer resolves into
//! one [`GenerationOptions`] value.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default suffix of generated files
pub const DEFAULT_FILE_SUFFIX: &str = "_xhttp.pb.go";

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
    /// The plugin parameter string names an unknown key or carries a bad value
    #[error("invalid plugin parameter `{item}`: {reason}")]
    InvalidParameter {
        /// The offending `key=value` item
        item: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Convenient result type for configuration functions.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Route generation settings
    pub generation: GenerationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// Route generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Only generate routes for methods carrying an explicit HTTP rule
    pub omit_empty: bool,
    /// Suffix appended to the proto path of each generated file
    pub file_suffix: String,
}

impl Default for GenerationConfig {
    fn default() -> Self { Self { omit_empty: true, file_suffix: DEFAULT_FILE_SUFFIX.to_string() } }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log file path (optional)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string(), file: None } }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write generated files
    pub output_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self { Self { output_dir: PathBuf::from(".") } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/xhttpgen/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("xhttpgen");
        Ok(config_dir.join("config.toml"))
    }

    /// Load the file at [`Config::default_path`] if it exists, else defaults.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}

/// Effective settings of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Rules-only mode: skip methods without an explicit HTTP rule
    pub omit_empty: bool,
    /// Suffix of generated file names
    pub file_suffix: String,
}

impl Default for GenerationOptions {
    fn default() -> Self { Self::from(&GenerationConfig::default()) }
}

impl From<&GenerationConfig> for GenerationOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self { omit_empty: config.omit_empty, file_suffix: config.file_suffix.clone() }
    }
}

impl GenerationOptions {
    /// Parse a protoc plugin parameter string on top of the defaults.
    ///
    /// # Examples
    /// ```
    /// use xhttpgen_config::GenerationOptions;
    /// let options = GenerationOptions::from_parameter("omitempty=false").unwrap();
    /// assert!(!options.omit_empty);
    /// ```
    pub fn from_parameter(parameter: &str) -> Result<Self> {
        Self::default().with_parameter(parameter)
    }

    /// Apply a comma-separated `key=value` parameter string over these options.
    ///
    /// A bare boolean key (`omitempty`) means `true`. Empty items are skipped.
    pub fn with_parameter(mut self, parameter: &str) -> Result<Self> {
        for item in parameter.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (key, value) = match item.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (item, None),
            };
            match key {
                "omitempty" => {
                    self.omit_empty = match value {
                        None => true,
                        Some(value) => parse_bool(value).ok_or_else(|| {
                            ConfigError::InvalidParameter {
                                item: item.to_string(),
                                reason: format!("`{value}` is not a boolean"),
                            }
                        })?,
                    };
                }
                _ => {
                    return Err(ConfigError::InvalidParameter {
                        item: item.to_string(),
                        reason: format!("unknown parameter `{key}`"),
                    })
                }
            }
        }
        Ok(self)
    }

    /// Override rules-only mode when a value is given
    pub fn with_omit_empty(mut self, omit_empty: Option<bool>) -> Self {
        if let Some(omit_empty) = omit_empty {
            self.omit_empty = omit_empty;
        }
        self
    }
}

/// Boolean spellings accepted by protoc plugin flags.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
