//! Strategy document formats.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ConfigError, ConfigResult};

/// Serialization format of a strategy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl DocumentFormat {
    /// Detects the format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parses `content` in this format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] with the parser's message.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> ConfigResult<T> {
        match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| self.error(e)),
            Self::Toml => toml::from_str(content).map_err(|e| self.error(e)),
            Self::Json => serde_json::from_str(content).map_err(|e| self.error(e)),
        }
    }

    /// Renders `value` in this format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the value cannot be represented.
    pub fn render<T: Serialize>(self, value: &T) -> ConfigResult<String> {
        match self {
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| self.error(e)),
            Self::Toml => toml::to_string_pretty(value).map_err(|e| self.error(e)),
            Self::Json => serde_json::to_string_pretty(value).map_err(|e| self.error(e)),
        }
    }

    fn error(self, err: impl fmt::Display) -> ConfigError {
        ConfigError::parse(self, err.to_string())
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::Json => "JSON",
        })
    }
}
