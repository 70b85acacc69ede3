//! Runtime configuration.
//!
//! Values come from defaults, an optional TOML file, and `AURORA_*`
//! environment variables, applied in that order.

use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::runtime::value::DEFAULT_PRECISION;

pub const ENV_PRECISION: &str = "AURORA_PRECISION";
pub const ENV_DIAGNOSTICS: &str = "AURORA_DIAGNOSTICS";
pub const ENV_REPORT: &str = "AURORA_REPORT";

/// Largest accepted `precision`.
pub const MAX_PRECISION: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Decimal places used when rendering numbers.
    pub precision: usize,
    /// Stream receiving the `at line N: ...` diagnostic.
    pub diagnostics: DiagnosticStream,
    pub report: ReportStyle,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            precision: DEFAULT_PRECISION,
            diagnostics: DiagnosticStream::Stdout,
            report: ReportStyle::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticStream {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    #[default]
    Plain,
    Fancy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}

impl RuntimeConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Reads a TOML file, then applies environment overrides on top.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse(path, &content)?.with_overrides(|key| env::var(key).ok())
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        if config.precision > MAX_PRECISION {
            return Err(invalid("precision", &config.precision.to_string()));
        }
        Ok(config)
    }

    /// Applies `AURORA_*` overrides resolved through `lookup`. Blank values
    /// are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(value) = lookup(ENV_PRECISION) {
            self.precision = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|precision| *precision <= MAX_PRECISION)
                .ok_or_else(|| invalid(ENV_PRECISION, &value))?;
        }
        if let Some(value) = lookup(ENV_DIAGNOSTICS) {
            self.diagnostics = match value.trim().to_ascii_lowercase().as_str() {
                "stdout" => DiagnosticStream::Stdout,
                "stderr" => DiagnosticStream::Stderr,
                _ => return Err(invalid(ENV_DIAGNOSTICS, &value)),
            };
        }
        if let Some(value) = lookup(ENV_REPORT) {
            self.report = match value.trim().to_ascii_lowercase().as_str() {
                "plain" => ReportStyle::Plain,
                "fancy" => ReportStyle::Fancy,
                _ => return Err(invalid(ENV_REPORT, &value)),
            };
        }
        Ok(self)
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}
