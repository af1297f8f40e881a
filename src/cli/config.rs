//! Configuration file
//!
//! Optional JSON file; every field has a default. Command-line flags are
//! applied on top by `Config::resolve`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ingest::{LoadOptions, ValidationMode};
use crate::observability::Severity;

use super::args::{CommonArgs, OutputFormat};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// CSV source (default "horror_movies.csv")
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,

    /// "permissive" (default) or "strict"
    #[serde(default)]
    pub validation: ValidationMode,

    /// "trace", "info", "warn" (default) or "error"
    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    /// "table" (default) or "json"
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("horror_movies.csv")
}

fn default_log_level() -> Severity {
    Severity::Warn
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            validation: ValidationMode::default(),
            log_level: default_log_level(),
            output: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(CliError::config_error("source_path must not be empty"));
        }
        Ok(())
    }

    /// Config file (if any) with command-line overrides applied
    pub fn resolve(args: &CommonArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(source) = &args.source {
            config.source_path = source.clone();
        }
        if args.strict {
            config.validation = ValidationMode::Strict;
        }
        if let Some(format) = args.format {
            config.output = format;
        }
        match args.verbose {
            0 => {}
            1 => config.log_level = config.log_level.min(Severity::Info),
            _ => config.log_level = Severity::Trace,
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            mode: self.validation,
        }
    }
}
