//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::graph::{DEFAULT_MAX_DEPTH, ResolveOptions};
use crate::lockfile::{self, LockFileError};
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration values
pub mod defaults {
    pub const INSTALL_DIR: &str = "~/.skillpack/skills";
    pub const MAX_DEPTH: &str = "10";
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn max_depth() -> usize {
        DEFAULT_MAX_DEPTH
    }

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Directory skills are installed into; the lock file sits beside it
    #[arg(short, long, env = "SKILLPACK_INSTALL_DIR")]
    #[serde(default)]
    pub install_dir: Option<PathBuf>,

    /// JSON registry index to resolve skills from
    #[arg(short, long, env = "SKILLPACK_REGISTRY_INDEX")]
    #[serde(default)]
    pub registry_index: Option<PathBuf>,

    /// Maximum dependency depth below the requested skill
    #[arg(short = 'd', long, env = "SKILLPACK_MAX_DEPTH", default_value = defaults::MAX_DEPTH)]
    #[serde(default = "default_fns::max_depth")]
    pub max_depth: usize,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "SKILLPACK_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, pretty)
    #[arg(long, env = "SKILLPACK_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "SKILLPACK_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "SKILLPACK_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            install_dir: None,
            registry_index: None,
            max_depth: default_fns::max_depth(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig with the color decision already made
    pub fn to_logger_config(&self, color: bool) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color,
        }
    }

    /// Resolver options carrying the configured depth limit
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions::default().with_max_depth(self.max_depth)
    }

    /// Install directory, falling back to the default location
    pub fn install_root(&self) -> Result<PathBuf, ConfigError> {
        let dir = self
            .install_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::INSTALL_DIR));
        expand(&dir)
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        // For Option fields, take other if it's Some
        if other.install_dir.is_some() {
            self.install_dir = other.install_dir;
        }
        if other.registry_index.is_some() {
            self.registry_index = other.registry_index;
        }

        // For primitive fields, take other if it's not the default
        if other.max_depth != default_fns::max_depth() {
            self.max_depth = other.max_depth;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    ///
    /// A `max_depth` of 0 is accepted and resolves the requested skill alone.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.install_dir = Some(self.install_root()?);

        if let Some(index) = &self.registry_index {
            self.registry_index = Some(expand(index)?);
        }

        Ok(())
    }
}

fn expand(path: &Path) -> Result<PathBuf, ConfigError> {
    lockfile::expand_home(path).map_err(|e| match e {
        LockFileError::HomeDirUnavailable { path } => ConfigError::HomeDirUnavailable {
            path: path.display().to_string(),
        },
        other => ConfigError::ValidationFailed {
            reason: other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
