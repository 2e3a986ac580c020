//! Standard color environment variables
//!
//! `NO_COLOR`, `FORCE_COLOR`, `CLICOLOR` and `CI` adjust the configured
//! [`ColorIntent`] after the `SKILLPACK_COLOR` setting has been read.

use crate::primitives::{ColorIntent, ConfigError};
use serde::Deserialize;

/// Color-related variables as read from the process environment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// Any non-empty value turns color off
    pub no_color: Option<String>,
    /// `0`/`false` off, `1`..`3`/`true` on; beats every other variable
    pub force_color: Option<String>,
    /// `0` turns color off
    pub clicolor: Option<String>,
    /// Presence alone marks a CI run
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    /// Read the variables from the current environment
    pub fn load() -> Result<Self, ConfigError> {
        envy::from_env().map_err(|source| ConfigError::EnvironmentParsingFailed { source })
    }

    /// Apply the variables to `color`
    ///
    /// A CI marker forces color off outright. Otherwise `CLICOLOR=0` and a
    /// non-empty `NO_COLOR` turn it off, and a recognised `FORCE_COLOR`
    /// value overrides both.
    pub fn apply_color_config(&self, color: ColorIntent) -> ColorIntent {
        if self.is_ci() {
            return ColorIntent::Never;
        }

        let disabled = self.clicolor.as_deref() == Some("0")
            || self.no_color.as_deref().is_some_and(|v| !v.is_empty());

        match self.force_color.as_deref() {
            Some("0" | "false") => ColorIntent::Never,
            Some("1" | "2" | "3" | "true") => ColorIntent::Always,
            _ if disabled => ColorIntent::Never,
            _ => color,
        }
    }

    /// Whether any CI marker is present
    pub fn is_ci(&self) -> bool {
        self.ci.is_some()
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}
