//! Configuration loading
//!
//! Coordinates the configuration sources: `.env` files are loaded into the
//! process environment before the command line is parsed, so clap's `env`
//! attributes see them; standard color variables are applied afterwards.

use crate::primitives::ConfigError;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Env files consulted in order; earlier files win because dotenvy never
/// overrides a variable that is already set
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local` and `.env` from the working directory, if present
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        if let Err(e) = dotenvy::from_filename(env_file) {
            if !e.not_found() {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

impl AppConfig {
    /// Build the effective config: defaults -> env vars -> CLI
    ///
    /// `cli` already carries `SKILLPACK_*` values through clap; this layers
    /// it over the defaults, applies the standard color variables and
    /// validates the result.
    pub fn from_cli(cli: AppConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default().merge_with(cli);

        let env_config = EnvironmentConfig::load()?;
        config.color = env_config.apply_color_config(config.color);

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
