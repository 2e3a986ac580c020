use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// skillpack CLI - skill dependency resolution and install planning
#[derive(Debug, Clone, Parser)]
#[command(name = "skillpack")]
#[command(about = "Resolve, order and record skill installs")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// skillpack commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::from_cli(Cli::parse()))
    }

    /// Wrap an already parsed command line
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Available skillpack commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Show version information
    Version,

    /// Resolve a skill and print its install order
    Plan {
        /// Skill to plan
        #[arg(help = "Name of the skill to install")]
        name: String,

        /// Leave skills already in the lock file out of the plan
        #[arg(long, help = "Skip skills already recorded at the same version")]
        skip_installed: bool,

        /// Log every resolved skill
        #[arg(short, long, help = "Log each skill as it is resolved")]
        verbose: bool,
    },

    /// Print the resolved dependency tree of a skill
    Tree {
        /// Skill to resolve
        #[arg(help = "Name of the skill to resolve")]
        name: String,
    },

    /// Show the lock file
    Lock,

    /// Resolve a skill and record its install plan in the lock file
    Record {
        /// Skill to record
        #[arg(help = "Name of the installed skill to record")]
        name: String,
    },
}

impl Commands {
    /// Check if command talks to the registry
    pub fn requires_registry(&self) -> bool {
        match self {
            Commands::Version => false,
            Commands::Lock => false,
            Commands::Plan { .. } => true,
            Commands::Tree { .. } => true,
            Commands::Record { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
