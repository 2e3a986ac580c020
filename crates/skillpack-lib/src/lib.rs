//! # skillpack Library
//!
//! Dependency resolution and install planning for agent skills.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`logger`] - Structured logging setup
//! - [`registry`] - Skill metadata lookup
//! - [`graph`] - Dependency resolution, cycle detection and install ordering
//! - [`lockfile`] - Persistent record of installed skills
//! - [`plan`] - The resolve, detect and sort pipeline behind an install
//! - [`display`] - Human-readable rendering
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! // Parse the command line and run skillpack
//! skillpack_lib::main().await.unwrap();
//! # })
//! ```

pub mod application;
pub mod display;
pub mod graph;
pub mod lockfile;
pub mod logger;
pub mod plan;
pub mod primitives;
pub mod registry;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use graph::{
    Cycle, DependencyNode, DependencyResolver, DependencyTree, GraphError, ResolveOptions,
    detect_circular, topological_sort,
};
pub use lockfile::{InstalledSkillRecord, LockFile, LockFileError};
pub use logger::Logger;
pub use plan::{InstallPlan, plan_install};
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use registry::{
    InMemoryRegistry, IndexFileRegistry, RegistryError, SkillRecord, SkillRegistry,
};

// Private imports for the main function
use anyhow::Result;
use application::{CliConfig, loader::load_env_files};

pub async fn main() -> Result<()> {
    // .env files must be in the environment before clap reads SKILLPACK_*
    load_env_files()?;

    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
