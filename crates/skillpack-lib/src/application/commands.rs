//! Command execution handlers
//!
//! `execute_command` owns process setup (config, colors, logging) and
//! prints; `run_command` does the work and returns the rendered text so
//! tests can drive every command without a terminal.

use crate::application::{AppConfig, CliConfig, Commands};
use crate::display::{StyleManager, render_lock, render_plan, render_tree};
use crate::graph::DependencyResolver;
use crate::lockfile;
use crate::logger::Logger;
use crate::plan::plan_install;
use crate::registry::IndexFileRegistry;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Execute CLI commands
pub async fn execute_command(config: CliConfig) -> Result<()> {
    let app_config =
        AppConfig::from_cli(config.app_config).context("Failed to load configuration")?;

    let colors = app_config
        .color
        .enabled(console::Term::stdout().features().colors_supported());
    console::set_colors_enabled(colors);
    console::set_colors_enabled_stderr(colors);

    Logger::init(app_config.to_logger_config(colors)).context("Failed to initialize logging")?;
    debug!("Effective configuration: {:?}", app_config);

    let styles = StyleManager::new(colors);

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            println!(
                "{}",
                styles.format_info("skillpack - skill dependency resolution")
            );
            println!(
                "{}",
                styles.style_subtle("Run 'skillpack --help' for usage information")
            );
            return Ok(());
        }
    };

    let output = run_command(command, &app_config, &styles).await?;
    print!("{}", output);
    Ok(())
}

/// Execute a specific command against an already validated config
pub async fn run_command(
    command: Commands,
    config: &AppConfig,
    styles: &StyleManager,
) -> Result<String> {
    let registry = if command.requires_registry() {
        Some(Arc::new(open_registry(config)?))
    } else {
        None
    };

    match (command, registry) {
        (Commands::Version, _) => Ok(handle_version()),
        (Commands::Lock, _) => handle_lock(config, styles),
        (
            Commands::Plan {
                name,
                skip_installed,
                verbose,
            },
            Some(registry),
        ) => handle_plan(registry, config, styles, &name, skip_installed, verbose).await,
        (Commands::Tree { name }, Some(registry)) => {
            handle_tree(registry, config, styles, &name).await
        }
        (Commands::Record { name }, Some(registry)) => {
            handle_record(registry, config, styles, &name).await
        }
        (command, None) => anyhow::bail!("{:?} needs a registry but none was opened", command),
    }
}

fn handle_version() -> String {
    format!("skillpack {}\n", env!("CARGO_PKG_VERSION"))
}

async fn handle_plan(
    registry: Arc<IndexFileRegistry>,
    config: &AppConfig,
    styles: &StyleManager,
    name: &str,
    skip_installed: bool,
    verbose: bool,
) -> Result<String> {
    let lock_path = lock_path(config)?;
    let lock = lockfile::read(&lock_path)?;

    let options = config
        .resolve_options()
        .skip_installed(skip_installed)
        .verbose(verbose);

    let plan = plan_install(registry, Some(&lock), name, &options)
        .await
        .with_context(|| format!("Failed to plan install of '{}'", name))?;

    Ok(render_plan(&plan, styles))
}

async fn handle_tree(
    registry: Arc<IndexFileRegistry>,
    config: &AppConfig,
    styles: &StyleManager,
    name: &str,
) -> Result<String> {
    let tree = DependencyResolver::new(registry)
        .resolve(name, &config.resolve_options())
        .await
        .with_context(|| format!("Failed to resolve '{}'", name))?;

    Ok(render_tree(&tree, styles))
}

fn handle_lock(config: &AppConfig, styles: &StyleManager) -> Result<String> {
    let lock_path = lock_path(config)?;
    let lock = lockfile::read(&lock_path)?;
    Ok(render_lock(&lock, &lock_path, styles))
}

async fn handle_record(
    registry: Arc<IndexFileRegistry>,
    config: &AppConfig,
    styles: &StyleManager,
    name: &str,
) -> Result<String> {
    let install_root = config.install_root()?;
    let lock_path = lock_path(config)?;
    let lock = lockfile::read(&lock_path)?;

    let options = config.resolve_options().skip_installed(true);
    let plan = plan_install(registry, Some(&lock), name, &options)
        .await
        .with_context(|| format!("Failed to plan install of '{}'", name))?;

    let mut out = String::new();

    if plan.is_up_to_date() {
        out.push_str(&styles.format_success(&format!("{} is already up to date", name)));
        out.push('\n');
        return Ok(out);
    }

    let records = plan.records(&install_root);
    let recorded = records.len();
    for record in records {
        info!("Recording {}@{}", record.name, record.version);
        lockfile::update(record, &lock_path)
            .with_context(|| format!("Failed to update {}", lock_path.display()))?;
    }

    out.push_str(&styles.format_success(&format!(
        "Recorded {} {} in {}",
        recorded,
        if recorded == 1 { "skill" } else { "skills" },
        lock_path.display()
    )));
    out.push('\n');

    if let Some(advisory) = plan.service_advisory() {
        out.push_str(&styles.format_warning(&advisory));
        out.push('\n');
    }

    Ok(out)
}

fn open_registry(config: &AppConfig) -> Result<IndexFileRegistry> {
    let path = config.registry_index.as_ref().context(
        "No registry index configured; pass --registry-index or set SKILLPACK_REGISTRY_INDEX",
    )?;
    let registry = IndexFileRegistry::load(path)?;
    debug!("Loaded {} skills from {}", registry.len(), path.display());
    Ok(registry)
}

fn lock_path(config: &AppConfig) -> Result<PathBuf> {
    let install_root = config.install_root()?;
    Ok(lockfile::lock_file_path(&install_root)?)
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
