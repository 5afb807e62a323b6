//! Top-level subcommand orchestration.
pub mod link;
pub mod rename;
pub mod update;
pub mod version;

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::ConfigError;
use crate::logging::Logger;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates root resolution and configuration loading so that each
/// command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Repository root.
    pub root: PathBuf,
    /// Loaded configuration (defaults when no file exists).
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the repository root and load its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be determined or the
    /// configuration file fails to parse.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let root = resolve_root(global)?;
        log.debug(&format!("root: {}", root.display()));

        let config_path = global
            .config
            .clone()
            .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
        log.debug(&format!("config: {}", config_path.display()));
        let config = Config::load(&config_path)?;
        log.debug(&format!("{} sync step(s)", config.sync.steps.len()));

        let warnings = config.validate();
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        Ok(Self { root, config })
    }
}

/// Determine the repository root.
///
/// `--root` (or the `SNEK_ROOT` environment variable, which clap folds into
/// the same option) wins; otherwise the root is the parent of the current
/// directory, since the tool is normally run from a checkout nested one
/// level inside the repository.
///
/// # Errors
///
/// Returns [`ConfigError::NoRoot`] if the current directory is unavailable
/// or has no parent.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(root) = &global.root {
        return Ok(root.clone());
    }

    let cwd = std::env::current_dir().map_err(|e| ConfigError::NoRoot(e.to_string()))?;
    let parent = cwd.parent().ok_or_else(|| {
        ConfigError::NoRoot(format!(
            "{} has no parent; use --root or set SNEK_ROOT",
            cwd.display()
        ))
    })?;
    Ok(parent.to_path_buf())
}

/// Print the summary and bail if any recorded step failed.
///
/// # Errors
///
/// Returns an error if one or more steps recorded a failure.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} step(s) failed");
    }
    Ok(())
}
