//! Command: link environments into the destination tree.
use anyhow::Result;
use std::path::PathBuf;

use super::CommandSetup;
use crate::cli::{GlobalOpts, LinkOpts};
use crate::config::Config;
use crate::error::ConfigError;
use crate::link;
use crate::logging::{Logger, TaskStatus};

/// Link every requested environment, continuing past failures.
///
/// # Errors
///
/// Returns an error if setup fails, no destination can be determined, or
/// any environment failed to link.
pub fn run(global: &GlobalOpts, opts: &LinkOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let dest = resolve_destination(opts, &setup.config)?;
    log.debug(&format!("destination: {}", dest.display()));

    for env in &opts.envs {
        let source = setup.root.join(env);
        log.stage(&format!("Linking environment {env}"));
        match link::link_all(&source, &dest, log) {
            Ok(report) => {
                for skipped in &report.skipped {
                    log.record_task(
                        &skipped.display().to_string(),
                        TaskStatus::Skipped,
                        Some("real directory in the way"),
                    );
                }
                log.record_task(env, TaskStatus::Ok, Some(&report.to_string()));
            }
            Err(e) => {
                log.error(&format!("{env}: {e:#}"));
                log.record_task(env, TaskStatus::Failed, Some(&e.to_string()));
            }
        }
    }

    super::finish(log)
}

/// `--dest`, then `[link] destination`, then the home directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if neither option is set and the
/// home directory is unknown.
pub fn resolve_destination(opts: &LinkOpts, config: &Config) -> Result<PathBuf> {
    if let Some(dest) = opts.dest.as_ref().or(config.link.destination.as_ref()) {
        return Ok(dest.clone());
    }
    dirs::home_dir().ok_or_else(|| ConfigError::NoHomeDirectory.into())
}
