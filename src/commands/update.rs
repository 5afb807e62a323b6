//! Command: synchronize the repository with its remote.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Logger;
use crate::sync;

/// Run the configured sync sequence in the repository root.
///
/// # Errors
///
/// Returns an error if setup fails or any command failed.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    run_with(global, &SystemExecutor, log)
}

/// [`run`] with an explicit executor.
///
/// # Errors
///
/// Returns an error if setup fails or any command failed.
pub fn run_with(global: &GlobalOpts, executor: &dyn Executor, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let result = sync::run_sequence(&setup.config.sync.steps, &setup.root, executor, log);
    log.print_summary();
    if result.is_ok() {
        log.stage("Done");
    }
    result
}
