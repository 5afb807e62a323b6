//! Commands: run a single reveal or hide pass over a tree.
//!
//! These are the manual recovery path for a tree left half-renamed by an
//! interrupted `link`.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::cli::RenameOpts;
use crate::logging::Logger;
use crate::naming;

/// Rename `dot-` entries under the target tree to their hidden form.
///
/// # Errors
///
/// Returns the first rename failure.
pub fn reveal(opts: &RenameOpts, log: &Logger) -> Result<()> {
    let root = target(opts)?;
    log.stage(&format!("Renaming {}", root.display()));
    let stats = naming::reveal(&root, log)?;
    log.info(&format!("revealed {} of {} entries", stats.renamed, stats.visited));
    log.stage("Done");
    Ok(())
}

/// Rename hidden entries under the target tree to their `dot-` form.
///
/// # Errors
///
/// Returns the first rename failure.
pub fn hide(opts: &RenameOpts, log: &Logger) -> Result<()> {
    let root = target(opts)?;
    log.stage(&format!("Renaming {}", root.display()));
    let stats = naming::hide(&root, log)?;
    log.info(&format!("hid {} of {} entries", stats.renamed, stats.visited));
    log.stage("Done");
    Ok(())
}

fn target(opts: &RenameOpts) -> Result<PathBuf> {
    match &opts.path {
        Some(path) => Ok(path.clone()),
        None => std::env::current_dir().context("reading current directory"),
    }
}
