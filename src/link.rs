//! Mirror a dotfile tree into a destination as one symlink per file.
//!
//! [`link_all`] reveals the source tree, mirrors every non-excluded file as a
//! symlink under the destination, then hides the source tree again. Links
//! point at the revealed (hidden-name) source paths.
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::error::LinkError;
use crate::logging::Log;
use crate::naming::{self, EntryKind};
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Applicable as _, Resource as _, ResourceChange};

/// Counters for a single [`link_all`] run.
///
/// # Examples
///
/// ```
/// use snek_cli::link::LinkReport;
///
/// let report = LinkReport { linked: 2, already_ok: 5, ..LinkReport::default() };
/// assert_eq!(report.to_string(), "2 linked, 5 already ok");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkReport {
    /// Entries renamed by the reveal pass.
    pub revealed: usize,
    /// Symlinks created or replaced.
    pub linked: usize,
    /// Destinations that already pointed at the right file.
    pub already_ok: usize,
    /// Destinations left alone because a real directory occupies them.
    pub skipped: Vec<PathBuf>,
    /// Entries renamed by the hide pass.
    pub hidden: usize,
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} linked, {} already ok", self.linked, self.already_ok)?;
        if !self.skipped.is_empty() {
            write!(f, ", {} skipped", self.skipped.len())?;
        }
        Ok(())
    }
}

/// Reveal `source`, mirror it into `dest` as symlinks, and hide it again.
///
/// `source` is canonicalised first so every link target is absolute. If the
/// mirror pass fails, the hide pass still runs before the mirror error is
/// returned. The hide pass renames the source root only when the reveal pass
/// did, so a root such as `.work` keeps its name.
///
/// # Errors
///
/// Returns [`LinkError::SourceNotDirectory`] if `source` is not a directory,
/// or the first error from the reveal, mirror, or hide pass.
pub fn link_all(source: &Path, dest: &Path, log: &dyn Log) -> Result<LinkReport> {
    if !source.is_dir() {
        return Err(LinkError::SourceNotDirectory {
            path: source.to_path_buf(),
        }
        .into());
    }
    let source = dunce::canonicalize(source)
        .with_context(|| format!("resolving {}", source.display()))?;

    log.stage("Renaming");
    let revealed = naming::reveal(&source, log)?;
    let mut report = LinkReport {
        revealed: revealed.renamed,
        ..LinkReport::default()
    };

    log.stage(&format!("Linking {} into {}", revealed.root.display(), dest.display()));
    let mirrored = mirror(&revealed.root, dest, log, &mut report)
        .with_context(|| format!("linking {}", revealed.root.display()));

    log.stage("Renaming");
    // The root keeps its own name unless reveal renamed it.
    let hidden = if revealed.root == source {
        hide_children(&source, log)
    } else {
        naming::hide(&revealed.root, log).map(|stats| stats.renamed)
    };

    mirrored?;
    report.hidden = hidden?;
    if report.hidden != report.revealed {
        log.warn(&format!(
            "revealed {} entries but hid {}; check {} for names that started with a period",
            report.revealed,
            report.hidden,
            source.display()
        ));
    }
    log.stage("Done");
    log.info(&report.to_string());
    Ok(report)
}

/// Hide every entry below `root` without touching `root` itself, returning
/// the number of entries renamed. An excluded root is left whole, as the
/// walker leaves it.
fn hide_children(root: &Path, log: &dyn Log) -> Result<usize> {
    if naming::is_excluded_path(root) {
        return Ok(0);
    }
    let mut renamed = 0;
    for child in naming::children(root)? {
        renamed += naming::hide(&child, log)?.renamed;
    }
    Ok(renamed)
}

/// Mirror `source` onto `dest`: link files, recurse into directories.
///
/// Entries named in the exclusion set are skipped at every depth, and so
/// are marker-prefixed names that stand for one (`dot-gitignore`), which the
/// reveal pass leaves unrevealed.
///
/// # Errors
///
/// Returns the first directory listing or link creation error.
pub fn mirror(source: &Path, dest: &Path, log: &dyn Log, report: &mut LinkReport) -> Result<()> {
    if naming::is_excluded_path(source)
        || naming::base_name(source).is_some_and(naming::stands_for_excluded)
    {
        return Ok(());
    }
    match EntryKind::of(source) {
        EntryKind::File => link_file(source, dest, log, report),
        EntryKind::Dir => {
            for child in naming::children(source)? {
                if let Some(name) = child.file_name() {
                    mirror(&child, &dest.join(name), log, report)?;
                }
            }
            Ok(())
        }
        EntryKind::Other => Ok(()),
    }
}

fn link_file(source: &Path, dest: &Path, log: &dyn Log, report: &mut LinkReport) -> Result<()> {
    let resource = SymlinkResource::new(source.to_path_buf(), dest.to_path_buf());
    match resource.ensure()? {
        ResourceChange::Applied => {
            log.info(&format!("Linking {} to {}", source.display(), dest.display()));
            report.linked += 1;
        }
        ResourceChange::AlreadyCorrect => {
            log.debug(&format!("already linked: {}", resource.description()));
            report.already_ok += 1;
        }
        ResourceChange::Skipped { reason } => {
            log.warn(&format!("skipping {}: {reason}", dest.display()));
            report.skipped.push(dest.to_path_buf());
        }
    }
    Ok(())
}
