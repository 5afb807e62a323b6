//! Naming conventions of a dotfile repository and the passes that toggle them.
//!
//! The repository stores dotfiles under a visible `dot-` prefix so that tools
//! which skip hidden entries still see them. Before linking, the tree is
//! *revealed* (`dot-bashrc` → `.bashrc`); afterwards it is *hidden* again
//! (`.bashrc` → `dot-bashrc`). Both passes are a [`walk`] driven by a
//! [`NamingPolicy`].
//!
//! Version-control metadata listed in [`EXCLUDED_NAMES`] is never renamed,
//! descended into, or linked, at any depth.

mod policy;
mod walker;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::error::NamingError;

pub use policy::{ALWAYS_VISIBLE, Hide, MARKER_PREFIX, Reveal, hide, reveal, stands_for_excluded};
pub use walker::{WalkStats, walk};

/// Base names that are opaque repository metadata.
pub const EXCLUDED_NAMES: &[&str] = &[
    ".git",
    ".gitignore",
    ".gitkeep",
    ".directory",
    ".gitmodules",
    ".github",
    ".travis.yml",
];

/// Whether `name` is in the exclusion set.
#[must_use]
pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_NAMES.contains(&name)
}

/// Whether the final component of `path` is in the exclusion set.
///
/// Paths without a UTF-8 base name are never excluded.
#[must_use]
pub fn is_excluded_path(path: &Path) -> bool {
    base_name(path).is_some_and(is_excluded)
}

/// The final component of `path` as UTF-8, if any.
#[must_use]
pub fn base_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// A rename strategy applied by [`walk`].
///
/// `should_transform` sees only the base name; `new_name` maps an old base
/// name to a new one and is only called for names that passed
/// `should_transform`. The default [`transform`](Self::transform) performs
/// the rename on disk and returns the entry's new path.
pub trait NamingPolicy {
    /// Short label for log output (e.g. `"reveal"`).
    fn label(&self) -> &'static str;

    /// Whether the entry called `name` should be renamed.
    fn should_transform(&self, name: &str) -> bool;

    /// The new base name for `name`.
    fn new_name(&self, name: &str) -> String;

    /// Rename `path` on disk according to [`new_name`](Self::new_name).
    ///
    /// # Errors
    ///
    /// Returns [`NamingError::NoBaseName`] for paths without a UTF-8 final
    /// component, [`NamingError::Collision`] if the target exists, or the
    /// underlying I/O error.
    fn transform(&self, path: &Path) -> Result<PathBuf> {
        let name = base_name(path).ok_or_else(|| NamingError::NoBaseName {
            path: path.to_path_buf(),
        })?;
        rename_entry(path, &self.new_name(name))
    }
}

/// Rename the entry at `path` to `new_name` within the same parent directory.
///
/// Only the final component changes; ancestors are rebuilt from
/// [`Path::parent`] rather than by string substitution.
///
/// # Errors
///
/// Returns [`NamingError::Collision`] if an entry (including a dangling
/// symlink) already exists at the target, or the I/O error from the rename.
pub fn rename_entry(path: &Path, new_name: &str) -> Result<PathBuf> {
    let target = path.with_file_name(new_name);
    if target.symlink_metadata().is_ok() {
        return Err(NamingError::Collision {
            from: path.to_path_buf(),
            to: target,
        }
        .into());
    }
    fs::rename(path, &target)
        .with_context(|| format!("rename {} to {}", path.display(), target.display()))?;
    Ok(target)
}

/// Immediate children of `dir`, sorted by name for a stable visiting order.
///
/// The listing is fully collected before returning, so callers may rename
/// the children while iterating over the result.
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read.
pub fn children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .map(|entry| {
            entry
                .map(|e| e.path())
                .with_context(|| format!("reading entry in {}", dir.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

/// What a path currently denotes on disk.
///
/// Symlinks are classified by what they point at, except that a symlink to
/// a directory is [`EntryKind::Other`] so traversal never leaves the tree
/// through a link or loops on a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file, or a symlink to one.
    File,
    /// A real directory.
    Dir,
    /// Missing, a broken symlink, a symlink to a directory, or a special file.
    Other,
}

impl EntryKind {
    /// Query the filesystem for the kind of `path`. Never cached.
    #[must_use]
    pub fn of(path: &Path) -> Self {
        let Ok(meta) = path.symlink_metadata() else {
            return Self::Other;
        };
        if meta.is_dir() {
            Self::Dir
        } else if meta.is_file() || (meta.is_symlink() && path.is_file()) {
            Self::File
        } else {
            Self::Other
        }
    }
}
