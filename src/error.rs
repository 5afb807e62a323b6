//! Domain-specific error types for snek.
//!
//! Internal modules raise these typed errors where a caller may want to match
//! on the failure (e.g. a rename collision) and wrap them in [`anyhow::Error`]
//! via `?`. Command handlers at the CLI boundary only see `anyhow::Error` and
//! can `downcast_ref` when they care.
//!
//! ```text
//! NamingError — rename passes over the source tree
//! LinkError   — mirror pass into the destination tree
//! SyncError   — version-control synchronization sequence
//! ConfigError — root / destination resolution
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while renaming entries of a source tree.
#[derive(Error, Debug)]
pub enum NamingError {
    /// The rename target already exists; nothing was renamed.
    #[error("cannot rename {from} to {to}: target already exists")]
    Collision {
        /// Path that was about to be renamed.
        from: PathBuf,
        /// Existing entry that blocks the rename.
        to: PathBuf,
    },

    /// The path has no final component to rename (e.g. `/` or `..`).
    #[error("path has no base name: {path}")]
    NoBaseName {
        /// The offending path.
        path: PathBuf,
    },
}

/// Errors that arise while mirroring a source tree into a destination.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The link source root is missing or is not a directory.
    #[error("link source is not a directory: {path}")]
    SourceNotDirectory {
        /// The source root that was requested.
        path: PathBuf,
    },

    /// A real directory occupies the path where a file link belongs.
    #[error("destination is a real directory: {path}")]
    DestinationIsDirectory {
        /// The destination path.
        path: PathBuf,
    },
}

/// Errors that arise from the synchronization sequence.
#[derive(Error, Debug)]
pub enum SyncError {
    /// One or more commands exited non-zero. Every command still ran.
    #[error("{failed} of {total} sync command(s) failed")]
    CommandsFailed {
        /// Number of commands that exited non-zero.
        failed: usize,
        /// Number of commands in the sequence.
        total: usize,
    },

    /// The sequence contains no commands.
    #[error("sync sequence is empty")]
    EmptySequence,
}

/// Errors that arise from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The repository root could not be determined.
    #[error("cannot determine repository root: {0}")]
    NoRoot(String),

    /// No destination was given and no home directory could be found.
    #[error("cannot determine home directory; pass --dest")]
    NoHomeDirectory,
}
