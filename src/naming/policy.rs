//! The two concrete naming policies: reveal and hide.
use std::path::Path;

use anyhow::Result;

use super::{NamingPolicy, WalkStats, is_excluded, walk};
use crate::logging::Log;

/// Visible stand-in for a leading period in repository names.
pub const MARKER_PREFIX: &str = "dot-";

/// Hidden name that [`Hide`] leaves alone even though it starts with a period.
pub const ALWAYS_VISIBLE: &str = ".directory";

/// Turns `dot-name` into `.name`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reveal;

/// Turns `.name` into `dot-name`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hide;

impl NamingPolicy for Reveal {
    fn label(&self) -> &'static str {
        "reveal"
    }

    /// Selects marker-prefixed names, except those that
    /// [stand for an excluded name](stands_for_excluded), so that a
    /// reveal/hide round trip is lossless.
    fn should_transform(&self, name: &str) -> bool {
        !is_excluded(name)
            && name.len() > MARKER_PREFIX.len()
            && name.starts_with(MARKER_PREFIX)
            && !stands_for_excluded(name)
    }

    fn new_name(&self, name: &str) -> String {
        let stem = name.strip_prefix(MARKER_PREFIX).unwrap_or(name);
        format!(".{stem}")
    }
}

impl NamingPolicy for Hide {
    fn label(&self) -> &'static str {
        "hide"
    }

    fn should_transform(&self, name: &str) -> bool {
        !is_excluded(name) && name != ALWAYS_VISIBLE && name.len() > 1 && name.starts_with('.')
    }

    fn new_name(&self, name: &str) -> String {
        let stem = name.strip_prefix('.').unwrap_or(name);
        format!("{MARKER_PREFIX}{stem}")
    }
}

/// Whether `name` is the marker-prefixed form of an excluded name, such as
/// `dot-gitignore`.
///
/// Revealing these would produce a name [`Hide`] never turns back, so they
/// are neither revealed nor linked.
#[must_use]
pub fn stands_for_excluded(name: &str) -> bool {
    name.strip_prefix(MARKER_PREFIX)
        .is_some_and(|stem| is_excluded(&format!(".{stem}")))
}

/// Rename every `dot-` entry under `root` to its hidden form.
///
/// # Errors
///
/// See [`walk`].
pub fn reveal(root: &Path, log: &dyn Log) -> Result<WalkStats> {
    walk(root, &Reveal, log)
}

/// Rename every hidden entry under `root` to its `dot-` form.
///
/// # Errors
///
/// See [`walk`].
pub fn hide(root: &Path, log: &dyn Log) -> Result<WalkStats> {
    walk(root, &Hide, log)
}
