//! Depth-first rename traversal that mutates the tree it walks.
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{EntryKind, NamingPolicy, base_name, children, is_excluded};
use crate::logging::Log;

/// What a single [`walk`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkStats {
    /// Where the walked root lives afterwards; differs from the requested
    /// root when the policy renamed the root itself.
    pub root: PathBuf,
    /// Files and directories visited (excluded entries are not counted).
    pub visited: usize,
    /// Entries renamed by the policy.
    pub renamed: usize,
}

/// Walk the tree rooted at `root`, renaming every entry the policy selects.
///
/// A directory is renamed before its children are listed, and the listing
/// is taken from the directory's new path. Children are collected before
/// any of them is renamed, and each child path is derived from the already
/// renamed parent, so no stale path is ever used. Entries named in the
/// exclusion set are skipped together with everything below them.
///
/// A missing `root` (or one that is neither file nor directory) is a no-op.
///
/// # Errors
///
/// The first failing rename or directory listing aborts the walk and is
/// returned as-is. Entries renamed before the failure stay renamed.
pub fn walk<P>(root: &Path, policy: &P, log: &dyn Log) -> Result<WalkStats>
where
    P: NamingPolicy + ?Sized,
{
    let mut stats = WalkStats {
        root: root.to_path_buf(),
        visited: 0,
        renamed: 0,
    };
    let final_root = walk_entry(root.to_path_buf(), policy, log, &mut stats)?;
    stats.root = final_root;
    log.debug(&format!(
        "{}: visited {}, renamed {} under {}",
        policy.label(),
        stats.visited,
        stats.renamed,
        stats.root.display()
    ));
    Ok(stats)
}

/// Walk one entry and return the path it ends up at.
fn walk_entry<P>(
    path: PathBuf,
    policy: &P,
    log: &dyn Log,
    stats: &mut WalkStats,
) -> Result<PathBuf>
where
    P: NamingPolicy + ?Sized,
{
    let name = base_name(&path);
    if name.is_some_and(is_excluded) {
        return Ok(path);
    }
    let selected = name.is_some_and(|n| policy.should_transform(n));

    match EntryKind::of(&path) {
        EntryKind::File => {
            stats.visited += 1;
            if selected {
                return rename(&path, policy, log, stats);
            }
            Ok(path)
        }
        EntryKind::Dir => {
            stats.visited += 1;
            let dir = if selected {
                rename(&path, policy, log, stats)?
            } else {
                path
            };
            for child in children(&dir)? {
                walk_entry(child, policy, log, stats)?;
            }
            Ok(dir)
        }
        EntryKind::Other => Ok(path),
    }
}

fn rename<P>(path: &Path, policy: &P, log: &dyn Log, stats: &mut WalkStats) -> Result<PathBuf>
where
    P: NamingPolicy + ?Sized,
{
    let renamed = policy.transform(path)?;
    stats.renamed += 1;
    log.debug(&format!("{} -> {}", path.display(), renamed.display()));
    Ok(renamed)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::test_helpers::RecordingLog;
    use std::cell::RefCell;
    use std::fs;

    /// Upper-cases names starting with `x` and records every transform call.
    struct Upper {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl Upper {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl NamingPolicy for Upper {
        fn label(&self) -> &'static str {
            "upper"
        }

        fn should_transform(&self, name: &str) -> bool {
            name.starts_with('x')
        }

        fn new_name(&self, name: &str) -> String {
            name.to_uppercase()
        }

        fn transform(&self, path: &Path) -> Result<PathBuf> {
            self.calls.borrow_mut().push(path.to_path_buf());
            super::super::rename_entry(path, &self.new_name(base_name(path).unwrap()))
        }
    }

    #[test]
    fn renames_directory_before_listing_children() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("xa/xb")).unwrap();
        fs::write(root.join("xa/xb/xc"), "").unwrap();
        fs::write(root.join("xa/plain"), "").unwrap();

        let policy = Upper::new();
        let stats = walk(&root, &policy, &RecordingLog::new()).unwrap();

        assert_eq!(stats.renamed, 3);
        assert!(root.join("XA/XB/XC").is_file());
        assert!(root.join("XA/plain").is_file());
        // Every transform was handed a path under an already renamed parent.
        assert_eq!(
            policy.calls.borrow().as_slice(),
            [root.join("xa"), root.join("XA/xb"), root.join("XA/XB/xc")]
        );
    }

    #[test]
    fn renames_root_itself_when_selected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("xroot");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("xfile"), "").unwrap();

        let stats = walk(&root, &Upper::new(), &RecordingLog::new()).unwrap();

        assert_eq!(stats.root, dir.path().join("XROOT"));
        assert!(dir.path().join("XROOT/XFILE").is_file());
    }

    #[test]
    fn skips_excluded_entries_and_their_descendants() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("nested/.git/xobjects")).unwrap();
        fs::write(root.join("nested/.git/xhead"), "").unwrap();
        fs::write(root.join("nested/xkeep"), "").unwrap();

        let policy = Upper::new();
        walk(root, &policy, &RecordingLog::new()).unwrap();

        assert!(root.join("nested/.git/xobjects").is_dir());
        assert!(root.join("nested/.git/xhead").is_file());
        assert!(root.join("nested/XKEEP").is_file());
        assert_eq!(policy.calls.borrow().len(), 1);
    }

    #[test]
    fn excluded_root_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".github");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("xworkflow"), "").unwrap();

        let stats = walk(&root, &Upper::new(), &RecordingLog::new()).unwrap();

        assert_eq!((stats.visited, stats.renamed), (0, 0));
        assert_eq!(stats.root, root);
        assert!(root.join("xworkflow").exists());
    }

    #[test]
    fn missing_root_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent");
        let stats = walk(&absent, &Upper::new(), &RecordingLog::new()).unwrap();
        assert_eq!((stats.visited, stats.renamed), (0, 0));
        assert_eq!(stats.root, absent);
    }

    #[test]
    fn empty_directory_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let log = RecordingLog::new();

        let stats = walk(dir.path(), &Upper::new(), &log).unwrap();

        assert_eq!(stats.renamed, 0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(log.at("info").is_empty());
    }

    #[test]
    fn collision_aborts_and_leaves_partial_state() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("xa"), "").unwrap();
        fs::write(root.join("xb"), "").unwrap();
        fs::write(root.join("XB"), "taken").unwrap();

        let err = walk(root, &Upper::new(), &RecordingLog::new()).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        // Sorted order: XB, xa, xb. `xa` was renamed before `xb` collided.
        assert!(root.join("XA").exists());
        assert!(root.join("xb").exists());
        assert_eq!(fs::read_to_string(root.join("XB")).unwrap(), "taken");
    }

    #[cfg(unix)]
    #[test]
    fn does_not_descend_through_directory_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("outside");
        let root = dir.path().join("root");
        fs::create_dir_all(&outside).unwrap();
        fs::create_dir_all(&root).unwrap();
        fs::write(outside.join("xsecret"), "").unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        walk(&root, &Upper::new(), &RecordingLog::new()).unwrap();

        assert!(outside.join("xsecret").exists());
    }
}
