// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed dotfile repository and a fluent
// builder so each integration test can lay out a source tree without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use snek_cli::cli::GlobalOpts;

/// An isolated repository with a sibling home directory, backed by a
/// [`tempfile::TempDir`].
///
/// Layout:
/// - `<tmp>/repo/`  — repository root
/// - `<tmp>/home/`  — link destination (created lazily by the link engine)
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory holding both trees.
    pub tmp: tempfile::TempDir,
    /// Canonical repository root.
    pub root: PathBuf,
    /// Destination tree for links.
    pub home: PathBuf,
}

impl IntegrationTestContext {
    /// Create a context with an empty repository.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let base = dunce::canonicalize(tmp.path()).expect("canonicalize temp dir");
        let root = base.join("repo");
        std::fs::create_dir_all(&root).expect("create repo dir");
        Self {
            tmp,
            root,
            home: base.join("home"),
        }
    }

    /// Path of environment `env` inside the repository.
    pub fn env(&self, env: &str) -> PathBuf {
        self.root.join(env)
    }

    /// Global options pointing at this repository.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            root: Some(self.root.clone()),
            config: None,
        }
    }

    /// Write `snek.toml` at the repository root.
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.root.join("snek.toml"), content).expect("write snek.toml");
    }
}

/// Fluent builder for a source tree inside an [`IntegrationTestContext`].
pub struct SourceTreeBuilder {
    ctx: IntegrationTestContext,
    env: String,
}

impl SourceTreeBuilder {
    /// Begin building environment `env` in a fresh repository.
    pub fn new(env: &str) -> Self {
        let ctx = IntegrationTestContext::new();
        std::fs::create_dir_all(ctx.env(env)).expect("create env dir");
        Self {
            ctx,
            env: env.to_string(),
        }
    }

    /// Create a file at `rel` (slash-separated) under the environment,
    /// creating parent directories as needed.
    pub fn file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.env(&self.env).join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create file parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Create an empty directory at `rel` under the environment.
    pub fn dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.ctx.env(&self.env).join(rel)).expect("create dir");
        self
    }

    /// Finish building and return the context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// Every file path under `root` relative to it, sorted, `/`-separated.
/// Symlinks are listed, not followed.
pub fn list_tree(root: &Path) -> Vec<String> {
    fn visit(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries {
            let path = entry.expect("read entry").path();
            let meta = path.symlink_metadata().expect("stat entry");
            if meta.is_dir() {
                visit(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).expect("strip prefix");
                out.push(
                    rel.components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect::<Vec<_>>()
                        .join("/"),
                );
            }
        }
    }
    let mut out = Vec::new();
    visit(root, root, &mut out);
    out.sort();
    out
}
