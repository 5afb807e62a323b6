//! Dotfile repository linker.
//!
//! A dotfile repository stores its entries under a visible `dot-` prefix
//! (`dot-bashrc`, `dot-config/`). `snek` mirrors such a tree into a home
//! directory as one symlink per file under the real hidden names, and wraps
//! the git commands that keep the repository in sync.
//!
//! The public API is organised into these layers:
//!
//! - **[`naming`]** — the tree walker and the reveal / hide rename passes
//! - **[`link`]** — reveal, mirror as symlinks, hide
//! - **[`sync`]** — the version-control command sequence
//! - **[`resources`]** — idempotent `check + apply` primitives (symlinks)
//! - **[`config`]** — optional `snek.toml`
//! - **[`commands`]** — top-level subcommand orchestration (`update`, `link`, …)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod link;
pub mod logging;
pub mod naming;
pub mod resources;
pub mod sync;
