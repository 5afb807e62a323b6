//! Line rendering shared by the console formatter and the log file.
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::Level;

/// Tracing target used for stage headers.
pub(super) const STAGE_TARGET: &str = "snek::stage";

/// How an event is presented, derived from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineKind {
    Stage,
    Info,
    Debug,
    Warn,
    Error,
}

impl LineKind {
    pub(super) fn of(level: Level, target: &str) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO if target == STAGE_TARGET => Self::Stage,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Coloured console line.
    pub(super) fn console(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::Info => format!("  {msg}"),
            Self::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
            Self::Warn => format!("\x1b[33mWARN\x1b[0m  {msg}"),
            Self::Error => format!("\x1b[31mERROR\x1b[0m {msg}"),
        }
    }

    /// Plain log file line stamped with the UTC time of `at`.
    pub(super) fn file(self, msg: &str, at: DateTime<Utc>) -> String {
        let msg = strip_ansi(msg);
        let stamp = at.format("%H:%M:%S");
        let body = match self {
            Self::Stage => format!("==> {msg}"),
            Self::Info => format!("    {msg}"),
            Self::Debug => format!("    [debug] {msg}"),
            Self::Warn => format!("    [warn] {msg}"),
            Self::Error => format!("    [error] {msg}"),
        };
        format!("[{stamp}] {body}")
    }
}

/// Remove escape sequences, such as colours in forwarded git output.
///
/// CSI sequences (`ESC [ ... final`) are dropped whole; any other escape
/// drops the one character after it.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((text, after)) = rest.split_once('\x1b') {
        out.push_str(text);
        let mut chars = after.chars();
        rest = match chars.next() {
            Some('[') => {
                let csi = chars.as_str();
                csi.find(|c: char| ('@'..='~').contains(&c))
                    .and_then(|end| csi.get(end + 1..))
                    .unwrap_or_default()
            }
            Some(_) => chars.as_str(),
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Log file for `command` under `$XDG_CACHE_HOME/snek/`, falling back to the
/// platform cache directory. The directory is created if needed.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(dirs::cache_dir)?
        .join("snek");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}
