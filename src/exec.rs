//! Shell command execution with line-by-line output streaming.
use anyhow::{Context, Result};
use std::io::{BufRead as _, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Combined stdout and stderr, lossily decoded.
    pub output: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not terminated by a signal.
    pub code: Option<i32>,
}

/// Runs shell command lines.
///
/// Abstracted so the sync runner can be tested without spawning processes.
pub trait Executor: Send + Sync {
    /// Run `command` through the platform shell with `dir` as working
    /// directory, calling `on_line` for every output line as it arrives.
    ///
    /// A non-zero exit is reported through [`ExecResult::success`], not as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned or its output cannot
    /// be read.
    fn run_shell_in(
        &self,
        dir: &Path,
        command: &str,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ExecResult>;
}

/// Executes commands on the host system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_shell_in(
        &self,
        dir: &Path,
        command: &str,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ExecResult> {
        let mut child = shell_command(command)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to execute: {command}"))?;

        let mut output = String::new();
        let read = child
            .stdout
            .take()
            .map_or(Ok(()), |stdout| stream_lines(stdout, &mut output, on_line))
            .with_context(|| format!("reading output of: {command}"));

        // Reap the child even when its output could not be read.
        let status = child
            .wait()
            .with_context(|| format!("waiting for: {command}"))?;
        read?;
        Ok(ExecResult {
            output,
            success: status.success(),
            code: status.code(),
        })
    }
}

/// Feed every line of `reader` to `on_line` and append it to `output`.
///
/// Lines are split on `\n`, decoded lossily, and stripped of a trailing
/// `\r`.
fn stream_lines(
    reader: impl Read,
    output: &mut String,
    on_line: &mut dyn FnMut(&str),
) -> std::io::Result<()> {
    for chunk in BufReader::new(reader).split(b'\n') {
        let chunk = chunk?;
        let line = String::from_utf8_lossy(&chunk);
        let line = line.trim_end_matches('\r');
        on_line(line);
        output.push_str(line);
        output.push('\n');
    }
    Ok(())
}

/// Build the platform shell invocation for `command`, with stderr folded
/// into stdout.
fn shell_command(command: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(format!("{command} 2>&1"));
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(format!("exec 2>&1; {command}"));
        cmd
    }
}
