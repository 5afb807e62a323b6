//! Version-control synchronization sequence.
//!
//! The sequence is plain data (a list of [`SyncStep`]s) so that the order of
//! commands can be changed from `snek.toml` without touching code. Every step
//! runs with the repository root as its explicit working directory; the
//! process working directory is never changed.
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::exec::Executor;
use crate::logging::{Log, TaskStatus};

/// One shell command in the synchronization sequence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SyncStep {
    /// Stage header printed before the command, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Shell command line, run verbatim.
    pub command: String,
}

impl SyncStep {
    /// A step without a stage header.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            stage: None,
            command: command.into(),
        }
    }

    /// A step that opens a new stage.
    #[must_use]
    pub fn staged(stage: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            stage: Some(stage.into()),
            command: command.into(),
        }
    }
}

/// The built-in sequence: refresh submodules, commit them, pull, push.
#[must_use]
pub fn default_steps() -> Vec<SyncStep> {
    vec![
        SyncStep::staged("Updating snek", "git submodule update --recursive --remote"),
        SyncStep::new("git add dot_snek"),
        SyncStep::new(r#"git commit -m "snek""#),
        SyncStep::staged("Updating dot files", "git pull"),
        SyncStep::staged("Pushing changes", "git push"),
    ]
}

/// Run every step in order inside `dir`, streaming output to `log`.
///
/// A failing step does not stop the sequence: each outcome is recorded via
/// [`Log::record_task`] and the next step still runs. Failures are reported
/// together once the sequence is over.
///
/// # Errors
///
/// Returns [`SyncError::EmptySequence`] when `steps` is empty,
/// [`SyncError::CommandsFailed`] when at least one command exited non-zero,
/// or the executor's error if a command could not be started at all.
pub fn run_sequence(
    steps: &[SyncStep],
    dir: &Path,
    executor: &dyn Executor,
    log: &dyn Log,
) -> Result<()> {
    if steps.is_empty() {
        return Err(SyncError::EmptySequence.into());
    }
    log.debug(&format!("running {} sync step(s) in {}", steps.len(), dir.display()));

    let mut failed = 0;
    for step in steps {
        if let Some(stage) = &step.stage {
            log.stage(stage);
        }
        log.debug(&format!("$ {}", step.command));

        let result = executor.run_shell_in(dir, &step.command, &mut |line| log.info(line))?;
        if result.success {
            log.record_task(&step.command, TaskStatus::Ok, None);
        } else {
            failed += 1;
            let code = result
                .code
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            log.warn(&format!("'{}' exited with {code}", step.command));
            log.record_task(
                &step.command,
                TaskStatus::Failed,
                Some(&format!("exit {code}")),
            );
        }
    }

    if failed > 0 {
        return Err(SyncError::CommandsFailed {
            failed,
            total: steps.len(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;
    use crate::logging::test_helpers::RecordingLog;
    use std::path::PathBuf;

    #[test]
    fn default_sequence_is_preserved_literally() {
        insta::assert_yaml_snapshot!(default_steps(), @r#"
        - stage: Updating snek
          command: git submodule update --recursive --remote
        - command: git add dot_snek
        - command: "git commit -m \"snek\""
        - stage: Updating dot files
          command: git pull
        - stage: Pushing changes
          command: git push
        "#);
    }

    #[test]
    fn runs_every_step_in_the_given_directory() {
        let executor = MockExecutor::succeeding(5);
        let log = RecordingLog::new();
        let dir = PathBuf::from("/repo");

        run_sequence(&default_steps(), &dir, &executor, &log).unwrap();

        let calls = executor.calls();
        assert_eq!(calls.len(), 5);
        assert!(calls.iter().all(|(d, _)| *d == dir));
        assert_eq!(
            log.at("stage"),
            ["Updating snek", "Updating dot files", "Pushing changes"]
        );
        assert!(log.tasks().iter().all(|(_, s)| *s == TaskStatus::Ok));
    }

    #[test]
    fn failure_does_not_stop_the_sequence() {
        let executor = MockExecutor::with_codes(&[0, 0, 1, 0, 0]);
        let log = RecordingLog::new();

        let err = run_sequence(&default_steps(), Path::new("/repo"), &executor, &log)
            .unwrap_err();

        assert_eq!(executor.commands().len(), 5, "later steps must still run");
        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::CommandsFailed { failed: 1, total: 5 })
        ));
        assert_eq!(log.at("warn"), [r#"'git commit -m "snek"' exited with 1"#]);
        let statuses: Vec<_> = log.tasks().into_iter().map(|(_, s)| s).collect();
        assert_eq!(
            statuses,
            [
                TaskStatus::Ok,
                TaskStatus::Ok,
                TaskStatus::Failed,
                TaskStatus::Ok,
                TaskStatus::Ok
            ]
        );
    }

    #[test]
    fn output_lines_are_streamed_to_the_log() {
        let executor = MockExecutor::with_responses(vec![(
            0,
            vec!["Already up to date.".to_string(), "done".to_string()],
        )]);
        let log = RecordingLog::new();

        run_sequence(&[SyncStep::new("git pull")], Path::new("."), &executor, &log).unwrap();

        assert_eq!(log.at("info"), ["Already up to date.", "done"]);
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let executor = MockExecutor::default();
        let err = run_sequence(&[], Path::new("."), &executor, &RecordingLog::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::EmptySequence)
        ));
        assert!(executor.calls().is_empty());
    }
}
