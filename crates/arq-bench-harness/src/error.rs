use arq_bench_abstract::{Role, TrialConfiguration};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("sender printed no measurement line")]
    MissingRecord,

    #[error("expected 4 comma-separated fields, found {found} in {line:?}")]
    FieldCount { found: usize, line: String },
}

/// Failure of a single trial. Every variant carries the trial so the
/// configuration can be re-run on its own.
#[derive(Debug, Error)]
pub enum TrialError {
    #[error("failed to launch {role} for [{trial}]: {source}")]
    LaunchFailure {
        role: Role,
        trial: TrialConfiguration,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for {role} of [{trial}]: {source}")]
    Wait {
        role: Role,
        trial: TrialConfiguration,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed sender output for [{trial}]: {cause}")]
    MalformedOutput {
        trial: TrialConfiguration,
        #[source]
        cause: ExtractError,
    },

    #[error("sender exited abnormally ({}) for [{trial}]: {cause}", describe_exit(.code))]
    AbnormalExit {
        trial: TrialConfiguration,
        code: Option<i32>,
        #[source]
        cause: ExtractError,
    },

    #[error("[{trial}] did not finish within {after:?}")]
    TimedOut {
        trial: TrialConfiguration,
        after: Duration,
    },
}

impl TrialError {
    pub fn trial(&self) -> &TrialConfiguration {
        match self {
            TrialError::LaunchFailure { trial, .. }
            | TrialError::Wait { trial, .. }
            | TrialError::MalformedOutput { trial, .. }
            | TrialError::AbnormalExit { trial, .. }
            | TrialError::TimedOut { trial, .. } => trial,
        }
    }

    /// Errors about one trial's output, as opposed to a broken environment.
    /// Only these may be skipped.
    pub fn is_output_error(&self) -> bool {
        matches!(
            self,
            TrialError::MalformedOutput { .. } | TrialError::AbnormalExit { .. }
        )
    }
}

pub(crate) fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("failed to open result log {path}: {source}")]
    OpenLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write result log {path}: {source}")]
    WriteLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Trial(#[from] TrialError),
}
