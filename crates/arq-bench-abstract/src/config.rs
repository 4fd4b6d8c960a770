use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_PATH: &str = "test.out";

/// What the sweep does with a trial whose output cannot be turned into a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Stop the sweep at the first bad trial.
    #[default]
    Abort,
    /// Log it, record it in the report, write no row, keep going.
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub log_path: PathBuf,
    /// Program and leading arguments placed before the protocol executable,
    /// e.g. `["java", "-cp", "bin"]`. Empty runs the executable directly.
    pub launcher: Vec<String>,
    /// Directory both protocol processes start in.
    pub working_dir: Option<PathBuf>,
    /// Per-trial deadline. `None` waits forever.
    pub trial_timeout_ms: Option<u64>,
    pub on_malformed: MalformedPolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            launcher: Vec::new(),
            working_dir: None,
            trial_timeout_ms: None,
            on_malformed: MalformedPolicy::Abort,
        }
    }
}

/// Partial settings read from a TOML file or the command line.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfigOverride {
    pub log_path: Option<PathBuf>,
    pub launcher: Option<Vec<String>>,
    pub working_dir: Option<PathBuf>,
    pub trial_timeout_ms: Option<u64>,
    pub on_malformed: Option<MalformedPolicy>,
}

impl HarnessConfigOverride {
    pub fn apply_to(&self, config: &mut HarnessConfig) {
        if let Some(v) = &self.log_path {
            config.log_path = v.clone();
        }
        if let Some(v) = &self.launcher {
            config.launcher = v.clone();
        }
        if let Some(v) = &self.working_dir {
            config.working_dir = Some(v.clone());
        }
        if let Some(v) = self.trial_timeout_ms {
            config.trial_timeout_ms = Some(v);
        }
        if let Some(v) = self.on_malformed {
            config.on_malformed = v;
        }
    }
}
