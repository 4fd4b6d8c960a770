use crate::error::{SweepError, TrialError};
use crate::launcher::ProcessLauncher;
use crate::orchestrator::ProcessPairOrchestrator;
use crate::result_log::ResultLog;
use arq_bench_abstract::{HarnessConfig, MalformedPolicy, TrialConfiguration};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// A trial that produced no row but did not stop the sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedTrial {
    pub trial: TrialConfiguration,
    pub error: String,
}

/// What a sweep did, for logging and `--report-out`.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub log_path: PathBuf,
    pub header_written: bool,
    pub trials_planned: usize,
    pub rows_written: usize,
    pub abnormal_exits: usize,
    pub skipped: Vec<SkippedTrial>,
    pub duration_ms: u64,
}

/// Sequential driver: one trial in flight at a time, one log for the whole run.
pub struct Sweep<L> {
    orchestrator: ProcessPairOrchestrator<L>,
    log_path: PathBuf,
    on_malformed: MalformedPolicy,
}

impl<L: ProcessLauncher> Sweep<L> {
    pub fn new(launcher: L, config: &HarnessConfig) -> Self {
        let timeout = config.trial_timeout_ms.map(Duration::from_millis);
        Self {
            orchestrator: ProcessPairOrchestrator::new(launcher).with_timeout(timeout),
            log_path: config.log_path.clone(),
            on_malformed: config.on_malformed,
        }
    }

    pub fn orchestrator(&self) -> &ProcessPairOrchestrator<L> {
        &self.orchestrator
    }

    /// Run every trial in order, appending one row per successful trial.
    ///
    /// The log is closed before returning, whether the sweep finished or
    /// stopped at an error.
    pub async fn run<I>(&self, trials: I) -> Result<SweepReport, SweepError>
    where
        I: IntoIterator<Item = TrialConfiguration>,
    {
        let started = Instant::now();
        let trials: Vec<_> = trials.into_iter().collect();

        let mut log = ResultLog::open(&self.log_path).map_err(|source| SweepError::OpenLog {
            path: self.log_path.clone(),
            source,
        })?;
        info!(
            "Sweeping {} trials into {}",
            trials.len(),
            self.log_path.display()
        );

        let mut report = SweepReport {
            log_path: self.log_path.clone(),
            header_written: log.header_written(),
            trials_planned: trials.len(),
            rows_written: 0,
            abnormal_exits: 0,
            skipped: Vec::new(),
            duration_ms: 0,
        };

        let outcome = self.drive(&trials, &mut log, &mut report).await;
        report.rows_written = log.rows_written();
        report.duration_ms = started.elapsed().as_millis() as u64;

        let closed = log.close().map_err(|source| SweepError::WriteLog {
            path: self.log_path.clone(),
            source,
        });
        outcome?;
        closed?;
        Ok(report)
    }

    async fn drive(
        &self,
        trials: &[TrialConfiguration],
        log: &mut ResultLog,
        report: &mut SweepReport,
    ) -> Result<(), SweepError> {
        for (index, trial) in trials.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, trials.len(), trial);
            match self.orchestrator.run_trial(trial).await {
                Ok(outcome) => {
                    if outcome.abnormal_exit {
                        report.abnormal_exits += 1;
                    }
                    log.append(&outcome.result)
                        .map_err(|source| SweepError::WriteLog {
                            path: self.log_path.clone(),
                            source,
                        })?;
                }
                Err(err) => self.handle_failure(err, report)?,
            }
        }
        Ok(())
    }

    fn handle_failure(&self, err: TrialError, report: &mut SweepReport) -> Result<(), TrialError> {
        if let TrialError::AbnormalExit { .. } = err {
            report.abnormal_exits += 1;
        }
        if err.is_output_error() && self.on_malformed == MalformedPolicy::Skip {
            warn!("Skipping trial: {err}");
            report.skipped.push(SkippedTrial {
                trial: err.trial().clone(),
                error: err.to_string(),
            });
            return Ok(());
        }
        Err(err)
    }
}
