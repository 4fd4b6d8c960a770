use crate::error::TrialError;
use crate::extractor::extract;
use crate::invocation::{receiver_invocation, sender_invocation};
use crate::launcher::{ProcessExit, ProcessHandle, ProcessLauncher};
use arq_bench_abstract::{Role, TrialConfiguration, TrialResult};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Exit information for both halves of one trial.
#[derive(Debug, Clone)]
pub struct PairOutcome {
    pub receiver: ProcessExit,
    pub sender: ProcessExit,
}

/// A trial that produced a row.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub result: TrialResult,
    /// The sender exited nonzero but its output still held a record.
    pub abnormal_exit: bool,
    pub elapsed: Duration,
}

/// Runs one receiver/sender pair per trial.
pub struct ProcessPairOrchestrator<L> {
    launcher: L,
    timeout: Option<Duration>,
}

impl<L: ProcessLauncher> ProcessPairOrchestrator<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            timeout: None,
        }
    }

    /// Kill both processes and fail the trial if it runs longer than `limit`.
    /// Without a limit a hung process blocks forever.
    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Launch the receiver, then the sender, and wait for both.
    ///
    /// There is no readiness handshake: the sender is started as soon as the
    /// receiver has been spawned, so a slow receiver can miss the sender's
    /// first packets.
    pub async fn run_pair(&self, trial: &TrialConfiguration) -> Result<PairOutcome, TrialError> {
        let receiver_cmd = receiver_invocation(trial);
        let sender_cmd = sender_invocation(trial);
        debug!("receiver: {receiver_cmd}");
        debug!("sender: {sender_cmd}");

        let receiver =
            self.launcher
                .launch(&receiver_cmd)
                .map_err(|source| TrialError::LaunchFailure {
                    role: Role::Receiver,
                    trial: trial.clone(),
                    source,
                })?;

        // On failure `receiver` is dropped here, which stops it.
        let sender =
            self.launcher
                .launch(&sender_cmd)
                .map_err(|source| TrialError::LaunchFailure {
                    role: Role::Sender,
                    trial: trial.clone(),
                    source,
                })?;

        // Both are awaited together so a sender blocked on a full stdout pipe
        // can never stall the receiver wait.
        let both = async { tokio::join!(receiver.wait(), sender.wait()) };
        let (receiver_exit, sender_exit) = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, both).await.map_err(|_| {
                TrialError::TimedOut {
                    trial: trial.clone(),
                    after: limit,
                }
            })?,
            None => both.await,
        };

        let receiver = receiver_exit.map_err(|source| TrialError::Wait {
            role: Role::Receiver,
            trial: trial.clone(),
            source,
        })?;
        let sender = sender_exit.map_err(|source| TrialError::Wait {
            role: Role::Sender,
            trial: trial.clone(),
            source,
        })?;

        if !receiver.success() {
            warn!("receiver exited with {:?} for [{}]", receiver.code, trial);
        }
        if !sender.success() {
            warn!("sender exited with {:?} for [{}]", sender.code, trial);
        }

        Ok(PairOutcome { receiver, sender })
    }

    /// Run one trial end to end and turn the sender's output into a result.
    pub async fn run_trial(&self, trial: &TrialConfiguration) -> Result<TrialOutcome, TrialError> {
        info!("Running trial [{}]", trial);
        let started = Instant::now();
        let outcome = self.run_pair(trial).await?;
        let elapsed = started.elapsed();
        let abnormal_exit = !outcome.sender.success();

        match extract(&outcome.sender.stdout) {
            Ok(measurement) => {
                let result = measurement.into_result(trial);
                info!(
                    "Trial finished in {:?}: transfer time {}",
                    elapsed, result.transfer_time
                );
                Ok(TrialOutcome {
                    result,
                    abnormal_exit,
                    elapsed,
                })
            }
            Err(cause) if abnormal_exit => Err(TrialError::AbnormalExit {
                trial: trial.clone(),
                code: outcome.sender.code,
                cause,
            }),
            Err(cause) => Err(TrialError::MalformedOutput {
                trial: trial.clone(),
                cause,
            }),
        }
    }
}
