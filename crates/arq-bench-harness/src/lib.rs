//! Sweep driver for benchmarking external Go-Back-N and Stop-and-Wait
//! implementations: grid enumeration, process-pair orchestration, output
//! extraction and the append-only result log.

pub mod error;
pub mod extractor;
pub mod grid;
pub mod invocation;
pub mod launcher;
pub mod orchestrator;
pub mod result_log;
pub mod sweep;

#[cfg(test)]
mod testing;

pub use error::{ExtractError, SweepError, TrialError};
pub use extractor::{Measurement, extract};
pub use grid::trial_space;
pub use invocation::{Invocation, receiver_invocation, sender_invocation};
pub use launcher::{ProcessExit, ProcessHandle, ProcessLauncher, SystemLauncher};
pub use orchestrator::{PairOutcome, ProcessPairOrchestrator, TrialOutcome};
pub use result_log::{HEADER, ResultLog};
pub use sweep::{SkippedTrial, Sweep, SweepReport};
