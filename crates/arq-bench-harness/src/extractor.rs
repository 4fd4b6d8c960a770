use crate::error::ExtractError;
use arq_bench_abstract::{TrialConfiguration, TrialResult};

/// The four values a sender reports, exactly as printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub timeout: String,
    pub file_size: String,
    pub window_size: String,
    pub transfer_time: String,
}

impl Measurement {
    /// Combine with the trial inputs. The reliability number comes from the
    /// trial, never from the sender.
    pub fn into_result(self, trial: &TrialConfiguration) -> TrialResult {
        TrialResult {
            method: trial.method,
            timeout: self.timeout,
            file_size: self.file_size,
            window_size: self.window_size,
            reliability_number: trial.reliability_number,
            transfer_time: self.transfer_time,
        }
    }
}

/// Pull the `timeout,fileSize,windowSize,transferTime` record out of a
/// sender's stdout.
///
/// Senders print a human-readable summary followed by the record and usually a
/// final newline, so the record is the last line that is not blank.
pub fn extract(output: &str) -> Result<Measurement, ExtractError> {
    let line = output
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or(ExtractError::MissingRecord)?;

    let fields: Vec<&str> = line.split(',').collect();
    let [timeout, file_size, window_size, transfer_time] = fields[..] else {
        return Err(ExtractError::FieldCount {
            found: fields.len(),
            line: line.to_string(),
        });
    };

    Ok(Measurement {
        timeout: timeout.to_string(),
        file_size: file_size.to_string(),
        window_size: window_size.to_string(),
        transfer_time: transfer_time.to_string(),
    })
}
