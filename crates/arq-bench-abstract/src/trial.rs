use serde::{Deserialize, Serialize};
use std::fmt;

/// ARQ variant under test. The display form doubles as the executable prefix
/// (`GoBackNSender`, `StopAndWaitReceiver`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    GoBackN,
    StopAndWait,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::GoBackN, Method::StopAndWait];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GoBackN => "GoBackN",
            Method::StopAndWait => "StopAndWait",
        }
    }

    /// Whether the sender takes a window size argument.
    pub fn has_window(&self) -> bool {
        match self {
            Method::GoBackN => true,
            Method::StopAndWait => false,
        }
    }

    pub fn executable(&self, role: Role) -> String {
        format!("{}{}", self.as_str(), role.suffix())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of the protocol pair a process plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Sender,
    Receiver,
}

impl Role {
    fn suffix(&self) -> &'static str {
        match self {
            Role::Sender => "Sender",
            Role::Receiver => "Receiver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Sender => f.write_str("sender"),
            Role::Receiver => f.write_str("receiver"),
        }
    }
}

/// One point of the experiment grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialConfiguration {
    pub method: Method,
    /// Fixture file handed to the sender.
    pub file: String,
    /// Loss/corruption intensity handed to the receiver.
    pub reliability_number: u32,
    /// Ignored by Stop-and-Wait.
    pub window_size: u32,
}

impl TrialConfiguration {
    pub fn new(
        method: Method,
        file: impl Into<String>,
        reliability_number: u32,
        window_size: u32,
    ) -> Self {
        Self {
            method,
            file: file.into(),
            reliability_number,
            window_size,
        }
    }
}

impl fmt::Display for TrialConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "method={} file={} reliability={} window={}",
            self.method, self.file, self.reliability_number, self.window_size
        )
    }
}

/// Measurement for a single trial.
///
/// Everything except `method` and `reliability_number` is copied verbatim from
/// the sender's output; the reliability number is always the value the harness
/// gave the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialResult {
    pub method: Method,
    pub timeout: String,
    pub file_size: String,
    pub window_size: String,
    pub reliability_number: u32,
    pub transfer_time: String,
}

impl TrialResult {
    /// Column values in log order.
    pub fn fields(&self) -> [String; 6] {
        [
            self.method.to_string(),
            self.timeout.clone(),
            self.file_size.clone(),
            self.window_size.clone(),
            self.reliability_number.to_string(),
            self.transfer_time.clone(),
        ]
    }
}
