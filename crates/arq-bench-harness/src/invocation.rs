use arq_bench_abstract::{Role, TrialConfiguration};
use std::fmt;

pub const HOST: &str = "localhost";
/// Port the receiver listens on for data (the sender's destination port).
pub const DATA_PORT: u16 = 5000;
/// Port the sender listens on for ACKs (the receiver's destination port).
pub const ACK_PORT: u16 = 8000;
/// File the receiver writes the transferred payload to.
pub const RECEIVER_OUTPUT_FILE: &str = "recfile";

/// A protocol executable together with its positional arguments, before any
/// launcher prefix is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub role: Role,
    pub executable: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.executable)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// `<Method>Receiver host 5000 8000 <reliability> recfile`
pub fn receiver_invocation(trial: &TrialConfiguration) -> Invocation {
    Invocation {
        role: Role::Receiver,
        executable: trial.method.executable(Role::Receiver),
        args: vec![
            HOST.to_string(),
            DATA_PORT.to_string(),
            ACK_PORT.to_string(),
            trial.reliability_number.to_string(),
            RECEIVER_OUTPUT_FILE.to_string(),
        ],
    }
}

/// `<Method>Sender host 8000 5000 <file> [<window>]`
pub fn sender_invocation(trial: &TrialConfiguration) -> Invocation {
    let mut args = vec![
        HOST.to_string(),
        ACK_PORT.to_string(),
        DATA_PORT.to_string(),
        trial.file.clone(),
        trial.window_size.to_string(),
    ];

    // Stop-and-Wait senders reject a window argument.
    if !trial.method.has_window() {
        args.pop();
    }

    Invocation {
        role: Role::Sender,
        executable: trial.method.executable(Role::Sender),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arq_bench_abstract::Method;

    #[test]
    fn receiver_arguments_are_positional() {
        let trial = TrialConfiguration::new(Method::GoBackN, "s_sm_file", 10, 40);
        let inv = receiver_invocation(&trial);
        assert_eq!(inv.executable, "GoBackNReceiver");
        assert_eq!(inv.args, ["localhost", "5000", "8000", "10", "recfile"]);
    }

    #[test]
    fn go_back_n_sender_gets_window() {
        let trial = TrialConfiguration::new(Method::GoBackN, "s_md_file", 0, 80);
        let inv = sender_invocation(&trial);
        assert_eq!(inv.executable, "GoBackNSender");
        assert_eq!(inv.args, ["localhost", "8000", "5000", "s_md_file", "80"]);
        assert_eq!(inv.to_string(), "GoBackNSender localhost 8000 5000 s_md_file 80");
    }

    #[test]
    fn stop_and_wait_sender_drops_window() {
        let gbn = TrialConfiguration::new(Method::GoBackN, "s_lg_file", 100, 40);
        let saw = TrialConfiguration::new(Method::StopAndWait, "s_lg_file", 100, 40);

        let gbn_args = sender_invocation(&gbn).args;
        let saw_args = sender_invocation(&saw).args;

        assert_eq!(saw_args.len() + 1, gbn_args.len());
        assert_eq!(saw_args.as_slice(), &gbn_args[..gbn_args.len() - 1]);
        assert_eq!(sender_invocation(&saw).executable, "StopAndWaitSender");
    }

    #[test]
    fn stop_and_wait_receiver_is_unaffected_by_window() {
        let a = TrialConfiguration::new(Method::StopAndWait, "s_sm_file", 0, 10);
        let b = TrialConfiguration::new(Method::StopAndWait, "s_sm_file", 0, 80);
        assert_eq!(receiver_invocation(&a), receiver_invocation(&b));
    }
}
