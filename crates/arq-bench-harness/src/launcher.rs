use crate::invocation::Invocation;
use arq_bench_abstract::{HarnessConfig, Role};
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::debug;

/// How a protocol process ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessExit {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured standard output; always empty for receivers.
    pub stdout: String,
}

impl ProcessExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Starts protocol processes. The harness only ever talks to protocol
/// implementations through this seam.
pub trait ProcessLauncher {
    type Handle: ProcessHandle;

    fn launch(&self, invocation: &Invocation) -> io::Result<Self::Handle>;
}

/// A running protocol process. Dropping a handle that has not been waited on
/// must stop the process.
pub trait ProcessHandle {
    fn wait(self) -> impl Future<Output = io::Result<ProcessExit>> + Send;
}

/// Launches real OS processes through tokio.
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    prefix: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl SystemLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            prefix: config.launcher.clone(),
            working_dir: config.working_dir.clone(),
        }
    }

    /// Program and arguments to place in front of every executable,
    /// e.g. `java -cp bin`.
    pub fn prefix(mut self, prefix: Vec<String>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Final program and argument vector for an invocation.
    pub fn command_line(&self, invocation: &Invocation) -> (String, Vec<String>) {
        match self.prefix.split_first() {
            Some((program, leading)) => {
                let mut args = leading.to_vec();
                args.push(invocation.executable.clone());
                args.extend(invocation.args.iter().cloned());
                (program.clone(), args)
            }
            None => (invocation.executable.clone(), invocation.args.clone()),
        }
    }

    /// Shell-like rendering, for logs and dry runs.
    pub fn render(&self, invocation: &Invocation) -> String {
        let (program, args) = self.command_line(invocation);
        std::iter::once(program)
            .chain(args)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ProcessLauncher for SystemLauncher {
    type Handle = SystemProcess;

    fn launch(&self, invocation: &Invocation) -> io::Result<SystemProcess> {
        let (program, args) = self.command_line(invocation);
        debug!("spawning {}: {} {:?}", invocation.role, program, args);

        let mut command = Command::new(&program);
        command.args(&args).stdin(Stdio::null()).kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        match invocation.role {
            Role::Receiver => {
                command.stdout(Stdio::null()).stderr(Stdio::null());
            }
            Role::Sender => {
                command.stdout(Stdio::piped()).stderr(Stdio::inherit());
            }
        }

        let child = command.spawn()?;
        Ok(SystemProcess { child })
    }
}

pub struct SystemProcess {
    child: Child,
}

impl ProcessHandle for SystemProcess {
    fn wait(self) -> impl Future<Output = io::Result<ProcessExit>> + Send {
        async move {
            let output = self.child.wait_with_output().await?;
            Ok(ProcessExit {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            })
        }
    }
}
