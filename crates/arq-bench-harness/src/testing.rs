//! In-process stand-in for protocol executables.

use crate::invocation::Invocation;
use crate::launcher::{ProcessExit, ProcessHandle, ProcessLauncher};
use arq_bench_abstract::Role;
use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub(crate) enum Behavior {
    /// Exit 0. Senders print a summary and a record echoing their arguments.
    Report,
    Exit { code: Option<i32>, stdout: String },
    /// Never exits.
    Hang,
    FailToLaunch,
    WaitError,
}

type Script = Arc<dyn Fn(&Invocation) -> Behavior + Send + Sync>;

#[derive(Clone)]
pub(crate) struct FakeLauncher {
    receiver: Script,
    sender: Script,
    launched: Arc<Mutex<Vec<Invocation>>>,
    live: Arc<AtomicUsize>,
}

impl FakeLauncher {
    pub(crate) fn reporting() -> Self {
        Self {
            receiver: Arc::new(|_| Behavior::Report),
            sender: Arc::new(|_| Behavior::Report),
            launched: Arc::default(),
            live: Arc::default(),
        }
    }

    pub(crate) fn receiver(mut self, behavior: Behavior) -> Self {
        self.receiver = Arc::new(move |_| behavior.clone());
        self
    }

    pub(crate) fn sender(mut self, behavior: Behavior) -> Self {
        self.sender = Arc::new(move |_| behavior.clone());
        self
    }

    pub(crate) fn sender_with(
        mut self,
        script: impl Fn(&Invocation) -> Behavior + Send + Sync + 'static,
    ) -> Self {
        self.sender = Arc::new(script);
        self
    }

    /// Invocations that were started, in launch order.
    pub(crate) fn launched(&self) -> Vec<Invocation> {
        self.launched.lock().unwrap().clone()
    }

    /// Handles that have been launched but not yet dropped.
    pub(crate) fn live_handles(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl ProcessLauncher for FakeLauncher {
    type Handle = FakeProcess;

    fn launch(&self, invocation: &Invocation) -> io::Result<FakeProcess> {
        let behavior = match invocation.role {
            Role::Receiver => (self.receiver)(invocation),
            Role::Sender => (self.sender)(invocation),
        };
        if let Behavior::FailToLaunch = behavior {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", invocation.executable),
            ));
        }

        self.launched.lock().unwrap().push(invocation.clone());
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(FakeProcess {
            behavior,
            invocation: invocation.clone(),
            live: self.live.clone(),
        })
    }
}

pub(crate) struct FakeProcess {
    behavior: Behavior,
    invocation: Invocation,
    live: Arc<AtomicUsize>,
}

impl Drop for FakeProcess {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

fn report(invocation: &Invocation) -> String {
    if invocation.role == Role::Receiver {
        return String::new();
    }
    let file = invocation.args.get(3).map(String::as_str).unwrap_or("?");
    let window = invocation.args.get(4).map(String::as_str).unwrap_or("1");
    format!(
        "\n~~File Transfer Completed~~\nFile Name: {file}\nFile Size: 4096 bytes\n\
         Transfer Time: 123456 nanoseconds\nTimeout Length: 100 milliseconds\n\n\
         100,4096,{window},123456\n\n"
    )
}

impl ProcessHandle for FakeProcess {
    fn wait(self) -> impl Future<Output = io::Result<ProcessExit>> + Send {
        async move {
            match self.behavior.clone() {
                Behavior::Report => Ok(ProcessExit {
                    code: Some(0),
                    stdout: report(&self.invocation),
                }),
                Behavior::Exit { code, stdout } => Ok(ProcessExit { code, stdout }),
                Behavior::Hang => std::future::pending().await,
                Behavior::FailToLaunch => unreachable!("never launched"),
                Behavior::WaitError => Err(io::Error::other("wait interrupted")),
            }
        }
    }
}
