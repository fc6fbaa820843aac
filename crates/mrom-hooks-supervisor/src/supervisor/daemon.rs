//! A running, tracked daemon process

use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, ExitStatus};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::spec::DaemonSpec;

/// Daemon started by [`DaemonSupervisor::setup`](super::DaemonSupervisor::setup)
///
/// Holds the child handle, so the pid cannot be recycled before it is reaped.
#[derive(Debug)]
pub struct SupervisedDaemon {
    child: Child,
    pid: u32,
    started_at: Instant,
}

impl SupervisedDaemon {
    pub(crate) fn spawn(spec: &DaemonSpec) -> io::Result<Self> {
        let child = spec.spawn_group_leader()?;
        let pid = child.id();
        Ok(Self {
            child,
            pid,
            started_at: Instant::now(),
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Group the daemon leads; always equal to its pid
    pub fn process_group(&self) -> Pid {
        Pid::from_raw(self.pid as i32)
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// SIGTERM the whole process group, then block until the leader is reaped
    pub(crate) fn terminate(mut self) -> ReapedDaemon {
        let group = self.process_group();
        match killpg(group, Signal::SIGTERM) {
            Ok(()) => debug!("Sent SIGTERM to process group {}", group),
            Err(Errno::ESRCH) => debug!("Process group {} already gone", group),
            Err(e) => warn!("Failed to signal process group {}: {}", group, e),
        }

        let status = match self.child.wait() {
            Ok(status) => Some(status),
            Err(e) => {
                warn!("Failed to reap pid {}: {}", self.pid, e);
                None
            }
        };

        ReapedDaemon {
            pid: self.pid,
            status,
            uptime: self.uptime(),
        }
    }
}

/// A daemon that was signalled and waited for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReapedDaemon {
    pub pid: u32,
    /// `None` when the wait itself failed
    pub status: Option<ExitStatus>,
    /// Time from spawn until the daemon was reaped
    pub uptime: Duration,
}

impl ReapedDaemon {
    /// Signal that ended the daemon, if it died from one
    pub fn signal(&self) -> Option<i32> {
        self.status.and_then(|status| status.signal())
    }
}
