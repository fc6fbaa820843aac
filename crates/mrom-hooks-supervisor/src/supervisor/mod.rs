//! Daemon supervisor
//!
//! Starts one privileged helper daemon before a boot stage that needs it and
//! stops it afterwards. The lifecycle is a two-state machine:
//!
//! ```text
//! Untracked --setup()--> Tracked --cleanup()--> Untracked
//! ```
//!
//! The host must pair every successful `setup` with a `cleanup`, also on its
//! own error paths. A supervisor dropped while still tracking a daemon runs
//! the cleanup itself.

mod daemon;


pub use daemon::{ReapedDaemon, SupervisedDaemon};

use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::bindings::PrivilegedBindings;
use crate::error::{SupervisorError, SupervisorResult};
use crate::spec::DaemonSpec;

/// Where the supervisor is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonState {
    Untracked,
    Tracked { pid: u32 },
}

/// What [`DaemonSupervisor::cleanup`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// The daemon that was terminated, if one was tracked
    pub reaped: Option<ReapedDaemon>,
    /// Alias symlinks that were removed
    pub removed_links: Vec<PathBuf>,
}

/// Owner of the single tracked daemon for one setup/cleanup cycle
#[derive(Debug)]
pub struct DaemonSupervisor {
    spec: DaemonSpec,
    bindings: PrivilegedBindings,
    daemon: Option<SupervisedDaemon>,
}

impl DaemonSupervisor {
    pub fn new(spec: DaemonSpec, bindings: PrivilegedBindings) -> Self {
        Self {
            spec,
            bindings,
            daemon: None,
        }
    }

    pub fn spec(&self) -> &DaemonSpec {
        &self.spec
    }

    pub fn bindings(&self) -> &PrivilegedBindings {
        &self.bindings
    }

    pub fn state(&self) -> DaemonState {
        match &self.daemon {
            Some(daemon) => DaemonState::Tracked { pid: daemon.pid() },
            None => DaemonState::Untracked,
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.daemon.is_some()
    }

    pub fn tracked_pid(&self) -> Option<u32> {
        self.daemon.as_ref().map(SupervisedDaemon::pid)
    }

    pub fn daemon(&self) -> Option<&SupervisedDaemon> {
        self.daemon.as_ref()
    }

    /// Apply the bindings and start the daemon
    ///
    /// Binding and chmod failures are logged and do not stop the spawn. A
    /// second call while a daemon is tracked is rejected and leaves the
    /// running daemon alone.
    pub fn setup(&mut self) -> SupervisorResult<u32> {
        if let Some(daemon) = &self.daemon {
            warn!(
                "{} is already running (pid={}); refusing a second setup",
                self.spec.name,
                daemon.pid()
            );
            return Err(SupervisorError::AlreadyTracked {
                name: self.spec.name.clone(),
                pid: daemon.pid(),
            });
        }

        let report = self.bindings.apply();
        if !report.is_complete() {
            warn!(
                "{} of the bindings for {} could not be applied",
                report.failures.len(),
                self.spec.name
            );
        }

        if let Err(e) = self.spec.mark_executable() {
            warn!(
                "Failed to chmod {} to {:o}: {}",
                self.spec.executable.display(),
                self.spec.exec_mode,
                e
            );
        }

        let daemon = SupervisedDaemon::spawn(&self.spec).map_err(|source| {
            error!(
                "Failed to start {} from {}: {}",
                self.spec.name,
                self.spec.executable.display(),
                source
            );
            SupervisorError::Spawn {
                name: self.spec.name.clone(),
                path: self.spec.executable.clone(),
                source,
            }
        })?;

        let pid = daemon.pid();
        info!("{} started: pid={}", self.spec.name, pid);
        self.daemon = Some(daemon);
        Ok(pid)
    }

    /// Stop the daemon's process group, reap it and remove the alias links
    ///
    /// Blocks until the daemon exits. Safe to call with nothing tracked.
    pub fn cleanup(&mut self) -> CleanupReport {
        let reaped = self.daemon.take().map(|daemon| {
            let reaped = daemon.terminate();
            debug!(
                "{} (pid={}) exited after {:?}: {:?}",
                self.spec.name, reaped.pid, reaped.uptime, reaped.status
            );
            reaped
        });

        let removed_links = self.bindings.release();
        info!("Cleaned up after {}", self.spec.name);

        CleanupReport {
            reaped,
            removed_links,
        }
    }
}

impl Drop for DaemonSupervisor {
    fn drop(&mut self) {
        if let Some(pid) = self.tracked_pid() {
            warn!(
                "Supervisor for {} dropped while pid {} is tracked; cleaning up",
                self.spec.name, pid
            );
            self.cleanup();
        }
    }
}
