//! Supervisor error types

use std::io;
use std::path::PathBuf;

/// Result type alias for supervisor operations
pub type SupervisorResult<T> = Result<T, SupervisorError>;

/// Errors that can occur while starting the daemon
#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    /// A daemon is already tracked; setup needs a cleanup first
    #[error("{name} is already running as pid {pid}")]
    AlreadyTracked { name: String, pid: u32 },

    /// No child could be started, or it could not replace its image
    #[error("failed to spawn {name} from {}: {source}", path.display())]
    Spawn {
        name: String,
        path: PathBuf,
        source: io::Error,
    },
}

impl SupervisorError {
    /// Whether the error left a previously started daemon untouched
    pub fn is_already_tracked(&self) -> bool {
        matches!(self, SupervisorError::AlreadyTracked { .. })
    }
}
