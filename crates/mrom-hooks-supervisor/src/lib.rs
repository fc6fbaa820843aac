//! Supervision of a privileged helper daemon around one boot stage
//!
//! Some devices need a vendor daemon (e.g. a secure-element bridge) running
//! while the boot manager decrypts storage. [`DaemonSupervisor`] prepares the
//! filesystem bindings the daemon expects, starts it as the leader of its own
//! process group, and later terminates that whole group, reaps the leader and
//! removes the bindings again.
//!
//! The supervisor is synchronous and single-threaded. No timeouts or retries
//! are applied; cleanup blocks until the daemon has exited.

#[cfg(not(unix))]
compile_error!("mrom-hooks-supervisor only supports Unix targets");

pub mod bindings;
pub mod error;
pub mod spec;
pub mod supervisor;

// Re-export commonly used types
pub use bindings::{
    BindingAction, BindingFailure, BindingReport, NodeGrant, Ownership, PrivilegedBindings,
    SymlinkBinding,
};
pub use error::{SupervisorError, SupervisorResult};
pub use spec::DaemonSpec;
pub use supervisor::{CleanupReport, DaemonState, DaemonSupervisor, ReapedDaemon, SupervisedDaemon};
