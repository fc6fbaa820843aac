//! Device hook layer for the MultiROM boot manager
//!
//! Umbrella crate over the workspace:
//!
//! - [`contract`]: hook versions, the [`DeviceHooks`] trait and the gated
//!   [`HookDispatcher`]
//! - [`supervisor`]: start/stop of the decryption daemon
//! - [`device`]: the bullhead [`DeviceModule`] and its profile
//!
//! ```no_run
//! use mrom_hooks::{DeviceModule, HookDispatcher, MountContext, RomKind};
//!
//! let mut dispatcher = HookDispatcher::new(DeviceModule::bullhead());
//! dispatcher.post_mount_fixup(&MountContext::new("/sbin/busybox", "/realdata", RomKind::Default));
//! let unlocked = dispatcher.with_encryption(|_| {
//!     // decrypt /data here
//!     true
//! });
//! # let _ = unlocked;
//! ```

pub use mrom_hooks_core as contract;
pub use mrom_hooks_device as device;
pub use mrom_hooks_supervisor as supervisor;

pub use mrom_hooks_core::{
    CmdlineBuffer, CmdlineError, DeviceHooks, Hook, HookDispatcher, HookStatus, HookVersion,
    LoggingConfig, MountContext, NoHooks, RomKind,
};
pub use mrom_hooks_device::{DeviceModule, DeviceProfile};
pub use mrom_hooks_supervisor::{DaemonSupervisor, SupervisorError};

/// Install the logging subscriber described by a device profile
///
/// Returns false when a global subscriber was already installed.
pub fn init_logging(profile: &DeviceProfile) -> bool {
    let installed = mrom_hooks_core::logging::init(&profile.logging);
    if installed {
        tracing::debug!("Logging initialized at level {}", profile.logging.level);
    }
    installed
}
