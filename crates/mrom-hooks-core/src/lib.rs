//! MultiROM device hook contract
//!
//! This crate defines what the boot manager may call on a device module and
//! in which order: the versioned hook catalogue, the [`DeviceHooks`] trait
//! device modules implement, and the [`HookDispatcher`] the host calls
//! through. It holds no device knowledge of its own.

pub mod cmdline;
pub mod hooks;
pub mod logging;
pub mod version;

// Re-export commonly used types
pub use cmdline::{CmdlineBuffer, CmdlineError};
pub use hooks::{DeviceHooks, Hook, HookDispatcher, HookStatus, MountContext, NoHooks, RomKind};
pub use logging::LoggingConfig;
pub use version::HookVersion;
