//! Hook contract between the boot manager and device modules
//!
//! The boot manager (the host) calls a device module at fixed points of the
//! boot lifecycle. Hooks are grouped into additive tiers; a module declares
//! the highest tier it implements and the host only calls hooks at or below
//! it. [`HookDispatcher`] enforces that rule.
//!
//! # Examples
//!
//! ```rust
//! use mrom_hooks_core::hooks::{DeviceHooks, HookDispatcher, HookStatus, MountContext, RomKind};
//! use mrom_hooks_core::HookVersion;
//!
//! struct Quiet;
//!
//! impl DeviceHooks for Quiet {
//!     fn version(&self) -> HookVersion {
//!         HookVersion::V4
//!     }
//!
//!     fn allow_incomplete_fstab(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let dispatcher = HookDispatcher::new(Quiet);
//! let ctx = MountContext::new("/mrom/busybox", "/realdata", RomKind::Default);
//! assert_eq!(dispatcher.post_mount_fixup(&ctx), HookStatus::PROCEED);
//! assert!(dispatcher.allow_incomplete_fstab());
//! // Tier 5 is above what Quiet declares, so the default comes back
//! assert!(!dispatcher.has_kexec_support());
//! ```

pub mod catalog;
pub mod context;
pub mod device;
pub mod dispatch;

#[cfg(test)]
mod dispatch_tests;

pub use catalog::Hook;
pub use context::{HookStatus, MountContext, RomKind};
pub use device::{DeviceHooks, NoHooks};
pub use dispatch::HookDispatcher;
