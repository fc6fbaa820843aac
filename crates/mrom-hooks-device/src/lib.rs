//! MultiROM hook module for Qualcomm devices that decrypt through qseecomd
//!
//! [`DeviceModule`] implements the tier 6 hook set:
//!
//! - post-mount: make sure gatekeeper's coldboot marker exists
//! - kexec support: readable `/sys/firmware/fdt`
//! - encryption setup/cleanup: run `qseecomd` with the block device alias
//!   and device node permissions it expects
//!
//! Paths, identities and the daemon are described by a [`DeviceProfile`],
//! which defaults to the Nexus 5X (bullhead) and can be loaded from TOML.

#[cfg(not(unix))]
compile_error!("mrom-hooks-device only supports Unix targets");

pub mod config;
pub mod error;
pub mod ids;
pub mod kexec;
pub mod marker;
pub mod module;

pub use config::{ColdbootConfig, DeviceProfile, EncryptionConfig, KexecConfig};
pub use error::{ConfigError, ConfigResult, MarkerError};
pub use kexec::KexecProbe;
pub use marker::{ColdbootMarker, MarkerState};
pub use module::DeviceModule;
