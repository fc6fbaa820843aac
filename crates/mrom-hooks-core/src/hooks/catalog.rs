//! Catalogue of every hook the host can call
//!
//! Each hook has a fixed tier. The host must check a module's declared
//! version against [`Hook::required_version`] before calling it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::version::HookVersion;

/// Extension points the host invokes at fixed boot stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    /// After the primary/secondary ROM partitions are mounted
    PostMountFixup,
    /// Before the framebuffer is released
    BeforeDisplayTeardown,
    /// Before device-specific initialization
    BeforeDeviceInit,
    /// Whether a partially specified fstab is acceptable
    AllowIncompleteFstab,
    /// Rewrite the boot image command line
    FixupBootImageCmdline,
    /// Probe for kexec capability
    HasKexecSupport,
    /// Start the decryption helper daemon
    EncryptionSetup,
    /// Stop the decryption helper daemon
    EncryptionCleanup,
    /// Rewrite the assembled kernel command line
    FixupFullCmdline,
}

impl Hook {
    /// Tier a module must declare for this hook to be callable
    pub fn required_version(&self) -> HookVersion {
        match self {
            Hook::PostMountFixup => HookVersion::V1,
            Hook::BeforeDisplayTeardown => HookVersion::V2,
            Hook::BeforeDeviceInit => HookVersion::V3,
            Hook::AllowIncompleteFstab => HookVersion::V4,
            Hook::FixupBootImageCmdline | Hook::HasKexecSupport => HookVersion::V5,
            Hook::EncryptionSetup | Hook::EncryptionCleanup | Hook::FixupFullCmdline => {
                HookVersion::V6
            }
        }
    }

    /// Stable identifier used in logs and configuration
    pub fn name(&self) -> &'static str {
        match self {
            Hook::PostMountFixup => "post_mount_fixup",
            Hook::BeforeDisplayTeardown => "before_display_teardown",
            Hook::BeforeDeviceInit => "before_device_init",
            Hook::AllowIncompleteFstab => "allow_incomplete_fstab",
            Hook::FixupBootImageCmdline => "fixup_boot_image_cmdline",
            Hook::HasKexecSupport => "has_kexec_support",
            Hook::EncryptionSetup => "encryption_setup",
            Hook::EncryptionCleanup => "encryption_cleanup",
            Hook::FixupFullCmdline => "fixup_full_cmdline",
        }
    }

    /// All hooks, in tier order
    pub fn all() -> &'static [Hook] {
        &[
            Hook::PostMountFixup,
            Hook::BeforeDisplayTeardown,
            Hook::BeforeDeviceInit,
            Hook::AllowIncompleteFstab,
            Hook::FixupBootImageCmdline,
            Hook::HasKexecSupport,
            Hook::EncryptionSetup,
            Hook::EncryptionCleanup,
            Hook::FixupFullCmdline,
        ]
    }

    /// Hooks callable on a module declaring `version`
    pub fn available_at(version: HookVersion) -> impl Iterator<Item = Hook> {
        Self::all()
            .iter()
            .copied()
            .filter(move |hook| version.provides(hook.required_version()))
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
