//! Hook version tiers
//!
//! Every device module declares the highest tier it implements. Tiers are
//! additive: a module at tier N also provides every hook of tiers 1..N.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared hook tier of a device module
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HookVersion(u8);

impl HookVersion {
    /// Module without any hooks
    pub const NONE: HookVersion = HookVersion(0);
    /// Post-mount fixup
    pub const V1: HookVersion = HookVersion(1);
    /// Display teardown notification
    pub const V2: HookVersion = HookVersion(2);
    /// Device init notification
    pub const V3: HookVersion = HookVersion(3);
    /// Incomplete fstab tolerance
    pub const V4: HookVersion = HookVersion(4);
    /// Boot image cmdline fixup and kexec probe
    pub const V5: HookVersion = HookVersion(5);
    /// Encryption daemon setup/cleanup and full cmdline fixup
    pub const V6: HookVersion = HookVersion(6);

    /// Highest tier this crate knows about
    pub const LATEST: HookVersion = HookVersion::V6;

    /// Create a version from its raw tier number
    pub const fn new(tier: u8) -> Self {
        HookVersion(tier)
    }

    /// Raw tier number
    pub const fn tier(self) -> u8 {
        self.0
    }

    /// Whether a module at this version provides hooks of `required`
    pub fn provides(self, required: HookVersion) -> bool {
        self >= required
    }

    /// Whether this tier is one the dispatcher understands
    pub fn is_known(self) -> bool {
        self <= Self::LATEST
    }
}

impl From<u8> for HookVersion {
    fn from(tier: u8) -> Self {
        HookVersion(tier)
    }
}

impl fmt::Display for HookVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
