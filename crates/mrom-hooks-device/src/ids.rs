//! Android system identities used by the device module

/// `system` user and group
pub const AID_SYSTEM: u32 = 1000;

/// `drmrpc` group, required by the secure-element node
pub const AID_DRMRPC: u32 = 1026;
