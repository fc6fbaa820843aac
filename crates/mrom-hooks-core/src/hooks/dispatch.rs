//! Version-gated hook dispatch
//!
//! The host never talks to a device module directly. [`HookDispatcher`]
//! reads the module's declared version once and answers every hook above
//! that tier with the neutral default, without touching the module.

use tracing::{debug, trace, warn};

use super::catalog::Hook;
use super::context::{HookStatus, MountContext};
use super::device::DeviceHooks;
use crate::cmdline::CmdlineBuffer;
use crate::version::HookVersion;

/// Host-side entry point for calling device hooks
#[derive(Debug)]
pub struct HookDispatcher<H> {
    hooks: H,
    version: HookVersion,
}

impl<H: DeviceHooks> HookDispatcher<H> {
    /// Wrap a device module, capturing its declared version
    pub fn new(hooks: H) -> Self {
        let version = hooks.version();
        if !version.is_known() {
            warn!(
                "Device module declares hook version {}, newest known is {}; extra tiers are ignored",
                version,
                HookVersion::LATEST
            );
        }
        debug!("Device hooks registered at {}", version);
        Self { hooks, version }
    }

    /// Version the module declared
    pub fn version(&self) -> HookVersion {
        self.version
    }

    /// Whether the module's tier covers `hook`
    pub fn is_available(&self, hook: Hook) -> bool {
        self.version.provides(hook.required_version())
    }

    /// Every hook the module's tier covers
    pub fn available_hooks(&self) -> Vec<Hook> {
        Hook::available_at(self.version).collect()
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_inner(self) -> H {
        self.hooks
    }

    fn gate(&self, hook: Hook) -> bool {
        let available = self.is_available(hook);
        if !available {
            trace!(
                "Skipping hook {} (requires {}, module declares {})",
                hook,
                hook.required_version(),
                self.version
            );
        }
        available
    }

    pub fn post_mount_fixup(&self, ctx: &MountContext) -> HookStatus {
        if !self.gate(Hook::PostMountFixup) {
            return HookStatus::PROCEED;
        }
        self.hooks.post_mount_fixup(ctx)
    }

    pub fn before_display_teardown(&self) {
        if self.gate(Hook::BeforeDisplayTeardown) {
            self.hooks.before_display_teardown();
        }
    }

    pub fn before_device_init(&self) {
        if self.gate(Hook::BeforeDeviceInit) {
            self.hooks.before_device_init();
        }
    }

    pub fn allow_incomplete_fstab(&self) -> bool {
        self.gate(Hook::AllowIncompleteFstab) && self.hooks.allow_incomplete_fstab()
    }

    pub fn fixup_boot_image_cmdline(&self, cmdline: &mut CmdlineBuffer) {
        if self.gate(Hook::FixupBootImageCmdline) {
            self.hooks.fixup_boot_image_cmdline(cmdline);
        }
    }

    pub fn has_kexec_support(&self) -> bool {
        self.gate(Hook::HasKexecSupport) && self.hooks.has_kexec_support()
    }

    pub fn encryption_setup(&mut self) {
        if self.gate(Hook::EncryptionSetup) {
            self.hooks.encryption_setup();
        }
    }

    pub fn encryption_cleanup(&mut self) {
        if self.gate(Hook::EncryptionCleanup) {
            self.hooks.encryption_cleanup();
        }
    }

    pub fn fixup_full_cmdline(&self, cmdline: &mut CmdlineBuffer) {
        if self.gate(Hook::FixupFullCmdline) {
            self.hooks.fixup_full_cmdline(cmdline);
        }
    }

    /// Run a decryption stage bracketed by the encryption hooks
    ///
    /// Cleanup runs when `stage` returns and also when it unwinds.
    pub fn with_encryption<T>(&mut self, stage: impl FnOnce(&Self) -> T) -> T {
        self.encryption_setup();
        let guard = EncryptionGuard { dispatcher: self };
        stage(&*guard.dispatcher)
    }
}

struct EncryptionGuard<'a, H: DeviceHooks> {
    dispatcher: &'a mut HookDispatcher<H>,
}

impl<H: DeviceHooks> Drop for EncryptionGuard<'_, H> {
    fn drop(&mut self) {
        self.dispatcher.encryption_cleanup();
    }
}
