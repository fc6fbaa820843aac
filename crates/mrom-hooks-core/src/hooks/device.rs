//! The trait device modules implement

use super::context::{HookStatus, MountContext};
use crate::cmdline::CmdlineBuffer;
use crate::version::HookVersion;

/// Hardware-specific fixups invoked by the boot manager
///
/// A module declares its tier through [`DeviceHooks::version`] and overrides
/// the hooks it cares about. Every hook has a neutral default, so a module
/// only writes the ones it needs. Hooks never fail from the host's point of
/// view: implementations log their own errors and return a neutral outcome.
///
/// Hosts should not call these methods directly; go through
/// [`HookDispatcher`](super::HookDispatcher), which refuses to call hooks
/// above the declared tier.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceHooks {
    /// Highest hook tier this module implements
    fn version(&self) -> HookVersion;

    /// Tier 1: partitions of the booted ROM are mounted
    fn post_mount_fixup(&self, _ctx: &MountContext) -> HookStatus {
        HookStatus::PROCEED
    }

    /// Tier 2: the framebuffer is about to be released
    fn before_display_teardown(&self) {}

    /// Tier 3: device initialization is about to run
    fn before_device_init(&self) {}

    /// Tier 4: whether a partially specified fstab is acceptable
    fn allow_incomplete_fstab(&self) -> bool {
        false
    }

    /// Tier 5: rewrite the boot image command line in place
    fn fixup_boot_image_cmdline(&self, _cmdline: &mut CmdlineBuffer) {}

    /// Tier 5: whether the platform can kexec
    fn has_kexec_support(&self) -> bool {
        false
    }

    /// Tier 6: bring up whatever the decryption stage depends on
    fn encryption_setup(&mut self) {}

    /// Tier 6: tear down what [`DeviceHooks::encryption_setup`] started
    fn encryption_cleanup(&mut self) {}

    /// Tier 6: rewrite the full kernel command line in place
    fn fixup_full_cmdline(&self, _cmdline: &mut CmdlineBuffer) {}
}

impl<T: DeviceHooks + ?Sized> DeviceHooks for Box<T> {
    fn version(&self) -> HookVersion {
        (**self).version()
    }

    fn post_mount_fixup(&self, ctx: &MountContext) -> HookStatus {
        (**self).post_mount_fixup(ctx)
    }

    fn before_display_teardown(&self) {
        (**self).before_display_teardown()
    }

    fn before_device_init(&self) {
        (**self).before_device_init()
    }

    fn allow_incomplete_fstab(&self) -> bool {
        (**self).allow_incomplete_fstab()
    }

    fn fixup_boot_image_cmdline(&self, cmdline: &mut CmdlineBuffer) {
        (**self).fixup_boot_image_cmdline(cmdline)
    }

    fn has_kexec_support(&self) -> bool {
        (**self).has_kexec_support()
    }

    fn encryption_setup(&mut self) {
        (**self).encryption_setup()
    }

    fn encryption_cleanup(&mut self) {
        (**self).encryption_cleanup()
    }

    fn fixup_full_cmdline(&self, cmdline: &mut CmdlineBuffer) {
        (**self).fixup_full_cmdline(cmdline)
    }
}

/// Module that declares no hooks at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl DeviceHooks for NoHooks {
    fn version(&self) -> HookVersion {
        HookVersion::NONE
    }
}
