//! The device module handed to the boot manager

use mrom_hooks_core::{DeviceHooks, HookStatus, HookVersion, MountContext};
use mrom_hooks_supervisor::{CleanupReport, DaemonSupervisor};
use tracing::{debug, error, info, warn};

use crate::config::DeviceProfile;
use crate::kexec::KexecProbe;
use crate::marker::{ColdbootMarker, MarkerState};

/// Hook implementation for devices described by a [`DeviceProfile`]
///
/// Holds the supervisor for the decryption daemon, so the module must be
/// kept alive between `encryption_setup` and `encryption_cleanup`.
#[derive(Debug)]
pub struct DeviceModule {
    profile: DeviceProfile,
    marker: ColdbootMarker,
    kexec: KexecProbe,
    supervisor: Option<DaemonSupervisor>,
}

impl DeviceModule {
    pub fn new(profile: DeviceProfile) -> Self {
        let marker = ColdbootMarker::from_config(&profile.coldboot);
        let kexec = KexecProbe::from_config(&profile.kexec);
        let supervisor = profile.encryption.enabled.then(|| {
            DaemonSupervisor::new(
                profile.encryption.daemon.clone(),
                profile.encryption.bindings(),
            )
        });

        Self {
            profile,
            marker,
            kexec,
            supervisor,
        }
    }

    /// Nexus 5X
    pub fn bullhead() -> Self {
        Self::new(DeviceProfile::default())
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn marker(&self) -> &ColdbootMarker {
        &self.marker
    }

    pub fn kexec_probe(&self) -> &KexecProbe {
        &self.kexec
    }

    /// `None` when encryption support is disabled in the profile
    pub fn supervisor(&self) -> Option<&DaemonSupervisor> {
        self.supervisor.as_ref()
    }

    /// Tear down the decryption daemon and report what was done
    ///
    /// Same as the `encryption_cleanup` hook, for callers that want the report.
    pub fn cleanup_encryption(&mut self) -> Option<CleanupReport> {
        match self.supervisor.as_mut() {
            Some(supervisor) => Some(supervisor.cleanup()),
            None => {
                debug!("Encryption support disabled, nothing to clean up");
                None
            }
        }
    }
}

impl DeviceHooks for DeviceModule {
    fn version(&self) -> HookVersion {
        self.profile.hook_version
    }

    fn post_mount_fixup(&self, ctx: &MountContext) -> HookStatus {
        match self.marker.ensure() {
            Ok(MarkerState::Created) => info!("Created {}", self.marker.path().display()),
            Ok(MarkerState::AlreadyPresent) => {
                debug!("{} already present", self.marker.path().display())
            }
            Err(e) => error!("{}", e),
        }

        if !ctx.rom_kind.is_default() {
            debug!(
                "Post-mount fixup for {} ROM mounted under {}",
                ctx.rom_kind,
                ctx.base_path.display()
            );
        }
        HookStatus::PROCEED
    }

    fn allow_incomplete_fstab(&self) -> bool {
        self.profile.allow_incomplete_fstab
    }

    fn has_kexec_support(&self) -> bool {
        self.kexec.is_supported()
    }

    fn encryption_setup(&mut self) {
        let Some(supervisor) = self.supervisor.as_mut() else {
            debug!("Encryption support disabled, nothing to set up");
            return;
        };

        if let Err(e) = supervisor.setup() {
            warn!("Encryption setup incomplete: {}", e);
        }
    }

    fn encryption_cleanup(&mut self) {
        self.cleanup_encryption();
    }
}
