//! Test: boot-manager view of the post-mount and capability hooks
//!
//! Drives a device module through `HookDispatcher` exactly as the host does,
//! with every device path redirected into a temp dir.

use mrom_hooks::device::marker::MARKER_MODE;
use mrom_hooks::supervisor::Ownership;
use mrom_hooks::{
    DeviceHooks, DeviceModule, DeviceProfile, HookDispatcher, HookStatus, HookVersion, MountContext,
    RomKind,
};
use nix::unistd::{getgid, getuid};
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tempfile::TempDir;

fn current_owner() -> Ownership {
    Ownership::new(getuid().as_raw(), getgid().as_raw())
}

fn profile_in(root: &Path) -> DeviceProfile {
    let toml = format!(
        r#"
        [coldboot]
        dir = "{root}/data/misc/gatekeeper"
        owner = {{ uid = {uid}, gid = {gid} }}

        [kexec]
        probe_path = "{root}/sys/firmware/fdt"

        [encryption]
        enabled = false
        "#,
        root = root.display(),
        uid = current_owner().uid,
        gid = current_owner().gid,
    );
    DeviceProfile::from_toml_str(&toml).unwrap()
}

#[test]
fn test_post_mount_creates_coldboot_marker() {
    let temp_dir = TempDir::new().unwrap();
    let profile = profile_in(temp_dir.path());
    let marker = profile.coldboot.marker_path();
    assert!(!marker.exists());

    let dispatcher = HookDispatcher::new(DeviceModule::new(profile));
    let ctx = MountContext::new("/sbin/busybox", "/realdata", RomKind::Default);

    let status = dispatcher.post_mount_fixup(&ctx);
    assert_eq!(status, HookStatus::PROCEED);
    assert_eq!(i32::from(status), 0);

    let meta = fs::metadata(&marker).unwrap();
    assert!(meta.is_file());
    assert_eq!(meta.mode() & 0o777, MARKER_MODE);
    assert_eq!(meta.uid(), current_owner().uid);
    assert_eq!(meta.gid(), current_owner().gid);
}

#[test]
fn test_repeated_boots_keep_single_marker() {
    let temp_dir = TempDir::new().unwrap();
    let profile = profile_in(temp_dir.path());
    let gatekeeper_dir = profile.coldboot.dir.clone();
    let dispatcher = HookDispatcher::new(DeviceModule::new(profile));

    for kind in [RomKind::Default, RomKind::AndroidInternal, RomKind::AndroidUsbImage] {
        let ctx = MountContext::new("/sbin/busybox", "/realdata", kind);
        assert!(dispatcher.post_mount_fixup(&ctx).is_proceed());
    }

    let names: Vec<_> = fs::read_dir(&gatekeeper_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![".coldboot"]);
}

#[test]
fn test_hooks_above_declared_version_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let mut profile = profile_in(temp_dir.path());
    profile.hook_version = HookVersion::V4;
    profile.allow_incomplete_fstab = true;
    let probe = profile.kexec.probe_path.clone();
    fs::create_dir_all(probe.parent().unwrap()).unwrap();
    fs::write(&probe, "").unwrap();

    let dispatcher = HookDispatcher::new(DeviceModule::new(profile));

    // Tier 4 is reachable
    assert!(dispatcher.allow_incomplete_fstab());
    // Tier 5 is not, even though the probe path is readable
    assert!(!dispatcher.has_kexec_support());
    assert!(dispatcher.hooks().has_kexec_support());
}

#[test]
fn test_kexec_support_reflects_probe() {
    let temp_dir = TempDir::new().unwrap();
    let profile = profile_in(temp_dir.path());
    let probe = profile.kexec.probe_path.clone();
    let dispatcher = HookDispatcher::new(DeviceModule::new(profile));

    assert!(!dispatcher.has_kexec_support());

    fs::create_dir_all(probe.parent().unwrap()).unwrap();
    fs::write(&probe, "").unwrap();
    assert!(dispatcher.has_kexec_support());
}

#[test]
fn test_profile_loaded_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bullhead.toml");
    fs::write(&path, "allow_incomplete_fstab = true\n").unwrap();

    let profile = DeviceProfile::load(&path).unwrap();
    let dispatcher = HookDispatcher::new(DeviceModule::new(profile));
    assert_eq!(dispatcher.version(), HookVersion::V6);
    assert!(dispatcher.allow_incomplete_fstab());
}
