use super::device::MockDeviceHooks;
use super::*;
use crate::cmdline::CmdlineBuffer;
use crate::version::HookVersion;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};

fn mock_at(version: HookVersion) -> MockDeviceHooks {
    let mut mock = MockDeviceHooks::new();
    mock.expect_version().return_const(version);
    mock
}

fn mount_ctx() -> MountContext {
    MountContext::new("/mrom/busybox", "/realdata", RomKind::Default)
}

/// Call every hook once through the dispatcher
fn dispatch_all<H: DeviceHooks>(dispatcher: &mut HookDispatcher<H>) {
    let mut cmdline = CmdlineBuffer::new(64);
    dispatcher.post_mount_fixup(&mount_ctx());
    dispatcher.before_display_teardown();
    dispatcher.before_device_init();
    dispatcher.allow_incomplete_fstab();
    dispatcher.fixup_boot_image_cmdline(&mut cmdline);
    dispatcher.has_kexec_support();
    dispatcher.encryption_setup();
    dispatcher.encryption_cleanup();
    dispatcher.fixup_full_cmdline(&mut cmdline);
}

/// Module implementing every hook that records which ones ran
struct RecordingHooks {
    version: HookVersion,
    calls: RefCell<Vec<Hook>>,
}

impl RecordingHooks {
    fn new(version: HookVersion) -> Self {
        Self {
            version,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, hook: Hook) {
        self.calls.borrow_mut().push(hook);
    }
}

impl DeviceHooks for RecordingHooks {
    fn version(&self) -> HookVersion {
        self.version
    }

    fn post_mount_fixup(&self, _ctx: &MountContext) -> HookStatus {
        self.record(Hook::PostMountFixup);
        HookStatus::new(3)
    }

    fn before_display_teardown(&self) {
        self.record(Hook::BeforeDisplayTeardown);
    }

    fn before_device_init(&self) {
        self.record(Hook::BeforeDeviceInit);
    }

    fn allow_incomplete_fstab(&self) -> bool {
        self.record(Hook::AllowIncompleteFstab);
        true
    }

    fn fixup_boot_image_cmdline(&self, _cmdline: &mut CmdlineBuffer) {
        self.record(Hook::FixupBootImageCmdline);
    }

    fn has_kexec_support(&self) -> bool {
        self.record(Hook::HasKexecSupport);
        true
    }

    fn encryption_setup(&mut self) {
        self.record(Hook::EncryptionSetup);
    }

    fn encryption_cleanup(&mut self) {
        self.record(Hook::EncryptionCleanup);
    }

    fn fixup_full_cmdline(&self, _cmdline: &mut CmdlineBuffer) {
        self.record(Hook::FixupFullCmdline);
    }
}

#[test]
fn test_never_calls_hooks_above_declared_version() {
    for tier in 0..=HookVersion::LATEST.tier() + 1 {
        let version = HookVersion::new(tier);
        let mut dispatcher = HookDispatcher::new(RecordingHooks::new(version));
        dispatch_all(&mut dispatcher);

        let calls = dispatcher.hooks().calls.borrow().clone();
        for hook in &calls {
            assert!(
                version.provides(hook.required_version()),
                "{} called on a {} module",
                hook,
                version
            );
        }
        let expected: Vec<Hook> = Hook::available_at(version).collect();
        let mut sorted_calls = calls.clone();
        sorted_calls.sort_by_key(|h| Hook::all().iter().position(|x| x == h));
        assert_eq!(sorted_calls, expected, "at {}", version);
    }
}

#[test]
fn test_gated_hooks_return_defaults() {
    let mut dispatcher = HookDispatcher::new(RecordingHooks::new(HookVersion::NONE));
    assert_eq!(dispatcher.post_mount_fixup(&mount_ctx()), HookStatus::PROCEED);
    assert!(!dispatcher.allow_incomplete_fstab());
    assert!(!dispatcher.has_kexec_support());

    let mut cmdline = CmdlineBuffer::with_contents("quiet", 16).unwrap();
    dispatcher.fixup_full_cmdline(&mut cmdline);
    assert_eq!(cmdline.as_str(), "quiet");

    dispatcher.encryption_setup();
    assert!(dispatcher.hooks().calls.borrow().is_empty());
}

#[test]
fn test_results_pass_through_when_available() {
    let dispatcher = HookDispatcher::new(RecordingHooks::new(HookVersion::V5));
    assert_eq!(dispatcher.post_mount_fixup(&mount_ctx()), HookStatus::new(3));
    assert!(dispatcher.allow_incomplete_fstab());
    assert!(dispatcher.has_kexec_support());
}

#[test]
fn test_v4_module_is_not_asked_for_kexec() {
    let mut mock = mock_at(HookVersion::V4);
    mock.expect_allow_incomplete_fstab().times(1).return_const(true);
    mock.expect_has_kexec_support().times(0);
    mock.expect_fixup_boot_image_cmdline().times(0);

    let dispatcher = HookDispatcher::new(mock);
    assert!(dispatcher.allow_incomplete_fstab());
    assert!(!dispatcher.has_kexec_support());
    let mut cmdline = CmdlineBuffer::new(8);
    dispatcher.fixup_boot_image_cmdline(&mut cmdline);
}

#[test]
fn test_v5_module_is_not_asked_for_encryption() {
    let mut mock = mock_at(HookVersion::V5);
    mock.expect_encryption_setup().times(0);
    mock.expect_encryption_cleanup().times(0);
    mock.expect_fixup_full_cmdline().times(0);

    let mut dispatcher = HookDispatcher::new(mock);
    let ran = dispatcher.with_encryption(|_| true);
    assert!(ran);
    let mut cmdline = CmdlineBuffer::new(8);
    dispatcher.fixup_full_cmdline(&mut cmdline);
}

#[test]
fn test_cmdline_edits_reach_the_host_buffer() {
    let mut mock = mock_at(HookVersion::V6);
    mock.expect_fixup_full_cmdline()
        .times(1)
        .returning(|cmdline: &mut CmdlineBuffer| {
            let _ = cmdline.set_arg("androidboot.selinux", "permissive");
        });

    let dispatcher = HookDispatcher::new(mock);
    let mut cmdline = CmdlineBuffer::with_contents("quiet", 64).unwrap();
    dispatcher.fixup_full_cmdline(&mut cmdline);
    assert_eq!(cmdline.as_str(), "quiet androidboot.selinux=permissive");
}

#[test]
fn test_with_encryption_brackets_stage() {
    let mut dispatcher = HookDispatcher::new(RecordingHooks::new(HookVersion::V6));
    let value = dispatcher.with_encryption(|d| {
        d.hooks().record(Hook::BeforeDeviceInit);
        7
    });
    assert_eq!(value, 7);
    assert_eq!(
        *dispatcher.hooks().calls.borrow(),
        vec![
            Hook::EncryptionSetup,
            Hook::BeforeDeviceInit,
            Hook::EncryptionCleanup
        ]
    );
}

#[test]
fn test_with_encryption_cleans_up_on_panic() {
    let mut dispatcher = HookDispatcher::new(RecordingHooks::new(HookVersion::V6));
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        dispatcher.with_encryption(|_| -> u32 { panic!("decryption stage failed") });
    }));
    assert!(result.is_err());
    assert_eq!(
        *dispatcher.hooks().calls.borrow(),
        vec![Hook::EncryptionSetup, Hook::EncryptionCleanup]
    );
}

#[test]
fn test_available_hooks() {
    let dispatcher = HookDispatcher::new(mock_at(HookVersion::V2));
    assert_eq!(
        dispatcher.available_hooks(),
        vec![Hook::PostMountFixup, Hook::BeforeDisplayTeardown]
    );
    assert!(dispatcher.is_available(Hook::BeforeDisplayTeardown));
    assert!(!dispatcher.is_available(Hook::BeforeDeviceInit));
    assert_eq!(dispatcher.version(), HookVersion::V2);
}

#[test]
fn test_boxed_modules_dispatch() {
    let boxed: Box<dyn DeviceHooks> = Box::new(RecordingHooks::new(HookVersion::V1));
    let dispatcher = HookDispatcher::new(boxed);
    assert_eq!(dispatcher.version(), HookVersion::V1);
    assert_eq!(dispatcher.post_mount_fixup(&mount_ctx()), HookStatus::new(3));
}

#[test]
fn test_declared_version_is_captured_at_construction() {
    let mut dispatcher = HookDispatcher::new(RecordingHooks::new(HookVersion::V1));
    dispatcher.hooks_mut().version = HookVersion::V6;

    // The module now claims tier 6, but the dispatcher keeps the tier it registered
    assert_eq!(dispatcher.version(), HookVersion::V1);
    assert!(!dispatcher.has_kexec_support());
    dispatcher.post_mount_fixup(&mount_ctx());

    let module = dispatcher.into_inner();
    assert_eq!(module.version(), HookVersion::V6);
    assert_eq!(module.calls.into_inner(), vec![Hook::PostMountFixup]);
}

#[test]
fn test_no_hooks_module() {
    let mut dispatcher = HookDispatcher::new(NoHooks);
    dispatch_all(&mut dispatcher);
    assert!(dispatcher.available_hooks().is_empty());
}
