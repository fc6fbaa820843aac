//! Arguments and results passed across the hook boundary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of ROM the host is booting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RomKind {
    /// The primary ROM on internal storage
    #[default]
    Default,
    /// Secondary Android ROM on internal storage
    AndroidInternal,
    /// Android ROM in image files on USB storage
    AndroidUsbImage,
    /// Android ROM in a directory on USB storage
    AndroidUsbDir,
    /// Linux distribution on internal storage
    LinuxInternal,
    /// Linux distribution on USB storage
    LinuxUsb,
    /// Unsupported ROM on internal storage
    UnsupportedInternal,
    /// Unsupported ROM on USB storage
    UnsupportedUsb,
    /// Anything the host could not classify
    Unknown,
}

impl RomKind {
    /// Map the host's raw ROM type code
    pub fn from_raw(code: i32) -> Self {
        match code {
            0 => RomKind::Default,
            1 => RomKind::AndroidInternal,
            2 => RomKind::AndroidUsbImage,
            3 => RomKind::AndroidUsbDir,
            4 => RomKind::LinuxInternal,
            5 => RomKind::LinuxUsb,
            6 => RomKind::UnsupportedInternal,
            7 => RomKind::UnsupportedUsb,
            _ => RomKind::Unknown,
        }
    }

    /// Whether this is the primary ROM
    pub fn is_default(&self) -> bool {
        matches!(self, RomKind::Default)
    }

    /// Whether the ROM lives on removable storage
    pub fn is_usb(&self) -> bool {
        matches!(
            self,
            RomKind::AndroidUsbImage
                | RomKind::AndroidUsbDir
                | RomKind::LinuxUsb
                | RomKind::UnsupportedUsb
        )
    }
}

impl fmt::Display for RomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RomKind::Default => "default",
            RomKind::AndroidInternal => "android_internal",
            RomKind::AndroidUsbImage => "android_usb_image",
            RomKind::AndroidUsbDir => "android_usb_dir",
            RomKind::LinuxInternal => "linux_internal",
            RomKind::LinuxUsb => "linux_usb",
            RomKind::UnsupportedInternal => "unsupported_internal",
            RomKind::UnsupportedUsb => "unsupported_usb",
            RomKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// State handed to the post-mount hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountContext {
    /// Path of the host's helper toolbox binary
    pub helper_tool: PathBuf,
    /// Root under which the ROM partitions are mounted
    pub base_path: PathBuf,
    /// Kind of ROM being booted
    pub rom_kind: RomKind,
}

impl MountContext {
    pub fn new(
        helper_tool: impl Into<PathBuf>,
        base_path: impl Into<PathBuf>,
        rom_kind: RomKind,
    ) -> Self {
        Self {
            helper_tool: helper_tool.into(),
            base_path: base_path.into(),
            rom_kind,
        }
    }
}

/// Status code returned by status-bearing hooks
///
/// Zero means the host proceeds normally; anything else selects a
/// caller-defined alternate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HookStatus(i32);

impl HookStatus {
    pub const PROCEED: HookStatus = HookStatus(0);

    pub const fn new(code: i32) -> Self {
        HookStatus(code)
    }

    pub const fn code(self) -> i32 {
        self.0
    }

    pub const fn is_proceed(self) -> bool {
        self.0 == 0
    }
}

impl From<HookStatus> for i32 {
    fn from(status: HookStatus) -> Self {
        status.0
    }
}

impl fmt::Display for HookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
