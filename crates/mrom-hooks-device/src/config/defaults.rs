//! Built-in bullhead values

use mrom_hooks_supervisor::{DaemonSpec, NodeGrant, Ownership, SymlinkBinding};
use std::path::PathBuf;

use crate::ids::{AID_DRMRPC, AID_SYSTEM};

pub(super) const GATEKEEPER_DATA_DIR: &str = "/data/misc/gatekeeper";
pub(super) const COLDBOOT_FILE_NAME: &str = ".coldboot";
pub(super) const FDT_PROBE_PATH: &str = "/sys/firmware/fdt";

const ENC_DIR: &str = "/mrom_enc";

pub(super) fn qseecomd() -> DaemonSpec {
    DaemonSpec::new("qseecomd", format!("{}/qseecomd", ENC_DIR)).env("LD_LIBRARY_PATH", ENC_DIR)
}

pub(super) fn bootdevice_links() -> Vec<SymlinkBinding> {
    vec![SymlinkBinding {
        target: PathBuf::from("/dev/block/platform/soc.0/f9824900.sdhci"),
        alias: PathBuf::from("/dev/block/bootdevice"),
    }]
}

pub(super) fn qseecom_nodes() -> Vec<NodeGrant> {
    vec![
        NodeGrant {
            path: PathBuf::from("/dev/qseecom"),
            mode: Some(0o660),
            owner: Some(Ownership::new(AID_SYSTEM, AID_DRMRPC)),
        },
        NodeGrant {
            path: PathBuf::from("/dev/ion"),
            mode: None,
            owner: Some(Ownership::new(AID_SYSTEM, AID_SYSTEM)),
        },
    ]
}
