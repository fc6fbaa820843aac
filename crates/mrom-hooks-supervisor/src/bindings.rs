//! Privileged filesystem bindings the daemon needs
//!
//! Before the daemon starts, a device alias symlink is created and a few
//! device nodes get their mode/ownership adjusted. These are process-wide
//! effects. Only the symlinks are undone on release; node grants persist
//! until the nodes are recreated.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::os::unix::fs::{PermissionsExt, chown, symlink};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// uid/gid pair applied to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub uid: u32,
    pub gid: u32,
}

impl Ownership {
    pub const fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }
}

/// Stable alias pointing at a physical device path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymlinkBinding {
    /// Physical path the alias resolves to
    pub target: PathBuf,
    /// Alias created for the daemon and removed on release
    pub alias: PathBuf,
}

/// Mode and/or ownership change on a device node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeGrant {
    pub path: PathBuf,
    #[serde(default)]
    pub mode: Option<u32>,
    #[serde(default)]
    pub owner: Option<Ownership>,
}

/// Which step of applying a binding failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingAction {
    Symlink,
    Chmod,
    Chown,
}

/// One binding step that could not be applied
#[derive(Debug)]
pub struct BindingFailure {
    pub path: PathBuf,
    pub action: BindingAction,
    pub error: io::Error,
}

/// Outcome of [`PrivilegedBindings::apply`]
#[derive(Debug, Default)]
pub struct BindingReport {
    pub links_created: usize,
    pub nodes_updated: usize,
    pub failures: Vec<BindingFailure>,
}

impl BindingReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The full set of bindings for one setup/cleanup cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegedBindings {
    #[serde(default)]
    pub links: Vec<SymlinkBinding>,
    #[serde(default)]
    pub nodes: Vec<NodeGrant>,
}

impl PrivilegedBindings {
    /// Apply every binding, logging and skipping the ones that fail
    pub fn apply(&self) -> BindingReport {
        let mut report = BindingReport::default();

        for link in &self.links {
            match symlink(&link.target, &link.alias) {
                Ok(()) => {
                    debug!(
                        "Linked {} -> {}",
                        link.alias.display(),
                        link.target.display()
                    );
                    report.links_created += 1;
                }
                Err(e) => {
                    warn!(
                        "Failed to link {} -> {}: {}",
                        link.alias.display(),
                        link.target.display(),
                        e
                    );
                    report.failures.push(BindingFailure {
                        path: link.alias.clone(),
                        action: BindingAction::Symlink,
                        error: e,
                    });
                }
            }
        }

        for node in &self.nodes {
            let mut ok = true;
            if let Some(mode) = node.mode {
                if let Err(e) = fs::set_permissions(&node.path, fs::Permissions::from_mode(mode)) {
                    warn!("Failed to chmod {} to {:o}: {}", node.path.display(), mode, e);
                    report.failures.push(BindingFailure {
                        path: node.path.clone(),
                        action: BindingAction::Chmod,
                        error: e,
                    });
                    ok = false;
                }
            }
            if let Some(owner) = node.owner {
                if let Err(e) = chown(&node.path, Some(owner.uid), Some(owner.gid)) {
                    warn!(
                        "Failed to chown {} to {}:{}: {}",
                        node.path.display(),
                        owner.uid,
                        owner.gid,
                        e
                    );
                    report.failures.push(BindingFailure {
                        path: node.path.clone(),
                        action: BindingAction::Chown,
                        error: e,
                    });
                    ok = false;
                }
            }
            if ok {
                report.nodes_updated += 1;
            }
        }

        report
    }

    /// Remove the alias symlinks; returns the aliases actually removed
    pub fn release(&self) -> Vec<PathBuf> {
        let mut removed = Vec::new();
        for link in &self.links {
            match remove_if_symlink(&link.alias) {
                Ok(true) => {
                    debug!("Removed {}", link.alias.display());
                    removed.push(link.alias.clone());
                }
                Ok(false) => {}
                Err(e) => warn!("Failed to remove {}: {}", link.alias.display(), e),
            }
        }
        removed
    }
}

/// Remove `path` only if it currently is a symbolic link
///
/// The type is re-checked right before removal; a regular file or directory
/// that has taken the path's place is left alone.
pub fn remove_if_symlink(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::remove_file(path)?;
            Ok(true)
        }
        Ok(_) => {
            warn!("{} is no longer a symlink; leaving it in place", path.display());
            Ok(false)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
