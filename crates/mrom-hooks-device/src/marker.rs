//! Coldboot marker
//!
//! Gatekeeper skips its cold-boot handling when `.coldboot` is present in its
//! data directory. A secondary ROM boots with a fresh gatekeeper state, so the
//! marker has to exist before init starts or the lock screen credentials are
//! rejected.

use mrom_hooks_supervisor::Ownership;
use std::fs::{self, DirBuilder, OpenOptions, Permissions};
use std::io;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt, fchown};
use std::path::{Path, PathBuf};

use crate::config::ColdbootConfig;
use crate::error::MarkerError;

/// Mode of the marker file
pub const MARKER_MODE: u32 = 0o600;
/// Mode of directories created on the way to the marker
pub const MARKER_DIR_MODE: u32 = 0o700;

/// Outcome of [`ColdbootMarker::ensure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// Marker was already there and was left alone
    AlreadyPresent,
    /// Marker was created by this call
    Created,
}

#[derive(Debug, Clone)]
pub struct ColdbootMarker {
    dir: PathBuf,
    path: PathBuf,
    owner: Ownership,
}

impl ColdbootMarker {
    pub fn new(dir: impl Into<PathBuf>, file_name: &str, owner: Ownership) -> Self {
        let dir = dir.into();
        let path = dir.join(file_name);
        Self { dir, path, owner }
    }

    pub fn from_config(config: &ColdbootConfig) -> Self {
        Self::new(config.dir.clone(), &config.file_name, config.owner)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn owner(&self) -> Ownership {
        self.owner
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the marker unless it already exists
    ///
    /// The file is empty, mode 0600 and owned by the configured identity. An
    /// existing marker is never touched, whatever its owner or mode.
    pub fn ensure(&self) -> Result<MarkerState, MarkerError> {
        if self.exists() {
            return Ok(MarkerState::AlreadyPresent);
        }

        DirBuilder::new()
            .recursive(true)
            .mode(MARKER_DIR_MODE)
            .create(&self.dir)
            .map_err(|source| MarkerError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(MARKER_MODE)
            .open(&self.path)
            .map_err(|source| MarkerError::Open {
                path: self.path.clone(),
                source,
            })?;

        let permissions_err = |source: io::Error| MarkerError::Permissions {
            path: self.path.clone(),
            source,
        };
        fchown(&file, Some(self.owner.uid), Some(self.owner.gid)).map_err(permissions_err)?;
        // umask may have masked the creation mode
        fs::set_permissions(&self.path, Permissions::from_mode(MARKER_MODE))
            .map_err(permissions_err)?;

        Ok(MarkerState::Created)
    }
}
