//! Kexec-hardboot capability probe

use nix::unistd::{AccessFlags, access};
use std::path::{Path, PathBuf};

use crate::config::KexecConfig;

/// Reports kexec support by checking that one kernel-exported path is readable
#[derive(Debug, Clone)]
pub struct KexecProbe {
    path: PathBuf,
}

impl KexecProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &KexecConfig) -> Self {
        Self::new(config.probe_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_supported(&self) -> bool {
        match access(self.path.as_path(), AccessFlags::R_OK) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    "{} was not found ({}), kexec-hardboot is not supported",
                    self.path.display(),
                    e
                );
                false
            }
        }
    }
}
