//! Device profile configuration
//!
//! A [`DeviceProfile`] describes everything the device module needs to know
//! about the hardware: which hook tier it declares, where the coldboot marker
//! lives, what to probe for kexec support and how to bring up the decryption
//! daemon. The default is the bullhead profile; integrators may override any
//! part of it from a TOML file.

mod defaults;

use mrom_hooks_core::{HookVersion, LoggingConfig};
use mrom_hooks_supervisor::{DaemonSpec, NodeGrant, Ownership, PrivilegedBindings, SymlinkBinding};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::ids::AID_SYSTEM;

/// Full hardware description consumed by [`crate::DeviceModule`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Hook tier the module declares
    pub hook_version: HookVersion,
    /// Answer of the incomplete-fstab hook
    pub allow_incomplete_fstab: bool,
    pub coldboot: ColdbootConfig,
    pub kexec: KexecConfig,
    pub encryption: EncryptionConfig,
    pub logging: LoggingConfig,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            hook_version: HookVersion::V6,
            allow_incomplete_fstab: false,
            coldboot: ColdbootConfig::default(),
            kexec: KexecConfig::default(),
            encryption: EncryptionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Location and ownership of the coldboot marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColdbootConfig {
    /// Directory holding the marker, created on demand
    pub dir: PathBuf,
    pub file_name: String,
    pub owner: Ownership,
}

impl Default for ColdbootConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(defaults::GATEKEEPER_DATA_DIR),
            file_name: defaults::COLDBOOT_FILE_NAME.to_string(),
            owner: Ownership::new(AID_SYSTEM, AID_SYSTEM),
        }
    }
}

impl ColdbootConfig {
    /// Full path of the marker file
    pub fn marker_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Kexec capability probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KexecConfig {
    /// Path that must be readable for kexec-hardboot to be usable
    pub probe_path: PathBuf,
}

impl Default for KexecConfig {
    fn default() -> Self {
        Self {
            probe_path: PathBuf::from(defaults::FDT_PROBE_PATH),
        }
    }
}

/// Decryption daemon and the resources it needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncryptionConfig {
    /// When false the encryption hooks do nothing
    pub enabled: bool,
    pub daemon: DaemonSpec,
    pub links: Vec<SymlinkBinding>,
    pub nodes: Vec<NodeGrant>,
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            daemon: defaults::qseecomd(),
            links: defaults::bootdevice_links(),
            nodes: defaults::qseecom_nodes(),
        }
    }
}

impl EncryptionConfig {
    /// Bindings to apply before the daemon starts
    pub fn bindings(&self) -> PrivilegedBindings {
        PrivilegedBindings {
            links: self.links.clone(),
            nodes: self.nodes.clone(),
        }
    }
}

impl DeviceProfile {
    /// Parse and validate a profile from TOML text
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let profile: DeviceProfile = toml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a TOML file
    ///
    /// Returns the default profile if the file doesn't exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            tracing::debug!("No device profile at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check the profile for values the module cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.hook_version == HookVersion::NONE || !self.hook_version.is_known() {
            return Err(ConfigError::Invalid(format!(
                "hook_version must be between 1 and {}, got {}",
                HookVersion::LATEST.tier(),
                self.hook_version.tier()
            )));
        }

        require_absolute("coldboot.dir", &self.coldboot.dir)?;
        let name = &self.coldboot.file_name;
        if name.is_empty() || name.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "coldboot.file_name must be a plain file name, got {:?}",
                name
            )));
        }

        require_absolute("kexec.probe_path", &self.kexec.probe_path)?;

        let enc = &self.encryption;
        if enc.daemon.executable.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "encryption.daemon.executable must not be empty".to_string(),
            ));
        }
        require_absolute("encryption.daemon.executable", &enc.daemon.executable)?;
        for link in &enc.links {
            require_absolute("encryption.links.alias", &link.alias)?;
        }
        for node in &enc.nodes {
            require_absolute("encryption.nodes.path", &node.path)?;
        }

        Ok(())
    }
}

fn require_absolute(field: &str, path: &Path) -> ConfigResult<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must be an absolute path, got {}",
            field,
            path.display()
        )))
    }
}
