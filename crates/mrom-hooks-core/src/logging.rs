//! Logging bootstrap for hosts embedding the hook layer
//!
//! The hook crates only emit `tracing` events. A host that has no subscriber
//! of its own calls [`init`] once early in boot.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter (trace, debug, info, warn, error or a full directive)
    pub level: String,
    /// Emit ANSI colour codes
    pub ansi: bool,
    /// Include the event target in each line
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            // Recovery consoles and kmsg do not render escapes
            ansi: false,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Filter to install: `RUST_LOG` when set, the configured level otherwise
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Install a global fmt subscriber
///
/// Returns `false` when a subscriber was already installed; the existing one
/// is kept.
pub fn init(config: &LoggingConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .try_init()
        .is_ok()
}
