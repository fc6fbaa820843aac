//! What to launch: the daemon's spawn request

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

fn default_exec_mode() -> u32 {
    0o755
}

/// Fixed executable and environment of the supervised daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonSpec {
    /// Short name used in logs
    pub name: String,
    /// Absolute path of the daemon binary
    pub executable: PathBuf,
    /// Arguments after argv[0]
    #[serde(default)]
    pub args: Vec<String>,
    /// The complete environment; nothing is inherited from the host
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Permission bits applied to the binary before spawning
    #[serde(default = "default_exec_mode")]
    pub exec_mode: u32,
}

impl DaemonSpec {
    pub fn new(name: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            executable: executable.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            exec_mode: default_exec_mode(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Apply [`DaemonSpec::exec_mode`] to the binary
    pub(crate) fn mark_executable(&self) -> io::Result<()> {
        fs::set_permissions(&self.executable, fs::Permissions::from_mode(self.exec_mode))
    }

    /// Start the daemon as the leader of a new process group
    ///
    /// The child gets null stdio, joins a fresh group whose id is its own pid,
    /// then execs the binary with exactly [`DaemonSpec::env`]. If the exec
    /// fails the child exits without returning here, and the failure comes
    /// back as the `Err` of this call.
    pub(crate) fn spawn_group_leader(&self) -> io::Result<Child> {
        Command::new(&self.executable)
            .args(&self.args)
            .env_clear()
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
    }
}
