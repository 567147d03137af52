//! PID file guarding against two forwarders running at once

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

const PID_FILE_NAME: &str = "notify-forwarder.pid";

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another forwarder is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}

/// Default location: the user runtime dir, else the temp dir
pub fn default_pid_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(PID_FILE_NAME)
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    // Signal 0 probes for existence without delivering anything.
    match kill(Pid::from_raw(raw), None::<Signal>) {
        Ok(()) => true,
        Err(nix::errno::Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// PID file owned for the lifetime of the forwarding loop
pub struct PidFile {
    path: PathBuf,
    held: bool,
}

impl PidFile {
    pub fn new() -> Self {
        Self::with_path(default_pid_path())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            held: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// PID of a live forwarder recorded in the file, if any.
    /// A stale file left by a dead process is removed.
    pub fn running_pid(&self) -> Option<u32> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let pid: u32 = contents.trim().parse().ok()?;

        if pid == process::id() {
            return None;
        }

        if process_alive(pid) {
            Some(pid)
        } else {
            let _ = fs::remove_file(&self.path);
            None
        }
    }

    /// Write our PID, failing if another forwarder holds the file
    pub fn acquire(&mut self) -> Result<(), PidFileError> {
        if let Some(pid) = self.running_pid() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PidFileError::WriteFailed(e.to_string()))?;
        }

        let mut file = File::create(&self.path).map_err(|e| {
            PidFileError::WriteFailed(format!("Failed to create PID file: {}", e))
        })?;
        write!(file, "{}", process::id())
            .map_err(|e| PidFileError::WriteFailed(format!("Failed to write PID: {}", e)))?;

        self.held = true;
        Ok(())
    }

    pub fn release(&mut self) -> Result<(), PidFileError> {
        if self.held && self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                PidFileError::RemoveFailed(format!("Failed to remove PID file: {}", e))
            })?;
        }
        self.held = false;
        Ok(())
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = self.release();
    }
}
