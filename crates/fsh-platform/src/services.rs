//! Launcher trait and desktop implementation.

use std::path::Path;
use std::process::Command;
use std::thread;

use fsh_types::error::{FshError, Result};

// ---------------------------------------------------------------------------
// Launcher
// ---------------------------------------------------------------------------

/// Abstraction over "open this path with whatever the OS uses for it".
pub trait Launcher {
    /// Open `path` in the platform's default handler (file browser for
    /// directories). Returns once the handler has been started.
    fn open(&self, path: &Path) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Desktop implementation
// ---------------------------------------------------------------------------

#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const OPENER: &str = "xdg-open";

/// Default launcher using the platform's opener program.
#[derive(Debug, Clone)]
pub struct DesktopLauncher {
    program: String,
}

impl DesktopLauncher {
    pub fn new() -> Self {
        Self {
            program: OPENER.to_string(),
        }
    }

    /// Use a specific opener program instead of the platform default.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program this launcher spawns.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for DesktopLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for DesktopLauncher {
    fn open(&self, path: &Path) -> Result<()> {
        log::debug!("Launching {} {}", self.program, path.display());
        let mut child = Command::new(&self.program)
            .arg(path)
            .spawn()
            .map_err(|e| FshError::Launch(format!("{}: {e}", self.program)))?;

        // Reap the handler in the background so it never lingers as a zombie.
        let program = self.program.clone();
        thread::Builder::new()
            .name(format!("reap-{program}"))
            .spawn(move || match child.wait() {
                Ok(status) if !status.success() => log::warn!("{program} exited with {status}"),
                Ok(_) => {},
                Err(e) => log::warn!("Failed to wait for {program}: {e}"),
            })
            .map(|_handle| ())
            .map_err(|e| FshError::Launch(format!("{}: {e}", self.program)))
    }
}
