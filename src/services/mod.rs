//! Package managers that modules shell out to

mod go;
mod npm;

pub use go::GoService;
pub use npm::NpmService;

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Result, TemplateError};

/// A dependency a module can install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Binary the package provides, e.g. `golangci-lint`
    pub binary: String,
    /// What to hand the package manager, e.g. a `go install` path or npm name
    pub source: String,
}

impl Package {
    pub fn new(binary: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            source: source.into(),
        }
    }
}

/// Common surface of the package managers
pub trait PackageService: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the package manager itself is on PATH
    fn is_available(&self) -> bool;

    fn is_installed(&self, binary: &str) -> bool;

    fn install(&self, package: &Package) -> Result<()>;

    fn uninstall(&self, binary: &str) -> Result<()>;
}

/// Find the full path of a binary on PATH (cross-platform)
pub fn find_on_path(binary: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    let exts = if cfg!(windows) {
        vec![".exe", ".cmd", ".bat", ""]
    } else {
        vec![""]
    };

    for dir in std::env::split_paths(&path_var) {
        for ext in &exts {
            let candidate = dir.join(format!("{binary}{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Run a command to completion, turning a non-zero exit into an error
/// carrying the tail of stderr
pub(crate) fn run_command(service: &'static str, command: &mut Command) -> Result<()> {
    tracing::debug!(service, command = ?command, "Running package manager");

    let output = command.output().map_err(|e| TemplateError::Service {
        service,
        reason: format!("failed to spawn: {e}"),
    })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
    Err(TemplateError::Service {
        service,
        reason: format!(
            "exited with {}: {}",
            output.status,
            tail.into_iter().rev().collect::<Vec<_>>().join(" | ")
        ),
    })
}
