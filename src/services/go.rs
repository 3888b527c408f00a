use std::path::{Path, PathBuf};
use std::process::Command;

use super::{find_on_path, run_command, Package, PackageService};
use crate::error::Result;

/// Manages Go tools installed with `go install` into a project-local bin
/// directory
#[derive(Debug, Clone)]
pub struct GoService {
    bin_dir: PathBuf,
}

impl GoService {
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
        }
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    pub fn bin_path(&self, binary: &str) -> PathBuf {
        self.bin_dir.join(binary)
    }

    pub fn is_installed_locally(&self, binary: &str) -> bool {
        self.bin_path(binary).is_file()
    }

    fn cleanup_bin_dir(&self) {
        let empty = std::fs::read_dir(&self.bin_dir)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if empty {
            let _ = std::fs::remove_dir(&self.bin_dir);
        }
    }
}

impl PackageService for GoService {
    fn name(&self) -> &'static str {
        "go"
    }

    fn is_available(&self) -> bool {
        find_on_path("go").is_some()
    }

    /// Local bin directory first, then PATH
    fn is_installed(&self, binary: &str) -> bool {
        self.is_installed_locally(binary) || find_on_path(binary).is_some()
    }

    fn install(&self, package: &Package) -> Result<()> {
        std::fs::create_dir_all(&self.bin_dir)?;
        let gobin = std::path::absolute(&self.bin_dir)?;

        run_command(
            "go",
            Command::new("go")
                .arg("install")
                .arg(&package.source)
                .env("GOBIN", gobin),
        )
    }

    /// Remove the local binary; a missing binary is not an error
    fn uninstall(&self, binary: &str) -> Result<()> {
        let result = match std::fs::remove_file(self.bin_path(binary)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        };
        self.cleanup_bin_dir();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_uninstall_removes_binary_and_empty_dir() {
        let dir = TempDir::new().unwrap();
        let service = GoService::new(dir.path().join(".bin"));
        std::fs::create_dir_all(service.bin_dir()).unwrap();
        std::fs::write(service.bin_path("tool"), b"").unwrap();

        assert!(service.is_installed_locally("tool"));
        service.uninstall("tool").unwrap();
        assert!(!service.is_installed_locally("tool"));
        assert!(!service.bin_dir().exists());
    }

    #[test]
    fn test_uninstall_keeps_non_empty_dir() {
        let dir = TempDir::new().unwrap();
        let service = GoService::new(dir.path().join(".bin"));
        std::fs::create_dir_all(service.bin_dir()).unwrap();
        std::fs::write(service.bin_path("tool"), b"").unwrap();
        std::fs::write(service.bin_path("other"), b"").unwrap();

        service.uninstall("tool").unwrap();
        assert!(service.bin_dir().exists());
    }

    #[test]
    fn test_uninstall_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let service = GoService::new(dir.path().join(".bin"));
        service.uninstall("never-installed").unwrap();
    }
}
