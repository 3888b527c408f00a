//! Runtime settings shared by the catalog, services and orchestrator

use std::path::{Path, PathBuf};

/// Default ledger file name, relative to the project root
pub const LEDGER_FILE: &str = "code-template.yml";

/// Default directory for locally installed binaries
pub const BIN_DIR: &str = ".bin";

/// Resolved settings for one process run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory every module operates in
    pub root: PathBuf,
    /// Version ledger location
    pub ledger_path: PathBuf,
    /// Where `go install` drops binaries
    pub bin_dir: PathBuf,
}

impl Settings {
    /// Settings rooted at `root` with default ledger and bin locations
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            ledger_path: root.join(LEDGER_FILE),
            bin_dir: root.join(BIN_DIR),
            root,
        }
    }

    /// Resolve settings from optional CLI overrides.
    ///
    /// A relative ledger path is taken relative to the root, not the
    /// process working directory.
    pub fn resolve(root: Option<PathBuf>, ledger: Option<PathBuf>) -> std::io::Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let mut settings = Self::for_root(root);
        if let Some(ledger) = ledger {
            settings.ledger_path = settings.resolve_path(&ledger);
        }
        Ok(settings)
    }

    /// Join a project-relative path onto the root
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
