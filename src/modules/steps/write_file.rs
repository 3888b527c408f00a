use std::path::PathBuf;

use crate::error::Result;
use crate::modules::step::{Applied, Step};

/// Writes a file with fixed contents.
///
/// A file already at the path belongs to the user: it satisfies the step,
/// is never overwritten, and is never deleted on uninstall.
#[derive(Debug, Clone)]
pub struct WriteFile {
    path: PathBuf,
    contents: String,
}

impl WriteFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    fn delete(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

impl Step for WriteFile {
    fn describe(&self) -> String {
        format!("write {}", self.path.display())
    }

    fn is_satisfied(&self) -> bool {
        self.path.is_file()
    }

    fn apply(&self) -> Result<Applied> {
        if self.path.exists() {
            return Ok(Applied::Unchanged);
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &self.contents)?;
        Ok(Applied::Created)
    }

    fn rollback(&self, applied: &Applied) -> Result<()> {
        match applied {
            Applied::Unchanged => Ok(()),
            Applied::Created => self.delete(),
            Applied::Replaced(previous) => Ok(std::fs::write(&self.path, previous)?),
        }
    }

    /// Deletes the file only while it still holds the contents we wrote
    fn remove(&self) -> Result<()> {
        match std::fs::read_to_string(&self.path) {
            Ok(current) if current == self.contents => self.delete(),
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
