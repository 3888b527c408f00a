//! Version ledger file management (code-template.yml)
//!
//! Records which modules are installed and at which definition version.
//! The file is a single YAML mapping with one top-level key per module:
//!
//! ```yaml
//! golangci-lint: 2
//! tdd-guard: 1
//! ```

use serde_yaml_ng::{Mapping, Value};
use std::path::{Path, PathBuf};

use crate::error::{Result, TemplateError};

/// Handle on the ledger file. Every call re-reads the file.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger mapping, empty if the file is missing or blank
    pub fn read(&self) -> Result<Mapping> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Mapping::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Mapping::new());
        }

        match serde_yaml_ng::from_str::<Value>(&content)? {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(Mapping::new()),
            _ => Err(TemplateError::Ledger(format!(
                "{} does not contain a top-level mapping",
                self.path.display()
            ))),
        }
    }

    fn write(&self, mapping: &Mapping) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_yaml_ng::to_string(mapping)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn has_key(&self, key: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(key))
    }

    /// Raw value for a key, `None` when absent
    pub fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read()?.get(key).cloned())
    }

    /// Set a key, keeping every other entry
    pub fn set_key(&self, key: &str, version: u32) -> Result<()> {
        let mut mapping = self.read()?;
        mapping.insert(Value::from(key), Value::from(version));
        self.write(&mapping)
    }

    /// Remove a key. Missing file or key is not an error.
    pub fn remove_key(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut mapping = self.read()?;
        if mapping.remove(key).is_some() {
            self.write(&mapping)?;
        }
        Ok(())
    }

    /// Recorded version for a key, 0 when absent, non-numeric or unreadable
    pub fn installed_version(&self, key: &str) -> u32 {
        match self.get_value(key) {
            Ok(Some(value)) => version_from_value(&value),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(key, error = %e, "Ledger unreadable, treating version as 0");
                0
            }
        }
    }
}

fn version_from_value(value: &Value) -> u32 {
    if let Some(v) = value.as_u64() {
        return u32::try_from(v).unwrap_or(u32::MAX);
    }
    if let Some(v) = value.as_f64() {
        if v.is_finite() && v > 0.0 {
            return v.min(u32::MAX as f64) as u32;
        }
    }
    0
}
