use std::path::PathBuf;

use crate::error::Result;
use crate::modules::step::{Applied, Step};

/// Comment line written above every entry this step adds
const MARKER: &str = "# added by code-template";

/// Keeps one line present in a `.gitignore`.
///
/// Added entries are preceded by [`MARKER`]; `remove` only strips marked
/// entries, so a line the user wrote survives uninstall.
#[derive(Debug, Clone)]
pub struct GitignoreEntry {
    path: PathBuf,
    entry: String,
}

impl GitignoreEntry {
    pub fn new(path: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            entry: entry.into(),
        }
    }

    /// `.bin/` and `.bin` are the same entry
    fn matches(&self, line: &str) -> bool {
        let line = line.trim();
        line == self.entry || line == self.entry.trim_end_matches('/')
    }

    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Step for GitignoreEntry {
    fn describe(&self) -> String {
        format!("add `{}` to {}", self.entry, self.path.display())
    }

    fn is_satisfied(&self) -> bool {
        matches!(self.read(), Ok(Some(content)) if content.lines().any(|l| self.matches(l)))
    }

    fn apply(&self) -> Result<Applied> {
        let previous = self.read()?;
        let content = previous.clone().unwrap_or_default();
        if content.lines().any(|l| self.matches(l)) {
            return Ok(Applied::Unchanged);
        }

        let mut updated = content;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(MARKER);
        updated.push('\n');
        updated.push_str(&self.entry);
        updated.push('\n');
        std::fs::write(&self.path, updated)?;

        Ok(match previous {
            Some(previous) => Applied::Replaced(previous),
            None => Applied::Created,
        })
    }

    fn rollback(&self, applied: &Applied) -> Result<()> {
        match applied {
            Applied::Unchanged => Ok(()),
            Applied::Created => match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            },
            Applied::Replaced(previous) => Ok(std::fs::write(&self.path, previous)?),
        }
    }

    fn remove(&self) -> Result<()> {
        let Some(content) = self.read()? else {
            return Ok(());
        };

        let mut lines: Vec<&str> = Vec::new();
        let mut removed = false;
        let mut iter = content.lines().peekable();
        while let Some(line) = iter.next() {
            if line.trim() == MARKER && iter.peek().is_some_and(|next| self.matches(next)) {
                iter.next();
                removed = true;
                continue;
            }
            lines.push(line);
        }
        if !removed {
            return Ok(());
        }

        let mut updated = lines.join("\n");
        if !lines.is_empty() {
            updated.push('\n');
        }
        std::fs::write(&self.path, updated)?;
        Ok(())
    }
}
