use crate::error::{Result, TemplateError};
use crate::modules::step::{Applied, Step};
use crate::services::find_on_path;

/// Precondition: a binary must be on PATH. Changes nothing.
#[derive(Debug, Clone)]
pub struct RequireBinary {
    binary: String,
}

impl RequireBinary {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Step for RequireBinary {
    fn describe(&self) -> String {
        format!("require `{}` on PATH", self.binary)
    }

    fn is_satisfied(&self) -> bool {
        find_on_path(&self.binary).is_some()
    }

    fn apply(&self) -> Result<Applied> {
        if self.is_satisfied() {
            Ok(Applied::Unchanged)
        } else {
            Err(TemplateError::step(self.describe(), "not found"))
        }
    }

    fn rollback(&self, _applied: &Applied) -> Result<()> {
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        Ok(())
    }
}
