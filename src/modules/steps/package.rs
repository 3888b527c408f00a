use std::sync::Arc;

use crate::error::{Result, TemplateError};
use crate::modules::step::{Applied, Step};
use crate::services::{Package, PackageService};

/// Installs a tool through a package manager when it is not already present
#[derive(Clone)]
pub struct PackageStep {
    service: Arc<dyn PackageService>,
    package: Package,
    /// Global tools may serve other projects; never removed when set
    keep_installed: bool,
}

impl PackageStep {
    pub fn new(service: Arc<dyn PackageService>, package: Package) -> Self {
        Self {
            service,
            package,
            keep_installed: false,
        }
    }

    pub fn keep_installed(mut self) -> Self {
        self.keep_installed = true;
        self
    }
}

impl Step for PackageStep {
    fn describe(&self) -> String {
        format!("{} install {}", self.service.name(), self.package.source)
    }

    fn is_satisfied(&self) -> bool {
        self.service.is_installed(&self.package.binary)
    }

    fn apply(&self) -> Result<Applied> {
        if !self.service.is_available() {
            return Err(TemplateError::step(
                self.describe(),
                format!("`{}` is not available", self.service.name()),
            ));
        }
        if self.service.is_installed(&self.package.binary) {
            return Ok(Applied::Unchanged);
        }
        self.service.install(&self.package)?;
        Ok(Applied::Created)
    }

    fn rollback(&self, applied: &Applied) -> Result<()> {
        if applied.changed() {
            self.remove()?;
        }
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if self.keep_installed {
            return Ok(());
        }
        self.service.uninstall(&self.package.binary)
    }
}
