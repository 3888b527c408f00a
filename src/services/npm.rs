use std::process::Command;

use super::{find_on_path, run_command, Package, PackageService};
use crate::error::Result;

/// Manages packages installed globally with `npm install -g`
#[derive(Debug, Clone, Default)]
pub struct NpmService;

impl NpmService {
    pub fn new() -> Self {
        Self
    }
}

impl PackageService for NpmService {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn is_available(&self) -> bool {
        find_on_path("npm").is_some()
    }

    fn is_installed(&self, binary: &str) -> bool {
        find_on_path(binary).is_some()
    }

    fn install(&self, package: &Package) -> Result<()> {
        run_command("npm", Command::new("npm").args(["install", "-g", package.source.as_str()]))
    }

    fn uninstall(&self, binary: &str) -> Result<()> {
        run_command("npm", Command::new("npm").args(["uninstall", "-g", binary]))
    }
}
