use crate::ledger::Ledger;
use crate::module::Module;

use super::InstallState;

/// Recorded ledger version for a module, 0 when absent or unreadable
pub fn installed_version(module: &dyn Module, ledger: &Ledger) -> u32 {
    ledger.installed_version(module.ledger_key())
}

/// Combine the module's installed check with its ledger version.
///
/// Performs I/O but mutates nothing, so it is safe to call from the UI
/// loop while a background operation runs.
pub fn resolve(module: &dyn Module, ledger: &Ledger) -> InstallState {
    if !module.is_installed() {
        return InstallState::NotInstalled;
    }
    if installed_version(module, ledger) < module.version() {
        InstallState::Outdated
    } else {
        InstallState::UpToDate
    }
}

/// Ledger-bound resolver, cheap to clone into the render path
#[derive(Debug, Clone)]
pub struct Resolver {
    ledger: Ledger,
}

impl Resolver {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn resolve(&self, module: &dyn Module) -> InstallState {
        resolve(module, &self.ledger)
    }

    pub fn installed_version(&self, module: &dyn Module) -> u32 {
        installed_version(module, &self.ledger)
    }
}
