//! The capability contract every installable module satisfies

use std::fmt;
use std::sync::Arc;

/// One installable unit of project scaffolding.
///
/// `install` and `uninstall` report only success or failure; the detail of
/// any failure is logged by the implementation and never crosses this
/// boundary. `install` must leave no partial effects behind when it returns
/// `false`. `uninstall` keeps going after a failed sub-step.
pub trait Module: Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// Top-level grouping, informational only
    fn category(&self) -> &str;

    /// Slash-separated placement in the tree, e.g. `linting/go/golangci_lint`
    fn path(&self) -> &str;

    /// Author-assigned definition version, bumped on every release
    fn version(&self) -> u32;

    /// Stable persistence key in the version ledger
    fn ledger_key(&self) -> &str;

    /// Side-effect free check
    fn is_installed(&self) -> bool;

    fn install(&self) -> bool;

    fn uninstall(&self) -> bool;
}

/// Shared handle used by the tree and by background operations
pub type ModuleRef = Arc<dyn Module>;

impl fmt::Debug for dyn Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name())
            .field("path", &self.path())
            .field("version", &self.version())
            .field("ledger_key", &self.ledger_key())
            .finish()
    }
}

/// Update is composed, not a primitive: uninstall then install.
/// Reported as failed if either half fails.
pub fn update_module(module: &dyn Module) -> bool {
    if !module.uninstall() {
        tracing::warn!(module = module.name(), "Update aborted: uninstall failed");
        return false;
    }
    module.install()
}

/// Check that a hierarchical path has no empty segments and no leading or
/// trailing separator
pub fn is_well_formed_path(path: &str) -> bool {
    !path.is_empty() && path.split('/').all(|segment| !segment.is_empty())
}
