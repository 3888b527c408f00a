pub mod list;
pub mod module;
pub mod version;

use crate::config::Settings;
use crate::error::{Result, TemplateError};
use crate::ledger::Ledger;
use crate::module::ModuleRef;
use crate::orchestrator::Orchestrator;
use crate::registry::Registry;
use crate::state::Resolver;
use crate::tree::build_tree;

/// Everything a one-shot command needs: settings and the loaded catalog
#[derive(Debug, Clone)]
pub struct Context {
    pub settings: Settings,
    pub registry: Registry,
}

impl Context {
    pub fn new(settings: Settings, registry: Registry) -> Self {
        Self { settings, registry }
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(Ledger::new(&self.settings.ledger_path))
    }

    /// Look a module up by ledger key, path or name
    pub fn find(&self, query: &str) -> Result<ModuleRef> {
        self.registry
            .find(query)
            .cloned()
            .ok_or_else(|| TemplateError::ModuleNotFound(query.to_string()))
    }

    /// Fresh session over the full catalog
    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(build_tree(self.registry.modules()), self.resolver())
    }
}

/// Common trait for all command handlers
#[allow(async_fn_in_trait)]
pub trait CommandHandler {
    /// Execute the command, printing its report to stdout
    async fn execute(&self, context: &Context) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}
