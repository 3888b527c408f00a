//! `install`, `update` and `uninstall`

use crate::error::{Result, TemplateError};
use crate::orchestrator::Verb;
use crate::state::InstallState;

use super::{CommandHandler, Context};

/// Run one module operation through the orchestrator and wait for it
pub struct ModuleCommand {
    verb: Verb,
    query: String,
}

impl ModuleCommand {
    pub fn new(verb: Verb, query: impl Into<String>) -> Self {
        Self {
            verb,
            query: query.into(),
        }
    }

    pub fn install(query: impl Into<String>) -> Self {
        Self::new(Verb::Install, query)
    }

    pub fn update(query: impl Into<String>) -> Self {
        Self::new(Verb::Update, query)
    }

    pub fn uninstall(query: impl Into<String>) -> Self {
        Self::new(Verb::Uninstall, query)
    }

    /// Perform the operation and return the status line.
    ///
    /// A failed module call is an error; a request that needs no work
    /// (already up to date, not installed) is reported, not failed.
    pub async fn run(&self, context: &Context) -> Result<String> {
        let module = context.find(&self.query)?;
        let mut orchestrator = context.orchestrator();

        let operation = match self.verb {
            Verb::Install => orchestrator.activate(module.clone()),
            Verb::Update => {
                if context.resolver().resolve(module.as_ref()) == InstallState::NotInstalled {
                    return Err(TemplateError::Cli(format!(
                        "{} is not installed; use install instead",
                        module.name()
                    )));
                }
                orchestrator.activate(module.clone())
            }
            Verb::Uninstall => orchestrator.remove(module.clone()),
        };

        let completion = orchestrator.run_to_completion(operation).await;
        let status = orchestrator
            .status()
            .map(|status| status.text.clone())
            .unwrap_or_default();

        match completion {
            Some(completion) if !completion.success => Err(TemplateError::Cli(status)),
            _ => Ok(status),
        }
    }
}

impl CommandHandler for ModuleCommand {
    async fn execute(&self, context: &Context) -> Result<()> {
        tracing::debug!(verb = self.verb.as_str(), query = %self.query, "Running module command");
        let status = self.run(context).await?;
        println!("{status}");
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.verb.as_str()
    }
}
