//! Background execution of module operations
//!
//! The UI loop never blocks on a module: the call runs on tokio's blocking
//! pool and exactly one [`Completion`] comes back over the event channel.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::module::{update_module, ModuleRef};

use super::Verb;

/// A module call admitted by the orchestrator, not yet run
#[derive(Debug, Clone)]
pub struct Operation {
    pub verb: Verb,
    pub module: ModuleRef,
}

impl Operation {
    /// Run the module call on the current thread. Blocks.
    pub fn run(self) -> Completion {
        let module = self.module.as_ref();
        let success = match self.verb {
            Verb::Install => module.install(),
            Verb::Update => update_module(module),
            Verb::Uninstall => module.uninstall(),
        };
        Completion {
            verb: self.verb,
            module: module.name().to_string(),
            success,
        }
    }
}

/// Result of one finished operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub verb: Verb,
    pub module: String,
    pub success: bool,
}

/// Spawn `operation` and report its completion on `tx`.
///
/// A module that panics is reported as a failed operation so the
/// orchestrator always returns to idle.
pub fn dispatch<E>(operation: Operation, tx: UnboundedSender<E>) -> JoinHandle<()>
where
    E: From<Completion> + Send + 'static,
{
    tokio::spawn(async move {
        let verb = operation.verb;
        let module = operation.module.name().to_string();

        let completion = match tokio::task::spawn_blocking(move || operation.run()).await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::error!(module = %module, error = %e, "Module operation aborted");
                Completion {
                    verb,
                    module,
                    success: false,
                }
            }
        };

        if tx.send(E::from(completion)).is_err() {
            tracing::debug!("Completion dropped: event loop has exited");
        }
    })
}
