//! Concrete modules composed from ordered, reversible steps
//!
//! Every built-in module is a [`StepModule`]: an identity plus a list of
//! [`Step`]s. Install applies the steps in order and then records the
//! module in the version ledger. Any failure, including the ledger write,
//! rolls back every step this call applied, newest first.

pub mod catalog;
pub mod step;
pub mod steps;

pub use step::{Applied, Step};

use crate::ledger::Ledger;
use crate::module::Module;

/// Identity of a module as shown in the tree and stored in the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    pub name: String,
    pub category: String,
    pub path: String,
    pub version: u32,
    pub ledger_key: String,
}

impl ModuleSpec {
    /// Category is the first path segment
    pub fn new(name: &str, path: &str, version: u32, ledger_key: &str) -> Self {
        Self {
            name: name.to_string(),
            category: path.split('/').next().unwrap_or_default().to_string(),
            path: path.to_string(),
            version,
            ledger_key: ledger_key.to_string(),
        }
    }
}

/// A module made of steps plus a ledger entry
pub struct StepModule {
    spec: ModuleSpec,
    steps: Vec<Box<dyn Step>>,
    ledger: Ledger,
}

impl StepModule {
    pub fn new(spec: ModuleSpec, ledger: Ledger) -> Self {
        Self {
            spec,
            steps: Vec::new(),
            ledger,
        }
    }

    pub fn step<S: Step + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Undo applied steps newest first. Failures are logged, never raised.
    fn rollback(&self, applied: Vec<Applied>) {
        let steps = &self.steps[..applied.len()];
        for (step, applied) in steps.iter().zip(applied).rev() {
            match step.rollback(&applied) {
                Ok(()) => tracing::debug!(step = %step.describe(), "Rolled back"),
                Err(e) => tracing::warn!(step = %step.describe(), error = %e, "Rollback failed"),
            }
        }
    }
}

impl Module for StepModule {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn category(&self) -> &str {
        &self.spec.category
    }

    fn path(&self) -> &str {
        &self.spec.path
    }

    fn version(&self) -> u32 {
        self.spec.version
    }

    fn ledger_key(&self) -> &str {
        &self.spec.ledger_key
    }

    fn is_installed(&self) -> bool {
        self.steps.iter().all(|s| s.is_satisfied())
            && self.ledger.has_key(&self.spec.ledger_key).unwrap_or(false)
    }

    fn install(&self) -> bool {
        let _span = tracing::info_span!("install", module = %self.spec.name).entered();

        let mut applied = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            match step.apply() {
                Ok(outcome) => {
                    tracing::debug!(step = %step.describe(), changed = outcome.changed(), "Applied");
                    applied.push(outcome);
                }
                Err(e) => {
                    tracing::warn!(step = %step.describe(), error = %e, "Install step failed");
                    self.rollback(applied);
                    return false;
                }
            }
        }

        if let Err(e) = self.ledger.set_key(&self.spec.ledger_key, self.spec.version) {
            tracing::warn!(error = %e, "Ledger write failed");
            self.rollback(applied);
            return false;
        }

        tracing::info!(version = self.spec.version, "Installed");
        true
    }

    fn uninstall(&self) -> bool {
        let _span = tracing::info_span!("uninstall", module = %self.spec.name).entered();
        let mut success = true;

        for step in self.steps.iter().rev() {
            if let Err(e) = step.remove() {
                tracing::warn!(step = %step.describe(), error = %e, "Uninstall step failed");
                success = false;
            }
        }

        if let Err(e) = self.ledger.remove_key(&self.spec.ledger_key) {
            tracing::warn!(error = %e, "Ledger removal failed");
            success = false;
        }

        tracing::info!(success, "Uninstalled");
        success
    }
}
