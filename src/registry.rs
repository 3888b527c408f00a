//! Ordered, immutable catalog of every known module

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{Result, TemplateError};
use crate::module::{is_well_formed_path, Module, ModuleRef};

/// The module catalog. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    modules: Vec<ModuleRef>,
}

/// Append-only builder for [`Registry`]
#[derive(Default)]
pub struct RegistryBuilder {
    modules: Vec<ModuleRef>,
}

impl RegistryBuilder {
    pub fn register<M: Module + 'static>(mut self, module: M) -> Self {
        self.modules.push(Arc::new(module));
        self
    }

    pub fn register_shared(mut self, module: ModuleRef) -> Self {
        self.modules.push(module);
        self
    }

    /// Validate paths and ledger key uniqueness, then freeze.
    ///
    /// Duplicate paths are accepted; the tree keeps the later registration.
    pub fn build(self) -> Result<Registry> {
        let mut keys = HashSet::new();
        for module in &self.modules {
            if !is_well_formed_path(module.path()) {
                return Err(TemplateError::Registry(format!(
                    "module '{}' has malformed path '{}'",
                    module.name(),
                    module.path()
                )));
            }
            if !keys.insert(module.ledger_key().to_string()) {
                return Err(TemplateError::Registry(format!(
                    "ledger key '{}' is registered twice",
                    module.ledger_key()
                )));
            }
        }
        Ok(Registry {
            modules: self.modules,
        })
    }
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Modules in registration order
    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Look a module up by ledger key, then path, then display name
    pub fn find(&self, query: &str) -> Option<&ModuleRef> {
        self.modules
            .iter()
            .find(|m| m.ledger_key() == query)
            .or_else(|| self.modules.iter().find(|m| m.path() == query))
            .or_else(|| self.modules.iter().find(|m| m.name() == query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub {
        name: &'static str,
        path: &'static str,
        key: &'static str,
    }

    impl Module for Stub {
        fn name(&self) -> &str {
            self.name
        }
        fn category(&self) -> &str {
            self.path.split('/').next().unwrap_or_default()
        }
        fn path(&self) -> &str {
            self.path
        }
        fn version(&self) -> u32 {
            1
        }
        fn ledger_key(&self) -> &str {
            self.key
        }
        fn is_installed(&self) -> bool {
            false
        }
        fn install(&self) -> bool {
            true
        }
        fn uninstall(&self) -> bool {
            true
        }
    }

    fn stub(name: &'static str, path: &'static str, key: &'static str) -> Stub {
        Stub { name, path, key }
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry = Registry::builder()
            .register(stub("b", "x/b", "kb"))
            .register(stub("a", "x/a", "ka"))
            .build()
            .unwrap();
        let names: Vec<_> = registry.modules().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_ledger_key_rejected() {
        let result = Registry::builder()
            .register(stub("a", "x/a", "same"))
            .register(stub("b", "x/b", "same"))
            .build();
        assert!(matches!(result, Err(TemplateError::Registry(_))));
    }

    #[test]
    fn test_malformed_path_rejected() {
        let result = Registry::builder().register(stub("a", "x//a", "ka")).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_find_prefers_ledger_key() {
        let registry = Registry::builder()
            .register(stub("eslint", "linting/typescript/eslint", "lint-js"))
            .register(stub("lint-js", "tasks/typescript/lint_js", "task-lint-js"))
            .build()
            .unwrap();

        assert_eq!(registry.find("lint-js").unwrap().name(), "eslint");
        assert_eq!(registry.find("tasks/typescript/lint_js").unwrap().name(), "lint-js");
        assert_eq!(registry.find("eslint").unwrap().ledger_key(), "lint-js");
        assert!(registry.find("missing").is_none());
    }
}
