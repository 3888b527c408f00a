use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Step '{step}' failed: {reason}")]
    Step { step: String, reason: String },

    #[error("{service} error: {reason}")]
    Service { service: &'static str, reason: String },

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("CLI error: {0}")]
    Cli(String),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl TemplateError {
    pub fn step(step: impl Into<String>, reason: impl Into<String>) -> Self {
        TemplateError::Step {
            step: step.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
