use crate::error::Result;

use super::{CommandHandler, Context};

/// Show the declared and recorded versions of a module
pub struct VersionCommand {
    query: String,
}

impl VersionCommand {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn report(&self, context: &Context) -> Result<String> {
        let module = context.find(&self.query)?;
        let resolver = context.resolver();
        let state = resolver.resolve(module.as_ref());
        let installed = resolver.installed_version(module.as_ref());

        let installed = if installed == 0 {
            "none".to_string()
        } else {
            format!("v{installed}")
        };

        Ok(format!(
            "{} ({})\n  declared:  v{}\n  installed: {}\n  state:     {}",
            module.name(),
            module.path(),
            module.version(),
            installed,
            state
        ))
    }
}

impl CommandHandler for VersionCommand {
    async fn execute(&self, context: &Context) -> Result<()> {
        println!("{}", self.report(context)?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "version"
    }
}
