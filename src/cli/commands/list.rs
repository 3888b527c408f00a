use crate::cli::display::{plain_row, ModuleRow};
use crate::error::Result;
use crate::module::Module;
use crate::tree::build_tree_filtered;

use super::{CommandHandler, Context};

/// Print the fully expanded module tree, optionally filtered
pub struct ListCommand {
    filter: Option<String>,
    json: bool,
}

impl ListCommand {
    pub fn new(filter: Option<String>, json: bool) -> Self {
        Self { filter, json }
    }

    fn matches(&self, module: &dyn Module) -> bool {
        match &self.filter {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                module.name().to_lowercase().contains(&needle)
                    || module.path().to_lowercase().contains(&needle)
            }
        }
    }

    pub fn render(&self, context: &Context) -> Result<String> {
        let resolver = context.resolver();
        let mut tree = build_tree_filtered(context.registry.modules(), |m| self.matches(m));

        if self.json {
            // Tree pre-order keeps the JSON in display order
            let rows: Vec<ModuleRow> = tree
                .iter()
                .filter_map(|(_, node)| node.module())
                .map(|module| ModuleRow::resolve(module.as_ref(), &resolver))
                .collect();
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        if tree.is_empty() {
            return Ok("No modules match".to_string());
        }

        tree.expand_all();
        let lines: Vec<String> = tree
            .flat_visible()
            .iter()
            .map(|&id| plain_row(&tree, &resolver, id))
            .collect();
        Ok(lines.join("\n"))
    }
}

impl CommandHandler for ListCommand {
    async fn execute(&self, context: &Context) -> Result<()> {
        println!("{}", self.render(context)?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "list"
    }
}
