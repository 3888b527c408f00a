//! Text rendering of tree rows shared by `list` and the browser

use serde::Serialize;

use crate::module::Module;
use crate::state::{InstallState, Resolver};
use crate::tree::{NodeId, TreeState};

/// Box-drawing prefix for a row, empty for top-level nodes
pub fn tree_prefix(tree: &TreeState, id: NodeId) -> String {
    if tree.node(id).parent.is_none() {
        return String::new();
    }

    let mut columns: Vec<&str> = tree
        .ancestors(id)
        .filter(|&ancestor| tree.node(ancestor).parent.is_some())
        .map(|ancestor| if tree.is_last_child(ancestor) { "   " } else { "│  " })
        .collect();
    columns.reverse();

    let mut prefix = columns.concat();
    prefix.push_str(if tree.is_last_child(id) { "└─ " } else { "├─ " });
    prefix
}

/// Category label with its installed count, e.g. `linting (1/2)`
pub fn category_label(tree: &TreeState, id: NodeId) -> String {
    let (installed, total) = tree.installed_count(id);
    format!("{} ({}/{})", tree.node(id).name, installed, total)
}

/// Version annotation for a module row
pub fn version_label(module: &dyn Module, state: InstallState, installed: u32) -> String {
    match state {
        InstallState::Outdated => format!("v{} → v{}", installed, module.version()),
        _ => format!("v{}", module.version()),
    }
}

/// Plain-text row used by `list`
pub fn plain_row(tree: &TreeState, resolver: &Resolver, id: NodeId) -> String {
    let node = tree.node(id);
    let prefix = tree_prefix(tree, id);
    match node.module() {
        Some(module) => {
            let state = resolver.resolve(module.as_ref());
            let installed = resolver.installed_version(module.as_ref());
            format!(
                "{}{} {} {}",
                prefix,
                state.marker(),
                node.name,
                version_label(module.as_ref(), state, installed)
            )
        }
        None => format!("{}{}", prefix, category_label(tree, id)),
    }
}

/// Machine-readable module summary for `list --json`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ModuleRow {
    pub name: String,
    pub path: String,
    pub ledger_key: String,
    pub version: u32,
    pub installed_version: u32,
    pub state: InstallState,
}

impl ModuleRow {
    pub fn resolve(module: &dyn Module, resolver: &Resolver) -> Self {
        Self {
            name: module.name().to_string(),
            path: module.path().to_string(),
            ledger_key: module.ledger_key().to_string(),
            version: module.version(),
            installed_version: resolver.installed_version(module),
            state: resolver.resolve(module),
        }
    }
}
