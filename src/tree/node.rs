use crate::module::ModuleRef;

/// Index of a node inside its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Whether a node is a folder or an installable leaf
#[derive(Debug, Clone)]
pub enum NodeKind {
    Category,
    Module(ModuleRef),
}

/// A single node in the tree hierarchy.
///
/// Children are owned through the arena; `parent` is a plain index used
/// only for walking upwards.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Path-based id, e.g. `claude/workflow` or `claude/workflow/tdd_guard`
    pub id: String,
    /// Display name
    pub name: String,
    pub kind: NodeKind,
    /// Ancestor count, 0 for top-level nodes
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub(crate) fn category(id: String, name: &str, depth: usize, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: NodeKind::Category,
            depth,
            parent,
            children: Vec::new(),
        }
    }

    pub(crate) fn leaf(module: ModuleRef, depth: usize, parent: Option<NodeId>) -> Self {
        Self {
            id: module.path().to_string(),
            name: module.name().to_string(),
            kind: NodeKind::Module(module),
            depth,
            parent,
            children: Vec::new(),
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self.kind, NodeKind::Category)
    }

    pub fn module(&self) -> Option<&ModuleRef> {
        match &self.kind {
            NodeKind::Module(module) => Some(module),
            NodeKind::Category => None,
        }
    }

    /// Categories sort before modules at the same level
    pub(crate) fn sort_rank(&self) -> u8 {
        match self.kind {
            NodeKind::Category => 0,
            NodeKind::Module(_) => 1,
        }
    }
}
