//! Turns the flat registry into the category/module hierarchy

use std::collections::HashMap;

use crate::module::{Module, ModuleRef};

use super::node::{NodeId, NodeKind, TreeNode};
use super::state::TreeState;

/// Build the tree for every module
pub fn build_tree(modules: &[ModuleRef]) -> TreeState {
    build_tree_filtered(modules, |_| true)
}

/// Build the tree placing only modules accepted by `keep`.
///
/// Duplicate paths are resolved before filtering: only the last module
/// registered for a path can be placed, even when `keep` rejects it.
/// Category nodes are still created for rejected modules so that pruning
/// decides what survives, exactly as for any other empty category.
pub fn build_tree_filtered<F>(modules: &[ModuleRef], keep: F) -> TreeState
where
    F: Fn(&dyn Module) -> bool,
{
    let mut arena = Arena::default();
    let mut categories: HashMap<String, NodeId> = HashMap::new();

    // Last registration wins when two modules claim the same path
    let winners: HashMap<&str, usize> = modules
        .iter()
        .enumerate()
        .map(|(idx, module)| (module.path(), idx))
        .collect();

    for (idx, module) in modules.iter().enumerate() {
        let path = module.path();
        let parts: Vec<&str> = path.split('/').collect();
        let category_parts = &parts[..parts.len().saturating_sub(1)];

        let mut parent = None;
        let mut prefix = String::new();
        for (depth, part) in category_parts.iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(part);

            if let Some(&existing) = categories.get(&prefix) {
                parent = Some(existing);
                continue;
            }

            let id = arena.attach(TreeNode::category(prefix.clone(), part, depth, parent));
            categories.insert(prefix.clone(), id);
            parent = Some(id);
        }

        if winners.get(path) != Some(&idx) || !keep(module.as_ref()) {
            continue;
        }

        let depth = parts.len() - 1;
        arena.attach(TreeNode::leaf(module.clone(), depth, parent));
    }

    arena.sort();
    arena.prune();
    let (nodes, roots) = arena.compact();

    let mut tree = TreeState::from_parts(nodes, roots);
    tree.rebuild_flat_visible();
    tree
}

/// Scratch arena used while placing modules
#[derive(Default)]
struct Arena {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
}

impl Arena {
    fn attach(&mut self, node: TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        match node.parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        self.nodes.push(node);
        id
    }

    fn sort(&mut self) {
        let mut roots = std::mem::take(&mut self.roots);
        self.sort_ids(&mut roots);
        self.roots = roots;

        for idx in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[idx].children);
            self.sort_ids(&mut children);
            self.nodes[idx].children = children;
        }
    }

    fn sort_ids(&self, ids: &mut [NodeId]) {
        ids.sort_by(|a, b| {
            let (a, b) = (&self.nodes[a.0], &self.nodes[b.0]);
            a.sort_rank()
                .cmp(&b.sort_rank())
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    fn has_modules(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        match node.kind {
            NodeKind::Module(_) => true,
            NodeKind::Category => node.children.iter().any(|&child| self.has_modules(child)),
        }
    }

    /// Drop categories without a module descendant, bottom-up
    fn prune(&mut self) {
        let roots = std::mem::take(&mut self.roots);
        self.roots = self.prune_ids(roots);
    }

    fn prune_ids(&mut self, ids: Vec<NodeId>) -> Vec<NodeId> {
        let mut kept = Vec::with_capacity(ids.len());
        for id in ids {
            if !self.has_modules(id) {
                continue;
            }
            let children = std::mem::take(&mut self.nodes[id.0].children);
            self.nodes[id.0].children = self.prune_ids(children);
            kept.push(id);
        }
        kept
    }

    /// Renumber reachable nodes in pre-order and drop the rest
    fn compact(self) -> (Vec<TreeNode>, Vec<NodeId>) {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut roots = Vec::with_capacity(self.roots.len());
        for &root in &self.roots {
            roots.push(self.copy_subtree(root, None, &mut nodes));
        }
        (nodes, roots)
    }

    fn copy_subtree(&self, old: NodeId, parent: Option<NodeId>, out: &mut Vec<TreeNode>) -> NodeId {
        let source = &self.nodes[old.0];
        let id = NodeId(out.len());
        out.push(TreeNode {
            parent,
            children: Vec::with_capacity(source.children.len()),
            ..source.clone()
        });
        for &child in &source.children {
            let new_child = self.copy_subtree(child, Some(id), out);
            out[id.0].children.push(new_child);
        }
        id
    }
}
