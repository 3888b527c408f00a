//! Expand/collapse view state and the flattened navigation sequence

use std::collections::HashMap;

use super::node::{NodeId, NodeKind, TreeNode};

/// Complete tree state for the browser.
///
/// The structure is fixed after [`super::build_tree`]; only expansion flags
/// change. Every expansion mutation rebuilds the flattened sequence before
/// returning, so `flat_visible` is never stale.
#[derive(Debug, Clone, Default)]
pub struct TreeState {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
    /// Absent means collapsed
    expanded: HashMap<String, bool>,
    flat_visible: Vec<NodeId>,
}

impl TreeState {
    pub(crate) fn from_parts(nodes: Vec<TreeNode>, roots: Vec<NodeId>) -> Self {
        Self {
            nodes,
            roots,
            expanded: HashMap::new(),
            flat_visible: Vec::new(),
        }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Total node count
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in depth-first pre-order, regardless of expansion
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        // The arena is stored in pre-order by the builder
        self.nodes.iter().enumerate().map(|(idx, node)| (NodeId(idx), node))
    }

    /// Find a node by path id, categories first
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.iter()
            .filter(|(_, node)| node.id == id)
            .min_by_key(|(_, node)| node.sort_rank())
            .map(|(id, _)| id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) {
        self.expanded.insert(id.to_string(), expanded);
        self.rebuild_flat_visible();
    }

    pub fn toggle_expanded(&mut self, id: &str) {
        let expanded = !self.is_expanded(id);
        self.set_expanded(id, expanded);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.rebuild_flat_visible();
    }

    /// Expand every category, used for non-interactive listings
    pub fn expand_all(&mut self) {
        for node in &self.nodes {
            if node.is_category() {
                self.expanded.insert(node.id.clone(), true);
            }
        }
        self.rebuild_flat_visible();
    }

    /// Recompute the visible sequence from the expansion map
    pub fn rebuild_flat_visible(&mut self) {
        let mut flat = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.flatten_node(root, &mut flat);
        }
        self.flat_visible = flat;
    }

    fn flatten_node(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        let node = &self.nodes[id.0];
        if node.is_category() && self.is_expanded(&node.id) {
            for &child in &node.children {
                self.flatten_node(child, out);
            }
        }
    }

    pub fn flat_visible(&self) -> &[NodeId] {
        &self.flat_visible
    }

    /// `(installed, total)` module counts below a node
    pub fn installed_count(&self, id: NodeId) -> (usize, usize) {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Module(module) => {
                if module.is_installed() {
                    (1, 1)
                } else {
                    (0, 1)
                }
            }
            NodeKind::Category => node.children.iter().fold((0, 0), |(installed, total), &child| {
                let (ci, ct) = self.installed_count(child);
                (installed + ci, total + ct)
            }),
        }
    }

    pub fn has_modules(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        match node.kind {
            NodeKind::Module(_) => true,
            NodeKind::Category => node.children.iter().any(|&child| self.has_modules(child)),
        }
    }

    /// True for parentless nodes and for the final child of a parent
    pub fn is_last_child(&self, id: NodeId) -> bool {
        match self.nodes[id.0].parent {
            None => true,
            Some(parent) => self.nodes[parent.0].children.last() == Some(&id),
        }
    }

    /// Ancestors from the direct parent up to the top-level node
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id.0].parent, move |&p| self.nodes[p.0].parent)
    }

    /// Top-level ancestor, or the node itself when it is a root
    pub fn top_level(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }
}
