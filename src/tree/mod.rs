//! Hierarchical category/module tree built from the registry
//!
//! ```text
//! Registry (ordered modules)
//!     │  split each path on '/'
//!     ▼
//! build_tree ── memoized categories, sorted, pruned
//!     │
//!     ▼
//! TreeState ── expansion map ──► flat_visible (navigation order)
//! ```

mod builder;
mod node;
mod state;

pub use builder::{build_tree, build_tree_filtered};
pub use node::{NodeId, NodeKind, TreeNode};
pub use state::TreeState;
