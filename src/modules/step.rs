//! One reversible unit of work inside a module install

use crate::error::Result;

/// What a successful `apply` changed, kept so `rollback` undoes only that
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Already in place before this call
    Unchanged,
    /// Created by this call
    Created,
    /// Overwrote existing content, which is kept for restoring
    Replaced(String),
}

impl Applied {
    pub fn changed(&self) -> bool {
        !matches!(self, Applied::Unchanged)
    }
}

/// An ordered step of a module.
///
/// `apply` must tolerate leftovers of an earlier partial attempt.
/// `remove` may deliberately do nothing for resources shared with other
/// projects.
pub trait Step: Send + Sync {
    fn describe(&self) -> String;

    /// Side-effect free check
    fn is_satisfied(&self) -> bool;

    fn apply(&self) -> Result<Applied>;

    /// Undo an `apply` from the same install call
    fn rollback(&self, applied: &Applied) -> Result<()>;

    /// Uninstall-time removal
    fn remove(&self) -> Result<()>;
}
