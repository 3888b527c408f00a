//! Installation state resolution
//!
//! A module's state is never stored; it is derived on demand from the
//! module's own installed check and the version ledger.

pub mod resolver;
pub mod types;

pub use resolver::{installed_version, resolve, Resolver};
pub use types::InstallState;
