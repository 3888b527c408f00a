pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod module;
pub mod modules;
pub mod orchestrator;
pub mod registry;
pub mod services;
pub mod state;
pub mod tree;

pub use error::{Result, TemplateError};
pub use module::{Module, ModuleRef};
pub use registry::Registry;
