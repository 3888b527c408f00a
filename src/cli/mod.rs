pub mod app;
pub mod commands;
pub mod display;
#[cfg(feature = "tui")]
pub mod tui;

pub use app::{Cli, Commands, LogLevel};
