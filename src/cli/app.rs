use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// code-template: browse and install project tooling modules
#[derive(Parser, Debug)]
#[command(name = "code-template")]
#[command(version)]
#[command(about = "Browse and install project tooling modules")]
#[command(
    long_about = "Without a subcommand, opens an interactive tree of every module grouped by category. \
                  Subcommands run a single operation and exit."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project directory modules operate in (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Ledger file path, relative to the root unless absolute
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a module, or update it when the installed version is older
    Install {
        /// Module name, ledger key or path
        module: String,
    },

    /// Reinstall an outdated module at its current version
    Update {
        /// Module name, ledger key or path
        module: String,
    },

    /// Remove an installed module
    Uninstall {
        /// Module name, ledger key or path
        module: String,
    },

    /// Show declared and installed versions of a module
    Version {
        /// Module name, ledger key or path
        module: String,
    },

    /// Print the module tree with install state
    List {
        /// Only show modules whose name or path contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Emit a JSON array instead of a tree
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
