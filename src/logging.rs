//! Tracing setup
//!
//! One-shot commands log to stderr. The interactive browser owns the
//! terminal, so it logs to a file in the platform cache directory instead.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "code-template.log";

/// Where log output goes for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    /// File target in the cache directory, disabled when there is none
    pub fn cache_file() -> Self {
        match log_file_path() {
            Some(path) => LogTarget::File(path),
            None => LogTarget::Disabled,
        }
    }
}

pub fn log_file_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "code-template", "code-template")
        .map(|dirs| dirs.cache_dir().join(LOG_FILE))
}

/// Initialize the global subscriber with a level directive such as `warn`
pub fn initialize_tracing(directive: &str, target: LogTarget) {
    let filter = EnvFilter::new(directive);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogTarget::File(path) => {
            let file = path
                .parent()
                .map(std::fs::create_dir_all)
                .transpose()
                .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));

            match file {
                Ok(file) => {
                    tracing_subscriber::fmt()
                        .with_env_filter(filter)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .init();
                    tracing::debug!(path = %path.display(), "Logging to file");
                }
                // Nowhere safe to write while the terminal is taken over
                Err(_) => {}
            }
        }
        LogTarget::Disabled => {}
    }
}
