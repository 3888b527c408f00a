use serde::Serialize;
use std::fmt;

/// Derived installation state of one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallState {
    NotInstalled,
    Outdated,
    UpToDate,
}

impl InstallState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallState::NotInstalled => "not installed",
            InstallState::Outdated => "outdated",
            InstallState::UpToDate => "up to date",
        }
    }

    /// Tree marker shown next to a module
    pub fn marker(&self) -> &'static str {
        match self {
            InstallState::NotInstalled => "[ ]",
            InstallState::Outdated => "[↑]",
            InstallState::UpToDate => "[✓]",
        }
    }

    pub fn is_installed(&self) -> bool {
        !matches!(self, InstallState::NotInstalled)
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
