use ratatui::style::{Color, Modifier, Style};

use crate::orchestrator::StatusKind;
use crate::state::InstallState;

/// Consistent theme for the browser
pub struct Theme {
    pub selected: Style,
    pub category: Style,
    pub error: Style,
    pub success: Style,
    pub warning: Style,
    pub info: Style,
    pub muted: Style,
    pub highlight: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            selected: Style::default()
                .bg(Color::Rgb(50, 50, 80))
                .add_modifier(Modifier::BOLD),
            category: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            warning: Style::default()
                .fg(Color::Yellow),
            info: Style::default()
                .fg(Color::Blue),
            muted: Style::default()
                .fg(Color::DarkGray),
            highlight: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// Style for a module's state marker
    pub fn state_style(&self, state: InstallState) -> Style {
        match state {
            InstallState::NotInstalled => self.muted,
            InstallState::Outdated => self.warning,
            InstallState::UpToDate => self.success,
        }
    }

    pub fn status_style(&self, kind: StatusKind) -> Style {
        match kind {
            StatusKind::Info => self.info,
            StatusKind::Success => self.success,
            StatusKind::Error => self.error,
        }
    }
}
