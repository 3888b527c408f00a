use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::orchestrator::{Action, Completion};

/// All possible events in the browser loop
#[derive(Debug)]
pub enum AppEvent {
    // Input events
    Key(KeyEvent),
    Resize(u16, u16),

    // Background operation finished
    OperationComplete(Completion),

    // UI events
    Tick, // spinner animation
}

impl From<Completion> for AppEvent {
    fn from(completion: Completion) -> Self {
        AppEvent::OperationComplete(completion)
    }
}

/// Map a key press to a browser action
pub fn action_for_key(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Expand),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Collapse),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => Some(Action::Delete),
        KeyCode::Esc => Some(Action::CollapseAll),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
