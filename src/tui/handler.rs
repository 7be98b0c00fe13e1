use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::Focus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    /// Button activation and Enter in the link field both land here.
    Submit,
    FocusNext,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    OpenVideo,
    ShowHelp,
    HideHelp,
    // Link field editing
    InputChar(char),
    InputBackspace,
    InputClear,
    InputPaste(String),
}

pub fn handle_key_event(key: KeyEvent, focus: Focus, show_help: bool) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    // Bindings that work regardless of focus
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(AppAction::Quit),
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => return Some(AppAction::OpenVideo),
        (KeyCode::Esc, _) => return Some(AppAction::Quit),
        (KeyCode::Enter, _) => return Some(AppAction::Submit),
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => return Some(AppAction::FocusNext),
        (KeyCode::Up, _) => return Some(AppAction::ScrollUp),
        (KeyCode::Down, _) => return Some(AppAction::ScrollDown),
        (KeyCode::PageUp, _) => return Some(AppAction::PageUp),
        (KeyCode::PageDown, _) => return Some(AppAction::PageDown),
        (KeyCode::F(1), _) => return Some(AppAction::ShowHelp),
        _ => {}
    }

    match focus {
        Focus::Input => match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(AppAction::InputClear),
            (KeyCode::Backspace, _) => Some(AppAction::InputBackspace),
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
                Some(AppAction::InputChar(c))
            }
            _ => None,
        },

        Focus::Submit => match key.code {
            KeyCode::Char(' ') => Some(AppAction::Submit),
            KeyCode::Char('q') => Some(AppAction::Quit),
            KeyCode::Char('o') => Some(AppAction::OpenVideo),
            KeyCode::Char('j') => Some(AppAction::ScrollDown),
            KeyCode::Char('k') => Some(AppAction::ScrollUp),
            KeyCode::Char('?') => Some(AppAction::ShowHelp),
            _ => None,
        },
    }
}
