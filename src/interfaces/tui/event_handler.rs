//! Key handling for TUI
//!
//! Maps key codes to actions based on the current screen

use ratatui::crossterm::event::KeyCode;

use crate::interfaces::tui::action::Action;
use crate::interfaces::tui::app::CurrentScreen;

pub fn handle_key_event(screen: CurrentScreen, key_code: KeyCode) -> Action {
    match screen {
        CurrentScreen::Main => handle_main_screen(key_code),
        CurrentScreen::Help => handle_help_screen(key_code),
    }
}

fn handle_main_screen(key_code: KeyCode) -> Action {
    match key_code {
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::JumpTop,
        KeyCode::End | KeyCode::Char('G') => Action::JumpBottom,
        KeyCode::Char('l') | KeyCode::Char(' ') => Action::ToggleLive,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('c') => Action::Clear,
        KeyCode::Char(']') | KeyCode::Char('+') => Action::NextLimit,
        KeyCode::Char('[') | KeyCode::Char('-') => Action::PrevLimit,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::Noop,
    }
}

fn handle_help_screen(key_code: KeyCode) -> Action {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => Action::GoBack,
        _ => Action::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_screen_shortcuts() {
        let cases = [
            (KeyCode::Char('l'), Action::ToggleLive),
            (KeyCode::Char('r'), Action::Refresh),
            (KeyCode::Char('c'), Action::Clear),
            (KeyCode::Char('['), Action::PrevLimit),
            (KeyCode::Char(']'), Action::NextLimit),
            (KeyCode::Up, Action::MoveUp),
            (KeyCode::Down, Action::MoveDown),
            (KeyCode::Char('?'), Action::ShowHelp),
            (KeyCode::Char('q'), Action::Quit),
            (KeyCode::Char('z'), Action::Noop),
        ];
        for (key, expected) in cases {
            assert_eq!(handle_key_event(CurrentScreen::Main, key), expected, "{:?}", key);
        }
    }

    #[test]
    fn test_help_screen_only_closes() {
        assert_eq!(handle_key_event(CurrentScreen::Help, KeyCode::Esc), Action::GoBack);
        assert_eq!(handle_key_event(CurrentScreen::Help, KeyCode::Char('l')), Action::Noop);
        assert_eq!(handle_key_event(CurrentScreen::Help, KeyCode::Char('q')), Action::GoBack);
    }
}
