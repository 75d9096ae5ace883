use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    CloseHelp,
    Next,
    Prev,
    MoveUp,
    MoveDown,
    Activate,
    Check,
    Restart,
    ToggleMusic,
    SkipTrack,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::CloseHelp,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => InputAction::Next,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => InputAction::Prev,
        KeyCode::Up | KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Enter => InputAction::Activate,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('c') => InputAction::Check,
        KeyCode::Char('r') => InputAction::Restart,
        KeyCode::Char('m') => InputAction::ToggleMusic,
        KeyCode::Char('>') | KeyCode::Char('s') => InputAction::SkipTrack,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)),
            InputAction::Next
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)),
            InputAction::Prev
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            InputAction::Activate
        );
    }

    #[test]
    fn maps_quiz_and_music_keys() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            InputAction::Check
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE)),
            InputAction::ToggleMusic
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('>'), KeyModifiers::SHIFT)),
            InputAction::SkipTrack
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            InputAction::None
        );
    }
}
