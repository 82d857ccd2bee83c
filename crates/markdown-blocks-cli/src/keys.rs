use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SwitchPane,
    Up,
    Down,
    /// Move the cursor and extend the range selection to it
    ExtendUp,
    ExtendDown,
    /// Plain click on the cursor block, or open the file under the cursor
    Activate,
    Toggle,
    SelectAll,
    Escape,
    Delete,
    Duplicate,
    Merge,
    Save,
    Reload,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let action = match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') if ctrl => Action::SelectAll,
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => Action::SwitchPane,
        KeyCode::Up if shift => Action::ExtendUp,
        KeyCode::Down if shift => Action::ExtendDown,
        KeyCode::Char('K') => Action::ExtendUp,
        KeyCode::Char('J') => Action::ExtendDown,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Activate,
        KeyCode::Char('t') => Action::Toggle,
        KeyCode::Esc => Action::Escape,
        KeyCode::Delete | KeyCode::Backspace => Action::Delete,
        KeyCode::Char('d') => Action::Duplicate,
        KeyCode::Char('m') => Action::Merge,
        KeyCode::Char('w') => Action::Save,
        KeyCode::Char('r') => Action::Reload,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn maps_selection_keys() {
        assert_eq!(
            action_for(key(KeyCode::Up, KeyModifiers::SHIFT)),
            Some(Action::ExtendUp)
        );
        assert_eq!(
            action_for(key(KeyCode::Down, KeyModifiers::NONE)),
            Some(Action::Down)
        );
        assert_eq!(
            action_for(key(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            Some(Action::SelectAll)
        );
        assert_eq!(
            action_for(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Action::Activate)
        );
        assert_eq!(
            action_for(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Action::Delete)
        );
        assert_eq!(action_for(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }
}
