use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One classified terminal event. Everything the loop does not act on
/// becomes `Ignored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Backspace,
    /// Enter: run the active action.
    Submit,
    Resize,
    /// Tab: cycle to the next available action.
    NextAction,
    /// Esc: drop the pending error, or else the selected task.
    Dismiss,
    Char(char),
    /// Ctrl+C.
    Interrupt,
    Ignored,
}

impl InputEvent {
    pub fn from_event(event: &Event) -> Self {
        match event {
            Event::Key(key) => Self::from_key(*key),
            Event::Resize(..) => InputEvent::Resize,
            _ => InputEvent::Ignored,
        }
    }

    pub fn from_key(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return InputEvent::Ignored;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('c') if ctrl => InputEvent::Interrupt,
            KeyCode::Char(c) if !ctrl && !alt && !c.is_control() => InputEvent::Char(c),
            KeyCode::Backspace => InputEvent::Backspace,
            KeyCode::Enter => InputEvent::Submit,
            KeyCode::Tab => InputEvent::NextAction,
            KeyCode::Esc => InputEvent::Dismiss,
            _ => InputEvent::Ignored,
        }
    }

    /// Anything but a resize counts as a key press.
    pub fn is_key(&self) -> bool {
        !matches!(self, InputEvent::Resize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn editing_keys() {
        assert_eq!(InputEvent::from_key(key(KeyCode::Backspace)), InputEvent::Backspace);
        assert_eq!(InputEvent::from_key(key(KeyCode::Enter)), InputEvent::Submit);
        assert_eq!(InputEvent::from_key(key(KeyCode::Tab)), InputEvent::NextAction);
        assert_eq!(InputEvent::from_key(key(KeyCode::Esc)), InputEvent::Dismiss);
    }

    #[test]
    fn printable_text_is_kept_whole() {
        assert_eq!(InputEvent::from_key(key(KeyCode::Char('ä'))), InputEvent::Char('ä'));
        assert_eq!(InputEvent::from_key(key(KeyCode::Char('#'))), InputEvent::Char('#'));
        let shifted = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(InputEvent::from_key(shifted), InputEvent::Char('W'));
    }

    #[test]
    fn ctrl_c_interrupts() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputEvent::from_key(ctrl_c), InputEvent::Interrupt);
    }

    #[test]
    fn everything_else_is_ignored() {
        assert_eq!(InputEvent::from_key(key(KeyCode::F(1))), InputEvent::Ignored);
        assert_eq!(InputEvent::from_key(key(KeyCode::Up)), InputEvent::Ignored);
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(InputEvent::from_key(ctrl_x), InputEvent::Ignored);
        assert_eq!(
            InputEvent::from_event(&Event::FocusGained),
            InputEvent::Ignored
        );
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(InputEvent::from_key(release), InputEvent::Ignored);
    }

    #[test]
    fn resize_is_not_a_key() {
        let event = InputEvent::from_event(&Event::Resize(80, 24));
        assert_eq!(event, InputEvent::Resize);
        assert!(!event.is_key());
    }
}
