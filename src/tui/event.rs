use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C, quits from any mode
    ForceQuit,
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    Submit,
    Escape,
    NextField,
    PrevField,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => translate(event),
        Err(e) => {
            warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Map a crossterm event onto a `TuiEvent`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Key release events arrive on terminals with enhanced keyboard reporting
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, _) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Tab) => Some(TuiEvent::NextField),
        (_, KeyCode::BackTab) => Some(TuiEvent::PrevField),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_ctrl_c_is_force_quit() {
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
    }

    #[test]
    fn test_shifted_chars_pass_through() {
        assert_eq!(
            translate(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn test_other_control_chords_are_dropped() {
        assert_eq!(translate(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(translate(key(KeyCode::Tab, KeyModifiers::NONE)), Some(TuiEvent::NextField));
        assert_eq!(translate(key(KeyCode::BackTab, KeyModifiers::SHIFT)), Some(TuiEvent::PrevField));
        assert_eq!(translate(key(KeyCode::Up, KeyModifiers::NONE)), Some(TuiEvent::CursorUp));
        assert_eq!(translate(Event::Resize(80, 24)), Some(TuiEvent::Resize));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(release)), None);
    }
}
