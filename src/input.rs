use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical keydown events. The control surface consumes `Space`,
/// `KeyL` and `KeyR`; the rest drive the surrounding shell (mode
/// switch, theme, duration editing, presets).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Space,
    KeyL,
    KeyR,
    KeyD,
    Tab,
    Quit,
    /// Preset seconds to add to the countdown.
    Preset(u64),
    /// Signed field adjustments for the duration inputs.
    Hours(i64),
    Minutes(i64),
    Seconds(i64),
}

/// Map a raw terminal key event to a logical key. Unknown keys and
/// key releases produce nothing.
pub fn map_key(event: &KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Key::Quit),
            _ => None,
        };
    }
    match event.code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(Key::KeyL),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::KeyR),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::KeyD),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Char('q') | KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char('1') => Some(Key::Preset(30)),
        KeyCode::Char('2') => Some(Key::Preset(60)),
        KeyCode::Char('3') => Some(Key::Preset(300)),
        KeyCode::Char('4') => Some(Key::Preset(600)),
        KeyCode::Char('h') => Some(Key::Hours(1)),
        KeyCode::Char('H') => Some(Key::Hours(-1)),
        KeyCode::Char('m') => Some(Key::Minutes(1)),
        KeyCode::Char('M') => Some(Key::Minutes(-1)),
        KeyCode::Char('s') => Some(Key::Seconds(1)),
        KeyCode::Char('S') => Some(Key::Seconds(-1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_control_surface_keys() {
        assert_eq!(map_key(&press(KeyCode::Char(' '))), Some(Key::Space));
        assert_eq!(map_key(&press(KeyCode::Char('L'))), Some(Key::KeyL));
        assert_eq!(map_key(&press(KeyCode::Char('r'))), Some(Key::KeyR));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&event), Some(Key::Quit));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = press(KeyCode::Char(' '));
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(&event), None);
    }

    #[test]
    fn test_unknown_key_ignored() {
        assert_eq!(map_key(&press(KeyCode::Char('x'))), None);
    }
}
