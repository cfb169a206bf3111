use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// Exact match on code and modifiers.
pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && pattern.modifiers == event.modifiers
}

/// Returns `true` if `event` matches any of `patterns`.
pub fn matches_any(patterns: &[KeyEvent], event: &KeyEvent) -> bool {
    patterns.iter().any(|p| key_event_matches(p, event))
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_shift(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code).with_modifiers(KeyModifiers::shift())
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_requires_exact_modifiers() {
        let patterns = [key(KeyCode::Tab), key_shift(KeyCode::BackTab)];
        assert!(matches_any(&patterns, &key(KeyCode::Tab)));
        assert!(matches_any(&patterns, &key_shift(KeyCode::BackTab)));
        assert!(!matches_any(&patterns, &key_shift(KeyCode::Tab)));
        assert!(!matches_any(&patterns, &key_char('q')));
    }
}
