use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies one keystroke to a single-line text field. Returns whether the key
/// was consumed.
pub fn apply_text_input(target: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            target.push(ch);
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => return false,
    }
    true
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::apply_text_input;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_and_backspace() {
        let mut value = String::new();
        for ch in "ab@c".chars() {
            assert!(apply_text_input(&mut value, press(KeyCode::Char(ch))));
        }
        apply_text_input(&mut value, press(KeyCode::Backspace));
        assert_eq!(value, "ab@");
    }

    #[test]
    fn control_shortcuts_edit_words() {
        let mut value = "old parent@example.com".to_string();
        apply_text_input(&mut value, ctrl('w'));
        assert_eq!(value, "old ");
        apply_text_input(&mut value, ctrl('u'));
        assert!(value.is_empty());
    }

    #[test]
    fn other_control_chords_are_not_consumed() {
        let mut value = "x".to_string();
        assert!(!apply_text_input(&mut value, ctrl('x')));
        assert!(!apply_text_input(&mut value, press(KeyCode::Tab)));
        assert_eq!(value, "x");
    }
}
