// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hbt_app::{FormInput, HabitsCommand};

pub fn habits_command_for_key(key: KeyEvent) -> Option<HabitsCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Some(HabitsCommand::Up),
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            Some(HabitsCommand::Down)
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => Some(HabitsCommand::Add),
        (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            Some(HabitsCommand::Edit)
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => Some(HabitsCommand::Delete),
        (KeyCode::Char('y'), KeyModifiers::NONE) => Some(HabitsCommand::Confirm),
        (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
            Some(HabitsCommand::Cancel)
        }
        _ => None,
    }
}

pub fn form_input_for_key(key: KeyEvent) -> Option<FormInput> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(FormInput::Submit)
        }
        (KeyCode::Char(_), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => None,
        (KeyCode::Char(ch), _) => Some(FormInput::Char(ch)),
        (KeyCode::Tab, _) => Some(FormInput::NextField),
        (KeyCode::BackTab, _) => Some(FormInput::PrevField),
        (KeyCode::Up, _) => Some(FormInput::Up),
        (KeyCode::Down, _) => Some(FormInput::Down),
        (KeyCode::Left, _) => Some(FormInput::Left),
        (KeyCode::Right, _) => Some(FormInput::Right),
        (KeyCode::PageUp, _) => Some(FormInput::PageUp),
        (KeyCode::PageDown, _) => Some(FormInput::PageDown),
        (KeyCode::Backspace, _) => Some(FormInput::Backspace),
        (KeyCode::Enter, _) => Some(FormInput::Confirm),
        (KeyCode::Esc, _) => Some(FormInput::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{form_input_for_key, habits_command_for_key};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use hbt_app::{FormInput, HabitsCommand};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn list_keys() {
        assert_eq!(habits_command_for_key(key(KeyCode::Char('j'))), Some(HabitsCommand::Down));
        assert_eq!(habits_command_for_key(key(KeyCode::Up)), Some(HabitsCommand::Up));
        assert_eq!(habits_command_for_key(key(KeyCode::Char('a'))), Some(HabitsCommand::Add));
        assert_eq!(habits_command_for_key(key(KeyCode::Enter)), Some(HabitsCommand::Edit));
        assert_eq!(habits_command_for_key(key(KeyCode::Char('d'))), Some(HabitsCommand::Delete));
        assert_eq!(habits_command_for_key(key(KeyCode::Char('y'))), Some(HabitsCommand::Confirm));
        assert_eq!(habits_command_for_key(key(KeyCode::Esc)), Some(HabitsCommand::Cancel));
        assert_eq!(habits_command_for_key(key(KeyCode::Char('z'))), None);
        assert_eq!(habits_command_for_key(ctrl('d')), None);
    }

    #[test]
    fn form_keys() {
        assert_eq!(form_input_for_key(ctrl('s')), Some(FormInput::Submit));
        assert_eq!(form_input_for_key(ctrl('x')), None);
        assert_eq!(form_input_for_key(key(KeyCode::Char('q'))), Some(FormInput::Char('q')));
        assert_eq!(
            form_input_for_key(KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(FormInput::Char('Q'))
        );
        assert_eq!(form_input_for_key(key(KeyCode::Tab)), Some(FormInput::NextField));
        assert_eq!(form_input_for_key(key(KeyCode::BackTab)), Some(FormInput::PrevField));
        assert_eq!(form_input_for_key(key(KeyCode::Enter)), Some(FormInput::Confirm));
        assert_eq!(form_input_for_key(key(KeyCode::Esc)), Some(FormInput::Cancel));
        assert_eq!(form_input_for_key(key(KeyCode::PageDown)), Some(FormInput::PageDown));
        assert_eq!(form_input_for_key(key(KeyCode::Backspace)), Some(FormInput::Backspace));
        assert_eq!(form_input_for_key(key(KeyCode::F(1))), None);
    }
}
