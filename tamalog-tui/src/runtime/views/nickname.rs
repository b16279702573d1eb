use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_nickname_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(input) = app.nickname_input.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Enter => {
            let nickname = input.value.trim().to_string();
            if !nickname.is_empty() {
                enqueue_action(action_tx, Action::CreateProfile { nickname });
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Esc => app.close_nickname_prompt(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TextInput;
    use crate::config::TamalogConfig;

    use super::super::super::action_queue::channel;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn empty_nickname_is_not_submitted() {
        let mut app = App::new(&TamalogConfig::default());
        app.nickname_input = Some(TextInput::from_str("  "));
        let (tx, mut rx) = channel();

        handle_nickname_key(key(KeyCode::Enter), &mut app, &tx);
        assert!(rx.try_recv().is_err());
        assert!(app.nickname_input.is_some());
    }

    #[test]
    fn enter_queues_profile_creation() {
        let mut app = App::new(&TamalogConfig::default());
        app.nickname_input = Some(TextInput::new());
        let (tx, mut rx) = channel();

        "ぴよ".chars().for_each(|c| handle_nickname_key(key(KeyCode::Char(c)), &mut app, &tx));
        handle_nickname_key(key(KeyCode::Enter), &mut app, &tx);

        match rx.try_recv() {
            Ok(Action::CreateProfile { nickname }) => assert_eq!(nickname, "ぴよ"),
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
