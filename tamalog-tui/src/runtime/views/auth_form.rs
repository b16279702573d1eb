use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_auth_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => app.close_auth_form(),
        KeyCode::Enter => enqueue_action(action_tx, Action::SubmitAuth),
        // Switch between login and sign-up
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.toggle_auth_mode();
        }
        KeyCode::F(2) => app.toggle_auth_mode(),
        _ => {
            if let Some(form) = app.auth_form.as_mut() {
                match key.code {
                    KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                        form.next_field();
                    }
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        form.focused_input().insert(c);
                    }
                    KeyCode::Backspace => form.focused_input().backspace(),
                    KeyCode::Left => form.focused_input().move_left(),
                    KeyCode::Right => form.focused_input().move_right(),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AuthFormField;
    use crate::config::TamalogConfig;
    use crate::types::{AuthMode, Credentials};

    use super::super::super::action_queue::channel;

    fn open_form() -> App {
        let mut app = App::new(&TamalogConfig::default());
        app.is_ready = true;
        app.open_auth_form();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_fills_focused_field() {
        let mut app = open_form();
        let (tx, _rx) = channel();

        "a@b.jp".chars().for_each(|c| handle_auth_form_key(key(KeyCode::Char(c)), &mut app, &tx));
        handle_auth_form_key(key(KeyCode::Tab), &mut app, &tx);
        "pass".chars().for_each(|c| handle_auth_form_key(key(KeyCode::Char(c)), &mut app, &tx));
        handle_auth_form_key(key(KeyCode::Backspace), &mut app, &tx);

        let form = app.auth_form.as_ref().expect("form");
        assert_eq!(form.focused_field, AuthFormField::Password);
        assert_eq!(form.credentials(), Credentials::new("a@b.jp", "pas"));
    }

    #[test]
    fn ctrl_t_toggles_mode() {
        let mut app = open_form();
        let (tx, _rx) = channel();
        handle_auth_form_key(
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        assert_eq!(app.auth_form.as_ref().map(|f| f.mode), Some(AuthMode::SignUp));
        assert!(app.auth_form.as_ref().is_some_and(|f| f.email.value.is_empty()));
    }

    #[test]
    fn enter_submits_and_esc_closes() {
        let mut app = open_form();
        let (tx, mut rx) = channel();

        handle_auth_form_key(key(KeyCode::Enter), &mut app, &tx);
        assert!(matches!(rx.try_recv(), Ok(Action::SubmitAuth)));

        handle_auth_form_key(key(KeyCode::Esc), &mut app, &tx);
        assert!(app.auth_form.is_none());
    }
}
