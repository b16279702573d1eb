use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_landing_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        // "ろぐいん"
        KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Enter => app.open_auth_form(),
        // "おためし"
        KeyCode::Char('t') | KeyCode::Char('T') => {
            if app.is_ready {
                enqueue_action(action_tx, Action::TrialLogin);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TamalogConfig;
    use crossterm::event::KeyModifiers;

    use super::super::super::action_queue::channel;

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_landing_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    #[test]
    fn buttons_do_nothing_until_ready() {
        let mut app = App::new(&TamalogConfig::default());
        assert!(press(&mut app, KeyCode::Char('t')).is_none());
        assert!(press(&mut app, KeyCode::Char('l')).is_none());
        assert!(app.auth_form.is_none());
    }

    #[test]
    fn trial_button_queues_trial_login() {
        let mut app = App::new(&TamalogConfig::default());
        app.is_ready = true;
        assert!(matches!(
            press(&mut app, KeyCode::Char('t')),
            Some(Action::TrialLogin)
        ));
    }

    #[test]
    fn login_button_opens_dialog() {
        let mut app = App::new(&TamalogConfig::default());
        app.is_ready = true;
        assert!(press(&mut app, KeyCode::Enter).is_none());
        assert!(app.auth_form.is_some());
    }
}
