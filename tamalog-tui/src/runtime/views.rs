use crate::app::{self, App};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod auth_form;
mod home;
mod landing;
mod nickname;
mod profile;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

/// Route a key press to whatever currently has the input.
///
/// Overlays take precedence over the view underneath: the alert first, then
/// the auth dialog, then the nickname prompt.
pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.alert.is_some() {
        handle_alert_key(key, app);
    } else if app.auth_form.is_some() {
        auth_form::handle_auth_form_key(key, app, action_tx);
    } else if app.nickname_input.is_some() {
        nickname::handle_nickname_key(key, app, action_tx);
    } else {
        handle_view_key(key, app, action_tx);
    }
}

fn handle_alert_key(key: KeyEvent, app: &mut App) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_alert();
    }
}

fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match app.current_view {
        app::View::Landing => landing::handle_landing_key(key, app, action_tx),
        app::View::Profile => profile::handle_profile_key(key, app, action_tx),
        app::View::Home => home::handle_home_key(key, app, action_tx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TamalogConfig;

    use super::super::action_queue::channel;

    #[test]
    fn alert_swallows_everything_but_dismiss() {
        let mut app = App::new(&TamalogConfig::default());
        app.is_ready = true;
        app.show_alert("Error: EMAIL_EXISTS".to_string());
        let (tx, mut rx) = channel();

        handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE), &mut app, &tx);
        handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE), &mut app, &tx);
        assert!(rx.try_recv().is_err());
        assert!(app.running);
        assert!(app.alert.is_some());

        handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut app, &tx);
        assert!(app.alert.is_none());
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = App::new(&TamalogConfig::default());
        app.show_alert("Error".to_string());
        let (tx, _rx) = channel();

        handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        assert!(!app.running);
    }
}
