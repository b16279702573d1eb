use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_home_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => {
            enqueue_action(action_tx, Action::OpenProfile);
        }
        KeyCode::Char('o') | KeyCode::Char('O') => enqueue_action(action_tx, Action::SignOut),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::View;
    use crate::config::TamalogConfig;
    use crossterm::event::KeyModifiers;

    use super::super::super::action_queue::channel;

    #[test]
    fn p_opens_profile() {
        let mut app = App::new(&TamalogConfig::default());
        app.current_view = View::Home;
        let (tx, mut rx) = channel();

        handle_home_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE), &mut app, &tx);

        assert!(matches!(rx.try_recv(), Ok(Action::OpenProfile)));
    }
}
