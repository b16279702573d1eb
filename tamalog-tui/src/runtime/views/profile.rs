use crate::app::{App, Draft, EditSession};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_profile_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.is_editing() {
        handle_editing_key(key, app, action_tx);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.focus_next_field(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => app.focus_previous_field(),
        // Edit button of the focused row
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
            app.begin_edit(app.focused_field);
        }
        // "けいさん"
        KeyCode::Char('c') | KeyCode::Char('C') => app.calculate_targets(),
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
            enqueue_action(action_tx, Action::OpenHome);
        }
        KeyCode::Char('o') | KeyCode::Char('O') => enqueue_action(action_tx, Action::SignOut),
        _ => {}
    }
}

fn handle_editing_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let editing_sex = matches!(
        app.edit,
        EditSession::Editing {
            draft: Draft::Sex(_),
            ..
        }
    );

    match key.code {
        // Save button of the row in edit
        KeyCode::Enter => enqueue_action(action_tx, Action::SaveEdit),
        KeyCode::Tab => app.edit_next_field(),
        KeyCode::BackTab => app.edit_previous_field(),
        // There is no cancel: leaving the screen is the only way out of an edit
        KeyCode::Esc => enqueue_action(action_tx, Action::OpenHome),
        KeyCode::Left if editing_sex => app.draft_cycle_sex(false),
        KeyCode::Right | KeyCode::Char(' ') if editing_sex => app.draft_cycle_sex(true),
        KeyCode::Left => app.draft_move_left(),
        KeyCode::Right => app.draft_move_right(),
        KeyCode::Backspace => app.draft_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.draft_input_char(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::View;
    use crate::config::TamalogConfig;
    use crate::types::{Profile, ProfileField, Sex};

    use super::super::super::action_queue::channel;

    fn test_app() -> App {
        let mut app = App::new(&TamalogConfig::default());
        app.current_view = View::Profile;
        app.is_logged_in = true;
        app.profile = Some(Profile {
            height: "170".to_string(),
            ..Profile::with_nickname("piyo")
        });
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_begins_edit_on_focused_row_then_queues_save() {
        let mut app = test_app();
        let (tx, mut rx) = channel();

        handle_profile_key(key(KeyCode::Down), &mut app, &tx);
        handle_profile_key(key(KeyCode::Enter), &mut app, &tx);
        assert_eq!(app.edit.editing_field(), Some(ProfileField::GoalWeight));
        assert!(rx.try_recv().is_err());

        handle_profile_key(key(KeyCode::Char('5')), &mut app, &tx);
        handle_profile_key(key(KeyCode::Enter), &mut app, &tx);
        assert!(matches!(rx.try_recv(), Ok(Action::SaveEdit)));
    }

    #[test]
    fn letters_type_into_draft_while_editing() {
        let mut app = test_app();
        let (tx, _rx) = channel();

        app.begin_edit(ProfileField::Nickname);
        handle_profile_key(key(KeyCode::Char('q')), &mut app, &tx);

        assert!(app.running);
        assert_eq!(
            app.commit_edit().map(|p| p.nickname),
            Some("piyoq".to_string())
        );
    }

    #[test]
    fn space_cycles_sex_selector() {
        let mut app = test_app();
        let (tx, _rx) = channel();

        app.begin_edit(ProfileField::Sex);
        handle_profile_key(key(KeyCode::Char(' ')), &mut app, &tx);
        handle_profile_key(key(KeyCode::Right), &mut app, &tx);

        assert_eq!(app.commit_edit().and_then(|p| p.sex), Some(Sex::Female));
    }

    #[test]
    fn calculate_needs_sex() {
        let mut app = test_app();
        let (tx, _rx) = channel();

        handle_profile_key(key(KeyCode::Char('c')), &mut app, &tx);
        assert!(app.targets.is_none());

        if let Some(profile) = app.profile.as_mut() {
            profile.sex = Some(Sex::Male);
        }
        handle_profile_key(key(KeyCode::Char('c')), &mut app, &tx);
        assert!(app.targets.is_some());
    }

    #[test]
    fn esc_while_editing_leaves_screen() {
        let mut app = test_app();
        let (tx, mut rx) = channel();
        app.begin_edit(ProfileField::Height);

        handle_profile_key(key(KeyCode::Esc), &mut app, &tx);

        assert!(matches!(rx.try_recv(), Ok(Action::OpenHome)));
    }
}
