use super::*;
use crate::types::{ProfileField, Sex};

fn accepts_char(field: ProfileField, c: char) -> bool {
    !field.is_numeric() || c.is_ascii_digit() || c == '.' || c == '-'
}

impl App {
    /// Enter edit mode for `field`, seeding the draft from the saved value.
    /// A draft open on another field is dropped without saving.
    pub fn begin_edit(&mut self, field: ProfileField) {
        let Some(profile) = &self.profile else {
            return;
        };
        let draft = match field {
            ProfileField::Sex => Draft::Sex(profile.sex),
            _ => Draft::Text(TextInput::from_str(&profile.field_text(field))),
        };
        self.focused_field = field;
        self.edit = EditSession::Editing { field, draft };
    }

    pub fn is_editing(&self) -> bool {
        self.edit != EditSession::Viewing
    }

    /// Write the draft into the profile and return to viewing.
    ///
    /// Returns the whole updated record, which is what gets persisted.
    pub fn commit_edit(&mut self) -> Option<Profile> {
        let EditSession::Editing { field, draft } = std::mem::take(&mut self.edit) else {
            return None;
        };
        let profile = self.profile.as_mut()?;
        profile.set_field(field, &draft.value());
        Some(profile.clone())
    }

    /// Drop any open draft. Used when the profile view is left.
    pub fn discard_edit(&mut self) {
        self.edit = EditSession::Viewing;
    }

    pub fn edit_next_field(&mut self) {
        if let Some(field) = self.edit.editing_field() {
            self.begin_edit(field.next());
        }
    }

    pub fn edit_previous_field(&mut self) {
        if let Some(field) = self.edit.editing_field() {
            self.begin_edit(field.previous());
        }
    }

    pub fn focus_next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn focus_previous_field(&mut self) {
        self.focused_field = self.focused_field.previous();
    }

    fn draft_text(&mut self) -> Option<(ProfileField, &mut TextInput)> {
        match &mut self.edit {
            EditSession::Editing {
                field,
                draft: Draft::Text(input),
            } => Some((*field, input)),
            _ => None,
        }
    }

    pub fn draft_input_char(&mut self, c: char) {
        if let Some((field, input)) = self.draft_text() {
            if accepts_char(field, c) {
                input.insert(c);
            }
        }
    }

    pub fn draft_backspace(&mut self) {
        if let Some((_, input)) = self.draft_text() {
            input.backspace();
        }
    }

    pub fn draft_move_left(&mut self) {
        if let Some((_, input)) = self.draft_text() {
            input.move_left();
        }
    }

    pub fn draft_move_right(&mut self) {
        if let Some((_, input)) = self.draft_text() {
            input.move_right();
        }
    }

    /// Step the sex selector. An unset value starts at "male".
    pub fn draft_cycle_sex(&mut self, forward: bool) {
        if let EditSession::Editing {
            draft: Draft::Sex(sex),
            ..
        } = &mut self.edit
        {
            *sex = Some(match (*sex, forward) {
                (None, _) => Sex::Male,
                (Some(s), true) => s.next(),
                (Some(s), false) => s.previous(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_profile() -> App {
        let mut app = App::new(&TamalogConfig::default());
        app.current_view = View::Profile;
        app.profile = Some(Profile {
            nickname: "piyo".to_string(),
            goal_weight: "55".to_string(),
            goal_fat: "12".to_string(),
            goal_muscle: "40".to_string(),
            height: "160".to_string(),
            sex: Some(Sex::Female),
        });
        app
    }

    fn type_str(app: &mut App, s: &str) {
        s.chars().for_each(|c| app.draft_input_char(c));
    }

    #[test]
    fn save_writes_only_the_edited_field() {
        let mut app = app_with_profile();
        let before = app.profile.clone().expect("profile");

        app.begin_edit(ProfileField::GoalWeight);
        app.draft_backspace();
        app.draft_backspace();
        type_str(&mut app, "50.5");
        let saved = app.commit_edit().expect("record to persist");

        assert_eq!(saved.goal_weight, "50.5");
        assert_eq!(
            Profile {
                goal_weight: before.goal_weight.clone(),
                ..saved.clone()
            },
            before
        );
        assert_eq!(app.profile.as_ref(), Some(&saved));
        assert_eq!(app.edit, EditSession::Viewing);
    }

    #[test]
    fn switching_fields_discards_previous_draft() {
        let mut app = app_with_profile();
        app.begin_edit(ProfileField::Nickname);
        type_str(&mut app, "-chan");

        app.begin_edit(ProfileField::Height);

        assert_eq!(app.edit.editing_field(), Some(ProfileField::Height));
        assert_eq!(app.focused_field, ProfileField::Height);
        assert_eq!(app.profile.as_ref().map(|p| p.nickname.as_str()), Some("piyo"));

        let saved = app.commit_edit().expect("record");
        assert_eq!(saved.nickname, "piyo");
    }

    #[test]
    fn tab_moves_edit_to_next_field() {
        let mut app = app_with_profile();
        app.begin_edit(ProfileField::Height);
        app.edit_next_field();
        assert_eq!(app.edit.editing_field(), Some(ProfileField::Sex));
        app.edit_previous_field();
        assert_eq!(app.edit.editing_field(), Some(ProfileField::Height));
    }

    #[test]
    fn numeric_fields_filter_letters() {
        let mut app = app_with_profile();
        app.begin_edit(ProfileField::Height);
        type_str(&mut app, "x1");
        assert_eq!(app.commit_edit().map(|p| p.height), Some("1601".to_string()));

        app.begin_edit(ProfileField::Nickname);
        type_str(&mut app, "x");
        assert_eq!(app.commit_edit().map(|p| p.nickname), Some("piyox".to_string()));
    }

    #[test]
    fn sex_selector_cycles_and_saves() {
        let mut app = app_with_profile();
        app.begin_edit(ProfileField::Sex);
        app.draft_cycle_sex(true);
        assert_eq!(app.commit_edit().and_then(|p| p.sex), Some(Sex::Other));

        app.profile.as_mut().expect("profile").sex = None;
        app.begin_edit(ProfileField::Sex);
        app.draft_cycle_sex(false);
        assert_eq!(app.commit_edit().and_then(|p| p.sex), Some(Sex::Male));
    }

    #[test]
    fn commit_without_edit_is_noop() {
        let mut app = app_with_profile();
        assert_eq!(app.commit_edit(), None);
    }

    #[test]
    fn no_edit_without_profile() {
        let mut app = App::new(&TamalogConfig::default());
        app.begin_edit(ProfileField::Nickname);
        assert!(!app.is_editing());
    }
}
