use crate::types::{AuthMode, Credentials, ProfileField, Sex};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Landing,
    Profile,
    Home,
}

/// Home screen layout, picked from the viewport width at sign-in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HomeLayout {
    Compact,
    Wide,
}

/// Where a successful sign-in sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ProfileSetup,
    Mobile,
    Desktop,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::ProfileSetup => "/create-post/mobile-prifile",
            Route::Mobile => "/mobile-page",
            Route::Desktop => "/components/PC",
        }
    }
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        self.value[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthFormField {
    Email,
    Password,
}

/// Contents of the login / sign-up dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: TextInput,
    pub password: TextInput,
    pub focused_field: AuthFormField,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: TextInput::new(),
            password: TextInput::new(),
            focused_field: AuthFormField::Email,
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            AuthFormField::Email => &mut self.email,
            AuthFormField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            AuthFormField::Email => AuthFormField::Password,
            AuthFormField::Password => AuthFormField::Email,
        };
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.value.trim(), &self.password.value)
    }
}

/// What is being typed while a field is in edit mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Text(TextInput),
    Sex(Option<Sex>),
}

impl Draft {
    pub fn value(&self) -> String {
        match self {
            Draft::Text(input) => input.value.clone(),
            Draft::Sex(sex) => sex.map(|s| s.as_str().to_string()).unwrap_or_default(),
        }
    }
}

/// Profile edit state: at most one field is editable at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditSession {
    #[default]
    Viewing,
    Editing { field: ProfileField, draft: Draft },
}

impl EditSession {
    pub fn editing_field(&self) -> Option<ProfileField> {
        match self {
            EditSession::Viewing => None,
            EditSession::Editing { field, .. } => Some(*field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_handles_multibyte_characters() {
        let mut input = TextInput::from_str("ぴよ");
        input.backspace();
        assert_eq!(input.value, "ぴ");
        input.insert('ー');
        assert_eq!(input.value, "ぴー");
        input.move_left();
        input.move_left();
        assert_eq!(input.cursor, 0);
        input.move_right();
        assert_eq!(input.split_at_cursor(), ("ぴ", "ー"));
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = TextInput::new();
        input.backspace();
        assert_eq!(input, TextInput::new());
    }

    #[test]
    fn auth_form_trims_email_only() {
        let mut form = AuthForm::new(AuthMode::Login);
        form.email = TextInput::from_str(" piyo@example.com ");
        form.password = TextInput::from_str(" pw ");
        let creds = form.credentials();
        assert_eq!(creds.email, "piyo@example.com");
        assert_eq!(creds.password, " pw ");
    }

    #[test]
    fn routes_map_to_paths() {
        assert_eq!(Route::ProfileSetup.path(), "/create-post/mobile-prifile");
        assert_eq!(Route::Mobile.path(), "/mobile-page");
        assert_eq!(Route::Desktop.path(), "/components/PC");
    }
}
