use std::fmt;

/// Sex as stored on the profile. Anything other than "male" or "female" reads as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }

    /// Empty text means "not set".
    pub fn parse(s: &str) -> Option<Sex> {
        match s {
            "" => None,
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => Some(Sex::Other),
        }
    }

    /// Cycle order used by the sex selector.
    pub fn next(self) -> Sex {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Other,
            Sex::Other => Sex::Male,
        }
    }

    pub fn previous(self) -> Sex {
        match self {
            Sex::Male => Sex::Other,
            Sex::Female => Sex::Male,
            Sex::Other => Sex::Female,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The editable fields of a profile, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Nickname,
    GoalWeight,
    GoalFat,
    GoalMuscle,
    Height,
    Sex,
}

impl ProfileField {
    pub const ALL: [ProfileField; 6] = [
        ProfileField::Nickname,
        ProfileField::GoalWeight,
        ProfileField::GoalFat,
        ProfileField::GoalMuscle,
        ProfileField::Height,
        ProfileField::Sex,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Nickname => "Nickname",
            ProfileField::GoalWeight => "Goal weight",
            ProfileField::GoalFat => "Goal fat",
            ProfileField::GoalMuscle => "Goal muscle",
            ProfileField::Height => "Height",
            ProfileField::Sex => "Sex",
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            ProfileField::GoalWeight | ProfileField::GoalFat | ProfileField::GoalMuscle => {
                Some("kg")
            }
            ProfileField::Height => Some("cm"),
            ProfileField::Nickname | ProfileField::Sex => None,
        }
    }

    /// Numeric fields only accept digits, a sign and a decimal point in the editor.
    pub fn is_numeric(self) -> bool {
        self.unit().is_some()
    }

    pub fn next(self) -> ProfileField {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> ProfileField {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// The per-user profile document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub nickname: String,
    pub goal_weight: String,
    pub goal_fat: String,
    pub goal_muscle: String,
    pub height: String,
    pub sex: Option<Sex>,
}

impl Profile {
    /// A fresh profile as created by the nickname prompt.
    pub fn with_nickname(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            ..Self::default()
        }
    }

    pub fn field_text(&self, field: ProfileField) -> String {
        match field {
            ProfileField::Nickname => self.nickname.clone(),
            ProfileField::GoalWeight => self.goal_weight.clone(),
            ProfileField::GoalFat => self.goal_fat.clone(),
            ProfileField::GoalMuscle => self.goal_muscle.clone(),
            ProfileField::Height => self.height.clone(),
            ProfileField::Sex => self.sex.map(|s| s.as_str().to_string()).unwrap_or_default(),
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: &str) {
        match field {
            ProfileField::Nickname => self.nickname = value.to_string(),
            ProfileField::GoalWeight => self.goal_weight = value.to_string(),
            ProfileField::GoalFat => self.goal_fat = value.to_string(),
            ProfileField::GoalMuscle => self.goal_muscle = value.to_string(),
            ProfileField::Height => self.height = value.to_string(),
            ProfileField::Sex => self.sex = Sex::parse(value),
        }
    }

    /// Targets need both a height and a sex.
    pub fn can_calculate(&self) -> bool {
        !self.height.is_empty() && self.sex.is_some()
    }
}

/// The signed-in user as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    SignUp,
}

impl AuthMode {
    pub fn toggle(self) -> AuthMode {
        match self {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
