use crate::config::TamalogConfig;
use crate::metrics::{TargetError, Targets};
use crate::tier::Tier;
use crate::types::{AuthMode, AuthUser, Credentials, Profile};
use tokio::sync::watch;

mod edit;
mod navigation;
mod state;
pub use state::{
    AuthForm, AuthFormField, Draft, EditSession, HomeLayout, Route, TextInput, View,
};

pub struct App {
    pub running: bool,
    pub status_message: Option<String>,
    pub current_view: View,
    pub home_layout: HomeLayout,

    // Landing buttons stay disabled until the terminal is set up
    pub is_ready: bool,
    pub auth_form: Option<AuthForm>,

    /// Blocking notification. While set, every key except dismiss is swallowed.
    pub alert: Option<String>,

    // Auth state as seen through the profile view's subscription
    pub auth_rx: Option<watch::Receiver<Option<AuthUser>>>,
    pub is_logged_in: bool,

    // Profile data
    pub profile: Option<Profile>,
    pub entry_count: usize,
    pub edit: EditSession,
    pub focused_field: crate::types::ProfileField,
    pub targets: Option<Targets>,
    pub nickname_input: Option<TextInput>,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    /// Last known viewport width in pixels; `None` when there is no terminal.
    pub viewport_width: Option<u32>,

    // Config values used at runtime
    pub mobile_breakpoint_px: u32,
    pub cell_width_px: u32,
    pub demo_credentials: Credentials,
}

impl App {
    pub fn new(cfg: &TamalogConfig) -> Self {
        Self {
            running: true,
            status_message: None,
            current_view: View::Landing,
            home_layout: HomeLayout::Wide,
            is_ready: false,
            auth_form: None,
            alert: None,
            auth_rx: None,
            is_logged_in: false,
            profile: None,
            entry_count: 0,
            edit: EditSession::Viewing,
            focused_field: crate::types::ProfileField::Nickname,
            targets: None,
            nickname_input: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            viewport_width: None,
            mobile_breakpoint_px: cfg.mobile_breakpoint_px,
            cell_width_px: cfg.cell_width_px,
            demo_credentials: cfg.demo_credentials(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn show_alert(&mut self, message: String) {
        tracing::debug!(%message, "alert");
        self.alert = Some(message);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Open the login dialog (the "ろぐいん" button).
    pub fn open_auth_form(&mut self) {
        if !self.is_ready {
            return;
        }
        self.auth_form = Some(AuthForm::new(AuthMode::Login));
    }

    pub fn close_auth_form(&mut self) {
        self.auth_form = None;
    }

    pub fn toggle_auth_mode(&mut self) {
        if let Some(form) = &mut self.auth_form {
            form.mode = form.mode.toggle();
        }
    }

    /// Subscribe the profile view to auth state changes.
    pub fn attach_auth(&mut self, mut rx: watch::Receiver<Option<AuthUser>>) {
        self.is_logged_in = rx.borrow_and_update().is_some();
        self.auth_rx = Some(rx);
    }

    pub fn detach_auth(&mut self) {
        self.auth_rx = None;
    }

    /// Pick up auth changes delivered since the last frame.
    pub fn sync_auth_state(&mut self) {
        let Some(rx) = &mut self.auth_rx else {
            return;
        };
        if rx.has_changed().unwrap_or(false) {
            self.is_logged_in = rx.borrow_and_update().is_some();
            self.maybe_prompt_nickname();
        }
    }

    /// A signed-in user without a profile is asked for a nickname first.
    pub fn maybe_prompt_nickname(&mut self) {
        if self.current_view == View::Profile
            && self.is_logged_in
            && self.profile.is_none()
            && self.nickname_input.is_none()
        {
            self.nickname_input = Some(TextInput::new());
        }
    }

    pub fn close_nickname_prompt(&mut self) {
        self.nickname_input = None;
    }

    pub fn tier(&self) -> Tier {
        Tier::for_count(self.entry_count)
    }

    pub fn can_calculate(&self) -> bool {
        self.profile.as_ref().is_some_and(Profile::can_calculate)
    }

    /// Recompute targets from the saved height and sex, replacing earlier results.
    pub fn calculate_targets(&mut self) {
        let Some(profile) = self.profile.as_ref().filter(|p| p.can_calculate()) else {
            self.set_status("Set height and sex to calculate targets".to_string());
            return;
        };
        let Some(sex) = profile.sex else {
            return;
        };

        match Targets::calculate(&profile.height, sex) {
            Ok(targets) => {
                self.targets = Some(targets);
                self.clear_status();
            }
            Err(e @ TargetError::InvalidHeight(_)) => {
                self.targets = None;
                self.set_status(e.to_string());
            }
        }
    }
}
