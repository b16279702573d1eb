use super::*;

impl Route {
    /// Destination after authentication.
    ///
    /// New accounts always go to profile setup. Everyone else gets the mobile or
    /// desktop page depending on the viewport width. Without a viewport there is
    /// nowhere to navigate, so the result is `None`.
    pub fn decide(is_new_user: bool, viewport_width: Option<u32>, breakpoint: u32) -> Option<Route> {
        let width = viewport_width?;
        if is_new_user {
            return Some(Route::ProfileSetup);
        }
        if width < breakpoint {
            Some(Route::Mobile)
        } else {
            Some(Route::Desktop)
        }
    }
}

impl App {
    pub fn navigate_to(&mut self, view: View) {
        if self.current_view == View::Profile && view != View::Profile {
            // Leaving the profile screen drops unsaved drafts, results and the subscription
            self.discard_edit();
            self.targets = None;
            self.nickname_input = None;
            self.detach_auth();
        }
        self.current_view = view;
    }

    /// Route after a successful sign-in or sign-up. Returns where we went.
    pub fn navigate_to_app(&mut self, is_new_user: bool) -> Option<Route> {
        let route = Route::decide(is_new_user, self.viewport_width, self.mobile_breakpoint_px)?;
        tracing::info!(path = route.path(), "navigating");

        match route {
            Route::ProfileSetup => self.navigate_to(View::Profile),
            Route::Mobile => {
                self.home_layout = HomeLayout::Compact;
                self.navigate_to(View::Home);
            }
            Route::Desktop => {
                self.home_layout = HomeLayout::Wide;
                self.navigate_to(View::Home);
            }
        }
        Some(route)
    }

    /// Back to the landing screen after signing out.
    pub fn reset_to_landing(&mut self) {
        self.navigate_to(View::Landing);
        self.profile = None;
        self.entry_count = 0;
        self.is_logged_in = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProfileField;

    const BREAKPOINT: u32 = 768;

    #[test]
    fn new_users_always_set_up_profile() {
        for width in [320, 1920] {
            assert_eq!(
                Route::decide(true, Some(width), BREAKPOINT),
                Some(Route::ProfileSetup)
            );
        }
    }

    #[test]
    fn existing_users_split_on_breakpoint() {
        assert_eq!(Route::decide(false, Some(500), BREAKPOINT), Some(Route::Mobile));
        assert_eq!(Route::decide(false, Some(767), BREAKPOINT), Some(Route::Mobile));
        assert_eq!(Route::decide(false, Some(768), BREAKPOINT), Some(Route::Desktop));
        assert_eq!(Route::decide(false, Some(1024), BREAKPOINT), Some(Route::Desktop));
    }

    #[test]
    fn no_viewport_means_no_navigation() {
        assert_eq!(Route::decide(true, None, BREAKPOINT), None);
        assert_eq!(Route::decide(false, None, BREAKPOINT), None);

        let mut app = App::new(&TamalogConfig::default());
        assert_eq!(app.navigate_to_app(false), None);
        assert_eq!(app.current_view, View::Landing);
    }

    #[test]
    fn navigate_to_app_picks_view_and_layout() {
        let mut app = App::new(&TamalogConfig::default());
        app.viewport_width = Some(500);
        assert_eq!(app.navigate_to_app(false), Some(Route::Mobile));
        assert_eq!(app.current_view, View::Home);
        assert_eq!(app.home_layout, HomeLayout::Compact);

        app.viewport_width = Some(1024);
        assert_eq!(app.navigate_to_app(false), Some(Route::Desktop));
        assert_eq!(app.home_layout, HomeLayout::Wide);

        assert_eq!(app.navigate_to_app(true), Some(Route::ProfileSetup));
        assert_eq!(app.current_view, View::Profile);
    }

    #[test]
    fn leaving_profile_discards_draft_and_targets() {
        let mut app = App::new(&TamalogConfig::default());
        app.current_view = View::Profile;
        app.profile = Some(Profile {
            height: "170".to_string(),
            sex: Some(crate::types::Sex::Male),
            ..Profile::with_nickname("piyo")
        });
        app.calculate_targets();
        app.begin_edit(ProfileField::Nickname);
        app.draft_input_char('!');
        let (_tx, rx) = watch::channel(None);
        app.attach_auth(rx);

        app.navigate_to(View::Home);

        assert!(!app.is_editing());
        assert!(app.targets.is_none());
        assert!(app.auth_rx.is_none());
        assert_eq!(app.profile.as_ref().map(|p| p.nickname.as_str()), Some("piyo"));
    }
}
