use futures::future::BoxFuture;
use futures::FutureExt;

use crate::api::{self, AuthOutcome, Backend};
use crate::app::{App, View};
use crate::types::{AuthUser, Profile};

use super::action_queue::Action;

/// A backend call in flight. It borrows only the backend, so the loop keeps
/// drawing and handling keys while it runs.
pub(super) type Pending<'a> = BoxFuture<'a, Completion>;

/// Result of a backend call, applied to the app once it settles.
pub(super) enum Completion {
    Authenticated {
        result: api::Result<AuthOutcome>,
        trial: bool,
    },
    ProfileLoaded {
        user: AuthUser,
        profile: api::Result<Option<Profile>>,
        entry_count: api::Result<usize>,
    },
    Saved {
        user: AuthUser,
        result: api::Result<()>,
    },
    ProfileCreated {
        user: AuthUser,
        profile: Profile,
        result: api::Result<()>,
    },
    SignedOut,
}

/// Apply the synchronous part of `action` and return the backend call it needs, if any.
pub(super) fn start_action<'a>(
    action: Action,
    app: &mut App,
    backend: &'a dyn Backend,
) -> Option<Pending<'a>> {
    match action {
        Action::SubmitAuth => {
            let form = app.auth_form.as_ref()?;
            let mode = form.mode;
            let credentials = form.credentials();
            Some(
                async move {
                    let result = api::submit_auth(backend, mode, &credentials).await;
                    Completion::Authenticated {
                        result,
                        trial: false,
                    }
                }
                .boxed(),
            )
        }
        Action::TrialLogin => {
            let credentials = app.demo_credentials.clone();
            Some(
                async move {
                    let result = backend
                        .sign_in(&credentials)
                        .await
                        .map(|user| AuthOutcome {
                            user,
                            is_new_user: false,
                        });
                    Completion::Authenticated { result, trial: true }
                }
                .boxed(),
            )
        }
        Action::OpenProfile => {
            app.navigate_to(View::Profile);
            enter_current_view(app, backend)
        }
        Action::OpenHome => {
            app.navigate_to(View::Home);
            enter_current_view(app, backend)
        }
        Action::SaveEdit => {
            // Local values stay committed whether or not the write lands
            let profile = app.commit_edit()?;
            let Some(user) = backend.current_user() else {
                app.set_status("Warning: not signed in, change kept locally".to_string());
                return None;
            };
            Some(
                async move {
                    let result = backend.save_profile(&user, &profile).await;
                    Completion::Saved { user, result }
                }
                .boxed(),
            )
        }
        Action::CreateProfile { nickname } => {
            let nickname = nickname.trim();
            if nickname.is_empty() {
                return None;
            }
            let Some(user) = backend.current_user() else {
                app.close_nickname_prompt();
                return None;
            };
            let profile = Profile::with_nickname(nickname);
            Some(
                async move {
                    let result = backend.save_profile(&user, &profile).await;
                    Completion::ProfileCreated {
                        user,
                        profile,
                        result,
                    }
                }
                .boxed(),
            )
        }
        Action::SignOut => Some(
            async move {
                backend.sign_out().await;
                Completion::SignedOut
            }
            .boxed(),
        ),
    }
}

/// Apply a settled backend call. May start a follow-up call.
///
/// Results arriving after their view was left are applied anyway; nothing
/// shows them until the view is opened again.
pub(super) fn complete<'a>(
    done: Completion,
    app: &mut App,
    backend: &'a dyn Backend,
) -> Option<Pending<'a>> {
    match done {
        Completion::Authenticated {
            result: Ok(outcome),
            trial,
        } => {
            tracing::info!(
                user = %outcome.user.id,
                new_user = outcome.is_new_user,
                trial,
                "signed in"
            );
            app.close_auth_form();
            app.clear_status();
            route_after_sign_in(app, backend, outcome.is_new_user)
        }
        Completion::Authenticated {
            result: Err(e),
            trial,
        } => {
            tracing::info!(trial, error = %e, "authentication rejected");
            let prefix = if trial { "Trial login error" } else { "Error" };
            app.show_alert(format!("{}: {}", prefix, e));
            None
        }
        Completion::ProfileLoaded {
            user,
            profile,
            entry_count,
        } => {
            // A failed fetch leaves the corresponding state untouched
            match profile {
                Ok(profile) => app.profile = profile,
                Err(e) => tracing::warn!(user = %user.id, error = %e, "could not load profile"),
            }
            match entry_count {
                Ok(count) => app.entry_count = count,
                Err(e) => tracing::warn!(user = %user.id, error = %e, "could not count entries"),
            }
            app.maybe_prompt_nickname();
            None
        }
        Completion::Saved { user, result } => {
            match result {
                Ok(()) => app.set_status("Saved".to_string()),
                Err(e) => {
                    tracing::warn!(user = %user.id, error = %e, "profile save failed");
                    app.set_status(format!("Warning: profile not saved: {}", e));
                }
            }
            None
        }
        Completion::ProfileCreated {
            user,
            profile,
            result,
        } => {
            match result {
                Ok(()) => {
                    app.set_status(format!("Welcome, {}!", profile.nickname));
                    app.profile = Some(profile);
                    app.close_nickname_prompt();
                }
                Err(e) => {
                    tracing::warn!(user = %user.id, error = %e, "profile creation failed");
                    app.set_status(format!("Could not create profile: {}", e));
                }
            }
            None
        }
        Completion::SignedOut => {
            app.reset_to_landing();
            app.set_status("Signed out".to_string());
            None
        }
    }
}

/// Run a chain of backend calls to the end, applying each result.
async fn drive<'a>(mut next: Option<Pending<'a>>, app: &mut App, backend: &'a dyn Backend) {
    while let Some(task) = next {
        next = complete(task.await, app, backend);
    }
}

/// Route an already authenticated user and load what the destination shows.
/// Used before the UI starts, when there is nothing to keep responsive.
pub(crate) async fn enter_app(app: &mut App, backend: &dyn Backend, is_new_user: bool) {
    let next = route_after_sign_in(app, backend, is_new_user);
    drive(next, app, backend).await;
}

/// Without a viewport the route is undecided and the app stays where it is.
fn route_after_sign_in<'a>(
    app: &mut App,
    backend: &'a dyn Backend,
    is_new_user: bool,
) -> Option<Pending<'a>> {
    if app.navigate_to_app(is_new_user).is_none() {
        tracing::warn!("no viewport width, staying on the current screen");
        return None;
    }
    enter_current_view(app, backend)
}

fn enter_current_view<'a>(app: &mut App, backend: &'a dyn Backend) -> Option<Pending<'a>> {
    match app.current_view {
        View::Profile => {
            app.attach_auth(backend.subscribe());
            load_profile_data(backend)
        }
        View::Home => load_profile_data(backend),
        View::Landing => None,
    }
}

/// Fetch the signed-in user's profile and entry count.
fn load_profile_data(backend: &dyn Backend) -> Option<Pending<'_>> {
    let user = backend.current_user()?;
    Some(
        async move {
            let profile = backend.get_profile(&user).await;
            let entry_count = backend.entry_count(&user).await;
            Completion::ProfileLoaded {
                user,
                profile,
                entry_count,
            }
        }
        .boxed(),
    )
}
