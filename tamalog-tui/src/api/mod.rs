//! Seams to the identity service and the profile document store.
//!
//! The UI only talks to these traits, so the Firebase client and the in-memory
//! dev backend are interchangeable.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::types::{AuthMode, AuthUser, Credentials, Profile};

mod dev_backend;
mod dto;
mod firebase_backend;

pub use dev_backend::DevBackend;
pub use firebase_backend::FirebaseBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Rejection from the identity service, message passed through unchanged.
    #[error("{0}")]
    Auth(String),

    #[error("Not signed in")]
    SignedOut,

    #[error("Store error: {0}")]
    Store(String),

    /// The identity service could not be reached or answered with something
    /// unreadable. Says nothing about the credentials themselves.
    #[error("{0}")]
    Unavailable(String),
}

impl BackendError {
    /// Only an explicit rejection means stored credentials are no good.
    pub fn invalidates_session(&self) -> bool {
        matches!(self, BackendError::Auth(_))
    }
}

impl From<::firebase::AuthError> for BackendError {
    fn from(e: ::firebase::AuthError) -> Self {
        match e {
            ::firebase::AuthError::Rejected(message) => BackendError::Auth(message),
            other => BackendError::Unavailable(other.to_string()),
        }
    }
}

impl From<::firebase::FirestoreError> for BackendError {
    fn from(e: ::firebase::FirestoreError) -> Self {
        match e {
            ::firebase::FirestoreError::Unauthorized => BackendError::SignedOut,
            other => BackendError::Store(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser>;

    async fn sign_out(&self);

    /// Current user now and on every change. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;

    fn current_user(&self) -> Option<AuthUser> {
        let rx = self.subscribe();
        let user = rx.borrow().clone();
        user
    }
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The user's profile, `None` if it was never created.
    async fn get_profile(&self, user: &AuthUser) -> Result<Option<Profile>>;

    async fn entry_count(&self, user: &AuthUser) -> Result<usize>;

    /// Overwrite the whole stored profile.
    async fn save_profile(&self, user: &AuthUser, profile: &Profile) -> Result<()>;
}

pub trait Backend: IdentityService + ProfileStore {}

impl<T: IdentityService + ProfileStore> Backend for T {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub user: AuthUser,
    pub is_new_user: bool,
}

/// Sign in or create an account depending on `mode`.
pub async fn submit_auth<I: IdentityService + ?Sized>(
    identity: &I,
    mode: AuthMode,
    credentials: &Credentials,
) -> Result<AuthOutcome> {
    match mode {
        AuthMode::Login => {
            let user = identity.sign_in(credentials).await?;
            Ok(AuthOutcome {
                user,
                is_new_user: false,
            })
        }
        AuthMode::SignUp => {
            let user = identity.sign_up(credentials).await?;
            Ok(AuthOutcome {
                user,
                is_new_user: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_marks_new_user() {
        let backend = DevBackend::empty();
        let creds = Credentials::new("new@example.com", "secret1");

        let outcome = submit_auth(&backend, AuthMode::SignUp, &creds).await.unwrap();

        assert!(outcome.is_new_user);
        assert_eq!(outcome.user.email, "new@example.com");
        assert_eq!(backend.current_user(), Some(outcome.user));
    }

    #[tokio::test]
    async fn login_is_never_new_user() {
        let backend = DevBackend::empty();
        let creds = Credentials::new("old@example.com", "secret1");
        backend.sign_up(&creds).await.unwrap();
        backend.sign_out().await;

        let outcome = submit_auth(&backend, AuthMode::Login, &creds).await.unwrap();
        assert!(!outcome.is_new_user);
    }

    #[tokio::test]
    async fn failures_carry_upstream_message() {
        let backend = DevBackend::empty();
        let creds = Credentials::new("nobody@example.com", "secret1");

        let err = submit_auth(&backend, AuthMode::Login, &creds)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "INVALID_LOGIN_CREDENTIALS");
    }

    #[test]
    fn firebase_rejection_maps_verbatim() {
        let err: BackendError = ::firebase::AuthError::Rejected("EMAIL_EXISTS".into()).into();
        assert_eq!(err.to_string(), "EMAIL_EXISTS");

        let err: BackendError = ::firebase::FirestoreError::Unauthorized.into();
        assert!(matches!(err, BackendError::SignedOut));
    }

    #[test]
    fn transport_failures_keep_the_session() {
        let rejected: BackendError =
            ::firebase::AuthError::Rejected("TOKEN_EXPIRED".into()).into();
        assert!(rejected.invalidates_session());

        let offline: BackendError =
            ::firebase::AuthError::ResponseError("connection refused".into()).into();
        assert!(matches!(offline, BackendError::Unavailable(_)));
        assert!(!offline.invalidates_session());
        assert_eq!(offline.to_string(), "ResponseError: connection refused");

        let garbled: BackendError =
            ::firebase::AuthError::ParsingError("expected value".into()).into();
        assert!(!garbled.invalidates_session());
    }
}
