use async_trait::async_trait;
use firebase::{AuthClient, AuthSession, FirestoreClient};
use tokio::sync::{watch, Mutex};

use super::dto::{profile_from_document, profile_to_document};
use super::{BackendError, IdentityService, ProfileStore, Result};
use crate::config::TamalogConfig;
use crate::session_store;
use crate::types::{AuthUser, Credentials, Profile};

const USERS: &str = "users";
const PROFILE_COLLECTION: &str = "profile";
const PROFILE_DOC: &str = "current";
const ENTRIES_COLLECTION: &str = "entries";

fn user_of(session: &AuthSession) -> AuthUser {
    AuthUser {
        id: session.user_id.clone(),
        email: session.email.clone(),
    }
}

/// Firebase Auth + Firestore, persisting the session between runs.
pub struct FirebaseBackend {
    auth: AuthClient,
    firestore: FirestoreClient,
    session: Mutex<Option<AuthSession>>,
    user_tx: watch::Sender<Option<AuthUser>>,
}

impl FirebaseBackend {
    pub fn new(cfg: &TamalogConfig) -> Self {
        let (user_tx, _) = watch::channel(None);
        Self {
            auth: AuthClient::new(&cfg.api_key).with_endpoints(&cfg.auth_url, &cfg.token_url),
            firestore: FirestoreClient::with_base_url(&cfg.firestore_url, &cfg.project_id),
            session: Mutex::new(None),
            user_tx,
        }
    }

    /// Resume a session saved by an earlier run, refreshing it if the ID token expired.
    pub async fn restore(&self, session: AuthSession) -> Result<AuthUser> {
        let session = if session.is_expired() {
            self.auth.refresh(&session).await?
        } else {
            session
        };
        Ok(self.install(session).await)
    }

    async fn install(&self, session: AuthSession) -> AuthUser {
        if let Err(e) = session_store::save_session(&session) {
            tracing::warn!("could not persist session: {:#}", e);
        }
        let user = user_of(&session);
        *self.session.lock().await = Some(session);
        self.user_tx.send_replace(Some(user.clone()));
        user
    }

    /// ID token for `user`, refreshed when close to expiry.
    async fn id_token(&self, user: &AuthUser) -> Result<String> {
        let mut guard = self.session.lock().await;
        let session = guard
            .as_mut()
            .filter(|s| s.user_id == user.id)
            .ok_or(BackendError::SignedOut)?;

        if session.is_expired() {
            let refreshed = self.auth.refresh(session).await?;
            if let Err(e) = session_store::save_session(&refreshed) {
                tracing::warn!("could not persist refreshed session: {:#}", e);
            }
            *session = refreshed;
        }

        Ok(session.id_token.clone())
    }
}

#[async_trait]
impl IdentityService for FirebaseBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser> {
        let session = self
            .auth
            .sign_in_with_password(&credentials.email, &credentials.password)
            .await?;
        Ok(self.install(session).await)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser> {
        let session = self
            .auth
            .sign_up(&credentials.email, &credentials.password)
            .await?;
        Ok(self.install(session).await)
    }

    async fn sign_out(&self) {
        *self.session.lock().await = None;
        if let Err(e) = session_store::clear_session() {
            tracing::warn!("could not remove session file: {:#}", e);
        }
        self.user_tx.send_replace(None);
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.user_tx.subscribe()
    }
}

#[async_trait]
impl ProfileStore for FirebaseBackend {
    async fn get_profile(&self, user: &AuthUser) -> Result<Option<Profile>> {
        let token = self.id_token(user).await?;
        let doc = self
            .firestore
            .get_document(&token, &[USERS, user.id.as_str(), PROFILE_COLLECTION, PROFILE_DOC])
            .await?;
        Ok(doc.as_ref().map(profile_from_document))
    }

    async fn entry_count(&self, user: &AuthUser) -> Result<usize> {
        let token = self.id_token(user).await?;
        let count = self
            .firestore
            .count(&token, &[USERS, user.id.as_str()], ENTRIES_COLLECTION)
            .await?;
        usize::try_from(count).map_err(|e| BackendError::Store(e.to_string()))
    }

    async fn save_profile(&self, user: &AuthUser, profile: &Profile) -> Result<()> {
        let token = self.id_token(user).await?;
        self.firestore
            .set_document(
                &token,
                &[USERS, user.id.as_str(), PROFILE_COLLECTION, PROFILE_DOC],
                &profile_to_document(profile),
            )
            .await?;
        tracing::info!(user_id = %user.id, "profile saved");
        Ok(())
    }
}
