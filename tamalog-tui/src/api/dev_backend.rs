use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use super::{BackendError, IdentityService, ProfileStore, Result};
use crate::types::{AuthUser, Credentials, Profile, Sex};

const MIN_PASSWORD_LEN: usize = 6;

/// In-memory identity service and profile store for `tamalog-tui dev` and tests.
///
/// Error messages mirror the ones Firebase returns so the UI shows the same text.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
    user_tx: Arc<watch::Sender<Option<AuthUser>>>,
}

#[derive(Debug, Default)]
struct DevStore {
    accounts: Vec<DevAccount>,
    profiles: HashMap<String, Profile>,
    entry_counts: HashMap<String, usize>,
    saves: usize,
    fail_saves: bool,
}

#[derive(Debug)]
struct DevAccount {
    user: AuthUser,
    password: String,
}

impl DevBackend {
    pub fn empty() -> Self {
        let (user_tx, _) = watch::channel(None);
        Self {
            store: Arc::new(Mutex::new(DevStore::default())),
            user_tx: Arc::new(user_tx),
        }
    }

    /// Backend with the demo account already set up, like the shared trial account.
    pub fn seeded(demo: &Credentials) -> Self {
        let backend = Self::empty();
        let user = backend.add_account(demo);
        backend.put_profile(
            &user,
            Profile {
                nickname: "ぴよ".to_string(),
                goal_weight: "52".to_string(),
                goal_fat: "11".to_string(),
                goal_muscle: "38".to_string(),
                height: "158".to_string(),
                sex: Some(Sex::Female),
            },
        );
        backend.set_entry_count(&user, 12);
        backend
    }

    fn store(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_account(&self, credentials: &Credentials) -> AuthUser {
        let mut store = self.store();
        let user = AuthUser {
            id: format!("dev-{}", store.accounts.len() + 1),
            email: credentials.email.clone(),
        };
        store.accounts.push(DevAccount {
            user: user.clone(),
            password: credentials.password.clone(),
        });
        user
    }

    pub fn put_profile(&self, user: &AuthUser, profile: Profile) {
        self.store().profiles.insert(user.id.clone(), profile);
    }

    pub fn profile_of(&self, user: &AuthUser) -> Option<Profile> {
        self.store().profiles.get(&user.id).cloned()
    }

    pub fn set_entry_count(&self, user: &AuthUser, count: usize) {
        self.store().entry_counts.insert(user.id.clone(), count);
    }

    /// Number of successful `save_profile` calls so far.
    #[cfg(test)]
    pub fn save_count(&self) -> usize {
        self.store().saves
    }

    /// Make every following save fail, to exercise the unconfirmed-save path.
    #[cfg(test)]
    pub fn set_fail_saves(&self, fail: bool) {
        self.store().fail_saves = fail;
    }

    fn signed_in(&self, user: &AuthUser) -> Result<()> {
        match &*self.user_tx.borrow() {
            Some(current) if current.id == user.id => Ok(()),
            _ => Err(BackendError::SignedOut),
        }
    }
}

fn validate_email(email: &str) -> Result<()> {
    let mut parts = email.split('@');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && domain.contains('.')
    );
    if valid {
        Ok(())
    } else {
        Err(BackendError::Auth("INVALID_EMAIL".to_string()))
    }
}

#[async_trait]
impl IdentityService for DevBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser> {
        validate_email(&credentials.email)?;
        let user = self
            .store()
            .accounts
            .iter()
            .find(|a| a.user.email == credentials.email && a.password == credentials.password)
            .map(|a| a.user.clone())
            .ok_or_else(|| BackendError::Auth("INVALID_LOGIN_CREDENTIALS".to_string()))?;

        tracing::info!(user_id = %user.id, "dev sign in");
        self.user_tx.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser> {
        validate_email(&credentials.email)?;
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BackendError::Auth(
                "WEAK_PASSWORD : Password should be at least 6 characters".to_string(),
            ));
        }
        let exists = self
            .store()
            .accounts
            .iter()
            .any(|a| a.user.email == credentials.email);
        if exists {
            return Err(BackendError::Auth("EMAIL_EXISTS".to_string()));
        }

        let user = self.add_account(credentials);
        tracing::info!(user_id = %user.id, "dev account created");
        self.user_tx.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) {
        self.user_tx.send_replace(None);
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.user_tx.subscribe()
    }
}

#[async_trait]
impl ProfileStore for DevBackend {
    async fn get_profile(&self, user: &AuthUser) -> Result<Option<Profile>> {
        self.signed_in(user)?;
        Ok(self.profile_of(user))
    }

    async fn entry_count(&self, user: &AuthUser) -> Result<usize> {
        self.signed_in(user)?;
        Ok(self.store().entry_counts.get(&user.id).copied().unwrap_or(0))
    }

    async fn save_profile(&self, user: &AuthUser, profile: &Profile) -> Result<()> {
        self.signed_in(user)?;
        let mut store = self.store();
        if store.fail_saves {
            return Err(BackendError::Store("UNAVAILABLE".to_string()));
        }
        store.profiles.insert(user.id.clone(), profile.clone());
        store.saves += 1;
        tracing::debug!(user_id = %user.id, saves = store.saves, "profile saved in memory");
        Ok(())
    }
}
