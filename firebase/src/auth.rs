use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::{upstream_error_message, FirebaseUrl};

pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// A signed-in Firebase user together with the tokens needed to act on their behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub id_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl AuthSession {
    /// Tokens are treated as expired a minute early so requests don't race the deadline.
    pub fn is_expired(&self) -> bool {
        self.expires_at - Duration::minutes(1) <= OffsetDateTime::now_utc()
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    /// The identity service refused the request. Carries its message verbatim,
    /// e.g. `EMAIL_EXISTS` or `INVALID_LOGIN_CREDENTIALS`.
    #[error("{0}")]
    Rejected(String),
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    local_id: String,
    #[serde(default)]
    email: String,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

fn expires_at(expires_in: &str) -> Result<OffsetDateTime, AuthError> {
    let seconds = expires_in.parse::<i64>().map_err(|e| {
        AuthError::ParsingError(format!("Invalid expiresIn '{}': {}", expires_in, e))
    })?;
    Ok(OffsetDateTime::now_utc() + Duration::seconds(seconds))
}

/// Client for the Identity Toolkit (email/password accounts) and Secure Token APIs.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    api_key: String,
    identity_url: FirebaseUrl,
    token_url: FirebaseUrl,
}

impl AuthClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            identity_url: FirebaseUrl::new(IDENTITY_TOOLKIT_URL),
            token_url: FirebaseUrl::new(SECURE_TOKEN_URL),
        }
    }

    /// Point the client at different endpoints, e.g. the local auth emulator.
    pub fn with_endpoints(mut self, identity_url: &str, token_url: &str) -> Self {
        self.identity_url = FirebaseUrl::new(identity_url);
        self.token_url = FirebaseUrl::new(token_url);
        self
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: FirebaseUrl,
        body: &B,
    ) -> Result<T, AuthError> {
        let resp = self
            .client
            .post(url.as_ref())
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::ResponseError(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AuthError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            let message = upstream_error_message(&text).unwrap_or_else(|| format!("HTTP {}", status));
            tracing::debug!(%status, %message, "identity request rejected");
            return Err(AuthError::Rejected(message));
        }

        serde_json::from_str(&text).map_err(|e| {
            AuthError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    async fn password_call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let url = self
            .identity_url
            .append_path("accounts")
            .append_suffix(method)
            .with_api_key(&self.api_key);
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let resp: PasswordResponse = self.post(url, &body).await?;
        let email = if resp.email.is_empty() {
            email.to_string()
        } else {
            resp.email
        };

        Ok(AuthSession {
            expires_at: expires_at(&resp.expires_in)?,
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
            user_id: resp.local_id,
            email,
        })
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let session = self
            .password_call(":signInWithPassword", email, password)
            .await?;
        tracing::info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self.password_call(":signUp", email, password).await?;
        tracing::info!(user_id = %session.user_id, "account created");
        Ok(session)
    }

    /// Exchange the refresh token for a fresh ID token.
    pub async fn refresh(&self, session: &AuthSession) -> Result<AuthSession, AuthError> {
        let url = self.token_url.append_path("token").with_api_key(&self.api_key);
        let body = RefreshRequest {
            grant_type: "refresh_token",
            refresh_token: &session.refresh_token,
        };

        let resp: RefreshResponse = self.post(url, &body).await?;
        tracing::debug!(user_id = %resp.user_id, "refreshed id token");

        Ok(AuthSession {
            expires_at: expires_at(&resp.expires_in)?,
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
            user_id: resp.user_id,
            email: session.email.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_response_accepts_sign_up_payload() {
        let raw = r#"{
            "kind": "identitytoolkit#SignupNewUserResponse",
            "idToken": "id-abc",
            "email": "piyo@example.com",
            "refreshToken": "refresh-abc",
            "expiresIn": "3600",
            "localId": "uid-1"
        }"#;
        let resp: PasswordResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.local_id, "uid-1");
        assert_eq!(resp.expires_in, "3600");
    }

    #[test]
    fn expires_at_rejects_garbage() {
        assert!(matches!(
            expires_at("soon"),
            Err(AuthError::ParsingError(_))
        ));
    }

    #[test]
    fn rejected_error_displays_upstream_message_only() {
        let err = AuthError::Rejected("EMAIL_EXISTS".to_string());
        assert_eq!(err.to_string(), "EMAIL_EXISTS");
    }

    #[test]
    fn fresh_session_is_not_expired() {
        let session = AuthSession {
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            user_id: "uid".to_string(),
            email: "a@b.c".to_string(),
            expires_at: expires_at("3600").unwrap(),
        };
        assert!(!session.is_expired());

        let stale = AuthSession {
            expires_at: OffsetDateTime::now_utc() - Duration::seconds(5),
            ..session
        };
        assert!(stale.is_expired());
    }
}
