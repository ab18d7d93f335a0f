//! Session token handling and login.
//!
//! The token lives in an [`AuthContext`] that is handed to the API client at
//! construction; nothing reads it from a global slot.

use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::api::response_excerpt;
use crate::config::normalize_base_url;
use crate::error::{Error, Result};

/// Produces the credential attached to every outgoing note request.
pub trait AuthProvider: Send + Sync {
    /// Value for the `Authorization` header.
    fn auth_header(&self) -> String;

    /// Drop the credential and leave for the login surface.
    fn clear(&self);
}

/// Where the client goes when the session ends.
pub trait LoginNavigator: Send + Sync {
    fn navigate_to_login(&self);
}

/// Session-scoped bearer token.
pub struct AuthContext {
    token: RwLock<String>,
    navigator: Box<dyn LoginNavigator>,
}

impl AuthContext {
    pub fn new(navigator: impl LoginNavigator + 'static) -> Self {
        Self::with_token(String::new(), navigator)
    }

    pub fn with_token(token: impl Into<String>, navigator: impl LoginNavigator + 'static) -> Self {
        Self {
            token: RwLock::new(token.into()),
            navigator: Box::new(navigator),
        }
    }

    /// Install a token obtained at login.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token.into();
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        !self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl AuthProvider for AuthContext {
    /// An empty token is sent as-is; the server decides whether it is valid.
    fn auth_header(&self) -> String {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        format!("Bearer {token}")
    }

    fn clear(&self) {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        tracing::info!("Session token cleared");
        self.navigator.navigate_to_login();
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthContext")
            .field("token", &"[REDACTED]")
            .field("has_token", &self.has_token())
            .finish_non_exhaustive()
    }
}

/// Shortest username and password, in bytes, the server accepts at signup.
pub const MIN_CREDENTIAL_CHARS: usize = 8;

/// Account endpoints: `POST /user` to sign up and `POST /login` for a token.
#[derive(Debug, Clone)]
pub struct LoginClient {
    base_url: String,
    client: Client,
}

impl LoginClient {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        validate_credentials(username, password)?;

        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .header("Accept", "application/json")
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Login(format!("{} ({status})", response_excerpt(&body))));
        }

        let payload = response.json::<LoginResponse>().await?;
        let token = payload.token.trim().to_string();
        if token.is_empty() {
            return Err(Error::Login(
                "Login response did not include a token".to_string(),
            ));
        }
        tracing::info!("Logged in as {}", username);
        Ok(token)
    }

    /// Create an account. The server answers with an empty body on success.
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        validate_new_account(username, password)?;

        let response = self
            .client
            .post(format!("{}/user", self.base_url))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Registration(format!(
                "{} ({status})",
                response_excerpt(&body)
            )));
        }
        tracing::info!("Registered user {}", username);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: String,
}

fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::Login("Username is required".to_string()));
    }
    if password.is_empty() {
        return Err(Error::Login("Password is required".to_string()));
    }
    Ok(())
}

/// Mirrors the server's signup rules so obviously short values fail locally.
fn validate_new_account(username: &str, password: &str) -> Result<()> {
    if username.len() < MIN_CREDENTIAL_CHARS {
        return Err(Error::Registration(format!(
            "Username must be at least {MIN_CREDENTIAL_CHARS} characters"
        )));
    }
    if password.len() < MIN_CREDENTIAL_CHARS {
        return Err(Error::Registration(format!(
            "Password must be at least {MIN_CREDENTIAL_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct CountingNavigator(Arc<AtomicUsize>);

    impl LoginNavigator for CountingNavigator {
        fn navigate_to_login(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn auth_header_prefixes_bearer() {
        let auth = AuthContext::with_token("abc.def", CountingNavigator::default());
        assert_eq!(auth.auth_header(), "Bearer abc.def");
    }

    #[test]
    fn empty_token_passes_through() {
        let auth = AuthContext::new(CountingNavigator::default());
        assert_eq!(auth.auth_header(), "Bearer ");
        assert!(!auth.has_token());
    }

    #[test]
    fn clear_empties_token_and_navigates() {
        let navigator = CountingNavigator::default();
        let visits = Arc::clone(&navigator.0);
        let auth = AuthContext::with_token("secret", navigator);

        auth.clear();

        assert!(!auth.has_token());
        assert_eq!(auth.auth_header(), "Bearer ");
        assert_eq!(visits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn set_token_replaces_previous_token() {
        let auth = AuthContext::with_token("old", CountingNavigator::default());
        auth.set_token("new");
        assert_eq!(auth.auth_header(), "Bearer new");
    }

    #[test]
    fn debug_redacts_token() {
        let auth = AuthContext::with_token("secret-access-token", CountingNavigator::default());
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("secret-access-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn validate_credentials_rejects_blank_values() {
        assert!(validate_credentials("", "pw").is_err());
        assert!(validate_credentials("user", "").is_err());
        assert!(validate_credentials("user", "pw").is_ok());
    }

    #[test]
    fn new_account_needs_eight_characters_each() {
        assert!(validate_new_account("shorty", "longenough").is_err());
        assert!(validate_new_account("longenough", "1234567").is_err());
        assert!(validate_new_account("12345678", "12345678").is_ok());
    }

    #[tokio::test]
    async fn register_rejects_short_password_without_request() {
        let client = LoginClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let error = client.register("dana.scully", "short").await.unwrap_err();
        assert!(matches!(error, Error::Registration(message) if message.contains("Password")));
    }

    #[tokio::test]
    async fn login_rejects_blank_username_without_request() {
        let client = LoginClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let error = client.login("  ", "pw").await.unwrap_err();
        assert!(matches!(error, Error::Login(_)));
    }
}
