//! Identity provider client (Firebase Auth REST API).
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the browser's sign-in session: creates accounts, signs users in and
//! out, persists tokens to `localStorage`, and announces every change on a
//! single-consumer `AuthEvents` stream consumed by `state::session::Session`.
//!
//! DESIGN
//! ======
//! - Only one subscriber exists at a time. Subscribing again replaces the
//!   previous sender, which closes the old stream.
//! - On subscribe the stored session (if any) is verified with
//!   `accounts:lookup`. An expired id token is refreshed once through the
//!   token endpoint. A rejected session is cleared and reported as signed
//!   out; an unreachable provider is reported as `ProviderFailed` instead.
//! - REST calls only run in the browser. On the server the provider never
//!   emits, which keeps SSR in the pending state.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::{Arc, Mutex};

use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use serde::{Deserialize, Serialize};

use super::types::User;
use crate::config::IdentityConfig;
use crate::state::auth::AuthEvent;
#[cfg(feature = "hydrate")]
use crate::util::storage;

#[cfg(feature = "hydrate")]
const SESSION_KEY: &str = "zscraper.session";

// =============================================================================
// ERRORS
// =============================================================================

/// Machine-readable identity failure code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    InvalidCredentials,
    UserDisabled,
    WeakPassword,
    TooManyRequests,
    SessionExpired,
    Network,
    NotConfigured,
    Other(String),
}

impl IdentityErrorCode {
    /// Map a provider error message such as `"WEAK_PASSWORD : Password should be..."`.
    pub fn from_provider(message: &str) -> Self {
        let code = message.split(" : ").next().unwrap_or_default().trim();
        match code {
            "EMAIL_EXISTS" => Self::EmailAlreadyInUse,
            "INVALID_EMAIL" => Self::InvalidEmail,
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => Self::InvalidCredentials,
            "USER_DISABLED" => Self::UserDisabled,
            "WEAK_PASSWORD" => Self::WeakPassword,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyRequests,
            "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" => {
                Self::SessionExpired
            }
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::InvalidEmail => "auth/invalid-email",
            Self::InvalidCredentials => "auth/invalid-credential",
            Self::UserDisabled => "auth/user-disabled",
            Self::WeakPassword => "auth/weak-password",
            Self::TooManyRequests => "auth/too-many-requests",
            Self::SessionExpired => "auth/user-token-expired",
            Self::Network => "auth/network-request-failed",
            Self::NotConfigured => "auth/not-configured",
            Self::Other(raw) => raw,
        }
    }
}

/// Failure of an identity operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}: {message}", code.as_str())]
pub struct IdentityError {
    pub code: IdentityErrorCode,
    pub message: String,
}

impl IdentityError {
    pub fn new(code: IdentityErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    fn network(detail: impl ToString) -> Self {
        Self::new(IdentityErrorCode::Network, detail.to_string())
    }

    fn not_configured() -> Self {
        Self::new(IdentityErrorCode::NotConfigured, "identity API key is not configured")
    }

    /// Text shown to the user in forms and toasts.
    pub fn user_message(&self) -> String {
        match &self.code {
            IdentityErrorCode::EmailAlreadyInUse => "This email address is already in use.".to_owned(),
            IdentityErrorCode::InvalidEmail => "Invalid email address.".to_owned(),
            IdentityErrorCode::InvalidCredentials => "Invalid email or password.".to_owned(),
            IdentityErrorCode::UserDisabled => "This account has been disabled.".to_owned(),
            IdentityErrorCode::WeakPassword => self
                .message
                .split_once(" : ")
                .map_or_else(|| "Password is too weak.".to_owned(), |(_, detail)| detail.trim().to_owned()),
            IdentityErrorCode::TooManyRequests => "Too many attempts. Please try again later.".to_owned(),
            IdentityErrorCode::SessionExpired => "Your session has expired. Please sign in again.".to_owned(),
            IdentityErrorCode::Network => {
                "Could not reach the authentication service. Check your connection.".to_owned()
            }
            IdentityErrorCode::NotConfigured => "Authentication is not configured.".to_owned(),
            IdentityErrorCode::Other(_) if self.message.is_empty() => "An unexpected error occurred.".to_owned(),
            IdentityErrorCode::Other(_) => self.message.clone(),
        }
    }
}

#[derive(Deserialize)]
struct ProviderErrorEnvelope {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

/// Parse a non-2xx provider body into an `IdentityError`.
pub fn parse_error_body(body: &str) -> IdentityError {
    match serde_json::from_str::<ProviderErrorEnvelope>(body) {
        Ok(envelope) => {
            IdentityError::new(IdentityErrorCode::from_provider(&envelope.error.message), envelope.error.message)
        }
        Err(_) => IdentityError::new(IdentityErrorCode::Other("unknown".to_owned()), String::new()),
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[cfg(feature = "hydrate")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Response of `accounts:signUp` and `accounts:signInWithPassword`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialResponse {
    id_token: String,
    refresh_token: String,
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[cfg(feature = "hydrate")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

#[cfg(feature = "hydrate")]
#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

/// Response of the secure-token refresh grant.
#[derive(Debug, Deserialize)]
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) struct RefreshResponse {
    pub(crate) id_token: String,
    pub(crate) refresh_token: String,
}

/// Session persisted between page loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: User,
    pub id_token: String,
    pub refresh_token: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
impl CredentialResponse {
    fn into_session(self) -> StoredSession {
        StoredSession {
            user: User {
                uid: self.local_id,
                email: non_empty(self.email),
                display_name: non_empty(self.display_name),
                photo_url: None,
            },
            id_token: self.id_token,
            refresh_token: self.refresh_token,
        }
    }
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
impl LookupResponse {
    fn into_user(self) -> Result<User, IdentityError> {
        let user = self
            .users
            .into_iter()
            .next()
            .ok_or_else(|| IdentityError::new(IdentityErrorCode::SessionExpired, "USER_NOT_FOUND"))?;
        Ok(User {
            uid: user.local_id,
            email: non_empty(user.email),
            display_name: non_empty(user.display_name),
            photo_url: non_empty(user.photo_url),
        })
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

/// `{accounts_url}/accounts:{method}?key={api_key}`.
pub fn accounts_endpoint(config: &IdentityConfig, method: &str) -> Result<String, IdentityError> {
    let key = config.api_key.as_deref().ok_or_else(IdentityError::not_configured)?;
    Ok(format!("{}/accounts:{method}?key={key}", config.accounts_url))
}

/// `{token_url}/token?key={api_key}`.
pub fn token_endpoint(config: &IdentityConfig) -> Result<String, IdentityError> {
    let key = config.api_key.as_deref().ok_or_else(IdentityError::not_configured)?;
    Ok(format!("{}/token?key={key}", config.token_url))
}

/// What to do when verifying a stored session fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Try the refresh token once.
    Refresh,
    /// Keep the stored session and report an outage.
    Report(String),
    /// Drop the stored session and report signed out.
    Clear,
}

pub fn recovery_action(err: &IdentityError) -> RecoveryAction {
    match err.code {
        IdentityErrorCode::SessionExpired => RecoveryAction::Refresh,
        IdentityErrorCode::Network | IdentityErrorCode::TooManyRequests => {
            RecoveryAction::Report(err.user_message())
        }
        _ => RecoveryAction::Clear,
    }
}

/// Recovery after the token refresh already ran: a second expiry clears.
pub fn recovery_after_refresh(err: &IdentityError) -> RecoveryAction {
    match recovery_action(err) {
        RecoveryAction::Refresh => RecoveryAction::Clear,
        other => other,
    }
}

/// Provider calls needed to verify a stored session.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) trait SessionVerifier {
    async fn lookup(&self, id_token: &str) -> Result<User, IdentityError>;
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, IdentityError>;
}

/// Result of checking a stored session against the provider.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) enum Verification {
    /// Session is valid. Carries the refreshed tokens and current profile.
    Verified(StoredSession),
    /// Provider could not answer. The session (with any refreshed tokens) is kept.
    Unreachable { message: String, session: StoredSession },
    /// Session was rejected and must be dropped.
    Rejected(IdentityError),
}

/// Look the stored session up, refreshing the id token at most once.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) async fn verify_session<V: SessionVerifier>(verifier: &V, stored: StoredSession) -> Verification {
    let looked_up = verifier.lookup(&stored.id_token).await;
    let err = match looked_up {
        Ok(user) => return Verification::Verified(StoredSession { user, ..stored }),
        Err(err) => err,
    };

    match recovery_action(&err) {
        RecoveryAction::Report(message) => return Verification::Unreachable { message, session: stored },
        RecoveryAction::Clear => return Verification::Rejected(err),
        RecoveryAction::Refresh => {}
    }

    let refresh_result = verifier.refresh(&stored.refresh_token).await;
    let tokens = match refresh_result {
        Ok(tokens) => tokens,
        Err(err) => return settle_after_refresh(err, stored),
    };
    let refreshed = StoredSession { id_token: tokens.id_token, refresh_token: tokens.refresh_token, ..stored };

    let looked_up = verifier.lookup(&refreshed.id_token).await;
    match looked_up {
        Ok(user) => Verification::Verified(StoredSession { user, ..refreshed }),
        Err(err) => settle_after_refresh(err, refreshed),
    }
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn settle_after_refresh(err: IdentityError, session: StoredSession) -> Verification {
    match recovery_after_refresh(&err) {
        RecoveryAction::Report(message) => Verification::Unreachable { message, session },
        _ => Verification::Rejected(err),
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

/// Single-consumer stream of auth-state changes.
pub struct AuthEvents {
    rx: UnboundedReceiver<AuthEvent>,
}

impl AuthEvents {
    /// Next event, or `None` once the provider unsubscribed this stream.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        self.rx.next().await
    }
}

struct ProviderInner {
    config: IdentityConfig,
    subscriber: Mutex<Option<UnboundedSender<AuthEvent>>>,
}

/// Handle to the identity provider. Cheap to clone.
#[derive(Clone)]
pub struct IdentityProvider {
    inner: Arc<ProviderInner>,
}

impl IdentityProvider {
    pub fn new(config: IdentityConfig) -> Self {
        Self { inner: Arc::new(ProviderInner { config, subscriber: Mutex::new(None) }) }
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.inner.config
    }

    /// Subscribe to auth-state changes and start the initial session check.
    pub fn subscribe(&self) -> AuthEvents {
        let (tx, rx) = mpsc::unbounded();
        if let Ok(mut slot) = self.inner.subscriber.lock() {
            *slot = Some(tx);
        }
        self.check_session();
        AuthEvents { rx }
    }

    /// Close the current subscription, if any.
    pub fn unsubscribe(&self) {
        if let Ok(mut slot) = self.inner.subscriber.lock() {
            slot.take();
        }
    }

    pub(crate) fn publish(&self, event: AuthEvent) {
        if let Ok(slot) = self.inner.subscriber.lock() {
            if let Some(tx) = slot.as_ref() {
                let _ = tx.unbounded_send(event);
            }
        }
    }

    /// Re-run the stored-session check and publish its outcome.
    pub fn check_session(&self) {
        #[cfg(feature = "hydrate")]
        {
            let provider = self.clone();
            leptos::task::spawn_local(async move {
                let event = provider.resolve_stored_session().await;
                provider.publish(event);
            });
        }
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns an `IdentityError` with `EmailAlreadyInUse` when the email is taken.
    pub async fn create_account(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        self.authenticate("signUp", email, password).await
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an `IdentityError` when the credentials are rejected or the provider is unreachable.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        self.authenticate("signInWithPassword", email, password).await
    }

    /// Sign out locally and announce the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored session could not be cleared.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            if !storage::remove(SESSION_KEY) {
                return Err(IdentityError::new(
                    IdentityErrorCode::Other("auth/storage".to_owned()),
                    "Could not clear the stored session.",
                ));
            }
            log::info!("signed out");
        }
        self.publish(AuthEvent::Changed(None));
        Ok(())
    }

    async fn authenticate(&self, method: &str, email: &str, password: &str) -> Result<User, IdentityError> {
        let url = accounts_endpoint(self.config(), method)?;
        #[cfg(feature = "hydrate")]
        {
            let body = CredentialRequest { email, password, return_secure_token: true };
            let resp: CredentialResponse = post_json(&url, &body).await?;
            let session = resp.into_session();
            if !storage::save_json(SESSION_KEY, &session) {
                log::warn!("session could not be persisted; sign-in will not survive a reload");
            }
            log::info!("identity {method} succeeded for {}", session.user.uid);
            self.publish(AuthEvent::Changed(Some(session.user.clone())));
            Ok(session.user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, email, password);
            Err(IdentityError::network("not available on server"))
        }
    }

    #[cfg(feature = "hydrate")]
    async fn resolve_stored_session(&self) -> AuthEvent {
        let Some(stored) = storage::load_json::<StoredSession>(SESSION_KEY) else {
            return AuthEvent::Changed(None);
        };

        match verify_session(self, stored).await {
            Verification::Verified(session) => {
                if !storage::save_json(SESSION_KEY, &session) {
                    log::warn!("verified session could not be persisted");
                }
                AuthEvent::Changed(Some(session.user))
            }
            Verification::Unreachable { message, session } => {
                log::warn!("identity provider unreachable: {message}");
                if !storage::save_json(SESSION_KEY, &session) {
                    log::warn!("refreshed session could not be persisted");
                }
                AuthEvent::ProviderFailed(message)
            }
            Verification::Rejected(err) => clear_stored(&err),
        }
    }
}

#[cfg(feature = "hydrate")]
impl SessionVerifier for IdentityProvider {
    async fn lookup(&self, id_token: &str) -> Result<User, IdentityError> {
        let url = accounts_endpoint(self.config(), "lookup")?;
        let resp: LookupResponse = post_json(&url, &LookupRequest { id_token }).await?;
        resp.into_user()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, IdentityError> {
        let url = token_endpoint(self.config())?;
        post_json(&url, &RefreshRequest { grant_type: "refresh_token", refresh_token }).await
    }
}

#[cfg(feature = "hydrate")]
fn clear_stored(err: &IdentityError) -> AuthEvent {
    log::info!("discarding stored session: {err}");
    storage::remove(SESSION_KEY);
    AuthEvent::Changed(None)
}

#[cfg(feature = "hydrate")]
async fn post_json<B, T>(url: &str, body: &B) -> Result<T, IdentityError>
where
    B: Serialize,
    T: serde::de::DeserializeOwned,
{
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(IdentityError::network)?
        .send()
        .await
        .map_err(IdentityError::network)?;
    let ok = resp.ok();
    let text = resp.text().await.map_err(IdentityError::network)?;
    if !ok {
        return Err(parse_error_body(&text));
    }
    serde_json::from_str(&text)
        .map_err(|e| IdentityError::new(IdentityErrorCode::Other("auth/invalid-response".to_owned()), e.to_string()))
}
