//! REST client for the question-answering backend (`POST {backend}/ask`).
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stub returning a transport error since the backend is
//! only contacted from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is classified at this boundary into `AskError` so the UI
//! never inspects raw strings to decide what went wrong:
//! - `Backend`: non-2xx with a structured `{"error": ...}` body, shown verbatim.
//! - `Unexpected`: non-2xx with an unparseable body or JSON without a usable
//!   `error`, or a 2xx body without an `answer`.
//! - `Transport`: the request never produced a response (endpoint unreachable).

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AskErrorBody, AskRequest, AskResponse};
use crate::config::ClientConfig;

pub const UNPARSEABLE_ERROR_BODY: &str = "Failed to parse error response from server.";
pub const MISSING_ANSWER: &str = "The backend response did not include an answer.";

/// Coarse error category, matching the user-facing error taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AskErrorKind {
    Backend,
    Unexpected,
    Transport,
}

/// Failure of a single `/ask` round trip.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AskError {
    /// The backend answered with a non-2xx status and an `error` message.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// The backend answered, but not in a shape we understand.
    #[error("{detail}")]
    Unexpected { status: u16, detail: String },

    /// No response was received.
    #[error("request to {backend_url} failed: {detail}")]
    Transport { backend_url: String, detail: String },
}

impl AskError {
    pub fn kind(&self) -> AskErrorKind {
        match self {
            Self::Backend { .. } => AskErrorKind::Backend,
            Self::Unexpected { .. } => AskErrorKind::Unexpected,
            Self::Transport { .. } => AskErrorKind::Transport,
        }
    }

    /// Message suitable for the inline response area and the error toast.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend { message, .. } => message.clone(),
            Self::Unexpected { detail, .. } => detail.clone(),
            Self::Transport { backend_url, detail } => connectivity_hint(backend_url, detail),
        }
    }
}

fn connectivity_hint(backend_url: &str, detail: &str) -> String {
    format!(
        "Failed to connect to the AI backend at {backend_url}. Please ensure the backend server is running \
         and accessible. Check network connectivity, firewalls, and the server logs. Raw error: {detail}"
    )
}

fn server_error_message(status: u16) -> String {
    format!("Server error: {status}")
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map an HTTP status and raw body to an answer or a classified error.
pub fn interpret_response(status: u16, body: &str) -> Result<String, AskError> {
    if is_success(status) {
        return serde_json::from_str::<AskResponse>(body)
            .map(|resp| resp.answer)
            .map_err(|_| AskError::Unexpected { status, detail: MISSING_ANSWER.to_owned() });
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return Err(AskError::Unexpected { status, detail: UNPARSEABLE_ERROR_BODY.to_owned() });
    };
    match serde_json::from_value::<AskErrorBody>(value).ok().and_then(|b| b.message()) {
        Some(message) => Err(AskError::Backend { status, message }),
        None => Err(AskError::Unexpected { status, detail: server_error_message(status) }),
    }
}

/// Build the transport error for a request that never got a response.
pub fn transport_error(config: &ClientConfig, detail: impl Into<String>) -> AskError {
    AskError::Transport { backend_url: config.backend_base_url.clone(), detail: detail.into() }
}

/// Send one question to the backend and return its answer.
///
/// No retries and no timeout: a hung backend keeps the caller pending.
///
/// # Errors
///
/// Returns an `AskError` describing why no answer was produced.
pub async fn ask(config: &ClientConfig, request: &AskRequest) -> Result<String, AskError> {
    #[cfg(feature = "hydrate")]
    {
        let endpoint = config.ask_endpoint();
        log::info!("Attempting to fetch from: {endpoint}");
        let resp = gloo_net::http::Request::post(&endpoint)
            .json(request)
            .map_err(|e| transport_error(config, e.to_string()))?
            .send()
            .await
            .map_err(|e| {
                log::warn!("ask request failed: {e}");
                transport_error(config, e.to_string())
            })?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|_| AskError::Unexpected { status, detail: UNPARSEABLE_ERROR_BODY.to_owned() })?;
        let result = interpret_response(status, &body);
        if let Err(e) = &result {
            log::warn!("ask returned {status}: {e}");
        }
        result
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(transport_error(config, "not available on server"))
    }
}
