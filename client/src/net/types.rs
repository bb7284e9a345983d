//! Wire DTOs for the question-answering backend and the signed-in user.
//!
//! DESIGN
//! ======
//! `AskRequest` has no public constructor: the only way to obtain one is
//! through `forms::ChatForm::into_request`, so every request that reaches the
//! network has already passed local validation.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// LLM choice offered by the chat form. Passed through to the backend verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmModel {
    #[default]
    Gemini,
    Ollama,
    Deepseek,
}

impl LlmModel {
    pub const ALL: [LlmModel; 3] = [LlmModel::Gemini, LlmModel::Ollama, LlmModel::Deepseek];

    /// Parse a form label (`"Gemini"`, `"Ollama"`, `"Deepseek"`), ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "ollama" => Some(Self::Ollama),
            "deepseek" => Some(Self::Deepseek),
            _ => None,
        }
    }

    /// Form value used by the select control.
    pub fn label(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::Ollama => "Ollama",
            Self::Deepseek => "Deepseek",
        }
    }

    /// Lower-cased name sent to the backend.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
            Self::Deepseek => "deepseek",
        }
    }

    /// Human-readable option text.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini (Google via OpenRouter)",
            Self::Ollama => "Ollama (Llama via OpenRouter)",
            Self::Deepseek => "Deepseek (via OpenRouter)",
        }
    }
}

/// Body of `POST {backend}/ask`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    url: String,
    question: String,
    model: LlmModel,
}

impl AskRequest {
    pub(crate) fn new(url: String, question: String, model: LlmModel) -> Self {
        Self { url, question, model }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[cfg(test)]
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn model(&self) -> LlmModel {
        self.model
    }
}

/// Success body: `{"answer": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Error body: `{"error": ...}`. The backend normally sends a string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AskErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl AskErrorBody {
    /// Text to show for `error`, or `None` when it is absent, null, blank, `false`, or `0`.
    pub fn message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::Null | serde_json::Value::Bool(false) => None,
            serde_json::Value::String(text) => Some(text.clone()).filter(|t| !t.trim().is_empty()),
            serde_json::Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Signed-in user as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-assigned stable user id.
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl User {
    /// Name shown in the dashboard chrome: display name, else email, else `"User"`.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.email.as_deref())
            .unwrap_or("User")
    }
}
