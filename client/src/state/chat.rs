//! Chat submission state for the new-chat form.
//!
//! DESIGN
//! ======
//! One form instance runs at most one request at a time:
//! `Idle -> Pending -> Answered | Errored`, and a new submit may only start
//! from a non-pending phase. `prepare` is the single entry point that turns
//! raw input into a request, so a request is only ever produced after local
//! validation passed and the busy flag was taken.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::forms::{ChatForm, FieldErrors};
use crate::net::api::AskError;
use crate::net::types::AskRequest;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Pending,
    Answered(String),
    Errored(String),
}

#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub phase: SubmissionPhase,
    pub field_errors: FieldErrors,
}

impl ChatState {
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Pending)
    }

    /// Validate `form` and, if valid and idle, enter `Pending`.
    ///
    /// Returns `None` when a request is already in flight or validation failed.
    pub fn prepare(&mut self, form: ChatForm) -> Option<AskRequest> {
        if self.is_busy() {
            return None;
        }
        match form.into_request() {
            Ok(request) => self.begin().then_some(request),
            Err(errors) => {
                self.reject(errors);
                None
            }
        }
    }

    /// Enter `Pending`, clearing any previous output. No-op while pending.
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.phase = SubmissionPhase::Pending;
        self.field_errors = FieldErrors::default();
        true
    }

    /// Record local validation errors. The phase is left untouched.
    pub fn reject(&mut self, errors: FieldErrors) {
        self.field_errors = errors;
    }

    /// Resolve the pending request.
    pub fn finish(&mut self, result: Result<String, AskError>) {
        self.phase = match result {
            Ok(answer) => SubmissionPhase::Answered(answer),
            Err(err) => SubmissionPhase::Errored(err.user_message()),
        };
    }

    /// Text for the response card, if there is anything to show.
    pub fn rendered_response(&self) -> Option<String> {
        match &self.phase {
            SubmissionPhase::Answered(answer) => Some(answer.clone()),
            SubmissionPhase::Errored(message) => Some(format!("An error occurred: {message}")),
            SubmissionPhase::Idle | SubmissionPhase::Pending => None,
        }
    }
}
