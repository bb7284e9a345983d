//! Form models and local validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every form is validated here before any network activity. Validation
//! failures become `FieldErrors` that the page renders next to each input;
//! nothing is sent while any field error remains.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use std::borrow::Cow;
use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::net::types::{AskRequest, LlmModel};

/// First validation message per field, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let message = first.message.as_ref().map_or_else(|| first.code.to_string(), ToString::to_string);
                out.insert(field.to_string(), message);
            }
        }
        Self(out)
    }
}

fn validate_model(value: &str) -> Result<(), ValidationError> {
    if LlmModel::parse(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("model");
    err.message = Some(Cow::Borrowed("Please select an LLM."));
    Err(err)
}

/// Minimum length in UTF-16 code units, the unit browsers report for input length.
fn min_utf16_len(value: &str, min: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.encode_utf16().count() >= min {
        return Ok(());
    }
    let mut err = ValidationError::new("length");
    err.message = Some(Cow::Borrowed(message));
    Err(err)
}

fn validate_question(value: &str) -> Result<(), ValidationError> {
    min_utf16_len(value, 5, "Question must be at least 5 characters.")
}

fn validate_new_password(value: &str) -> Result<(), ValidationError> {
    min_utf16_len(value, 8, "Password must be at least 8 characters.")
}

// =============================================================================
// CHAT
// =============================================================================

/// Raw chat form input, exactly as typed.
#[derive(Clone, Debug, PartialEq, Eq, Validate)]
pub struct ChatForm {
    #[validate(url(message = "Please enter a valid URL."))]
    pub url: String,
    #[validate(custom(function = "validate_question"))]
    pub question: String,
    #[validate(custom(function = "validate_model"))]
    pub model: String,
}

impl Default for ChatForm {
    fn default() -> Self {
        Self { url: String::new(), question: String::new(), model: LlmModel::default().label().to_owned() }
    }
}

impl ChatForm {
    /// Validate and convert into the backend request.
    ///
    /// # Errors
    ///
    /// Returns per-field messages when any field is invalid.
    pub fn into_request(self) -> Result<AskRequest, FieldErrors> {
        self.validate()?;
        let model = LlmModel::parse(&self.model).unwrap_or_default();
        Ok(AskRequest::new(self.url, self.question, model))
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
pub struct SignupForm {
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[validate(custom(function = "validate_new_password"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords don't match."))]
    pub confirm_password: String,
}

impl SignupForm {
    /// Validated `(email, password)` pair.
    ///
    /// # Errors
    ///
    /// Returns per-field messages when any field is invalid.
    pub fn credentials(&self) -> Result<(String, String), FieldErrors> {
        self.validate()?;
        Ok((self.email.trim().to_owned(), self.password.clone()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

impl LoginForm {
    /// Validated `(email, password)` pair.
    ///
    /// # Errors
    ///
    /// Returns per-field messages when any field is invalid.
    pub fn credentials(&self) -> Result<(String, String), FieldErrors> {
        self.validate()?;
        Ok((self.email.trim().to_owned(), self.password.clone()))
    }
}
