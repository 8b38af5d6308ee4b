//! Form-level validation for the contact form

use super::email::{is_valid_email, trim_value};
use super::field::INVALID_EMAIL_MESSAGE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Submitted contact form values. Missing keys deserialize as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Build from the host's key/value mapping; unknown keys are ignored
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).cloned().unwrap_or_default();
        Self {
            name: get("name"),
            email: get("email"),
            message: get("message"),
        }
    }
}

/// Ordered validation messages, in field declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<String>);

impl ErrorList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, msg) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(msg)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validate name, email and message in that order.
///
/// Every field is checked independently, so several messages can come back
/// at once. The email field yields either the required message or the
/// invalid-address message, never both.
pub fn validate_form(data: &FormInput) -> ErrorList {
    let mut errors = ErrorList::default();

    if trim_value(&data.name).is_empty() {
        errors.push("Name is required.");
    }

    let email = trim_value(&data.email);
    if email.is_empty() {
        errors.push("Email is required.");
    } else if !is_valid_email(email) {
        errors.push(INVALID_EMAIL_MESSAGE);
    }

    if trim_value(&data.message).is_empty() {
        errors.push("Message is required.");
    }

    errors
}
