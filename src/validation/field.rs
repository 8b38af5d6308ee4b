//! Field-level validation

use super::email::{is_valid_email, trim_value};
use std::fmt;

/// Label used in the required message when a field has none
const DEFAULT_LABEL: &str = "This field";

/// Message reported for a malformed email value
pub(crate) const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

/// Input classification as reported by the host UI (`type` attribute or tag)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Textarea,
    /// Any other input type; validated only for presence
    Other(String),
}

impl FieldKind {
    /// Classify a host type/tag string. Empty means plain text.
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "" | "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "textarea" => FieldKind::Textarea,
            other => FieldKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Textarea => "textarea",
            FieldKind::Other(s) => s,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field's transient state, captured fresh for each validation call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldInput {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Associated label text, if the host has one
    pub label: Option<String>,
}

impl FieldInput {
    /// Create an empty, optional field
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Label text for messages, falling back to "This field"
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LABEL)
    }
}

/// Outcome of validating a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub valid: bool,
    /// Present iff `valid` is false
    pub message: Option<String>,
}

impl FieldValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            valid: false,
            message: Some(message),
        }
    }
}

/// Validate one field, producing at most one message.
///
/// A required field with an empty trimmed value reports
/// `"<label> is required."`. An email field whose trimmed value is non-empty
/// but malformed reports the invalid-email message instead. The two cannot
/// both apply since the email check only looks at non-empty values.
pub fn validate_field(field: &FieldInput) -> FieldValidation {
    let value = trim_value(&field.value);
    let mut message = None;

    if field.required && value.is_empty() {
        message = Some(format!("{} is required.", field.display_label()));
    }

    if field.kind == FieldKind::Email && !value.is_empty() && !is_valid_email(value) {
        message = Some(INVALID_EMAIL_MESSAGE.to_string());
    }

    match message {
        Some(msg) => FieldValidation::error(msg),
        None => FieldValidation::ok(),
    }
}

/// Bare predicate form of [`validate_field`]
pub fn is_field_valid(field: &FieldInput) -> bool {
    validate_field(field).valid
}
