//! Hand-off from validation to whatever displays field errors

use crate::validation::{validate_field, FieldInput};
use std::collections::HashMap;

/// Receives field validation outcomes for display.
///
/// Implementors only see the field name and message; they never run
/// validation themselves.
#[cfg_attr(test, mockall::automock)]
pub trait FieldRenderer {
    /// Put `field` into its error state showing `message`
    fn mark_error(&mut self, field: &str, message: &str);

    /// Remove any error state from `field`
    fn clear_error(&mut self, field: &str);
}

/// Validate `field` and forward the outcome to `renderer`.
/// Returns whether the field is valid.
pub fn validate_and_render<R>(field: &FieldInput, renderer: &mut R) -> bool
where
    R: FieldRenderer + ?Sized,
{
    let result = validate_field(field);
    match result.message.as_deref() {
        Some(message) => renderer.mark_error(&field.name, message),
        None => renderer.clear_error(&field.name),
    }
    result.valid
}

/// In-memory renderer: remembers the current message per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMarks {
    marks: HashMap<String, String>,
}

impl ErrorMarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.marks.get(field).map(String::as_str)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.marks.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clear_all(&mut self) {
        self.marks.clear();
    }
}

impl FieldRenderer for ErrorMarks {
    fn mark_error(&mut self, field: &str, message: &str) {
        self.marks.insert(field.to_string(), message.to_string());
    }

    fn clear_error(&mut self, field: &str) {
        self.marks.remove(field);
    }
}
