//! Form field value objects

use contact_form::{FieldInput, FieldKind};

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new required field
    pub fn required(name: &str, label: &str, kind: FieldKind) -> Self {
        let is_multiline = kind == FieldKind::Textarea;
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: true,
            value: String::new(),
            is_multiline,
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if c == '\n' && !self.is_multiline {
            return;
        }
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Snapshot for the validator
    pub fn to_input(&self) -> FieldInput {
        let input = FieldInput::new(&self.name, self.kind.clone())
            .with_value(self.value.clone())
            .with_label(self.label.clone());
        if self.required {
            input.required()
        } else {
            input
        }
    }
}
