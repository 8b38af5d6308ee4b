//! Contact form state and navigation

use super::field::FormField;
use contact_form::{FieldKind, FormInput};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Index of the submit button row
pub const SUBMIT_ROW: usize = 3;

/// The contact form: name, email, message, then a submit row
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: FormField,
    pub email: FormField,
    pub message: FormField,
    pub active_field_index: usize,
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: FormField::required("name", "Name", FieldKind::Text),
            email: FormField::required("email", "Email", FieldKind::Email),
            message: FormField::required("message", "Message", FieldKind::Textarea),
            active_field_index: 0,
        }
    }

    /// Returns true if the submit row is currently active
    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == SUBMIT_ROW
    }

    /// Returns true if the active field accepts newlines
    pub fn is_active_field_multiline(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(|f| f.is_multiline)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> [&FormField; 3] {
        [&self.name, &self.email, &self.message]
    }

    /// Values as submitted to the form validator
    pub fn to_form_input(&self) -> FormInput {
        FormInput::new(
            self.name.value.clone(),
            self.email.value.clone(),
            self.message.value.clone(),
        )
    }

    /// Clear every field and go back to the first one
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.active_field_index = 0;
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ContactForm {
    fn field_count(&self) -> usize {
        4 // name, email, message, submit
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.message),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.message),
            _ => None,
        }
    }
}
