//! Form domain layer
//!
//! Editable field state for the contact form. Validation itself lives in the
//! library; this layer only turns field state into validator input.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{ContactForm, Form, SUBMIT_ROW};
