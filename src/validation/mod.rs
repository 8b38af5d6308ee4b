//! Validation layer
//!
//! Stateless predicates over field and form input. Failures are returned as
//! human-readable messages, never as `Err`.

mod email;
mod field;
mod form;

pub use email::{is_valid_email, EMAIL_PATTERN};
pub use field::{is_field_valid, validate_field, FieldInput, FieldKind, FieldValidation};
pub use form::{validate_form, ErrorList, FormInput};
