//! Contact form core
//!
//! Pure field/form validation plus throttle and debounce wrappers driven by
//! an injectable scheduler. The terminal front end in `main.rs` is one
//! consumer of this library.

pub mod config;
pub mod rate_limit;
pub mod render;
pub mod validation;

pub use config::{ConfigError, FormConfig};
pub use rate_limit::{
    debounce, throttle, Debounce, Scheduler, Throttle, TimerId, TokioScheduler, VirtualScheduler,
};
pub use render::{validate_and_render, ErrorMarks, FieldRenderer};
pub use validation::{
    is_field_valid, is_valid_email, validate_field, validate_form, ErrorList, FieldInput,
    FieldKind, FieldValidation, FormInput,
};
