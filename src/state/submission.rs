//! Outcome of the most recent submit

use chrono::{DateTime, Local};
use contact_form::ErrorList;

/// What happened the last time the form was submitted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Form-level validation failed
    Rejected(ErrorList),
    /// Every field passed
    Accepted { at: DateTime<Local> },
}

impl SubmitStatus {
    /// Status line for the result panel
    pub fn summary(&self) -> String {
        match self {
            SubmitStatus::Idle => "Press Ctrl+S to send".to_string(),
            SubmitStatus::Rejected(errors) => match errors.len() {
                1 => "1 problem to fix".to_string(),
                n => format!("{n} problems to fix"),
            },
            SubmitStatus::Accepted { at } => {
                format!("Thanks! Message validated at {}", at.format("%H:%M:%S"))
            }
        }
    }

    /// Messages to list under the summary
    pub fn errors(&self) -> &[String] {
        match self {
            SubmitStatus::Rejected(errors) => errors.as_slice(),
            _ => &[],
        }
    }
}
