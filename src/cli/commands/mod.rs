//! CLI command implementations.

mod ask;
mod config;
mod doctor;
mod notes;
mod serve;
mod session;

pub use ask::run_ask;
pub use config::run_config;
pub use doctor::run_doctor;
pub use notes::run_notes;
pub use serve::run_serve;
pub use session::run_session;

use crate::error::NotesError;

/// Inline message for a failed "get notes" action.
pub(crate) fn notes_failure_message(err: &NotesError) -> String {
    if err.is_expected() {
        err.to_string()
    } else {
        format!("An unexpected error occurred: {}", err)
    }
}

/// Inline message for a failed "submit question" action.
pub(crate) fn question_failure_message(err: &NotesError) -> String {
    if err.is_expected() {
        err.to_string()
    } else {
        format!("An error occurred while answering your question: {}", err)
    }
}
