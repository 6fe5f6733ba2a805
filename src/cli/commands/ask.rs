//! Ask command implementation.

use super::{notes_failure_message, question_failure_message};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{validate_question, Orchestrator};
use crate::session::Session;
use anyhow::Result;

/// Run the ask command: notes for one video, then one question.
pub async fn run_ask(url: &str, question: &str, settings: Settings) -> Result<()> {
    // Validate before spending a transcript fetch and a summary on it
    if let Err(e) = validate_question(question) {
        Output::warning(&e.to_string());
        return Err(e.into());
    }

    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tubenotes doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(&settings)?;
    let mut session = Session::new();

    let spinner = Output::spinner("Generating notes...");
    let result = session.get_notes(&orchestrator, url).await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        Output::error(&notes_failure_message(&e));
        return Err(e.into());
    }

    let spinner = Output::spinner("Fetching answer...");
    let result = session.submit_question(&orchestrator, question).await;
    spinner.finish_and_clear();

    match result {
        Ok(answer) => {
            Output::answer(&answer);
            Ok(())
        }
        Err(e) => {
            Output::error(&question_failure_message(&e));
            Err(e.into())
        }
    }
}
