//! Interactive session command.

use super::{notes_failure_message, question_failure_message};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::{NotesError, Result};
use crate::orchestrator::Orchestrator;
use crate::session::Session;
use crate::video::extract_video_id;
use console::style;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// A parsed line of user input.
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    /// Get notes for a link.
    Notes(String),
    /// Submit a question about the current notes.
    Ask(String),
    /// Print the current notes again.
    Summary,
    Help,
    Exit,
    Empty,
}

impl SessionCommand {
    fn parse(input: &str, can_ask: bool) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return SessionCommand::Empty;
        }

        let (head, rest) = match input.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (input, ""),
        };

        match head.to_lowercase().as_str() {
            "exit" | "quit" if rest.is_empty() => return SessionCommand::Exit,
            "help" | "?" if rest.is_empty() => return SessionCommand::Help,
            "summary" | "notes" if rest.is_empty() => return SessionCommand::Summary,
            "notes" => return SessionCommand::Notes(rest.to_string()),
            "ask" => return SessionCommand::Ask(rest.to_string()),
            _ => {}
        }

        // A single token that carries a video ID is a link
        let is_link = !input.contains(char::is_whitespace) && extract_video_id(input).is_ok();
        if is_link || !can_ask {
            SessionCommand::Notes(input.to_string())
        } else {
            SessionCommand::Ask(input.to_string())
        }
    }
}

/// Run the interactive session command.
pub async fn run_session(url: Option<String>, settings: Settings) -> anyhow::Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tubenotes doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(&settings)?;
    let mut session = Session::new();
    debug!(session = %session.id(), "Starting interactive session");

    println!("\n{}", style("YouTube Video Assistant").bold().cyan());
    println!(
        "{}\n",
        style("Paste a YouTube link to get detailed notes, then ask questions. Type 'help' for commands.").dim()
    );

    if let Some(url) = url {
        handle_notes(&mut session, &orchestrator, &url).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let label = if session.can_ask() { "Question or link:" } else { "Video link:" };
        print!("{} ", style(label).green().bold());
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            break;
        };

        match SessionCommand::parse(&line, session.can_ask()) {
            SessionCommand::Empty => continue,
            SessionCommand::Exit => break,
            SessionCommand::Help => print_help(session.can_ask()),
            SessionCommand::Summary => match session.summary() {
                Some(summary) => Output::notes(summary.as_str()),
                None => Output::info(&NotesError::NoSummary.to_string()),
            },
            SessionCommand::Notes(url) => handle_notes(&mut session, &orchestrator, &url).await,
            SessionCommand::Ask(question) => {
                handle_question(&session, &orchestrator, &question).await;
            }
        }
    }

    Output::info("Goodbye!");
    Ok(())
}

/// "Get notes" action. Failures are shown inline and never end the session.
async fn handle_notes(session: &mut Session, orchestrator: &Orchestrator, url: &str) {
    match orchestrator.preview(url) {
        Ok(preview) => Output::preview(&preview),
        Err(e) => {
            Output::error(&notes_failure_message(&e));
            return;
        }
    }

    let spinner = Output::spinner("Extracting transcript and generating summary...");
    let outcome = cancellable(session.get_notes(orchestrator, url)).await;
    spinner.finish_and_clear();

    match outcome {
        Some(Ok(notes)) => {
            Output::notes(notes.summary.as_str());
            Output::info("Ask a question about the video, or paste another link.");
        }
        Some(Err(e)) => Output::error(&notes_failure_message(&e)),
        None => Output::warning("Cancelled. Your previous notes are unchanged."),
    }
}

/// "Submit question" action. Only offered once notes exist.
async fn handle_question(session: &Session, orchestrator: &Orchestrator, question: &str) {
    if !session.can_ask() {
        Output::info(&NotesError::NoSummary.to_string());
        return;
    }

    let spinner = Output::spinner("Fetching answer...");
    let outcome = cancellable(session.submit_question(orchestrator, question)).await;
    spinner.finish_and_clear();

    match outcome {
        Some(Ok(answer)) => Output::answer(&answer),
        Some(Err(e @ NotesError::EmptyQuestion)) => Output::warning(&e.to_string()),
        Some(Err(e)) => Output::error(&question_failure_message(&e)),
        None => Output::warning("Cancelled."),
    }
}

/// Race an action against Ctrl-C. `None` means the action was dropped.
async fn cancellable<T>(action: impl std::future::Future<Output = Result<T>>) -> Option<Result<T>> {
    tokio::select! {
        result = action => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    }
}

fn print_help(can_ask: bool) {
    Output::header("Commands");
    Output::kv("<link>", "get detailed notes for a YouTube video");
    Output::kv("notes <link>", "same as pasting a link");
    if can_ask {
        Output::kv("<question>", "ask about the current video");
        Output::kv("ask <question>", "same as typing a question");
        Output::kv("summary", "show the current notes again");
    }
    Output::kv("exit", "leave the session");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_links_and_questions() {
        assert_eq!(
            SessionCommand::parse("https://youtu.be/dQw4w9WgXcQ", false),
            SessionCommand::Notes("https://youtu.be/dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            SessionCommand::parse("https://youtu.be/dQw4w9WgXcQ", true),
            SessionCommand::Notes("https://youtu.be/dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            SessionCommand::parse("What is the main topic?", true),
            SessionCommand::Ask("What is the main topic?".to_string())
        );
    }

    #[test]
    fn test_free_text_without_notes_is_treated_as_link() {
        // Surfaces the invalid-link message instead of reaching Q&A
        assert_eq!(
            SessionCommand::parse("What is the main topic?", false),
            SessionCommand::Notes("What is the main topic?".to_string())
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(SessionCommand::parse("   ", true), SessionCommand::Empty);
        assert_eq!(SessionCommand::parse("EXIT", false), SessionCommand::Exit);
        assert_eq!(SessionCommand::parse("help", true), SessionCommand::Help);
        assert_eq!(SessionCommand::parse("summary", true), SessionCommand::Summary);
        assert_eq!(
            SessionCommand::parse("ask   ", true),
            SessionCommand::Ask(String::new())
        );
        assert_eq!(
            SessionCommand::parse("ask why though", false),
            SessionCommand::Ask("why though".to_string())
        );
        assert_eq!(
            SessionCommand::parse("notes https://www.youtube.com/watch?v=dQw4w9WgXcQ", true),
            SessionCommand::Notes("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string())
        );
    }
}
