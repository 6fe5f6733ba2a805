//! Notes command implementation.

use super::notes_failure_message;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use std::path::PathBuf;

/// Run the notes command.
pub async fn run_notes(url: &str, output: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tubenotes doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(&settings)?;

    let preview = match orchestrator.preview(url) {
        Ok(preview) => preview,
        Err(e) => {
            Output::error(&notes_failure_message(&e));
            return Err(e.into());
        }
    };
    Output::preview(&preview);

    let spinner = Output::spinner("Extracting transcript...");
    let transcript = match orchestrator.fetch_transcript(&preview.video_id).await {
        Ok(transcript) => transcript,
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&notes_failure_message(&e));
            return Err(e.into());
        }
    };

    spinner.set_message("Generating summary...");
    let summary = match orchestrator.summarize(&transcript).await {
        Ok(summary) => summary,
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&notes_failure_message(&e));
            return Err(e.into());
        }
    };
    spinner.finish_and_clear();

    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            write_markdown(&path, &preview.watch_url, &preview.thumbnail_url, summary.as_str())?;
            Output::success(&format!("Notes written to {}", path.display()));
        }
        None => Output::notes(summary.as_str()),
    }

    Ok(())
}

fn write_markdown(path: &PathBuf, watch_url: &str, thumbnail_url: &str, summary: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = format!(
        "# Detailed Notes\n\n[![thumbnail]({})]({})\n\n{}\n",
        thumbnail_url, watch_url, summary
    );
    std::fs::write(path, content)?;
    Ok(())
}
