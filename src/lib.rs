//! tubenotes - YouTube notes and Q&A
//!
//! A CLI assistant that turns a YouTube link into study notes and answers
//! follow-up questions grounded in those notes.
//!
//! # Overview
//!
//! tubenotes allows you to:
//! - Fetch the caption transcript of a YouTube video, optionally through egress proxies
//! - Summarize it with an OpenAI-compatible chat model (DeepSeek by default)
//! - Ask follow-up questions answered from the summary
//! - Run the same flow as an interactive session or an HTTP API
//!
//! # Architecture
//!
//! - `video` - Video ID extraction and thumbnails
//! - `transcript` - Caption retrieval and proxy selection
//! - `generation` - Chat completion backends
//! - `orchestrator` - Link-to-notes and notes-to-answer pipeline
//! - `session` - Per-session state (the current notes)
//! - `config` - Settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use tubenotes::config::Settings;
//! use tubenotes::orchestrator::Orchestrator;
//! use tubenotes::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let mut session = Session::new();
//!     let notes = session
//!         .get_notes(&orchestrator, "https://youtu.be/dQw4w9WgXcQ")
//!         .await?;
//!     println!("{}", notes.summary);
//!
//!     let answer = session
//!         .submit_question(&orchestrator, "What is the main topic?")
//!         .await?;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod openai;
pub mod orchestrator;
pub mod session;
pub mod transcript;
pub mod video;

pub use error::{NotesError, Result};
