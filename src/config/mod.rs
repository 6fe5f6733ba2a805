//! Configuration module for tubenotes.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{NotesPrompts, Prompts, QaPrompts};
pub use settings::{
    GeneralSettings, GenerationSettings, NotesSettings, PromptSettings, ProxyMode, ProxySettings,
    ServerSettings, Settings, TranscriptSettings,
};
