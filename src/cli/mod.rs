//! CLI module for tubenotes.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// tubenotes - YouTube notes and Q&A
///
/// Turns a YouTube link into detailed notes and answers questions about them.
/// Runs an interactive session when no command is given.
#[derive(Parser, Debug)]
#[command(name = "tubenotes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive notes and Q&A session
    Session {
        /// YouTube link to generate notes for right away
        url: Option<String>,
    },

    /// Generate detailed notes for a video
    Notes {
        /// YouTube link
        url: String,

        /// Write the notes to a Markdown file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate notes for a video and answer one question about it
    Ask {
        /// YouTube link
        url: String,

        /// The question to ask
        question: String,
    },

    /// Start HTTP API server with per-client sessions
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration and credentials
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
