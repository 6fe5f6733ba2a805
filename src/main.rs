//! tubenotes CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tubenotes::cli::{commands, Cli, Commands};
use tubenotes::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Secrets may live in a local .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config_path = Settings::resolve_config_path(cli.config.as_deref());
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tubenotes={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        None => {
            commands::run_session(None, settings).await?;
        }

        Some(Commands::Session { url }) => {
            commands::run_session(url.clone(), settings).await?;
        }

        Some(Commands::Notes { url, output }) => {
            commands::run_notes(url, output.clone(), settings).await?;
        }

        Some(Commands::Ask { url, question }) => {
            commands::run_ask(url, question, settings).await?;
        }

        Some(Commands::Serve { host, port }) => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Some(Commands::Doctor) => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(action, settings, &config_path)?;
        }
    }

    Ok(())
}
