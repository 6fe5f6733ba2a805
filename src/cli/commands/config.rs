//! Config command: inspect and edit the settings file in use.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Run the config command against the resolved config file.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let rendered =
                toml::to_string_pretty(&settings).context("Failed to serialize settings")?;
            if !config_path.exists() {
                println!("# {} does not exist, showing defaults\n", config_path.display());
            }
            println!("{}", rendered);
        }

        ConfigAction::Edit => {
            if write_if_missing(config_path, &settings)? {
                Output::info(&format!("Wrote current settings to {}", config_path.display()));
            }

            let editor = editor();
            Output::info(&format!("Opening {} in {}...", config_path.display(), editor));

            let status = std::process::Command::new(&editor)
                .arg(config_path)
                .status()
                .with_context(|| format!("Failed to start editor '{}'", editor))?;
            if !status.success() {
                Output::warning("Editor exited with non-zero status.");
            }

            // A broken file would otherwise only show up on the next run
            match check_file(config_path) {
                Ok(()) => Output::success("Config is valid."),
                Err(e) => Output::error(&format!("Config no longer parses: {}", e)),
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Persist `settings` to `path` unless a file is already there.
fn write_if_missing(path: &Path, settings: &Settings) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    settings
        .save_to(&PathBuf::from(path))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

fn check_file(path: &Path) -> crate::Result<()> {
    Settings::load_from(Some(&PathBuf::from(path))).map(|_| ())
}

fn editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_if_missing_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.server.port = 4100;
        assert!(write_if_missing(&path, &settings).unwrap());
        assert!(check_file(&path).is_ok());

        settings.server.port = 4200;
        assert!(!write_if_missing(&path, &settings).unwrap());
        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.server.port, 4100);
    }

    #[test]
    fn test_check_file_reports_broken_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(check_file(&path).is_err());
    }
}
