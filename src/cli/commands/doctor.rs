//! Doctor command - verify configuration and credentials.

use crate::cli::Output;
use crate::config::{ProxyMode, Settings};
use crate::transcript::ProxyPool;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("tubenotes Doctor");
    println!();
    println!("Checking configuration and credentials...\n");

    let mut checks = Vec::new();

    println!("{}", style("Text Generation").bold());
    let generation_checks = vec![
        check_api_key(settings),
        CheckResult::ok(
            "Endpoint",
            &format!("{} ({})", settings.generation.api_base, settings.generation.model),
        ),
    ];
    for check in &generation_checks {
        check.print();
    }
    checks.extend(generation_checks);

    println!();

    println!("{}", style("Transcripts").bold());
    let transcript_checks = vec![check_languages(settings), check_proxies(settings)];
    for check in &transcript_checks {
        check.print();
    }
    checks.extend(transcript_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![check_config_file(config_path), check_prompts_dir(settings)];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using tubenotes.",
            errors
        ));
        anyhow::bail!("{} doctor check(s) failed", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! tubenotes is ready to use.");
    }

    Ok(())
}

/// Check that the generation API key is available.
fn check_api_key(settings: &Settings) -> CheckResult {
    let var = settings.generation.api_key_env.as_str();
    let hint = format!("Set with: export {}='sk-...' (or add it to .env)", var);
    match settings.api_key() {
        Ok(key) => CheckResult::ok(var, &format!("configured ({})", mask_key(&key))),
        Err(_) if std::env::var(var).is_ok() => CheckResult::error(var, "empty", &hint),
        Err(_) => CheckResult::error(var, "not set", &hint),
    }
}

fn check_languages(settings: &Settings) -> CheckResult {
    if settings.transcript.languages.is_empty() {
        CheckResult::warning(
            "Languages",
            "no preference, English captions are requested",
            "Set transcript.languages, e.g. [\"en\"]",
        )
    } else {
        CheckResult::ok("Languages", &settings.transcript.languages.join(", "))
    }
}

/// Check that the proxy settings resolve into a usable pool.
fn check_proxies(settings: &Settings) -> CheckResult {
    match ProxyPool::from_settings(&settings.proxy) {
        Ok(pool) => match settings.proxy.mode {
            ProxyMode::None => CheckResult::ok("Proxy", "direct connection"),
            ProxyMode::Single => CheckResult::ok("Proxy", "single proxy"),
            ProxyMode::Rotating => CheckResult::ok(
                "Proxy",
                &format!("rotating across {} endpoints", pool.len()),
            ),
        },
        Err(e) => CheckResult::error(
            "Proxy",
            &e.to_string(),
            "Fix the [proxy] section or set proxy.mode = \"none\"",
        ),
    }
}

/// Check that the config file in use exists and parses.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        if let Err(e) = Settings::load_from(Some(&config_path.to_path_buf())) {
            return CheckResult::error(
                "Config file",
                &e.to_string(),
                &format!("Fix or remove {}", config_path.display()),
            );
        }
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: tubenotes config edit",
        )
    }
}

fn check_prompts_dir(settings: &Settings) -> CheckResult {
    match &settings.prompts.custom_dir {
        None => CheckResult::ok("Prompts", "built-in"),
        Some(dir) => {
            let path = Settings::expand_path(dir);
            if path.is_dir() {
                CheckResult::ok("Prompts", &format!("{}", path.display()))
            } else {
                CheckResult::warning(
                    "Prompts",
                    &format!("{} does not exist, using built-in prompts", path.display()),
                    "Create the directory with notes.toml and/or qa.toml",
                )
            }
        }
    }
}

/// Show only the edges of a secret.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-1234567890abcdef"), "sk-123...cdef");
        assert_eq!(mask_key("short"), "*****");
    }

    #[test]
    fn test_check_proxies() {
        let mut settings = Settings::default();
        assert_eq!(check_proxies(&settings).status, CheckStatus::Ok);

        settings.proxy.mode = ProxyMode::Rotating;
        assert_eq!(check_proxies(&settings).status, CheckStatus::Error);
    }

    #[test]
    fn test_check_config_file_uses_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(check_config_file(&path).status, CheckStatus::Warning);

        std::fs::write(&path, "[server]\nport = 8080\n").unwrap();
        let result = check_config_file(&path);
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.message.contains("custom.toml"));

        std::fs::write(&path, "[server\n").unwrap();
        assert_eq!(check_config_file(&path).status, CheckStatus::Error);
    }

    #[test]
    fn test_missing_prompts_dir_warns() {
        let mut settings = Settings::default();
        settings.prompts.custom_dir = Some("/definitely/not/here/tubenotes".to_string());
        assert_eq!(check_prompts_dir(&settings).status, CheckStatus::Warning);
    }
}
