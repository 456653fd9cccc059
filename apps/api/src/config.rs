use anyhow::{ensure, Context, Result};

use crate::analysis::summarize::DEFAULT_SUMMARY_SENTENCES;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub languagetool_url: String,
    pub languagetool_language: String,
    /// Dependency-parser sidecar. `None` selects the built-in rule-based parser.
    pub dependency_parser_url: Option<String>,
    pub summary_sentences: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            languagetool_url: "http://localhost:8081/v2".to_string(),
            languagetool_language: "en-US".to_string(),
            dependency_parser_url: None,
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let summary_sentences = match optional_env("SUMMARY_SENTENCES") {
            Some(raw) => raw
                .parse::<usize>()
                .context("SUMMARY_SENTENCES must be a positive integer")?,
            None => defaults.summary_sentences,
        };
        ensure!(summary_sentences >= 1, "SUMMARY_SENTENCES must be at least 1");

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            languagetool_url: optional_env("LANGUAGETOOL_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.languagetool_url),
            languagetool_language: optional_env("LANGUAGETOOL_LANGUAGE")
                .unwrap_or(defaults.languagetool_language),
            dependency_parser_url: optional_env("DEPENDENCY_PARSER_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            summary_sentences,
        })
    }
}

/// Reads an env var, treating empty values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
