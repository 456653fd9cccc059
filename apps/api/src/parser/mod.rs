//! Dependency parsing — pluggable, trait-based parser producing spaCy-style tokens.
//!
//! Default: `RuleBasedParser` (pure-Rust, only knows the passive-auxiliary relation).
//! Optional: `HttpDependencyParser` (full parse from a sidecar service).
//!
//! `AppState` holds an `Arc<dyn DependencyParser>`, chosen at startup via config.

pub mod http;
pub mod rule_based;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpDependencyParser;
pub use rule_based::RuleBasedParser;

/// Dependency label marking a passive auxiliary ("was" in "was thrown").
pub const DEP_AUXPASS: &str = "auxpass";

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One token of a parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Character offset of the token within the parsed text.
    pub idx: usize,
    /// Syntactic dependency label, e.g. `auxpass`, `nsubjpass`, `ROOT`.
    pub dep: String,
    /// Index of the syntactic head within the token list. A root points at itself.
    pub head: usize,
}

/// The parser trait. Implement this to swap backends without touching
/// the style checker or the handler.
#[async_trait]
pub trait DependencyParser: Send + Sync {
    async fn parse(&self, text: &str) -> Result<Vec<Token>, ParserError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
