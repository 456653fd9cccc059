use std::sync::Arc;

use crate::analysis::grammar::GrammarChecker;
use crate::analysis::sentiment::SentimentScorer;
use crate::config::Config;
use crate::parser::DependencyParser;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every handle is built once in `main` and lives until shutdown.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// LanguageTool in production; swapped for fixed checkers in tests.
    pub grammar: Arc<dyn GrammarChecker>,
    /// Rule-based by default, or the HTTP sidecar when DEPENDENCY_PARSER_URL is set.
    pub parser: Arc<dyn DependencyParser>,
    pub sentiment: Arc<dyn SentimentScorer>,
}
