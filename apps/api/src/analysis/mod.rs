// Analysis Engine: grammar, passive-voice style, sentiment, auto-correction, summarization.
// External services are reached only through the GrammarChecker / DependencyParser traits.

pub mod grammar;
pub mod handlers;
pub mod sentiment;
pub mod style;
pub mod summarize;
pub mod tone;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::parser::DependencyParser;

use self::grammar::{check_grammar_and_spelling, GrammarChecker};
use self::sentiment::{Sentiment, SentimentScorer};
use self::style::check_style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Grammar,
    Style,
}

/// A single finding in the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
    pub context: String,
    /// At most three replacements, best first.
    pub suggestions: Vec<String>,
    /// Character offset into the analyzed text.
    pub offset: usize,
    /// Character span.
    pub length: usize,
    pub rule: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Grammar issues first, then style issues.
    pub issues: Vec<Issue>,
    pub sentiment: Sentiment,
    pub corrected_text: String,
}

/// Runs every analysis over `text`. Nothing is cached between calls.
pub async fn process_text(
    text: &str,
    grammar: &dyn GrammarChecker,
    parser: &dyn DependencyParser,
    scorer: &dyn SentimentScorer,
) -> Result<AnalysisResult, AppError> {
    let mut issues = check_grammar_and_spelling(text, grammar).await?;
    let grammar_count = issues.len();

    issues.extend(check_style(text, parser).await?);

    debug!(
        grammar = grammar_count,
        style = issues.len() - grammar_count,
        "Collected issues"
    );

    let sentiment = scorer.score(text).rounded();

    let corrected_text = grammar
        .correct(text)
        .await
        .map_err(|e| AppError::GrammarService(format!("correction failed: {e}")))?;

    Ok(AnalysisResult {
        issues,
        sentiment,
        corrected_text,
    })
}
