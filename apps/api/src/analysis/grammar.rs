//! Grammar and spelling — delegated to LanguageTool behind the `GrammarChecker` trait.

use async_trait::async_trait;

use crate::analysis::{Issue, IssueType};
use crate::errors::AppError;
use crate::languagetool::{GrammarMatch, LanguageToolClient, LanguageToolError};

/// Maximum number of replacement suggestions surfaced per issue.
pub const MAX_SUGGESTIONS: usize = 3;

/// Carried in `AppState` as `Arc<dyn GrammarChecker>`.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    async fn check(&self, text: &str) -> Result<Vec<GrammarMatch>, LanguageToolError>;

    /// Auto-corrected text: each match's first replacement spliced in.
    async fn correct(&self, text: &str) -> Result<String, LanguageToolError> {
        let matches = self.check(text).await?;
        Ok(apply_corrections(text, &matches))
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolClient {
    async fn check(&self, text: &str) -> Result<Vec<GrammarMatch>, LanguageToolError> {
        LanguageToolClient::check(self, text).await
    }
}

/// Runs the grammar checker and maps every match to a `grammar` issue.
pub async fn check_grammar_and_spelling(
    text: &str,
    grammar: &dyn GrammarChecker,
) -> Result<Vec<Issue>, AppError> {
    let matches = grammar
        .check(text)
        .await
        .map_err(|e| AppError::GrammarService(format!("check failed: {e}")))?;

    Ok(matches.into_iter().map(issue_from_match).collect())
}

fn issue_from_match(m: GrammarMatch) -> Issue {
    Issue {
        message: m.message,
        context: m.context.text,
        suggestions: m
            .replacements
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|r| r.value)
            .collect(),
        offset: m.offset,
        length: m.length,
        rule: m.rule.id,
        issue_type: IssueType::Grammar,
    }
}

/// Applies the first replacement of each match, left to right by offset.
/// Matches without replacements, overlapping an earlier applied match, or
/// running past the end of the text are skipped. Offsets are in characters.
pub fn apply_corrections(text: &str, matches: &[GrammarMatch]) -> String {
    let chars: Vec<char> = text.chars().collect();

    let mut ordered: Vec<&GrammarMatch> = matches
        .iter()
        .filter(|m| !m.replacements.is_empty())
        .collect();
    ordered.sort_by_key(|m| m.offset);

    let mut corrected = String::with_capacity(text.len());
    let mut cursor = 0;

    for m in ordered {
        let end = m.offset + m.length;
        if m.offset < cursor || end > chars.len() {
            continue;
        }
        corrected.extend(&chars[cursor..m.offset]);
        corrected.push_str(&m.replacements[0].value);
        cursor = end;
    }

    corrected.extend(&chars[cursor..]);
    corrected
}
