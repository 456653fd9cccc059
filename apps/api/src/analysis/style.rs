use crate::analysis::{Issue, IssueType};
use crate::errors::AppError;
use crate::parser::{DependencyParser, DEP_AUXPASS};

pub const PASSIVE_VOICE_RULE: &str = "PASSIVE_VOICE";
const PASSIVE_VOICE_MESSAGE: &str = "Passive voice detected. Consider rewriting for clarity.";

/// Flags every passive auxiliary as a `style` issue.
///
/// One fixed heuristic: a token labelled `auxpass` plus its syntactic head.
/// Context is `...<aux> <head>...`; length spans both tokens and one separator.
pub async fn check_style(
    text: &str,
    parser: &dyn DependencyParser,
) -> Result<Vec<Issue>, AppError> {
    let tokens = parser
        .parse(text)
        .await
        .map_err(|e| AppError::Parser(format!("{} parser failed: {e}", parser.backend())))?;

    let issues = tokens
        .iter()
        .filter(|t| t.dep == DEP_AUXPASS)
        .map(|aux| {
            let head = tokens.get(aux.head).unwrap_or(aux);
            Issue {
                message: PASSIVE_VOICE_MESSAGE.to_string(),
                context: format!("...{} {}...", aux.text, head.text),
                suggestions: vec![],
                offset: aux.idx,
                length: aux.text.chars().count() + 1 + head.text.chars().count(),
                rule: PASSIVE_VOICE_RULE.to_string(),
                issue_type: IssueType::Style,
            }
        })
        .collect();

    Ok(issues)
}
