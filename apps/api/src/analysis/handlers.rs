//! Axum route handlers for the Analysis API.

use anyhow::Context;
use axum::{extract::State, Json};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::summarize::summarize_text;
use crate::analysis::tone::{apply_formal_tone, Tone};
use crate::analysis::{process_text, AnalysisResult};
use crate::errors::AppError;
use crate::state::AppState;

/// Label prepended to `corrected_text` when a summary replaces it.
pub const SUMMARY_LABEL: &str = "📝 **Summary:**\n";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Action {
    Summarize,
    Readability,
    #[default]
    Check,
}

impl From<String> for Action {
    fn from(value: String) -> Self {
        match value.as_str() {
            "summarize" => Action::Summarize,
            "readability" => Action::Readability,
            _ => Action::Check,
        }
    }
}

const DEFAULT_MODE: &str = "general";

fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_mode<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_mode))
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Accepted and logged; does not change engine behaviour.
    #[serde(default = "default_mode", deserialize_with = "null_as_default_mode")]
    pub mode: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: Action,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tone: Tone,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Grammar, style and sentiment are always computed. Then either the summary
/// (action = summarize) or the formal rewrite (tone = formal | academic)
/// replaces `corrected_text`, never both.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if request.text.is_empty() {
        return Err(AppError::Validation("No text provided".to_string()));
    }

    let span = info_span!("analyze", request_id = %Uuid::new_v4());

    async move {
        let mut results = process_text(
            &request.text,
            state.grammar.as_ref(),
            state.parser.as_ref(),
            state.sentiment.as_ref(),
        )
        .await?;

        if request.action == Action::Summarize {
            let text = request.text.clone();
            let sentences = state.config.summary_sentences;
            // SVD is CPU-bound; keep it off the async workers.
            let summary = tokio::task::spawn_blocking(move || summarize_text(&text, sentences))
                .await
                .context("summarization task failed")?;
            results.corrected_text = format!("{SUMMARY_LABEL}{summary}");
        } else if request.tone.wants_formal_rewrite() {
            results.corrected_text = apply_formal_tone(&results.corrected_text);
        }

        info!(
            mode = %request.mode,
            action = ?request.action,
            tone = ?request.tone,
            issues = results.issues.len(),
            "Analysis complete"
        );

        Ok::<_, AppError>(Json(results))
    }
    .instrument(span)
    .await
}
