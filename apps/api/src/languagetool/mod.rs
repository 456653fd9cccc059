/// LanguageTool client — the single point of entry for grammar and spelling checks.
///
/// Talks to a LanguageTool HTTP server (self-hosted or public) via `POST {base}/check`.
/// One client is built at startup and shared by every request.
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum LanguageToolError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single rule violation reported by LanguageTool.
///
/// The server counts `offset` and `length` in UTF-16 code units; `check`
/// rewrites both to character positions before returning.
#[derive(Debug, Clone, Deserialize)]
pub struct GrammarMatch {
    pub message: String,
    /// Character offset of the flagged span in the checked text.
    pub offset: usize,
    /// Character length of the flagged span.
    pub length: usize,
    pub context: MatchContext,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    pub rule: MatchRule,
}

/// Snippet of text surrounding a match, as rendered by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchContext {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Replacement {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRule {
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    matches: Vec<GrammarMatch>,
}

#[derive(Clone)]
pub struct LanguageToolClient {
    client: Client,
    base_url: String,
    language: String,
}

impl LanguageToolClient {
    pub fn new(base_url: &str, language: &str) -> Result<Self, LanguageToolError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks `text` and returns every match in the order the server reports them.
    /// Retries on 429 and 5xx with exponential backoff.
    pub async fn check(&self, text: &str) -> Result<Vec<GrammarMatch>, LanguageToolError> {
        let url = format!("{}/check", self.base_url);
        let form = [("text", text), ("language", self.language.as_str())];

        let mut last_error: Option<LanguageToolError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                // 250ms, 500ms
                let delay = Duration::from_millis(250 * (1 << (attempt - 1)));
                warn!(
                    "LanguageTool attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).form(&form).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LanguageToolError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LanguageTool returned {}: {}", status, body);
                last_error = Some(LanguageToolError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(LanguageToolError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            let mut parsed: CheckResponse = serde_json::from_str(&body)?;
            utf16_to_char_spans(text, &mut parsed.matches);

            debug!(
                "LanguageTool check succeeded: chars={}, matches={}",
                text.chars().count(),
                parsed.matches.len()
            );

            return Ok(parsed.matches);
        }

        Err(last_error.unwrap_or(LanguageToolError::Api {
            status: 503,
            message: format!("no response after {MAX_ATTEMPTS} attempts"),
        }))
    }
}

/// Rewrites UTF-16 `offset`/`length` pairs as character positions in `text`.
/// Characters outside the Basic Multilingual Plane take two UTF-16 units.
fn utf16_to_char_spans(text: &str, matches: &mut [GrammarMatch]) {
    // utf16_starts[i] = UTF-16 position where character i begins; last entry is the total.
    let mut utf16_starts = Vec::with_capacity(text.len() + 1);
    let mut position = 0;
    for c in text.chars() {
        utf16_starts.push(position);
        position += c.len_utf16();
    }
    utf16_starts.push(position);

    let to_char = |unit: usize| utf16_starts.partition_point(|&start| start < unit);

    for m in matches.iter_mut() {
        let start = to_char(m.offset);
        let end = to_char(m.offset + m.length);
        m.offset = start;
        m.length = end.saturating_sub(start);
    }
}
