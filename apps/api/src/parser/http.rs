use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DependencyParser, ParserError, Token};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    tokens: Vec<Token>,
}

/// Client for a dependency-parser sidecar (e.g. a small spaCy service).
///
/// Contract: `POST {base}/parse` with `{"text": ...}` returns
/// `{"tokens": [{"text", "idx", "dep", "head"}]}`.
#[derive(Clone)]
pub struct HttpDependencyParser {
    client: Client,
    base_url: String,
}

impl HttpDependencyParser {
    pub fn new(base_url: &str) -> Result<Self, ParserError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DependencyParser for HttpDependencyParser {
    async fn parse(&self, text: &str) -> Result<Vec<Token>, ParserError> {
        let response = self
            .client
            .post(format!("{}/parse", self.base_url))
            .json(&ParseRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ParserError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: ParseResponse = serde_json::from_str(&body)?;
        debug!("Dependency parser returned {} tokens", parsed.tokens.len());

        Ok(parsed.tokens)
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}
