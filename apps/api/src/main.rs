mod analysis;
mod config;
mod errors;
mod languagetool;
mod parser;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::grammar::GrammarChecker;
use crate::analysis::sentiment::LexiconScorer;
use crate::config::Config;
use crate::languagetool::LanguageToolClient;
use crate::parser::{DependencyParser, HttpDependencyParser, RuleBasedParser};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scribe API v{}", env!("CARGO_PKG_VERSION"));

    // One LanguageTool handle for the whole process
    let languagetool =
        LanguageToolClient::new(&config.languagetool_url, &config.languagetool_language)
            .context("Failed to build LanguageTool HTTP client")?;
    info!(
        "LanguageTool client initialized ({}, {})",
        languagetool.base_url(),
        config.languagetool_language
    );
    let grammar: Arc<dyn GrammarChecker> = Arc::new(languagetool);

    let parser: Arc<dyn DependencyParser> = match &config.dependency_parser_url {
        Some(url) => Arc::new(
            HttpDependencyParser::new(url).context("Failed to build dependency parser client")?,
        ),
        None => Arc::new(RuleBasedParser),
    };
    info!("Dependency parser backend: {}", parser.backend());

    let lexicon = LexiconScorer::embedded().context("Failed to load sentiment lexicon")?;
    info!("Sentiment lexicon loaded ({} words)", lexicon.word_count());

    let state = AppState {
        config: config.clone(),
        grammar,
        parser,
        sentiment: Arc::new(lexicon),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
