mod config;
mod errors;
mod llm_client;
mod models;
mod parsing;
mod ranking;
mod routes;
mod scheduling;
mod screening;
mod state;
mod summarizer;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::parsing::entities::{EntityRecognizer, LlmEntityRecognizer, NoopEntityRecognizer};
use crate::routes::build_router;
use crate::scheduling::calendar::{Calendar, GoogleCalendar, UnconfiguredCalendar};
use crate::scheduling::mailer::{DisabledMailer, Mailer, SmtpMailer};
use crate::state::AppState;
use crate::summarizer::{CandidateSummarizer, LlmSummarizer, UnavailableSummarizer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; every collaborator below is built from it.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // LLM-backed collaborators (summaries, optional entity recognition)
    let llm = config.anthropic_api_key.clone().map(LlmClient::new);
    let summarizer: Arc<dyn CandidateSummarizer> = match &llm {
        Some(client) => {
            info!("Summarizer enabled (model: {})", llm_client::MODEL);
            Arc::new(LlmSummarizer(client.clone()))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; candidate summaries disabled");
            Arc::new(UnavailableSummarizer)
        }
    };
    let entity_recognizer: Arc<dyn EntityRecognizer> = match (&llm, config.enable_llm_entities) {
        (Some(client), true) => Arc::new(LlmEntityRecognizer(client.clone())),
        _ => Arc::new(NoopEntityRecognizer),
    };
    info!("Entity recognition backend: {}", entity_recognizer.backend());

    // Calendar
    let calendar: Arc<dyn Calendar> = match &config.google_calendar_token {
        Some(token) => {
            info!("Calendar client initialized (calendar: {})", config.calendar_id);
            Arc::new(GoogleCalendar::new(
                token.clone(),
                config.calendar_id.clone(),
            ))
        }
        None => {
            warn!("GOOGLE_CALENDAR_TOKEN not set; interview scheduling disabled");
            Arc::new(UnconfiguredCalendar)
        }
    };

    // Mailer
    let mailer: Arc<dyn Mailer> = match config.smtp_settings() {
        Some(settings) => {
            info!(
                "SMTP mailer initialized ({}:{})",
                settings.server, settings.port
            );
            Arc::new(SmtpMailer::new(settings)?)
        }
        None => {
            warn!("SMTP_USER or SMTP_PASS not set; invitation emails disabled");
            Arc::new(DisabledMailer)
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        entity_recognizer,
        summarizer,
        calendar,
        mailer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // single-user tool served to a local form front end

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
