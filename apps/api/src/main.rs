mod config;
mod errors;
mod generation;
mod jd;
mod latex;
mod llm_client;
mod render;
mod routes;
mod state;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::SectionGenerator;
use crate::jd::MetadataResolver;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::render::PdfCompiler;
use crate::routes::build_router;
use crate::state::AppState;
use crate::validation::SectionValidators;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeForge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm: Arc<dyn TextGenerator> = Arc::new(LlmClient::new(config.anthropic_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let resolver = Arc::new(MetadataResolver::new(llm.clone()));
    let sections = Arc::new(SectionGenerator::new(llm, config.validation.summary_rules()));

    let validators = Arc::new(SectionValidators::new(&config.validation));
    info!("Validation thresholds: {:?}", config.validation);

    // PDF rendering is optional at startup; /api/v1/render reports the missing tool.
    let pdf = PdfCompiler::new(config.pdflatex_bin.clone());
    if pdf.is_available().await {
        info!("PDF compiler available: {}", pdf.bin());
    } else {
        warn!("{} not found, PDF rendering will fail", pdf.bin());
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        resolver,
        sections,
        validators,
        pdf,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
