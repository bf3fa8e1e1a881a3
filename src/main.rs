use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod event_sourcing;
mod http;
mod metrics;

use config::AppConfig;
use http::{start_http_server, ErrorTranslator, SignInLog};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,user_api=debug")),
        )
        .init();

    // Process-wide configuration is read exactly once, here.
    let config = AppConfig::from_env();

    tracing::info!("🚀 Starting user sign-in API");
    tracing::info!(environment = ?config.environment, "⚙️ Environment mode loaded");

    // === 1. Initialize Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!(
        "📊 Metrics registry created with {} metrics",
        metrics.registry().gather().len()
    );

    // === 2. Build the error translator with the mode it will keep for life ===
    let translator = ErrorTranslator::new(config.environment);

    // === 3. Start HTTP server ===
    let sign_in_log = Arc::new(SignInLog::new());
    start_http_server(translator, metrics, sign_in_log, config.http_port).await?;

    Ok(())
}
