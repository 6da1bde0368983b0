//! Weather cache HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{AuditLogger, CacheStore, SystemClock, WeatherService};
use infrastructure::{
    AppConfig, DynamoDbAuditLog, S3ObjectStore, TelemetryConfig, WeatherAdapter, init_telemetry,
};
use presentation_http::{routes, serve_with_shutdown, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_telemetry(&TelemetryConfig::from_app_config(&config)?)?;

    info!("⛅ weather-cache v{} starting...", env!("CARGO_PKG_VERSION"));

    config.validate()?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        bucket = %config.storage.bucket_name,
        table = %config.audit.table_name,
        expiry_minutes = config.cache.expiry_minutes,
        audit_policy = ?config.audit_policy(),
        "Configuration loaded"
    );

    // Adapters
    let objects = Arc::new(S3ObjectStore::new(&config.aws, &config.storage)?);
    let audit_log = Arc::new(DynamoDbAuditLog::new(&config.aws, &config.audit));
    let weather = Arc::new(WeatherAdapter::with_config(
        config.weather.to_weather_api_config(),
    )?);
    let clock = Arc::new(SystemClock);

    // Services
    let weather_service = WeatherService::new(
        CacheStore::new(objects, clock.clone(), config.cache.expiry()),
        weather,
        AuditLogger::new(audit_log, clock),
    )
    .with_audit_policy(config.audit_policy());

    let app = routes::create_router(AppState::new(weather_service))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    serve_with_shutdown(listener, app, shutdown_signal(), shutdown_timeout).await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
