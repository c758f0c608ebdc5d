//! Axum router and request handlers for the gateway routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::HeaderValue,
    routing::get,
};
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_core::{
    Config, ForecastSummary, WeatherProvider, WeatherSummary, provider_from_config,
};

use crate::error::ApiError;

/// Server flags.
///
/// The provider credential is deliberately not a flag: it is read from the
/// `OPENWEATHER_API_KEY` environment variable by `Config::from_env`.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather gateway HTTP server")]
pub struct Args {
    /// Address to bind the HTTP listener to.
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub bind: String,

    /// Browser origin allowed to call the API.
    #[arg(long, default_value = "http://localhost:3000")]
    pub allowed_origin: String,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn WeatherProvider>,
}

/// Build the router with the CORS and tracing layers applied.
pub fn router(provider: Arc<dyn WeatherProvider>, allowed_origin: &str) -> anyhow::Result<Router> {
    let origin: HeaderValue = allowed_origin.parse()?;

    // One fixed origin with credentials allowed; methods and headers are
    // mirrored because the wildcard cannot be combined with credentials.
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(Router::new()
        .route("/api/weather/coords", get(weather_by_coords))
        .route("/api/weather/{city}", get(weather_by_city))
        .route("/api/forecast/{city}", get(forecast))
        .with_state(AppState { provider })
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Run the server until Ctrl-C or SIGTERM.
pub async fn run(args: Args) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    if config.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY is not set; lookups will answer 500");
    }

    let app = router(provider_from_config(&config), &args.allowed_origin)?;

    let listener = TcpListener::bind(&args.bind).await?;
    tracing::info!(address = %listener.local_addr()?, "weather gateway listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("weather gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}

async fn weather_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherSummary>, ApiError> {
    let summary = state.provider.current_by_city(&city).await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
struct CoordsQuery {
    lat: f64,
    lon: f64,
}

async fn weather_by_coords(
    State(state): State<AppState>,
    Query(coords): Query<CoordsQuery>,
) -> Result<Json<WeatherSummary>, ApiError> {
    let summary = state.provider.current_by_coords(coords.lat, coords.lon).await?;
    Ok(Json(summary))
}

async fn forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ForecastSummary>, ApiError> {
    let summary = state.provider.forecast(&city).await?;
    Ok(Json(summary))
}
