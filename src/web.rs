//! JSON HTTP surface over the weather lookup

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{LookupError, WeatherLookup};

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = match &self {
            LookupError::EmptyInput => StatusCode::BAD_REQUEST,
            LookupError::CityNotFound { .. } => StatusCode::NOT_FOUND,
            LookupError::GeocodingUnavailable { .. }
            | LookupError::WeatherUnavailable { .. }
            | LookupError::WeatherDataMissing => StatusCode::BAD_GATEWAY,
            LookupError::UnexpectedFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ApiError {
            code: self.code().to_string(),
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(lookup: WeatherLookup) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/weather", get(get_weather))
        .route("/health", get(health))
        .with_state(lookup)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn get_weather(
    State(lookup): State<WeatherLookup>,
    Query(query): Query<WeatherQuery>,
) -> Response {
    let city = query.city.unwrap_or_default();
    match lookup.lookup(&city).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn health() -> &'static str {
    "ok"
}

pub async fn run(lookup: WeatherLookup, host: &str, port: u16) -> Result<()> {
    let app = router(lookup);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| "Web server terminated")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down web server");
}
