//! Request handlers for the web front end.
//!
//! `/weather` always answers 200: failures come back as `{"error": ...}`
//! payloads rather than HTTP error statuses, so the page can treat both
//! outcomes uniformly.

use axum::{Json, extract::State, response::Html};
use serde::{Deserialize, Serialize};
use weather_core::{WeatherOutput, current_weather};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Static landing page with the location form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Body of `POST /weather`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherRequest {
    pub location: String,
}

pub async fn weather(
    State(state): State<AppState>,
    Json(req): Json<WeatherRequest>,
) -> Json<WeatherOutput> {
    Json(current_weather(state.source.as_ref(), &req.location, true).await)
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
