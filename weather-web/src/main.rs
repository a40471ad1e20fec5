//! Web front end for the weather app.
//!
//! Serves a static page at `/`, current conditions at `POST /weather`, and a
//! liveness probe at `/health`. One fetch + format per inbound request; no
//! shared mutable state.

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{Config, WeatherApiClient};

mod handlers;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_web=debug,weather_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;
    let client = WeatherApiClient::with_options(api_key, config.base_url(), config.timeout())?;

    let state = AppState { source: Arc::new(client) };
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "weather web server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
