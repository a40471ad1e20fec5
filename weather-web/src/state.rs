use std::sync::Arc;

use weather_core::WeatherSource;

/// Shared application state: just the weather source behind the trait seam.
#[derive(Debug, Clone)]
pub struct AppState {
    pub source: Arc<dyn WeatherSource>,
}
