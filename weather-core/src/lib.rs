//! Core library for the weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client (one bounded GET, errors mapped to messages)
//! - Report shaping with field-by-field defaults
//!
//! It is used by `weather-cli` and `weather-web`, but can also be reused by
//! other binaries or services.

pub mod config;
pub mod fetch;
pub mod format;
pub mod model;

pub use config::Config;
pub use fetch::{FetchError, WeatherApiClient, WeatherSource};
pub use format::format_current;
pub use model::{AirQualityReport, CurrentReport, ErrorReply, WeatherOutput};

/// Fetch current conditions for `location` and shape them for display.
///
/// Both front ends go through this: one fetch, one formatting pass, and any
/// failure comes back as an [`ErrorReply`] rather than an `Err`.
pub async fn current_weather(
    source: &dyn WeatherSource,
    location: &str,
    include_air_quality: bool,
) -> WeatherOutput {
    format_current(source.current(location, include_air_quality).await)
}
