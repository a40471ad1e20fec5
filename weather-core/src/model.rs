use serde::{Deserialize, Serialize};

/// Typed view over the provider payload.
///
/// WeatherAPI.com is free to omit fields, so every leaf is optional and the
/// formatter substitutes a documented default for anything missing.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub location: Option<ApiLocation>,
    #[serde(default)]
    pub current: Option<ApiCurrent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiLocation {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub localtime: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiCurrent {
    pub temp_c: Option<f64>,
    pub temp_f: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub feelslike_f: Option<f64>,
    pub humidity: Option<u8>,
    pub wind_kph: Option<f64>,
    pub wind_dir: Option<String>,
    pub pressure_mb: Option<f64>,
    pub vis_km: Option<f64>,
    pub uv: Option<f64>,
    pub condition: Option<ApiCondition>,
    pub last_updated: Option<String>,
    pub air_quality: Option<ApiAirQuality>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiCondition {
    pub text: Option<String>,
    pub icon: Option<String>,
}

/// The provider spells the index keys with dashes.
#[derive(Debug, Default, Deserialize)]
pub struct ApiAirQuality {
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: Option<u8>,
    #[serde(rename = "gb-defra-index")]
    pub gb_defra_index: Option<u8>,
}

/// Flat, display-ready record of current conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReport {
    pub city: String,
    pub region: String,
    pub country: String,
    pub localtime: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub humidity: u8,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub vis_km: f64,
    pub uv: f64,
    pub weather_desc: String,
    pub weather_icon: String,
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<AirQualityReport>,
}

/// Air-quality sub-record; only present when the provider sent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReport {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub us_epa_index: u8,
    pub gb_defra_index: u8,
}

/// Failure marker returned in place of data. On the wire, success and failure
/// are distinguished solely by the presence of the `error` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

impl ErrorReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

/// What a front end displays: a report, or an error reply standing in for one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherOutput {
    Report(CurrentReport),
    Error(ErrorReply),
}

impl WeatherOutput {
    pub fn is_error(&self) -> bool {
        matches!(self, WeatherOutput::Error(_))
    }
}
