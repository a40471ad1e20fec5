use serde_json::Value;
use tracing::error;

use crate::{
    fetch::FetchError,
    model::{AirQualityReport, ApiAirQuality, ApiResponse, CurrentReport, ErrorReply, WeatherOutput},
};

/// Message used when a 200 body does not have the shape we expect.
pub const PROCESSING_ERROR: &str = "Error processing weather data";

/// Shape a fetch outcome into something displayable.
///
/// Errors pass through unchanged as an [`ErrorReply`]; a raw payload is read
/// through the all-optional [`ApiResponse`] lens and every missing leaf gets
/// its documented default. This function never panics past its boundary:
/// a malformed payload becomes an error reply too.
pub fn format_current(outcome: Result<Value, FetchError>) -> WeatherOutput {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(e) => return WeatherOutput::Error(ErrorReply::new(e.to_string())),
    };

    match serde_json::from_value::<ApiResponse>(raw) {
        Ok(parsed) => WeatherOutput::Report(build_report(parsed)),
        Err(e) => {
            error!(cause = %e, "provider payload did not match the expected shape");
            WeatherOutput::Error(ErrorReply::new(PROCESSING_ERROR))
        }
    }
}

fn build_report(parsed: ApiResponse) -> CurrentReport {
    let location = parsed.location.unwrap_or_default();
    let current = parsed.current.unwrap_or_default();
    let condition = current.condition.unwrap_or_default();
    let air_quality = current.air_quality.map(build_air_quality);

    CurrentReport {
        city: location.name.unwrap_or_else(|| "Unknown".to_string()),
        region: location.region.unwrap_or_default(),
        country: location.country.unwrap_or_else(|| "Unknown".to_string()),
        localtime: location.localtime.unwrap_or_default(),
        temp_c: current.temp_c.unwrap_or_default(),
        temp_f: current.temp_f.unwrap_or_default(),
        feelslike_c: current.feelslike_c.unwrap_or_default(),
        feelslike_f: current.feelslike_f.unwrap_or_default(),
        humidity: current.humidity.unwrap_or_default(),
        wind_kph: current.wind_kph.unwrap_or_default(),
        wind_dir: current.wind_dir.unwrap_or_else(|| "N/A".to_string()),
        pressure_mb: current.pressure_mb.unwrap_or_default(),
        vis_km: current.vis_km.unwrap_or_default(),
        uv: current.uv.unwrap_or_default(),
        weather_desc: condition.text.unwrap_or_else(|| "N/A".to_string()),
        weather_icon: condition.icon.unwrap_or_default(),
        last_updated: current.last_updated.unwrap_or_default(),
        air_quality,
    }
}

fn build_air_quality(aq: ApiAirQuality) -> AirQualityReport {
    AirQualityReport {
        co: aq.co.unwrap_or_default(),
        no2: aq.no2.unwrap_or_default(),
        o3: aq.o3.unwrap_or_default(),
        pm2_5: aq.pm2_5.unwrap_or_default(),
        pm10: aq.pm10.unwrap_or_default(),
        us_epa_index: aq.us_epa_index.unwrap_or_default(),
        gb_defra_index: aq.gb_defra_index.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_payload_maps_field_for_field() {
        let raw = json!({
            "location": {
                "name": "Berlin",
                "region": "Berlin",
                "country": "Germany",
                "localtime": "2025-06-01 14:30"
            },
            "current": {
                "temp_c": 21.5,
                "temp_f": 70.7,
                "feelslike_c": 20.9,
                "feelslike_f": 69.6,
                "humidity": 48,
                "wind_kph": 11.2,
                "wind_dir": "WSW",
                "pressure_mb": 1016.0,
                "vis_km": 10.0,
                "uv": 5.0,
                "condition": {"text": "Partly cloudy", "icon": "//cdn/icon.png"},
                "last_updated": "2025-06-01 14:15"
            }
        });

        let out = format_current(Ok(raw));
        let WeatherOutput::Report(report) = out else {
            panic!("expected a report, got {out:?}");
        };

        assert_eq!(report.city, "Berlin");
        assert_eq!(report.region, "Berlin");
        assert_eq!(report.country, "Germany");
        assert_eq!(report.localtime, "2025-06-01 14:30");
        assert_eq!(report.temp_c, 21.5);
        assert_eq!(report.temp_f, 70.7);
        assert_eq!(report.humidity, 48);
        assert_eq!(report.wind_dir, "WSW");
        assert_eq!(report.weather_desc, "Partly cloudy");
        assert_eq!(report.weather_icon, "//cdn/icon.png");
        assert_eq!(report.last_updated, "2025-06-01 14:15");
        assert!(report.air_quality.is_none());
    }

    #[test]
    fn sparse_payload_gets_documented_defaults() {
        let raw = json!({
            "location": {"name": "Paris", "country": "France"},
            "current": {
                "temp_c": 18,
                "humidity": 60,
                "condition": {"text": "Clear"}
            }
        });

        let out = format_current(Ok(raw));
        let WeatherOutput::Report(report) = out else {
            panic!("expected a report, got {out:?}");
        };

        assert_eq!(report.city, "Paris");
        assert_eq!(report.country, "France");
        assert_eq!(report.temp_c, 18.0);
        assert_eq!(report.humidity, 60);
        assert_eq!(report.weather_desc, "Clear");

        // Unspecified fields fall back to their defaults.
        assert_eq!(report.region, "");
        assert_eq!(report.localtime, "");
        assert_eq!(report.temp_f, 0.0);
        assert_eq!(report.feelslike_c, 0.0);
        assert_eq!(report.wind_kph, 0.0);
        assert_eq!(report.wind_dir, "N/A");
        assert_eq!(report.pressure_mb, 0.0);
        assert_eq!(report.vis_km, 0.0);
        assert_eq!(report.uv, 0.0);
        assert_eq!(report.weather_icon, "");
        assert_eq!(report.last_updated, "");
    }

    #[test]
    fn empty_payload_is_all_defaults_not_an_error() {
        let out = format_current(Ok(json!({})));
        let WeatherOutput::Report(report) = out else {
            panic!("expected a report, got {out:?}");
        };

        assert_eq!(report.city, "Unknown");
        assert_eq!(report.country, "Unknown");
        assert_eq!(report.weather_desc, "N/A");
        assert!(report.air_quality.is_none());
    }

    #[test]
    fn air_quality_sub_record_defaults_absent_pollutants_to_zero() {
        let raw = json!({
            "location": {"name": "Delhi", "country": "India"},
            "current": {
                "temp_c": 33.0,
                "air_quality": {"pm2_5": 81.4, "us-epa-index": 4}
            }
        });

        let out = format_current(Ok(raw));
        let WeatherOutput::Report(report) = out else {
            panic!("expected a report, got {out:?}");
        };

        let aq = report.air_quality.expect("air quality must be present");
        assert_eq!(aq.pm2_5, 81.4);
        assert_eq!(aq.us_epa_index, 4);
        assert_eq!(aq.co, 0.0);
        assert_eq!(aq.no2, 0.0);
        assert_eq!(aq.o3, 0.0);
        assert_eq!(aq.pm10, 0.0);
        assert_eq!(aq.gb_defra_index, 0);
    }

    #[test]
    fn fetch_error_passes_through_unchanged() {
        let out = format_current(Err(FetchError::InvalidApiKey));
        assert_eq!(out, WeatherOutput::Error(ErrorReply::new("Invalid API key")));

        // Idempotence: formatting the same failure again yields the same reply.
        let again = format_current(Err(FetchError::InvalidApiKey));
        assert_eq!(out, again);
    }

    #[test]
    fn malformed_structure_becomes_processing_error() {
        // `location` as a string cannot be read through the typed lens.
        let out = format_current(Ok(json!({"location": "not-an-object"})));
        assert_eq!(out, WeatherOutput::Error(ErrorReply::new(PROCESSING_ERROR)));
    }
}
