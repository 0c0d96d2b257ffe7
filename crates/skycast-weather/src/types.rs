use serde::{Deserialize, Serialize};

/// Placeholder for numeric-ish fields that could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for conditions that could not be extracted.
pub const UNKNOWN_CONDITIONS: &str = "Unknown";

/// One line of the report's forecast section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day_label: String,
    pub conditions: String,
    pub high_temp: String,
    pub low_temp: String,
}

/// Structured view of a report text.
///
/// Values are kept as the raw text the server sent (units included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_label: String,
    pub temperature: String,
    pub conditions: String,
    pub humidity: String,
    pub wind_speed: String,
    pub forecast_days: Vec<ForecastDay>,
}

impl WeatherReport {
    /// Report with every field at its sentinel.
    pub fn empty(location_label: impl Into<String>) -> Self {
        Self {
            location_label: location_label.into(),
            temperature: NOT_AVAILABLE.to_string(),
            conditions: UNKNOWN_CONDITIONS.to_string(),
            humidity: NOT_AVAILABLE.to_string(),
            wind_speed: NOT_AVAILABLE.to_string(),
            forecast_days: Vec::new(),
        }
    }
}

/// `GET /api/locations` body. Entries are kept loose so non-strings can be
/// dropped instead of failing the whole list.
#[derive(Debug, Deserialize)]
pub(crate) struct LocationsEnvelope {
    #[serde(default)]
    pub locations: Option<serde_json::Value>,
}

impl LocationsEnvelope {
    pub(crate) fn into_names(self) -> Vec<String> {
        match self.locations {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(name) => Some(name),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// `GET /api/weather` body: `{ "data": ... }` or `{ "error": ... }`.
#[derive(Debug, Deserialize)]
pub(crate) struct WeatherEnvelope {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Weather API client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Location must not be empty")]
    EmptyLocation,
    /// Explicit `error` field returned by the API.
    #[error("Weather API error: {0}")]
    Api(String),
    /// Non-2xx response without an `error` field.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_uses_sentinels() {
        let report = WeatherReport::empty("Chicago");
        assert_eq!(report.location_label, "Chicago");
        assert_eq!(report.temperature, "N/A");
        assert_eq!(report.conditions, "Unknown");
        assert_eq!(report.humidity, "N/A");
        assert_eq!(report.wind_speed, "N/A");
        assert!(report.forecast_days.is_empty());
    }

    #[test]
    fn test_locations_envelope_drops_non_strings() {
        let env: LocationsEnvelope = serde_json::from_str(
            r#"{"locations": ["Miami", 3, null, {"name": "x"}, "Seattle", ["y"]]}"#,
        )
        .unwrap();
        assert_eq!(env.into_names(), vec!["Miami", "Seattle"]);
    }

    #[test]
    fn test_locations_envelope_missing_or_not_array() {
        let missing: LocationsEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(missing.into_names().is_empty());

        let scalar: LocationsEnvelope =
            serde_json::from_str(r#"{"locations": "Miami"}"#).unwrap();
        assert!(scalar.into_names().is_empty());
    }

    #[test]
    fn test_weather_envelope_variants() {
        let ok: WeatherEnvelope = serde_json::from_str(r#"{"data": "Weather for X:"}"#).unwrap();
        assert_eq!(ok.data.as_deref(), Some("Weather for X:"));
        assert!(ok.error.is_none());

        let err: WeatherEnvelope = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert!(err.data.is_none());
        assert_eq!(err.error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_report_serializes_snake_case_fields() {
        let json = serde_json::to_value(WeatherReport::empty("Miami")).unwrap();
        assert_eq!(json["location_label"], "Miami");
        assert_eq!(json["wind_speed"], "N/A");
        assert!(json["forecast_days"].as_array().unwrap().is_empty());
    }
}
