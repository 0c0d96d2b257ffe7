//! HTTP client for the weather API (`/api/locations`, `/api/weather`).

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::parser::parse_report;
use crate::types::{LocationsEnvelope, WeatherEnvelope, WeatherError, WeatherReport};

const USER_AGENT: &str = concat!("SkyCast/", env!("CARGO_PKG_VERSION"));

/// Raw report text together with its parsed form.
#[derive(Debug, Clone)]
pub struct FetchedWeather {
    pub raw: String,
    pub report: WeatherReport,
}

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Arc<Client>,
    base_url: String,
}

impl WeatherApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// `timeout` of `None` lets requests wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        let parsed =
            Url::parse(base_url).map_err(|e| WeatherError::InvalidBaseUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(WeatherError::InvalidBaseUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the location names the backend knows about.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_locations(&self) -> Result<Vec<String>, WeatherError> {
        let url = format!("{}/api/locations", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: LocationsEnvelope = serde_json::from_str(&body)
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
        let locations = envelope.into_names();

        tracing::debug!("Fetched {} locations", locations.len());
        Ok(locations)
    }

    /// Fetch the raw report text for `location`.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_report(&self, location: &str) -> Result<String, WeatherError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }

        let url = format!(
            "{}/api/weather?location={}",
            self.base_url,
            urlencoding::encode(location)
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope = match serde_json::from_str::<WeatherEnvelope>(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(WeatherError::Status {
                    status: status.as_u16(),
                    message: body,
                });
            }
            Err(e) => return Err(WeatherError::InvalidResponse(e.to_string())),
        };

        if let Some(error) = envelope.error.filter(|e| !e.is_empty()) {
            return Err(WeatherError::Api(error));
        }

        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        envelope
            .data
            .ok_or_else(|| WeatherError::InvalidResponse("missing data field".to_string()))
    }

    /// Fetch and parse the report for `location`, which also serves as the
    /// fallback location label.
    pub async fn fetch_weather(&self, location: &str) -> Result<FetchedWeather, WeatherError> {
        let raw = self.fetch_report(location).await?;
        let report = parse_report(&raw, location.trim());
        tracing::info!(
            "Weather for {} parsed ({} forecast days)",
            report.location_label,
            report.forecast_days.len()
        );
        Ok(FetchedWeather { raw, report })
    }
}
