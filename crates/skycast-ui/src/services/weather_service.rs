//! Weather backend: async location and report fetching.
//! All network work runs on the services runtime; results sent via mpsc.

use skycast_core::{NetworkError, ReqwestErrorExt, RequestId};
use skycast_weather::FetchedWeather;

use crate::app_services::AppServices;

/// Error type for weather operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// Connection failure or other transport problem
    Network(String),
    Timeout,
    /// Non-2xx response without an error message
    Status(u16),
    /// Message from the API's `error` field
    Api(String),
    InvalidResponse(String),
    EmptyLocation,
    /// Services shut down while the request was in flight
    Cancelled,
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Network(s) => write!(f, "Weather error: {}", s),
            WeatherError::Timeout => write!(f, "Weather request timed out"),
            WeatherError::Status(code) => write!(f, "Weather API returned HTTP {}", code),
            WeatherError::Api(s) => write!(f, "Weather API error: {}", s),
            WeatherError::InvalidResponse(s) => write!(f, "Invalid weather response: {}", s),
            WeatherError::EmptyLocation => write!(f, "Location must not be empty"),
            WeatherError::Cancelled => write!(f, "Weather request cancelled"),
        }
    }
}

impl std::error::Error for WeatherError {}

impl From<skycast_weather::WeatherError> for WeatherError {
    fn from(e: skycast_weather::WeatherError) -> Self {
        use skycast_weather::WeatherError as ApiError;
        match e {
            ApiError::Network(err) => match err.into_network_error() {
                NetworkError::Timeout => WeatherError::Timeout,
                other => WeatherError::Network(other.to_string()),
            },
            ApiError::InvalidBaseUrl(s) => WeatherError::Network(s),
            ApiError::EmptyLocation => WeatherError::EmptyLocation,
            ApiError::Api(s) => WeatherError::Api(s),
            ApiError::Status { status, .. } => WeatherError::Status(status),
            ApiError::InvalidResponse(s) => WeatherError::InvalidResponse(s),
        }
    }
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of fetching the known locations
    LocationsDone(Result<Vec<String>, WeatherError>),
    /// Result of fetching the report for one search
    FetchDone {
        request_id: RequestId,
        location: String,
        result: Result<FetchedWeather, WeatherError>,
    },
}

/// Request the location list asynchronously.
/// Sends `LocationsDone` on the channel when complete.
pub fn request_locations(services: &AppServices) {
    let tx = services.weather_service_tx();
    let client = services.client();
    let cancel = services.cancel_token();

    services.runtime_handle().spawn(async move {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(WeatherError::Cancelled),
            result = client.list_locations() => result.map_err(WeatherError::from),
        };

        match &result {
            Ok(locations) => tracing::info!("Loaded {} locations", locations.len()),
            Err(e) => tracing::warn!("Error fetching locations: {}", e),
        }
        let _ = tx.send(WeatherServiceMessage::LocationsDone(result));
    });
}

/// Request weather for `location` asynchronously.
/// Sends `FetchDone` tagged with `request_id` on the channel when complete.
pub fn request_fetch(services: &AppServices, request_id: RequestId, location: String) {
    let tx = services.weather_service_tx();
    let client = services.client();
    let cancel = services.cancel_token();

    services.runtime_handle().spawn(async move {
        tracing::info!("Fetching weather for {} (request {})", location, request_id);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(WeatherError::Cancelled),
            result = client.fetch_weather(&location) => result.map_err(WeatherError::from),
        };

        if let Err(e) = &result {
            tracing::error!("Failed to fetch weather for {}: {}", location, e);
        }
        let _ = tx.send(WeatherServiceMessage::FetchDone {
            request_id,
            location,
            result,
        });
    });
}
