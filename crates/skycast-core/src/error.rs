//! Centralized error types for the SkyCast dashboard.
//!
//! This module provides a typed error hierarchy that:
//! - Separates transport failures from weather API failures
//! - Provides user-friendly messages suitable for the dashboard
//! - Preserves full error context for logging

use thiserror::Error;

/// Shown for every fetch failure that carries no message from the server.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

/// Shown when a search is triggered with blank input.
pub const EMPTY_LOCATION_MESSAGE: &str = "Please enter a location";

/// Top-level application error type.
///
/// Use `user_message()` to get the text the dashboard displays.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),
}

impl AppError {
    /// Returns the message shown to the user in place of the weather display.
    ///
    /// Only an explicit error from the weather API is passed through verbatim;
    /// every other failure collapses to a generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Network(e) => e.user_message().to_string(),
            AppError::Config(e) => e.user_message().to_string(),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Weather service errors as seen by the dashboard.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The search box was blank.
    #[error("Empty location")]
    EmptyLocation,

    /// The API answered with an explicit `error` field.
    #[error("Weather API error: {0}")]
    ApiError(String),

    /// The API answered with something that is not a weather envelope.
    #[error("Invalid weather response: {0}")]
    InvalidResponse(String),

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl WeatherError {
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::EmptyLocation => EMPTY_LOCATION_MESSAGE.to_string(),
            WeatherError::ApiError(msg) => msg.clone(),
            WeatherError::InvalidResponse(_) | WeatherError::ServiceUnavailable => {
                FETCH_FAILED_MESSAGE.to_string()
            }
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_passes_through() {
        let err = AppError::Weather(WeatherError::ApiError("Location not supported".into()));
        assert_eq!(err.user_message(), "Location not supported");
    }

    #[test]
    fn test_transport_errors_share_generic_message() {
        let errors = vec![
            AppError::Network(NetworkError::Timeout),
            AppError::Network(NetworkError::ConnectionFailed("refused".into())),
            AppError::Network(NetworkError::ServerError {
                status: 502,
                message: "bad gateway".into(),
            }),
            AppError::Weather(WeatherError::InvalidResponse("not json".into())),
        ];

        for err in errors {
            assert_eq!(err.user_message(), FETCH_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_empty_location_message() {
        let err: AppError = WeatherError::EmptyLocation.into();
        assert_eq!(err.user_message(), EMPTY_LOCATION_MESSAGE);
    }

    #[test]
    fn test_config_error_conversion() {
        let app_err: AppError = ConfigError::Invalid("api.base_url".into()).into();
        assert!(matches!(app_err, AppError::Config(ConfigError::Invalid(_))));
        assert!(app_err.user_message().contains("Check your settings"));
    }
}
