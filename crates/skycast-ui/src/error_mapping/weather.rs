use crate::services::weather_service::WeatherError as UiWeatherError;
use skycast_core::{AppError, NetworkError, WeatherError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::Network(s) => AppError::Network(NetworkError::ConnectionFailed(s)),
            UiWeatherError::Timeout => AppError::Network(NetworkError::Timeout),
            UiWeatherError::Status(status) => AppError::Network(NetworkError::ServerError {
                status,
                message: format!("HTTP {}", status),
            }),
            UiWeatherError::Api(s) => AppError::Weather(WeatherError::ApiError(s)),
            UiWeatherError::InvalidResponse(s) => {
                AppError::Weather(WeatherError::InvalidResponse(s))
            }
            UiWeatherError::EmptyLocation => AppError::Weather(WeatherError::EmptyLocation),
            UiWeatherError::Cancelled => AppError::Weather(WeatherError::ServiceUnavailable),
        }
    }
}
