pub mod config;
pub mod error;
pub mod view_state;

pub use config::{ApiConfig, Config, UiConfig, ValidationResult, API_URL_ENV};
pub use error::{
    AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError, EMPTY_LOCATION_MESSAGE,
    FETCH_FAILED_MESSAGE,
};
pub use view_state::{Completion, RequestId, ViewState};

use anyhow::Result;

/// Initialize logging for the SkyCast binaries.
///
/// Output goes to stderr so the rendered dashboard owns stdout.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("SkyCast core initialized");
    Ok(())
}
