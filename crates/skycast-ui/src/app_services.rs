//! Service container for the dashboard.
//!
//! Holds everything the dashboard needs to talk to the weather API: the
//! tokio runtime, the API client, the result channel and the cancellation
//! token used for teardown. It is built once at startup and handed to the
//! [`DashboardModel`](crate::models::dashboard_model::DashboardModel) that
//! owns it, so nothing lives in globals.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use skycast_core::Config;
use skycast_weather::WeatherApiClient;

/// Message types for the weather service channel
pub use crate::services::WeatherServiceMessage;

pub struct AppServices {
    /// Tokio runtime for network work
    runtime: tokio::runtime::Runtime,

    config: Arc<Config>,

    client: Arc<WeatherApiClient>,

    /// Cancelled on shutdown; in-flight requests resolve as cancelled
    cancel_token: CancellationToken,

    weather_service_tx: Sender<WeatherServiceMessage>,
    weather_service_rx: Mutex<Receiver<WeatherServiceMessage>>,
}

impl AppServices {
    /// Build the runtime and API client from `config`.
    pub fn new(config: Config) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("skycast-tokio")
            .build()
            .context("Failed to create tokio runtime")?;

        let client = WeatherApiClient::new(&config.api.base_url, config.api.request_timeout())
            .context("Failed to create weather API client")?;

        let (tx, rx) = mpsc::channel();

        tracing::info!("Weather services initialized for {}", client.base_url());

        Ok(Self {
            runtime,
            config: Arc::new(config),
            client: Arc::new(client),
            cancel_token: CancellationToken::new(),
            weather_service_tx: tx,
            weather_service_rx: Mutex::new(rx),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> Arc<WeatherApiClient> {
        self.client.clone()
    }

    pub fn runtime_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Token that fires when the services shut down.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Get weather service sender.
    pub fn weather_service_tx(&self) -> Sender<WeatherServiceMessage> {
        self.weather_service_tx.clone()
    }

    /// Try to receive a message from the weather service channel (non-blocking).
    pub fn try_recv_weather_message(&self) -> Option<WeatherServiceMessage> {
        self.weather_service_rx.lock().try_recv().ok()
    }

    /// Block for up to `timeout` waiting on the weather service channel.
    pub fn recv_weather_message_timeout(&self, timeout: Duration) -> Option<WeatherServiceMessage> {
        match self.weather_service_rx.lock().recv_timeout(timeout) {
            Ok(message) => Some(message),
            Err(RecvTimeoutError::Timeout) => None,
            // The container holds a sender itself, so the channel cannot close
            // while it is alive.
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Cancel every in-flight request.
    ///
    /// The runtime itself stops when the container is dropped.
    pub fn shutdown(&self) {
        if self.is_shut_down() {
            return;
        }
        tracing::info!("Weather services shutting down");
        self.cancel_token.cancel();
    }
}

impl Drop for AppServices {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.api.base_url = "http://127.0.0.1:1".to_string();
        config
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let mut config = test_config();
        config.api.base_url = "nope".to_string();
        assert!(AppServices::new(config).is_err());
    }

    #[test]
    fn test_channel_roundtrip() {
        let services = AppServices::new(test_config()).unwrap();
        assert!(services.try_recv_weather_message().is_none());

        services
            .weather_service_tx()
            .send(WeatherServiceMessage::LocationsDone(Ok(vec!["Miami".into()])))
            .unwrap();

        match services.recv_weather_message_timeout(Duration::from_secs(1)) {
            Some(WeatherServiceMessage::LocationsDone(Ok(locations))) => {
                assert_eq!(locations, vec!["Miami"]);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_recv_times_out_when_empty() {
        let services = AppServices::new(test_config()).unwrap();
        assert!(services
            .recv_weather_message_timeout(Duration::from_millis(10))
            .is_none());
    }

    #[test]
    fn test_shutdown_cancels_token() {
        let services = AppServices::new(test_config()).unwrap();
        let token = services.cancel_token();
        assert!(!services.is_shut_down());

        services.shutdown();
        assert!(services.is_shut_down());
        assert!(token.is_cancelled());

        // second call is a no-op
        services.shutdown();
    }
}
