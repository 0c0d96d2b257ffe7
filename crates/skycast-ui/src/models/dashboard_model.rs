use std::sync::Arc;
use std::time::{Duration, Instant};

use skycast_core::{AppError, Completion, RequestId, ViewState, WeatherError};
use skycast_weather::{FetchedWeather, WeatherReport};

use crate::app_services::AppServices;
use crate::render::query_date_now;
use crate::services::{request_weather_fetch, request_weather_locations, WeatherServiceMessage};

/// Dashboard component state.
///
/// Owns the search input, the known locations and whatever the view is
/// showing. Network results arrive on the services channel and are applied
/// by [`poll`](Self::poll) or one of the `wait_*` methods on the caller's
/// thread.
pub struct DashboardModel {
    services: Arc<AppServices>,
    state: ViewState,
    last_request_id: RequestId,
    input: String,
    locations: Vec<String>,
    locations_pending: bool,
    query_date: String,
    searched_location: Option<String>,
    weather: Option<FetchedWeather>,
    error_message: Option<String>,
}

impl DashboardModel {
    pub fn new(services: Arc<AppServices>) -> Self {
        let query_date = query_date_now(&services.config().ui.date_format);

        Self {
            services,
            state: ViewState::Idle,
            last_request_id: 0,
            input: String::new(),
            locations: Vec::new(),
            locations_pending: false,
            query_date,
            searched_location: None,
            weather: None,
            error_message: None,
        }
    }

    /// Start loading the location list.
    pub fn load(&mut self) {
        self.locations_pending = true;
        request_weather_locations(&self.services);
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Search for the current input. Blank input shows an error instead of
    /// sending a request.
    pub fn search(&mut self) -> Option<RequestId> {
        let location = self.input.trim().to_string();
        if location.is_empty() {
            self.show_error(AppError::from(WeatherError::EmptyLocation).user_message());
            self.state = self.state.reject_input();
            return None;
        }
        Some(self.start_fetch(location))
    }

    /// Pick a location from the list and search for it.
    pub fn select_location(&mut self, index: usize) -> Option<RequestId> {
        let location = self.locations.get(index)?.clone();
        self.input = location.clone();
        Some(self.start_fetch(location))
    }

    fn start_fetch(&mut self, location: String) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;

        self.state = self.state.begin_search(request_id);
        self.weather = None;
        self.error_message = None;
        self.searched_location = Some(location.clone());

        request_weather_fetch(&self.services, request_id, location);
        request_id
    }

    fn show_error(&mut self, message: String) {
        self.weather = None;
        self.error_message = Some(message);
    }

    /// Apply one service message. Returns true if anything visible changed.
    pub fn handle_message(&mut self, message: WeatherServiceMessage) -> bool {
        match message {
            WeatherServiceMessage::LocationsDone(result) => {
                self.locations_pending = false;
                match result {
                    Ok(locations) => {
                        self.locations = locations;
                        true
                    }
                    Err(e) => {
                        tracing::warn!("Keeping empty location list: {}", e);
                        false
                    }
                }
            }
            WeatherServiceMessage::FetchDone {
                request_id,
                location,
                result,
            } => match self.state.on_fetch_done(request_id, result.is_ok()) {
                Completion::Stale => {
                    tracing::debug!(
                        "Dropping stale weather for {} (request {}, awaiting {:?})",
                        location,
                        request_id,
                        self.state.pending_request()
                    );
                    false
                }
                Completion::Applied(next) => {
                    self.state = next;
                    match result {
                        Ok(weather) => {
                            self.weather = Some(weather);
                            self.error_message = None;
                        }
                        Err(e) => self.show_error(AppError::from(e).user_message()),
                    }
                    true
                }
            },
        }
    }

    /// Apply every message already waiting. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(message) = self.services.try_recv_weather_message() {
            changed |= self.handle_message(message);
        }
        changed
    }

    /// Wait up to `timeout` for one message, then drain the rest.
    pub fn wait_for_update(&mut self, timeout: Duration) -> bool {
        match self.services.recv_weather_message_timeout(timeout) {
            Some(message) => {
                let changed = self.handle_message(message);
                self.poll() || changed
            }
            None => false,
        }
    }

    /// Wait until neither a search nor the location list is outstanding.
    /// Returns false if `timeout` elapsed first.
    pub fn wait_until_settled(&mut self, timeout: Duration) -> bool {
        // None when `timeout` is too large to represent; wait without a deadline
        let deadline = Instant::now().checked_add(timeout);
        self.poll();
        while self.is_busy() {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => timeout,
            };
            if remaining.is_zero() {
                return false;
            }
            self.wait_for_update(remaining);
        }
        true
    }

    /// Tear down: cancel in-flight requests.
    pub fn shutdown(&mut self) {
        self.services.shutdown();
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_loading() || self.locations_pending
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn query_date(&self) -> &str {
        &self.query_date
    }

    /// Location of the most recent search.
    pub fn searched_location(&self) -> Option<&str> {
        self.searched_location.as_deref()
    }

    /// Parsed report, only while displaying.
    pub fn report(&self) -> Option<&WeatherReport> {
        self.weather.as_ref().map(|w| &w.report)
    }

    /// Unparsed report text, only while displaying.
    pub fn raw_report(&self) -> Option<&str> {
        self.weather.as_ref().map(|w| w.raw.as_str())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn show_raw(&self) -> bool {
        self.services.config().ui.show_raw
    }
}

impl Drop for DashboardModel {
    fn drop(&mut self) {
        self.shutdown();
    }
}
