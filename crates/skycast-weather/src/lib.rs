//! Weather data for SkyCast
//!
//! Fetches report text from the weather API and parses it into a
//! structured [`WeatherReport`].

pub mod client;
pub mod parser;
pub mod types;

pub use client::{FetchedWeather, WeatherApiClient};
pub use parser::parse_report;
pub use types::*;
