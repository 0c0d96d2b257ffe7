//! Plain-text rendering of the dashboard.

use std::fmt::Write;

use chrono::{DateTime, TimeZone};
use skycast_core::ViewState;
use skycast_weather::WeatherReport;

use crate::models::dashboard_model::DashboardModel;

const FALLBACK_DATE_FORMAT: &str = "%A, %B %-d, %Y";
const LOADING_TEXT: &str = "Loading weather data...";
const IDLE_TEXT: &str = "Enter a location to see the weather.";

/// Format the date-of-query line. An invalid format string falls back to the
/// long US date instead of failing.
pub fn format_query_date<Tz>(now: DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_err() {
        tracing::warn!("Invalid date format {:?}, using default", format);
        out.clear();
        let _ = write!(out, "{}", now.format(FALLBACK_DATE_FORMAT));
    }
    out
}

/// Today's date in the local timezone.
pub fn query_date_now(format: &str) -> String {
    format_query_date(chrono::Local::now(), format)
}

/// Numbered list of known locations.
pub fn render_locations(locations: &[String]) -> String {
    if locations.is_empty() {
        return "No locations available.\n".to_string();
    }

    let mut out = String::from("Locations:\n");
    for (i, location) in locations.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, location);
    }
    out
}

/// Current conditions and forecast cards for one report.
pub fn render_report(report: &WeatherReport, query_date: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", report.location_label);
    let _ = writeln!(out, "{}", query_date);
    out.push('\n');
    let _ = writeln!(out, "  {:<12} {}", "Temperature", report.temperature);
    let _ = writeln!(out, "  {:<12} {}", "Conditions", report.conditions);
    let _ = writeln!(out, "  {:<12} {}", "Humidity", report.humidity);
    let _ = writeln!(out, "  {:<12} {}", "Wind Speed", report.wind_speed);

    if !report.forecast_days.is_empty() {
        out.push('\n');
        out.push_str("Forecast:\n");
        for day in &report.forecast_days {
            let _ = writeln!(
                out,
                "  {:<12} {:<18} High {:<8} Low {}",
                day.day_label, day.conditions, day.high_temp, day.low_temp
            );
        }
    }

    out
}

/// Echo of the unparsed report.
pub fn render_raw(raw: &str) -> String {
    let mut out = String::from("Raw data:\n");
    for line in raw.lines() {
        let _ = writeln!(out, "  | {}", line);
    }
    out
}

/// Everything the dashboard currently shows.
pub fn render_dashboard(model: &DashboardModel) -> String {
    match model.state() {
        ViewState::Idle => format!("{}\n", IDLE_TEXT),
        ViewState::Loading { .. } => format!("{}\n", LOADING_TEXT),
        ViewState::ErrorShown => format!(
            "Error: {}\n",
            model.error_message().unwrap_or("Something went wrong.")
        ),
        ViewState::Displaying => {
            let Some(report) = model.report() else {
                return format!("{}\n", IDLE_TEXT);
            };
            let mut out = render_report(report, model.query_date());
            if model.show_raw() {
                if let Some(raw) = model.raw_report() {
                    out.push('\n');
                    out.push_str(&render_raw(raw));
                }
            }
            out
        }
    }
}
