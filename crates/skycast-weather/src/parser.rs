//! Report text parser.
//!
//! The weather API returns a human-readable report such as:
//!
//! ```text
//! Weather for San Francisco, CA:
//! Temperature: 65.3°F
//! Conditions: Foggy
//! Humidity: 72.0%
//! Wind Speed: 12.8 mph
//!
//! Forecast:
//! - Tomorrow: Partly Cloudy, High: 66°F, Low: 55°F
//! ```
//!
//! [`parse_report`] turns that into a [`WeatherReport`]. It never fails: a
//! field whose line is missing falls back to a sentinel, and a forecast line
//! that does not fit the `- Day: Conditions, High: x, Low: y` shape is
//! dropped.

use crate::types::{ForecastDay, WeatherReport, NOT_AVAILABLE, UNKNOWN_CONDITIONS};

const HEADER_PREFIX: &str = "Weather for ";
const TEMPERATURE_MARKER: &str = "Temperature:";
const CONDITIONS_MARKER: &str = "Conditions:";
const HUMIDITY_MARKER: &str = "Humidity:";
const WIND_SPEED_MARKER: &str = "Wind Speed:";
const FORECAST_MARKER: &str = "Forecast:";
const FORECAST_ITEM_PREFIX: &str = "- ";
const HIGH_LABEL: &str = "High:";
const LOW_LABEL: &str = "Low:";

/// Parse a report text into a [`WeatherReport`].
///
/// `fallback_location` is used as the location label when the first line is
/// not a `Weather for <name>:` header; callers pass the query they searched
/// for.
pub fn parse_report(raw: &str, fallback_location: &str) -> WeatherReport {
    let lines: Vec<&str> = raw.split('\n').collect();

    let location_label = lines
        .first()
        .and_then(|line| header_location(line))
        .unwrap_or(fallback_location)
        .to_string();

    WeatherReport {
        location_label,
        temperature: scalar_field(&lines, TEMPERATURE_MARKER, NOT_AVAILABLE),
        conditions: scalar_field(&lines, CONDITIONS_MARKER, UNKNOWN_CONDITIONS),
        humidity: scalar_field(&lines, HUMIDITY_MARKER, NOT_AVAILABLE),
        wind_speed: scalar_field(&lines, WIND_SPEED_MARKER, NOT_AVAILABLE),
        forecast_days: forecast_days(&lines),
    }
}

/// `Weather for <name>:` where `<name>` runs to the last colon of the line.
fn header_location(line: &str) -> Option<&str> {
    let start = line.find(HEADER_PREFIX)? + HEADER_PREFIX.len();
    let rest = &line[start..];
    let rest = match rest.find('\r') {
        Some(end) => &rest[..end],
        None => rest,
    };
    let name = &rest[..rest.rfind(':')?];
    (!name.is_empty()).then_some(name)
}

/// Text after `marker` on the first line that contains it.
fn scalar_field(lines: &[&str], marker: &str, sentinel: &str) -> String {
    lines
        .iter()
        .find_map(|line| {
            line.find(marker)
                .map(|idx| line[idx + marker.len()..].trim())
        })
        .filter(|value| !value.is_empty())
        .unwrap_or(sentinel)
        .to_string()
}

fn forecast_days(lines: &[&str]) -> Vec<ForecastDay> {
    let Some(start) = lines.iter().position(|line| line.contains(FORECAST_MARKER)) else {
        return Vec::new();
    };

    lines[start + 1..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| forecast_day(line))
        .collect()
}

fn forecast_day(line: &str) -> Option<ForecastDay> {
    let entry = line.strip_prefix(FORECAST_ITEM_PREFIX)?;
    let (day_label, details) = entry.split_once(':')?;
    let details = details.trim();

    let (conditions, temps) = match details.split_once(',') {
        Some((conditions, temps)) => (conditions.trim(), temperature_range(temps)),
        None => (details, None),
    };
    let (high_temp, low_temp) = temps.unwrap_or((NOT_AVAILABLE, NOT_AVAILABLE));

    Some(ForecastDay {
        day_label: day_label.trim().to_string(),
        conditions: conditions.to_string(),
        high_temp: high_temp.to_string(),
        low_temp: low_temp.to_string(),
    })
}

/// `High: x, Low: y` into `(x, y)`. Anything past the second comma is ignored.
fn temperature_range(segment: &str) -> Option<(&str, &str)> {
    let mut parts = segment.split(',');
    let high = parts.next()?;
    let low = parts.next()?;
    Some((strip_label(high, HIGH_LABEL), strip_label(low, LOW_LABEL)))
}

fn strip_label<'a>(part: &'a str, label: &str) -> &'a str {
    let part = part.trim();
    part.strip_prefix(label).unwrap_or(part).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOSTON: &str = "Weather for Boston:\nTemperature: 72F\nConditions: Sunny\nHumidity: 40%\nWind Speed: 5mph\nForecast:\n- Monday: Sunny, High: 75F, Low: 60F";

    fn day(label: &str, conditions: &str, high: &str, low: &str) -> ForecastDay {
        ForecastDay {
            day_label: label.to_string(),
            conditions: conditions.to_string(),
            high_temp: high.to_string(),
            low_temp: low.to_string(),
        }
    }

    #[test]
    fn test_well_formed_report() {
        let report = parse_report(BOSTON, "boston");

        assert_eq!(report.location_label, "Boston");
        assert_eq!(report.temperature, "72F");
        assert_eq!(report.conditions, "Sunny");
        assert_eq!(report.humidity, "40%");
        assert_eq!(report.wind_speed, "5mph");
        assert_eq!(report.forecast_days, vec![day("Monday", "Sunny", "75F", "60F")]);
    }

    #[test]
    fn test_no_useful_content() {
        let report = parse_report("no useful content", "nowhere");

        assert_eq!(report, WeatherReport::empty("nowhere"));
    }

    #[test]
    fn test_server_report_format() {
        let raw = "Weather for San Francisco, CA:\nTemperature: 65.3°F\nConditions: Foggy\nHumidity: 72.0%\nWind Speed: 12.8 mph\n\nForecast:\n- Tomorrow: Partly Cloudy, High: 66°F, Low: 55°F\n- Wednesday: Sunny, High: 70°F, Low: 56°F\n";
        let report = parse_report(raw, "sf");

        assert_eq!(report.location_label, "San Francisco, CA");
        assert_eq!(report.temperature, "65.3°F");
        assert_eq!(report.conditions, "Foggy");
        assert_eq!(report.humidity, "72.0%");
        assert_eq!(report.wind_speed, "12.8 mph");
        assert_eq!(
            report.forecast_days,
            vec![
                day("Tomorrow", "Partly Cloudy", "66°F", "55°F"),
                day("Wednesday", "Sunny", "70°F", "56°F"),
            ]
        );
    }

    #[test]
    fn test_header_only_on_first_line() {
        let report = parse_report("Temperature: 50F\nWeather for Paris:", "paris");
        assert_eq!(report.location_label, "paris");
        assert_eq!(report.temperature, "50F");
    }

    #[test]
    fn test_header_requires_colon_and_name() {
        assert_eq!(parse_report("Weather for Boston", "q").location_label, "q");
        assert_eq!(parse_report("Weather for :", "q").location_label, "q");
        assert_eq!(parse_report("", "q").location_label, "q");
    }

    #[test]
    fn test_header_runs_to_last_colon() {
        let report = parse_report("Today: Weather for Oslo: Norway:", "q");
        assert_eq!(report.location_label, "Oslo: Norway");
    }

    #[test]
    fn test_header_with_crlf() {
        let report = parse_report("Weather for Boston:\r\nTemperature: 72F\r\n", "q");
        assert_eq!(report.location_label, "Boston");
        assert_eq!(report.temperature, "72F");
    }

    #[test]
    fn test_each_missing_marker_uses_its_sentinel() {
        let report = parse_report("Weather for Rome:\nConditions: Clear", "rome");
        assert_eq!(report.temperature, "N/A");
        assert_eq!(report.conditions, "Clear");
        assert_eq!(report.humidity, "N/A");
        assert_eq!(report.wind_speed, "N/A");

        let report = parse_report("Temperature: 1C\nHumidity: 2%\nWind Speed: 3kph", "x");
        assert_eq!(report.conditions, "Unknown");
    }

    #[test]
    fn test_first_matching_line_wins() {
        let report = parse_report("Temperature: 10C\nTemperature: 99C", "x");
        assert_eq!(report.temperature, "10C");
    }

    #[test]
    fn test_marker_mid_line_and_no_space() {
        let report = parse_report("Current Temperature:12C\n  Humidity:   55%  ", "x");
        assert_eq!(report.temperature, "12C");
        assert_eq!(report.humidity, "55%");
    }

    #[test]
    fn test_blank_value_falls_back_to_sentinel() {
        let report = parse_report("Conditions:   \nTemperature:", "x");
        assert_eq!(report.conditions, "Unknown");
        assert_eq!(report.temperature, "N/A");
    }

    #[test]
    fn test_no_forecast_marker_means_no_days() {
        let report = parse_report("- Monday: Sunny, High: 1, Low: 2", "x");
        assert!(report.forecast_days.is_empty());
    }

    #[test]
    fn test_lines_before_forecast_marker_are_ignored() {
        let raw = "- Sunday: Rain, High: 1, Low: 0\nForecast:\n- Monday: Sunny, High: 5, Low: 3";
        let report = parse_report(raw, "x");
        assert_eq!(report.forecast_days, vec![day("Monday", "Sunny", "5", "3")]);
    }

    #[test]
    fn test_lines_without_item_prefix_are_skipped() {
        let raw = "Forecast:\n* Monday: Sunny, High: 1, Low: 2\n  - Tuesday: Rain, High: 3, Low: 4\n-Wednesday: Fog, High: 5, Low: 6\nThursday: Snow\n- Friday: Clear, High: 7, Low: 8";
        let report = parse_report(raw, "x");
        assert_eq!(report.forecast_days, vec![day("Friday", "Clear", "7", "8")]);
    }

    #[test]
    fn test_lines_without_colon_are_skipped() {
        let raw = "Forecast:\n- Monday Sunny\n- \n- Tuesday: Rain, High: 3, Low: 1";
        let report = parse_report(raw, "x");
        assert_eq!(report.forecast_days, vec![day("Tuesday", "Rain", "3", "1")]);
    }

    #[test]
    fn test_no_comma_keeps_conditions_only() {
        let report = parse_report("Forecast:\n- Monday:  Drizzle  ", "x");
        assert_eq!(report.forecast_days, vec![day("Monday", "Drizzle", "N/A", "N/A")]);
    }

    #[test]
    fn test_single_temperature_part_is_not_available() {
        let report = parse_report("Forecast:\n- Monday: Windy, High: 40F", "x");
        assert_eq!(report.forecast_days, vec![day("Monday", "Windy", "N/A", "N/A")]);
    }

    #[test]
    fn test_unlabelled_temperatures_are_kept() {
        let report = parse_report("Forecast:\n- Monday: Hot, 90F, 70F, humid", "x");
        assert_eq!(report.forecast_days, vec![day("Monday", "Hot", "90F", "70F")]);
    }

    #[test]
    fn test_blank_lines_in_forecast_section() {
        let raw = "Forecast:\n\n   \n- Monday: Sunny, High: 1, Low: 2\n\n- Tuesday: Rain, High: 3, Low: 4\n";
        let report = parse_report(raw, "x");
        assert_eq!(
            report.forecast_days,
            vec![day("Monday", "Sunny", "1", "2"), day("Tuesday", "Rain", "3", "4")]
        );
    }

    #[test]
    fn test_forecast_order_is_preserved() {
        let raw = "Forecast:\n- Zeta: A\n- Alpha: B\n- Mid: C";
        let labels: Vec<String> = parse_report(raw, "x")
            .forecast_days
            .into_iter()
            .map(|d| d.day_label)
            .collect();
        assert_eq!(labels, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_forecast_with_crlf() {
        let raw = "Forecast:\r\n- Monday: Sunny, High: 75F, Low: 60F\r\n";
        let report = parse_report(raw, "x");
        assert_eq!(report.forecast_days, vec![day("Monday", "Sunny", "75F", "60F")]);
    }

    #[test]
    fn test_never_panics() {
        let fragments = [
            "",
            "\n",
            "\r\n",
            ":",
            ",",
            "- ",
            "-",
            "- :",
            "- :,",
            "- a:,",
            "- a:b,",
            "- a:b,,",
            "- a:b,c,",
            "Forecast:",
            "Weather for ",
            "Weather for :",
            "Weather for é:",
            "Temperature:",
            "Conditions:",
            "Humidity:",
            "Wind Speed:",
            "High:",
            "Low:",
            "🌧️",
            "- 日曜日: 雨, High: 18℃, Low: 12℃",
            "\u{0}",
            "    ",
        ];

        for a in fragments {
            for b in fragments {
                let raw = format!("{a}{b}\n{b}{a}\nForecast:\n{a}\n{b}");
                let _ = parse_report(&raw, "fallback");
                let _ = parse_report(&format!("{a}{b}"), "");
            }
        }
    }

    #[test]
    fn test_multibyte_forecast_line() {
        let report = parse_report("Forecast:\n- 日曜日: 雨, High: 18℃, Low: 12℃", "x");
        assert_eq!(report.forecast_days, vec![day("日曜日", "雨", "18℃", "12℃")]);
    }
}
