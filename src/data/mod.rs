//! Core data models for skygaze
//!
//! This module contains the domain types shared across the fetch, normalize
//! and render layers: unit modes, condition categories, and the normalized
//! weather models the UI consumes.

pub mod wttr;

#[allow(unused_imports)]
pub use wttr::{normalize, normalize_forecast, FetchedWeather, WttrClient, WttrError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display unit mode selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitMode {
    /// Celsius and km/h
    Metric,
    /// Fahrenheit and mph
    Imperial,
}

impl UnitMode {
    /// Returns the opposite unit mode
    pub fn toggled(self) -> Self {
        match self {
            UnitMode::Metric => UnitMode::Imperial,
            UnitMode::Imperial => UnitMode::Metric,
        }
    }

    /// Symbol shown next to temperatures
    pub fn temp_symbol(self) -> &'static str {
        match self {
            UnitMode::Metric => "°C",
            UnitMode::Imperial => "°F",
        }
    }

    /// Symbol shown next to wind speeds
    pub fn wind_symbol(self) -> &'static str {
        match self {
            UnitMode::Metric => "km/h",
            UnitMode::Imperial => "mph",
        }
    }
}

/// Closed set of weather condition categories
///
/// Free-text provider descriptions are folded into this set by [`classify`].
/// `Drizzle` is never produced by the classifier (drizzle text folds into
/// `Rain`) but keeps its own icon in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
}

/// Maps a free-text weather description to a condition category.
///
/// Case-insensitive substring matching in fixed priority order; the first
/// matching rule wins and unrecognized text defaults to `Clear`.
pub fn classify(description: &str) -> ConditionCategory {
    let desc = description.to_lowercase();
    if desc.contains("sunny") || desc.contains("clear") {
        ConditionCategory::Clear
    } else if desc.contains("cloud") {
        ConditionCategory::Clouds
    } else if desc.contains("rain") || desc.contains("drizzle") {
        ConditionCategory::Rain
    } else if desc.contains("thunderstorm") || desc.contains("thunder") {
        ConditionCategory::Thunderstorm
    } else if desc.contains("snow") {
        ConditionCategory::Snow
    } else if desc.contains("mist") || desc.contains("fog") {
        ConditionCategory::Mist
    } else {
        ConditionCategory::Clear
    }
}

/// A single search interaction: the city to look up and the unit mode to
/// normalize for. Built fresh per search or unit toggle, never mutated.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    /// City name as typed by the user (trimmed)
    pub city: String,
    /// Unit mode the results should be displayed in
    pub unit: UnitMode,
}

/// Current conditions normalized from a provider payload
///
/// Invariant: `temperature`, `feels_like` and `wind_speed` are always
/// expressed in the unit recorded in `unit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Label for the place the data describes (may differ from the searched
    /// city when a fallback substitution occurred)
    pub location_label: String,
    /// Current temperature
    pub temperature: i32,
    /// Feels-like temperature
    pub feels_like: i32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure_hpa: i32,
    /// Wind speed
    pub wind_speed: i32,
    /// Classified condition category
    pub condition: ConditionCategory,
    /// Free-text description, lowercased for display
    pub description: String,
    /// Unit mode the numeric fields are expressed in
    pub unit: UnitMode,
}

/// One day of the forecast strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date of the forecast day
    pub date: NaiveDate,
    /// Daily high temperature (in the unit the strip was normalized for)
    pub high_temp: i32,
    /// Daily low temperature
    pub low_temp: i32,
    /// Condition classified from the day's representative hourly sample
    pub condition: ConditionCategory,
    /// Description of the representative hourly sample
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_mode_toggled() {
        assert_eq!(UnitMode::Metric.toggled(), UnitMode::Imperial);
        assert_eq!(UnitMode::Imperial.toggled(), UnitMode::Metric);
    }

    #[test]
    fn test_unit_mode_symbols() {
        assert_eq!(UnitMode::Metric.temp_symbol(), "°C");
        assert_eq!(UnitMode::Imperial.temp_symbol(), "°F");
        assert_eq!(UnitMode::Metric.wind_symbol(), "km/h");
        assert_eq!(UnitMode::Imperial.wind_symbol(), "mph");
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("Partly Cloudy"), ConditionCategory::Clouds);
        assert_eq!(classify("SUNNY"), ConditionCategory::Clear);
        assert_eq!(classify("Mist"), ConditionCategory::Mist);
    }

    #[test]
    fn test_classify_priority_order() {
        // "sunny"/"clear" is checked before "cloud", so a description
        // containing both classifies as Clear.
        assert_eq!(classify("clear with clouds"), ConditionCategory::Clear);
        // "rain" is checked before "thunder"
        assert_eq!(classify("thundery rain"), ConditionCategory::Rain);
    }

    #[test]
    fn test_classify_keyword_groups() {
        assert_eq!(classify("Light rain shower"), ConditionCategory::Rain);
        assert_eq!(classify("Patchy light drizzle"), ConditionCategory::Rain);
        assert_eq!(classify("Heavy Thunder"), ConditionCategory::Thunderstorm);
        assert_eq!(
            classify("Thunderstorm nearby"),
            ConditionCategory::Thunderstorm
        );
        assert_eq!(classify("Blowing snow"), ConditionCategory::Snow);
        assert_eq!(classify("Freezing fog"), ConditionCategory::Mist);
        assert_eq!(classify("Cloudy"), ConditionCategory::Clouds);
    }

    #[test]
    fn test_classify_unrecognized_defaults_to_clear() {
        assert_eq!(classify("Hazy"), ConditionCategory::Clear);
        assert_eq!(classify(""), ConditionCategory::Clear);
    }

    #[test]
    fn test_current_weather_serialization_roundtrip() {
        let current = CurrentWeather {
            location_label: "London".to_string(),
            temperature: 18,
            feels_like: 17,
            humidity: 72,
            pressure_hpa: 1013,
            wind_speed: 14,
            condition: ConditionCategory::Clouds,
            description: "partly cloudy".to_string(),
            unit: UnitMode::Metric,
        };

        let json = serde_json::to_string(&current).expect("Failed to serialize CurrentWeather");
        let deserialized: CurrentWeather =
            serde_json::from_str(&json).expect("Failed to deserialize CurrentWeather");

        assert_eq!(deserialized.location_label, "London");
        assert_eq!(deserialized.temperature, 18);
        assert_eq!(deserialized.condition, ConditionCategory::Clouds);
        assert_eq!(deserialized.unit, UnitMode::Metric);
    }
}
