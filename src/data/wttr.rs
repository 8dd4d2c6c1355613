//! wttr.in API client and payload normalization
//!
//! This module fetches the `?format=j1` JSON payload from wttr.in for a city,
//! walks a small hardcoded fallback chain when the service rejects the name,
//! and normalizes the string-typed payload into the unit-aware display
//! models in [`crate::data`].

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

use super::{classify, CurrentWeather, ForecastDay, UnitMode};
use crate::units::{celsius_to_fahrenheit, kmh_to_mph};

/// Base URL for the wttr.in weather service (no API key required)
const WTTR_BASE_URL: &str = "https://wttr.in";

/// Maximum number of day cards in the forecast strip
pub const MAX_FORECAST_DAYS: usize = 5;

/// Errors that can occur when fetching or normalizing weather data
///
/// The UI collapses all of these into one generic remediation message; the
/// variants exist so tests and logs can tell the failure modes apart.
#[derive(Debug, Error)]
pub enum WttrError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service responded with a non-success status after all fallback attempts
    #[error("weather service returned status {0}")]
    Status(StatusCode),

    /// Failed to parse the JSON response
    #[error("failed to parse weather JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("missing expected field in response: {0}")]
    MissingField(String),

    /// A string-typed numeric field did not parse as a number
    #[error("non-numeric value in response: {0}")]
    BadNumber(String),

    /// The city could not be encoded into a request URL
    #[error("could not build a request URL for '{0}'")]
    BadUrl(String),
}

/// wttr.in JSON payload (partial - only the fields we consume).
///
/// wttr.in serves every numeric value as a JSON string, so the raw structs
/// keep `String` fields and parsing happens during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct WttrPayload {
    pub current_condition: Vec<CurrentCondition>,
    #[serde(default)]
    pub weather: Vec<DailyWeather>,
}

/// Current-conditions block of the payload
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentCondition {
    #[serde(rename = "temp_C")]
    pub temp_c: String,
    #[serde(rename = "FeelsLikeC")]
    pub feels_like_c: String,
    pub humidity: String,
    pub pressure: String,
    #[serde(rename = "weatherDesc")]
    pub weather_desc: Vec<DescValue>,
    #[serde(rename = "windspeedKmph")]
    pub windspeed_kmph: String,
}

/// One forecast day of the payload
#[derive(Debug, Clone, Deserialize)]
pub struct DailyWeather {
    pub date: chrono::NaiveDate,
    #[serde(rename = "maxtempC")]
    pub max_temp_c: String,
    #[serde(rename = "mintempC")]
    pub min_temp_c: String,
    #[serde(default)]
    pub hourly: Vec<HourlySample>,
}

/// One hourly sample within a forecast day
#[derive(Debug, Clone, Deserialize)]
pub struct HourlySample {
    #[serde(rename = "weatherDesc")]
    pub weather_desc: Vec<DescValue>,
}

/// wttr.in wraps description strings in `[{ "value": "..." }]`
#[derive(Debug, Clone, Deserialize)]
pub struct DescValue {
    pub value: String,
}

/// A fetched payload together with the label it should be displayed under.
///
/// The label usually echoes the searched city; the Delhi fallback overrides
/// it so the substitution is visible to the user.
#[derive(Debug, Clone)]
pub struct FetchedWeather {
    pub payload: WttrPayload,
    pub location_label: String,
}

/// One attempt in the fallback chain: the city string to request and an
/// optional display-label override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub city: String,
    pub label_override: Option<&'static str>,
}

/// Builds the fixed fallback chain for a searched city.
///
/// This is a hardcoded two-step heuristic, not a general retry policy:
/// searching exactly "noida" retries with the country appended, and any
/// city containing "noida" finally falls back to Delhi with an annotated
/// display label. Every other city gets a single attempt.
pub fn fallback_chain(city: &str) -> Vec<Attempt> {
    let mut attempts = vec![Attempt {
        city: city.trim().to_string(),
        label_override: None,
    }];

    let lower = city.trim().to_lowercase();
    if lower == "noida" {
        attempts.push(Attempt {
            city: "Noida,India".to_string(),
            label_override: None,
        });
    }
    if lower.contains("noida") {
        attempts.push(Attempt {
            city: "Delhi,India".to_string(),
            label_override: Some("Delhi (NCR region)"),
        });
    }

    attempts
}

/// Client for fetching weather data from wttr.in
#[derive(Debug, Clone)]
pub struct WttrClient {
    client: Client,
    base_url: String,
}

impl Default for WttrClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WttrClient {
    /// Create a new client against the public wttr.in service
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: WTTR_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (mirrors, tests)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the `GET <base>/<city>?format=j1` request URL, percent-encoding
    /// the city path segment.
    fn request_url(&self, city: &str) -> Result<Url, WttrError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| WttrError::BadUrl(city.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| WttrError::BadUrl(city.to_string()))?
            .pop_if_empty()
            .push(city);
        url.set_query(Some("format=j1"));
        Ok(url)
    }

    /// Issues a single request for one city candidate.
    async fn attempt(&self, city: &str) -> Result<WttrPayload, WttrError> {
        let url = self.request_url(city)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WttrError::Status(status));
        }

        let text = response.text().await?;
        let payload: WttrPayload = serde_json::from_str(&text)?;
        Ok(payload)
    }

    /// Fetches weather for a city, walking the fallback chain on non-success
    /// statuses.
    ///
    /// Only an HTTP-level rejection moves on to the next candidate; network
    /// and parse failures surface immediately.
    pub async fn fetch(&self, city: &str) -> Result<FetchedWeather, WttrError> {
        let mut last_err = WttrError::Status(StatusCode::NOT_FOUND);

        for attempt in fallback_chain(city) {
            match self.attempt(&attempt.city).await {
                Ok(payload) => {
                    let location_label = attempt
                        .label_override
                        .map(str::to_string)
                        .unwrap_or_else(|| city.trim().to_string());
                    return Ok(FetchedWeather {
                        payload,
                        location_label,
                    });
                }
                Err(err @ WttrError::Status(_)) => last_err = err,
                Err(err) => return Err(err),
            }
        }

        Err(last_err)
    }
}

/// Parses one of wttr.in's string-typed numeric fields.
fn parse_num(value: &str, field: &'static str) -> Result<i32, WttrError> {
    value
        .trim()
        .parse::<f64>()
        .map(|v| v.round() as i32)
        .map_err(|_| WttrError::BadNumber(format!("{field}: '{value}'")))
}

/// Normalizes the current-conditions block into a [`CurrentWeather`] model
/// expressed in the requested unit.
pub fn normalize(fetched: &FetchedWeather, unit: UnitMode) -> Result<CurrentWeather, WttrError> {
    let current = fetched
        .payload
        .current_condition
        .first()
        .ok_or_else(|| WttrError::MissingField("current_condition".to_string()))?;

    let description = current
        .weather_desc
        .first()
        .map(|d| d.value.clone())
        .ok_or_else(|| WttrError::MissingField("weatherDesc".to_string()))?;

    let mut temperature = parse_num(&current.temp_c, "temp_C")?;
    let mut feels_like = parse_num(&current.feels_like_c, "FeelsLikeC")?;
    let mut wind_speed = parse_num(&current.windspeed_kmph, "windspeedKmph")?;
    let humidity = parse_num(&current.humidity, "humidity")?.clamp(0, 100) as u8;
    let pressure_hpa = parse_num(&current.pressure, "pressure")?;

    if unit == UnitMode::Imperial {
        temperature = celsius_to_fahrenheit(temperature);
        feels_like = celsius_to_fahrenheit(feels_like);
        wind_speed = kmh_to_mph(wind_speed);
    }

    Ok(CurrentWeather {
        location_label: fetched.location_label.clone(),
        temperature,
        feels_like,
        humidity,
        pressure_hpa,
        wind_speed,
        condition: classify(&description),
        description: description.to_lowercase(),
        unit,
    })
}

/// Normalizes the forecast list into a lazy sequence of at most
/// [`MAX_FORECAST_DAYS`] day models.
///
/// Each day's description and condition come from the midpoint hourly sample
/// (or the first one if the day has a single sample); high/low temperatures
/// come from the day's explicit min/max fields. Days with no hourly samples
/// or unparsable numbers are skipped so one bad day degrades the strip
/// instead of failing it.
pub fn normalize_forecast(
    fetched: &FetchedWeather,
    unit: UnitMode,
) -> impl Iterator<Item = ForecastDay> + '_ {
    fetched
        .payload
        .weather
        .iter()
        .take(MAX_FORECAST_DAYS)
        .filter_map(move |day| {
            let sample = day
                .hourly
                .get(day.hourly.len() / 2)
                .or_else(|| day.hourly.first())?;
            let description = sample.weather_desc.first()?.value.clone();

            let mut high_temp = parse_num(&day.max_temp_c, "maxtempC").ok()?;
            let mut low_temp = parse_num(&day.min_temp_c, "mintempC").ok()?;
            if unit == UnitMode::Imperial {
                high_temp = celsius_to_fahrenheit(high_temp);
                low_temp = celsius_to_fahrenheit(low_temp);
            }

            Some(ForecastDay {
                date: day.date,
                high_temp,
                low_temp,
                condition: classify(&description),
                description,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ConditionCategory;
    use chrono::NaiveDate;

    /// Sample wttr.in `format=j1` response (trimmed to the consumed fields)
    const VALID_RESPONSE: &str = r#"{
        "current_condition": [
            {
                "FeelsLikeC": "31",
                "temp_C": "29",
                "humidity": "62",
                "pressure": "1004",
                "weatherDesc": [{ "value": "Partly Cloudy" }],
                "weatherCode": "116",
                "windspeedKmph": "13"
            }
        ],
        "weather": [
            {
                "date": "2024-07-15",
                "maxtempC": "33",
                "mintempC": "27",
                "hourly": [
                    { "weatherDesc": [{ "value": "Mist" }] },
                    { "weatherDesc": [{ "value": "Sunny" }] },
                    { "weatherDesc": [{ "value": "Patchy rain nearby" }] },
                    { "weatherDesc": [{ "value": "Sunny" }] }
                ]
            },
            {
                "date": "2024-07-16",
                "maxtempC": "34",
                "mintempC": "28",
                "hourly": [
                    { "weatherDesc": [{ "value": "Thundery outbreaks in nearby" }] }
                ]
            },
            {
                "date": "2024-07-17",
                "maxtempC": "31",
                "mintempC": "26",
                "hourly": [
                    { "weatherDesc": [{ "value": "Cloudy" }] },
                    { "weatherDesc": [{ "value": "Overcast" }] },
                    { "weatherDesc": [{ "value": "Light snow" }] }
                ]
            }
        ]
    }"#;

    fn fetched(label: &str) -> FetchedWeather {
        let payload: WttrPayload =
            serde_json::from_str(VALID_RESPONSE).expect("Failed to parse valid response");
        FetchedWeather {
            payload,
            location_label: label.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_payload() {
        let payload: WttrPayload =
            serde_json::from_str(VALID_RESPONSE).expect("Failed to parse valid response");

        assert_eq!(payload.current_condition.len(), 1);
        assert_eq!(payload.current_condition[0].temp_c, "29");
        assert_eq!(payload.weather.len(), 3);
        assert_eq!(
            payload.weather[0].date,
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
        );
    }

    #[test]
    fn test_normalize_metric() {
        let current = normalize(&fetched("Noida"), UnitMode::Metric)
            .expect("Failed to normalize current conditions");

        assert_eq!(current.location_label, "Noida");
        assert_eq!(current.temperature, 29);
        assert_eq!(current.feels_like, 31);
        assert_eq!(current.humidity, 62);
        assert_eq!(current.pressure_hpa, 1004);
        assert_eq!(current.wind_speed, 13);
        assert_eq!(current.condition, ConditionCategory::Clouds);
        assert_eq!(current.description, "partly cloudy");
        assert_eq!(current.unit, UnitMode::Metric);
    }

    #[test]
    fn test_normalize_imperial_converts_only_unit_fields() {
        let metric = normalize(&fetched("Noida"), UnitMode::Metric).unwrap();
        let imperial = normalize(&fetched("Noida"), UnitMode::Imperial).unwrap();

        assert_eq!(imperial.temperature, 84); // 29C
        assert_eq!(imperial.feels_like, 88); // 31C
        assert_eq!(imperial.wind_speed, 8); // 13 km/h

        // Unit-independent fields and the classification are untouched.
        assert_eq!(imperial.humidity, metric.humidity);
        assert_eq!(imperial.pressure_hpa, metric.pressure_hpa);
        assert_eq!(imperial.condition, metric.condition);
        assert_eq!(imperial.description, metric.description);
    }

    #[test]
    fn test_normalize_missing_current_condition() {
        let payload: WttrPayload =
            serde_json::from_str(r#"{ "current_condition": [], "weather": [] }"#).unwrap();
        let fetched = FetchedWeather {
            payload,
            location_label: "Nowhere".to_string(),
        };

        let result = normalize(&fetched, UnitMode::Metric);
        assert!(matches!(result, Err(WttrError::MissingField(_))));
    }

    #[test]
    fn test_normalize_bad_number() {
        let payload: WttrPayload = serde_json::from_str(
            r#"{
                "current_condition": [
                    {
                        "FeelsLikeC": "31",
                        "temp_C": "warm",
                        "humidity": "62",
                        "pressure": "1004",
                        "weatherDesc": [{ "value": "Sunny" }],
                        "windspeedKmph": "13"
                    }
                ]
            }"#,
        )
        .unwrap();
        let fetched = FetchedWeather {
            payload,
            location_label: "Nowhere".to_string(),
        };

        let result = normalize(&fetched, UnitMode::Metric);
        match result {
            Err(WttrError::BadNumber(msg)) => assert!(msg.contains("temp_C")),
            other => panic!("Expected BadNumber error, got {other:?}"),
        }
    }

    #[test]
    fn test_forecast_uses_midpoint_hourly_sample() {
        let days: Vec<ForecastDay> =
            normalize_forecast(&fetched("Noida"), UnitMode::Metric).collect();

        assert_eq!(days.len(), 3);

        // Day 0 has 4 samples; index 2 ("Patchy rain nearby") is the midpoint.
        assert_eq!(days[0].description, "Patchy rain nearby");
        assert_eq!(days[0].condition, ConditionCategory::Rain);
        assert_eq!(days[0].high_temp, 33);
        assert_eq!(days[0].low_temp, 27);

        // Day 1 has a single sample, which is used directly.
        assert_eq!(days[1].condition, ConditionCategory::Thunderstorm);

        // Day 2 has 3 samples; index 1 ("Overcast") is the midpoint and is
        // an unrecognized description, defaulting to Clear.
        assert_eq!(days[2].description, "Overcast");
        assert_eq!(days[2].condition, ConditionCategory::Clear);
    }

    #[test]
    fn test_forecast_imperial_conversion() {
        let days: Vec<ForecastDay> =
            normalize_forecast(&fetched("Noida"), UnitMode::Imperial).collect();

        assert_eq!(days[0].high_temp, 91); // 33C
        assert_eq!(days[0].low_temp, 81); // 27C
    }

    #[test]
    fn test_forecast_caps_at_five_days() {
        let mut payload: WttrPayload = serde_json::from_str(VALID_RESPONSE).unwrap();

        // Pad the forecast list out to 7 days; only 5 should come back.
        let template = payload.weather[0].clone();
        for day in 16..=19 {
            let mut extra = template.clone();
            extra.date = NaiveDate::from_ymd_opt(2024, 7, day).unwrap();
            payload.weather.push(extra);
        }
        assert_eq!(payload.weather.len(), 7);

        let fetched = FetchedWeather {
            payload,
            location_label: "Noida".to_string(),
        };
        let days: Vec<ForecastDay> =
            normalize_forecast(&fetched, UnitMode::Metric).collect();
        assert_eq!(days.len(), MAX_FORECAST_DAYS);
    }

    #[test]
    fn test_forecast_empty_weather_list() {
        let payload: WttrPayload = serde_json::from_str(
            r#"{ "current_condition": [], "weather": [] }"#,
        )
        .unwrap();
        let fetched = FetchedWeather {
            payload,
            location_label: "Noida".to_string(),
        };

        let days: Vec<ForecastDay> =
            normalize_forecast(&fetched, UnitMode::Metric).collect();
        assert!(days.is_empty());
    }

    #[test]
    fn test_forecast_skips_day_without_hourly_samples() {
        let payload: WttrPayload = serde_json::from_str(
            r#"{
                "current_condition": [],
                "weather": [
                    { "date": "2024-07-15", "maxtempC": "33", "mintempC": "27", "hourly": [] },
                    {
                        "date": "2024-07-16",
                        "maxtempC": "30",
                        "mintempC": "24",
                        "hourly": [{ "weatherDesc": [{ "value": "Sunny" }] }]
                    }
                ]
            }"#,
        )
        .unwrap();
        let fetched = FetchedWeather {
            payload,
            location_label: "Noida".to_string(),
        };

        let days: Vec<ForecastDay> =
            normalize_forecast(&fetched, UnitMode::Metric).collect();
        assert_eq!(days.len(), 1);
        assert_eq!(
            days[0].date,
            NaiveDate::from_ymd_opt(2024, 7, 16).unwrap()
        );
    }

    #[test]
    fn test_forecast_is_restartable() {
        let fetched = fetched("Noida");
        let first: Vec<ForecastDay> =
            normalize_forecast(&fetched, UnitMode::Metric).collect();
        let second: Vec<ForecastDay> =
            normalize_forecast(&fetched, UnitMode::Metric).collect();
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].description, second[0].description);
    }

    #[test]
    fn test_fallback_chain_plain_city() {
        let attempts = fallback_chain("London");
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].city, "London");
        assert!(attempts[0].label_override.is_none());
    }

    #[test]
    fn test_fallback_chain_noida_expands_then_substitutes() {
        let attempts = fallback_chain("noida");
        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[0].city, "noida");
        assert_eq!(attempts[1].city, "Noida,India");
        assert_eq!(attempts[2].city, "Delhi,India");
        assert_eq!(attempts[2].label_override, Some("Delhi (NCR region)"));
    }

    #[test]
    fn test_fallback_chain_trims_and_ignores_case() {
        let attempts = fallback_chain("  Noida  ");
        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[0].city, "Noida");
        assert_eq!(attempts[1].city, "Noida,India");
    }

    #[test]
    fn test_fallback_chain_substring_match_skips_expansion() {
        // Contains "noida" but is not exactly it: no country expansion,
        // straight to the Delhi substitution.
        let attempts = fallback_chain("greater noida");
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].city, "greater noida");
        assert_eq!(attempts[1].city, "Delhi,India");
    }

    #[test]
    fn test_request_url_encodes_city() {
        let client = WttrClient::new();
        let url = client.request_url("New York").expect("Failed to build URL");
        assert_eq!(url.as_str(), "https://wttr.in/New%20York?format=j1");

        let url = client
            .request_url("Noida,India")
            .expect("Failed to build URL");
        assert_eq!(url.as_str(), "https://wttr.in/Noida,India?format=j1");
    }

    #[test]
    fn test_parse_malformed_json() {
        let malformed = "{ invalid json }";
        let result: Result<WttrPayload, _> = serde_json::from_str(malformed);
        assert!(result.is_err());
    }
}
