//! Unit conversions between metric and imperial display values.
//!
//! The normalized weather model stores whole numbers in the unit it was
//! built for, so conversions round to the nearest integer.

/// km/h to mph conversion factor.
const KMH_TO_MPH: f64 = 0.621371;

/// Converts a Celsius temperature to Fahrenheit, rounded to the nearest degree.
pub fn celsius_to_fahrenheit(celsius: i32) -> i32 {
    (f64::from(celsius) * 9.0 / 5.0 + 32.0).round() as i32
}

/// Converts a wind speed in km/h to mph, rounded to the nearest integer.
pub fn kmh_to_mph(kmh: i32) -> i32 {
    (f64::from(kmh) * KMH_TO_MPH).round() as i32
}
