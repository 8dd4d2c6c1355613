//! Command-line interface parsing for skygaze
//!
//! This module handles parsing of CLI arguments using clap: an optional
//! initial city and the --imperial flag for starting in Fahrenheit/mph mode.

use clap::Parser;

use crate::data::UnitMode;

/// City queried on startup when none is given. Country included for better
/// recognition by the weather service.
pub const DEFAULT_CITY: &str = "Noida,India";

/// skygaze - current weather and a short forecast in your terminal
#[derive(Parser, Debug)]
#[command(name = "skygaze")]
#[command(about = "Look up current weather and a short forecast for a city")]
#[command(version)]
pub struct Cli {
    /// City to look up on startup, e.g. "London" or "Noida,India"
    pub city: Option<String>,

    /// Start in imperial units (°F, mph) instead of metric
    #[arg(long)]
    pub imperial: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// City fetched on startup
    pub city: String,
    /// Unit mode the app starts in
    pub unit: UnitMode,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            unit: UnitMode::Metric,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            city: cli
                .city
                .clone()
                .unwrap_or_else(|| DEFAULT_CITY.to_string()),
            unit: if cli.imperial {
                UnitMode::Imperial
            } else {
                UnitMode::Metric
            },
        }
    }
}
