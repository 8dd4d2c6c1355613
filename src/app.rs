//! Application state management for skygaze
//!
//! This module contains the main application state, handling keyboard input,
//! fetch orchestration and the transitions between the loading, ready and
//! error screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cli::StartupConfig;
use crate::data::{
    normalize, normalize_forecast, CurrentWeather, FetchedWeather, ForecastDay, WeatherQuery,
    WttrClient,
};

/// Message shown on any fetch or parse failure. Deliberately generic: the
/// user remedy is the same regardless of what went wrong underneath.
pub const FETCH_ERROR_MESSAGE: &str = "Unable to fetch weather data. Please check the city name \
     and try again. Try using format 'City,Country' for better results.";

/// Application state enum representing the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// A fetch is in flight (also the initial state)
    Loading,
    /// Weather data is on screen
    Ready,
    /// The last fetch failed; showing the remediation message
    Error(String),
}

/// Main application struct managing state and data
///
/// # Key Bindings
/// - printable characters: edit the search input
/// - `Backspace`: delete the last input character
/// - `Enter`: search for the typed city
/// - `Tab`: toggle between metric and imperial units
/// - `Esc` or `Ctrl+C`: quit
pub struct App {
    /// Current screen
    pub state: AppState,
    /// Search input buffer
    pub input: String,
    /// The query driving the current (or in-flight) data
    pub query: WeatherQuery,
    /// Normalized current conditions, present in the Ready state
    pub current: Option<CurrentWeather>,
    /// Normalized forecast strip (at most 5 days)
    pub forecast: Vec<ForecastDay>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a search was submitted and a fetch should run
    pub fetch_requested: bool,
    /// Last successfully fetched payload, kept so a unit toggle can
    /// re-normalize without going back to the network
    fetched: Option<FetchedWeather>,
    /// Weather API client
    client: WttrClient,
}

impl App {
    /// Creates a new App from the startup configuration, ready for its
    /// initial fetch
    pub fn new(config: StartupConfig) -> Self {
        Self {
            state: AppState::Loading,
            input: String::new(),
            query: WeatherQuery {
                city: config.city,
                unit: config.unit,
            },
            current: None,
            forecast: Vec::new(),
            should_quit: false,
            fetch_requested: false,
            fetched: None,
            client: WttrClient::new(),
        }
    }

    /// Creates an App with a custom client (for testing)
    #[cfg(test)]
    pub fn with_client(config: StartupConfig, client: WttrClient) -> Self {
        let mut app = Self::new(config);
        app.client = client;
        app
    }

    /// Handles keyboard input and updates state accordingly
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            if key_event.code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                self.submit_search();
            }
            KeyCode::Tab => {
                self.toggle_unit();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    /// Submits the typed city as a new search. An empty input is ignored.
    fn submit_search(&mut self) {
        let city = self.input.trim();
        if city.is_empty() {
            return;
        }

        self.query = WeatherQuery {
            city: city.to_string(),
            unit: self.query.unit,
        };
        self.state = AppState::Loading;
        self.fetch_requested = true;
    }

    /// Toggles the unit mode, re-normalizing the retained payload so the
    /// displayed values convert without a refetch.
    fn toggle_unit(&mut self) {
        self.query = WeatherQuery {
            city: self.query.city.clone(),
            unit: self.query.unit.toggled(),
        };
        if self.fetched.is_some() {
            self.renormalize();
        }
    }

    /// Runs the fetch for the current query and transitions to Ready or
    /// Error. Called from the event loop whenever `fetch_requested` is set
    /// (and once at startup).
    pub async fn load_weather(&mut self) {
        self.fetch_requested = false;
        self.state = AppState::Loading;

        match self.client.fetch(&self.query.city).await {
            Ok(fetched) => {
                self.fetched = Some(fetched);
                self.renormalize();
            }
            Err(_) => {
                self.fetched = None;
                self.current = None;
                self.forecast.clear();
                self.state = AppState::Error(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Rebuilds the display models from the retained payload in the current
    /// unit mode.
    fn renormalize(&mut self) {
        let Some(fetched) = &self.fetched else {
            return;
        };

        match normalize(fetched, self.query.unit) {
            Ok(current) => {
                self.forecast = normalize_forecast(fetched, self.query.unit).collect();
                self.current = Some(current);
                self.state = AppState::Ready;
            }
            Err(_) => {
                self.current = None;
                self.forecast.clear();
                self.state = AppState::Error(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Injects a fetched payload directly (for testing the normalize and
    /// unit-toggle paths without a network)
    #[cfg(test)]
    pub fn set_fetched(&mut self, fetched: FetchedWeather) {
        self.fetched = Some(fetched);
        self.renormalize();
    }
}
