//! Application state management for Skycast
//!
//! This module contains the main application state, handling keyboard input,
//! weather fetches, and the flags the event loop acts on (pending search,
//! pending refresh, quit).

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cli::StartupConfig;
use crate::config::Config;
use crate::data::{
    GeocodingClient, GeolocateClient, SearchSuggestion, WeatherClient, WeatherSnapshot,
};
use crate::history::RecentSearches;
use crate::search::{SearchBox, SuggestionRequest};

/// City looked up when geolocation is unavailable or denied
pub const FALLBACK_CITY: &str = "London";

/// What the suggestion panel is currently listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelContent {
    /// Live geocoding suggestions
    Suggestions,
    /// Recent searches, shown while there are no suggestions
    Recent,
    /// Panel hidden
    Hidden,
}

/// Main application struct managing state and clients
pub struct App {
    /// Search box state (query, suggestions, debounce)
    pub search: SearchBox,
    /// Recent searches, persisted across sessions
    pub recent: RecentSearches,
    /// Most recently fetched weather, if any
    pub snapshot: Option<WeatherSnapshot>,
    /// User-visible error from the last fetch, if it failed
    pub error: Option<String>,
    /// Whether a weather fetch is in progress
    pub loading: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// City submitted by the user, awaiting a fetch by the event loop
    pending_search: Option<String>,
    /// Flag requesting a re-fetch of the displayed location
    pending_refresh: bool,
    /// Weather API client
    weather_client: WeatherClient,
    /// Geocoding client used for suggestion lookups
    geocoding_client: GeocodingClient,
    /// IP geolocation client
    geolocate_client: GeolocateClient,
}

impl App {
    /// Creates a new App instance from a config and a pre-loaded recent list
    pub fn new(config: Config, recent: RecentSearches) -> Self {
        Self {
            search: SearchBox::new(),
            recent,
            snapshot: None,
            error: None,
            // The startup fetch begins before the first event; draw the
            // loading banner from the first frame.
            loading: true,
            should_quit: false,
            show_help: false,
            pending_search: None,
            pending_refresh: false,
            weather_client: WeatherClient::new(config.clone()),
            geocoding_client: GeocodingClient::new(config),
            geolocate_client: GeolocateClient::new(),
        }
    }

    /// Performs the startup lookup: an explicit CLI city wins, then IP
    /// geolocation, then the fallback city.
    pub async fn initial_load(&mut self, startup: &StartupConfig) {
        if let Some(city) = &startup.initial_city {
            let city = city.clone();
            self.recent.record(&city);
            return self.run_search(&city).await;
        }

        if startup.geolocate {
            if let Some(position) = self.geolocate_client.locate().await {
                return self.load_coords(position.lat, position.lon).await;
            }
        }

        self.run_search(FALLBACK_CITY).await;
    }

    /// Fetches current conditions for a city name. A failed lookup clears
    /// the displayed snapshot and surfaces the error text.
    pub async fn run_search(&mut self, city: &str) {
        self.loading = true;
        self.error = None;

        match self.weather_client.fetch_by_city(city).await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.snapshot = None;
            }
        }

        self.loading = false;
    }

    /// Fetches current conditions for coordinates (geolocation startup path)
    pub async fn load_coords(&mut self, lat: f64, lon: f64) {
        self.loading = true;
        self.error = None;

        match self.weather_client.fetch_by_coords(lat, lon).await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.snapshot = None;
            }
        }

        self.loading = false;
    }

    /// Re-fetches the displayed location. Unlike a fresh search, a failed
    /// refresh keeps the stale snapshot on screen next to the error.
    pub async fn refresh(&mut self, lat: f64, lon: f64) {
        self.loading = true;

        match self.weather_client.fetch_by_coords(lat, lon).await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }

        self.loading = false;
    }

    /// Fetches suggestions for a due request (best-effort, never fails)
    pub async fn fetch_suggestions(&self, query: &str) -> Vec<SearchSuggestion> {
        self.geocoding_client.suggest(query).await
    }

    /// Handles keyboard input and updates state accordingly
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::F(1) | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::F(5) => {
                if self.snapshot.is_some() {
                    self.pending_refresh = true;
                    self.loading = true;
                }
            }
            KeyCode::Esc => {
                if self.panel_content() != PanelContent::Hidden {
                    self.search.hide_panel();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Up => {
                let len = self.panel_len();
                self.search.select_prev(len);
            }
            KeyCode::Down => {
                let len = self.panel_len();
                self.search.select_next(len);
            }
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Backspace => {
                self.search.pop_char(Instant::now());
            }
            KeyCode::Char(c) => {
                self.search.push_char(c, Instant::now());
            }
            _ => {}
        }
    }

    /// What the suggestion panel is currently listing
    pub fn panel_content(&self) -> PanelContent {
        if !self.search.panel_visible(self.recent.len()) {
            PanelContent::Hidden
        } else if !self.search.suggestions().is_empty() {
            PanelContent::Suggestions
        } else {
            PanelContent::Recent
        }
    }

    fn panel_len(&self) -> usize {
        match self.panel_content() {
            PanelContent::Suggestions => self.search.suggestions().len(),
            PanelContent::Recent => self.recent.len(),
            PanelContent::Hidden => 0,
        }
    }

    /// Submits the highlighted panel entry, or the raw query text when
    /// nothing is highlighted. Clears the box, promotes the city in the
    /// recent list, and leaves the fetch to the event loop.
    fn submit(&mut self) {
        let chosen = match self.panel_content() {
            PanelContent::Suggestions => self
                .search
                .selected()
                .and_then(|index| self.search.suggestions().get(index))
                .map(|suggestion| suggestion.name.clone()),
            PanelContent::Recent => self
                .search
                .selected()
                .and_then(|index| self.recent.entries().get(index).cloned()),
            PanelContent::Hidden => None,
        };

        let city = chosen.or_else(|| {
            let trimmed = self.search.query().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });

        let Some(city) = city else {
            return;
        };

        self.recent.record(&city);
        self.search.clear();
        // The event loop draws once before servicing the fetch; flag loading
        // now so that frame already shows it.
        self.loading = true;
        self.pending_search = Some(city);
    }

    /// Takes the city awaiting a fetch, if any
    pub fn take_pending_search(&mut self) -> Option<String> {
        self.pending_search.take()
    }

    /// Takes the coordinates awaiting a refresh fetch, if any
    pub fn take_pending_refresh(&mut self) -> Option<(f64, f64)> {
        if !self.pending_refresh {
            return None;
        }
        self.pending_refresh = false;

        self.snapshot
            .as_ref()
            .map(|snapshot| (snapshot.location.lat, snapshot.location.lon))
    }

    /// Returns the suggestion request whose debounce deadline has passed
    pub fn due_suggestion_request(&mut self, now: Instant) -> Option<SuggestionRequest> {
        self.search.take_due_request(now)
    }

    /// Applies suggestion results, discarding stale sequence numbers
    pub fn apply_suggestions(&mut self, seq: u64, results: Vec<SearchSuggestion>) {
        self.search.apply_results(seq, results);
    }
}
