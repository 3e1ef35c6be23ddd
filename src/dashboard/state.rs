use crate::dashboard::models::{DashboardView, WeatherReport, WeatherView};
use crate::manager_catalog::models::CityRecord;

/// Where the weather for the selected city stands. Every fetch gets a request id and
/// only the outcome of the latest one is accepted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WeatherStatus {
    #[default]
    Idle,
    Loading { request: u64 },
    Ready { request: u64, report: WeatherReport },
    Failed { request: u64, reason: String },
}

#[derive(Debug, Clone)]
pub enum Event {
    ToggleMenu,
    ToggleSearch,
    SearchResults { query: String, results: Vec<CityRecord> },
    SelectCity(String),
    FetchStarted,
    FetchSucceeded { request: u64, report: WeatherReport },
    FetchFailed { request: u64, reason: String },
    FavoritesLoaded(Vec<CityRecord>),
    FavoriteAdded(CityRecord),
    FavoriteRemoved(String),
}

/// All mutable dashboard state. Changes only through [`DashboardState::reduce`].
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub default_city: String,
    pub selected_city: String,
    pub favorites: Vec<CityRecord>,
    pub menu_open: bool,
    pub search_open: bool,
    pub search_query: String,
    pub search_results: Vec<CityRecord>,
    pub weather: WeatherStatus,
    pub next_request: u64,
}

impl DashboardState {
    /// Creates an idle state with the default city selected
    ///
    /// # Arguments
    ///
    /// * 'default_city' - city selected when nothing else is
    pub fn new(default_city: &str) -> Self {
        Self {
            default_city: default_city.to_string(),
            selected_city: default_city.to_string(),
            ..Default::default()
        }
    }

    /// Returns the state that follows from applying the event
    ///
    /// # Arguments
    ///
    /// * 'event' - what happened
    pub fn reduce(mut self, event: Event) -> Self {
        match event {
            Event::ToggleMenu => self.menu_open = !self.menu_open,
            Event::ToggleSearch => self.search_open = !self.search_open,
            Event::SearchResults { query, results } => {
                self.search_query = query;
                self.search_results = results;
            }
            Event::SelectCity(name) => {
                self.selected_city = if name.is_empty() { self.default_city.clone() } else { name };
            }
            Event::FetchStarted => {
                self.weather = WeatherStatus::Loading { request: self.next_request };
                self.next_request += 1;
            }
            Event::FetchSucceeded { request, report } => {
                if self.is_outstanding(request) {
                    self.weather = WeatherStatus::Ready { request, report };
                }
            }
            Event::FetchFailed { request, reason } => {
                if self.is_outstanding(request) {
                    self.weather = WeatherStatus::Failed { request, reason };
                }
            }
            Event::FavoritesLoaded(cities) => {
                self.favorites.clear();
                for city in cities {
                    if !self.has_favorite(&city.name) {
                        self.favorites.push(city);
                    }
                }
            }
            Event::FavoriteAdded(city) => {
                if !self.has_favorite(&city.name) {
                    self.favorites.push(city);
                }
            }
            Event::FavoriteRemoved(name) => self.favorites.retain(|c| c.name != name),
        }

        self
    }

    /// Request id of the fetch currently in flight, if any
    pub fn outstanding(&self) -> Option<u64> {
        match self.weather {
            WeatherStatus::Loading { request } => Some(request),
            _ => None,
        }
    }

    pub fn has_favorite(&self, name: &str) -> bool {
        self.favorites.iter().any(|c| c.name == name)
    }

    pub fn view(&self) -> DashboardView {
        let weather = match &self.weather {
            WeatherStatus::Idle => WeatherView::Idle,
            WeatherStatus::Loading { .. } => WeatherView::Loading,
            WeatherStatus::Ready { report, .. } => WeatherView::from(report),
            WeatherStatus::Failed { reason, .. } => WeatherView::Failed { reason: reason.clone() },
        };

        DashboardView {
            selected_city: self.selected_city.clone(),
            favorites: self.favorites.clone(),
            menu_open: self.menu_open,
            search_open: self.search_open,
            search_query: self.search_query.clone(),
            search_results: self.search_results.clone(),
            weather,
        }
    }

    fn is_outstanding(&self, request: u64) -> bool {
        self.outstanding() == Some(request)
    }
}
