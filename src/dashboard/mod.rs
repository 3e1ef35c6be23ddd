pub mod models;
pub mod state;

use std::mem;
use std::sync::Arc;
use log::{error, info, warn};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use crate::dashboard::models::{DashboardView, WeatherReport};
use crate::dashboard::state::{DashboardState, Event};
use crate::manager_catalog::models::CityRecord;
use crate::manager_catalog::{CityCatalog, DEFAULT_SEARCH_LIMIT};
use crate::manager_owm::errors::OwmError;
use crate::manager_owm::OWM;
use crate::manager_store::Store;

/// A fetch that has been registered with the dashboard and should be run
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub request: u64,
    pub city: String,
}

/// Owner of the dashboard state and of the collaborators it persists to and reads from
pub struct Dashboard {
    state: DashboardState,
    store: Store,
    catalog: CityCatalog,
    catalog_path: String,
    default_city: CityRecord,
}

impl Dashboard {
    /// Creates a new dashboard
    ///
    /// # Arguments
    ///
    /// * 'store' - where favorites and selected city are kept
    /// * 'catalog' - city catalog, may be empty in which case it is loaded on first use
    /// * 'catalog_path' - path to load the catalog from
    /// * 'default_city' - city used when nothing is stored
    pub fn new(store: Store, catalog: CityCatalog, catalog_path: &str, default_city: CityRecord) -> Self {
        Self {
            state: DashboardState::new(&default_city.name),
            store,
            catalog,
            catalog_path: catalog_path.to_string(),
            default_city,
        }
    }

    /// Restores favorites and selected city from the store and registers the first fetch
    ///
    pub fn startup(&mut self) -> FetchTicket {
        self.store.purge_expired();

        let favorites = self.store.load(&self.default_city);
        let selected = self.store.load_selected_city(&self.default_city.name);
        info!("restored {} favorites, selected city {}", favorites.len(), selected);

        self.apply(Event::FavoritesLoaded(favorites));
        self.apply(Event::SelectCity(selected));
        self.begin_fetch()
    }

    /// Registers a new fetch for the selected city. Any fetch still in flight is
    /// superseded and its outcome will be dropped.
    ///
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let request = self.state.next_request;
        self.apply(Event::FetchStarted);

        FetchTicket { request, city: self.state.selected_city.clone() }
    }

    /// Records the outcome of a fetch
    ///
    /// # Arguments
    ///
    /// * 'request' - request id from the ticket
    /// * 'result' - fetched report or the error that stopped it
    pub fn finish_fetch(&mut self, request: u64, result: Result<WeatherReport, OwmError>) {
        if self.state.outstanding() != Some(request) {
            warn!("dropping outcome of superseded request {}", request);
        }

        match result {
            Ok(report) => self.apply(Event::FetchSucceeded { request, report }),
            Err(e) => {
                error!("failed to fetch weather: {}", e);
                self.apply(Event::FetchFailed { request, reason: e.to_string() });
            }
        }
    }

    /// Selects a city, remembers it and registers a fetch for it
    ///
    /// # Arguments
    ///
    /// * 'name' - city name, empty means the default city
    pub fn select_city(&mut self, name: &str) -> FetchTicket {
        self.apply(Event::SelectCity(name.to_string()));

        if let Err(e) = self.store.save_selected_city(&self.state.selected_city) {
            error!("failed to save selected city: {}", e);
        }

        self.begin_fetch()
    }

    /// Adds a catalog city to the favorites. Returns false if the name is not in the
    /// catalog; adding an existing favorite changes nothing.
    ///
    /// # Arguments
    ///
    /// * 'name' - exact city name as listed in the catalog
    pub fn add_favorite(&mut self, name: &str) -> bool {
        self.ensure_catalog();

        let city = match self.catalog.find(name) {
            Some(city) => city.clone(),
            None => {
                warn!("{} is not in the city catalog", name);
                return false;
            }
        };

        if !self.state.has_favorite(name) {
            self.apply(Event::FavoriteAdded(city));
            self.save_favorites();
        }

        true
    }

    /// Removes a city from the favorites
    ///
    /// # Arguments
    ///
    /// * 'name' - city name
    pub fn remove_favorite(&mut self, name: &str) {
        self.apply(Event::FavoriteRemoved(name.to_string()));
        self.save_favorites();
    }

    pub fn favorites(&self) -> &[CityRecord] {
        &self.state.favorites
    }

    pub fn toggle_menu(&mut self) {
        self.apply(Event::ToggleMenu);
    }

    /// Opens or closes the search panel, loading the catalog the first time it is needed
    ///
    pub fn toggle_search(&mut self) {
        self.apply(Event::ToggleSearch);
        self.ensure_catalog();
    }

    /// Fuzzy searches the catalog and keeps the results in the state
    ///
    /// # Arguments
    ///
    /// * 'query' - what the user typed
    pub fn search(&mut self, query: &str) -> Vec<CityRecord> {
        self.ensure_catalog();
        let results = self.catalog.search(query, DEFAULT_SEARCH_LIMIT);

        self.apply(Event::SearchResults { query: query.to_string(), results: results.clone() });
        results
    }

    pub fn view(&self) -> DashboardView {
        self.state.view()
    }

    #[cfg(test)]
    pub fn weather_status(&self) -> &state::WeatherStatus {
        &self.state.weather
    }

    fn apply(&mut self, event: Event) {
        let state = mem::take(&mut self.state);
        self.state = state.reduce(event);
    }

    fn save_favorites(&self) {
        if let Err(e) = self.store.save(&self.state.favorites) {
            error!("failed to save favorites: {}", e);
        }
    }

    /// Loads the catalog if it is still empty. A failed load leaves it empty, so search
    /// finds nothing until a later attempt succeeds.
    fn ensure_catalog(&mut self) {
        if !self.catalog.is_empty() {
            return;
        }

        match CityCatalog::load(&self.catalog_path) {
            Ok(catalog) => self.catalog = catalog,
            Err(e) => error!("error loading city list: {}", e),
        }
    }
}

/// Fetches current conditions and forecast concurrently and builds a report once both
/// are in
///
/// # Arguments
///
/// * 'owm' - weather client
/// * 'city' - city name
pub async fn fetch_report(owm: &OWM, city: &str) -> Result<WeatherReport, OwmError> {
    let (current, samples) = tokio::try_join!(
        owm.current_conditions(city),
        owm.forecast_samples(city),
    )?;

    Ok(WeatherReport::new(current, samples))
}

/// Runs a registered fetch without holding the dashboard lock during the network calls
///
/// # Arguments
///
/// * 'dashboard' - the shared dashboard
/// * 'owm' - weather client
/// * 'ticket' - fetch registered through the dashboard
pub async fn run_fetch(dashboard: &Mutex<Dashboard>, owm: &OWM, ticket: FetchTicket) {
    let result = fetch_report(owm, &ticket.city).await;
    dashboard.lock().await.finish_fetch(ticket.request, result);
}

/// Runs a registered fetch in its own task, so it completes and lands in the dashboard
/// even when whoever started it stops waiting
///
/// # Arguments
///
/// * 'dashboard' - the shared dashboard
/// * 'owm' - weather client
/// * 'ticket' - fetch registered through the dashboard
pub fn spawn_fetch(dashboard: Arc<Mutex<Dashboard>>, owm: OWM, ticket: FetchTicket) -> JoinHandle<()> {
    tokio::spawn(async move { run_fetch(&dashboard, &owm, ticket).await })
}
