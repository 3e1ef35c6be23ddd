pub mod errors;
pub mod models;

use std::fs;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::info;
use crate::manager_catalog::errors::CatalogError;
use crate::manager_catalog::models::CityRecord;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// The static list of cities that search and favorites pick from
#[derive(Default)]
pub struct CityCatalog {
    cities: Vec<CityRecord>,
}

impl CityCatalog {
    /// Creates a catalog from an already loaded list of cities
    ///
    /// # Arguments
    ///
    /// * 'cities' - catalog entries in the order they should rank on equal score
    #[cfg(test)]
    pub fn new(cities: Vec<CityRecord>) -> Self {
        Self { cities }
    }

    /// Loads the catalog from a json file holding an array of `{id, name, country}`
    ///
    /// # Arguments
    ///
    /// * 'path' - path to the catalog file
    pub fn load(path: &str) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        let cities: Vec<CityRecord> = serde_json::from_str(&json)?;
        info!("loaded {} cities from {}", cities.len(), path);

        Ok(Self { cities })
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Returns the first city with exactly the given name
    ///
    /// # Arguments
    ///
    /// * 'name' - city name
    pub fn find(&self, name: &str) -> Option<&CityRecord> {
        self.cities.iter().find(|c| c.name == name)
    }

    /// Fuzzy searches the catalog, see [`search`]
    ///
    /// # Arguments
    ///
    /// * 'query' - what the user typed
    /// * 'limit' - max number of results
    pub fn search(&self, query: &str, limit: usize) -> Vec<CityRecord> {
        search(query, &self.cities, limit)
    }
}

/// Returns at most `limit` cities whose name or country fuzzy matches the query, best
/// match first. Cities scoring the same keep their catalog order. An empty query gives
/// no results rather than the whole catalog.
///
/// # Arguments
///
/// * 'query' - what the user typed
/// * 'catalog' - cities to search
/// * 'limit' - max number of results
pub fn search(query: &str, catalog: &[CityRecord], limit: usize) -> Vec<CityRecord> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut hits: Vec<(i64, &CityRecord)> = catalog
        .iter()
        .filter_map(|city| {
            let name = matcher.fuzzy_match(&city.name, query);
            let country = matcher.fuzzy_match(&city.country, query);
            name.max(country).map(|score| (score, city))
        })
        .collect();

    // stable, so equal scores stay in catalog order
    hits.sort_by(|a, b| b.0.cmp(&a.0));

    hits.into_iter()
        .take(limit)
        .map(|(_, city)| city.clone())
        .collect()
}
