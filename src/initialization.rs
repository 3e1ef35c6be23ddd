use std::{env, fs};
use log::info;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;
use crate::manager_catalog::models::CityRecord;

const CONFIG_ENV: &str = "WEATHERDASH_CONFIG";
const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

#[derive(Deserialize, Clone)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct StoreConfig {
    pub db_path: String,
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
}

#[derive(Deserialize, Clone)]
pub struct CatalogConfig {
    pub path: String,
}

#[derive(Deserialize, Clone)]
pub struct General {
    pub log_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub web_server: WebServer,
    pub weather: WeatherConfig,
    pub store: StoreConfig,
    pub catalog: CatalogConfig,
    #[serde(default = "default_city")]
    pub default_city: CityRecord,
    pub general: General,
}

fn default_base_url() -> String { "https://api.openweathermap.org/data/2.5".to_string() }
fn default_units() -> String { "metric".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_refresh_interval_secs() -> u64 { 600 }
fn default_ttl_days() -> i64 { 7 }
fn default_log_level() -> String { "info".to_string() }
fn default_city() -> CityRecord {
    CityRecord { id: 315, name: "Seoul".to_string(), country: "South Korea".to_string() }
}

/// Loads the configuration and sets up logging.
///
/// The config file is the first program argument, or whatever the `WEATHERDASH_CONFIG`
/// environment variable points at, or `config.toml` in the working directory.
/// An `OPENWEATHERMAP_API_KEY` environment variable overrides the api key in the file.
///
pub fn config() -> Result<Config, ConfigError> {
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| "config.toml".to_string());

    let mut config = load_config(&config_path)?;
    if let Ok(api_key) = env::var(API_KEY_ENV) {
        config.weather.api_key = api_key;
    }
    if config.weather.api_key.is_empty() {
        return Err(ConfigError::from("no api key configured for the weather service"));
    }

    setup_logger(config.general.log_path.as_deref(), &config.general.log_level)?;
    info!("configuration loaded from {}", config_path);

    Ok(config)
}

/// Reads and parses a TOML config file
///
/// # Arguments
///
/// * 'config_path' - path to the config file
fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(toml)?)
}
