use serde::Serialize;
use crate::daily_forecast::{daily_forecast, round_temp, DailySummary};
use crate::manager_catalog::models::CityRecord;
use crate::manager_owm::models::{CurrentConditions, ForecastSample};
use crate::weather_converter::{degree_to_direction, local_clock, meters_to_kilometers};
use chrono::DateTime;

/// Number of forecast steps shown in the hourly strip
pub const HOURLY_STEPS: usize = 10;

/// Everything fetched for one city, complete only when both fetches succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: Vec<DailySummary>,
    pub hourly: Vec<ForecastSample>,
}

impl WeatherReport {
    /// Builds the report, aggregating the forecast samples into daily summaries
    ///
    /// # Arguments
    ///
    /// * 'current' - current conditions
    /// * 'samples' - forecast samples in chronological order
    pub fn new(current: CurrentConditions, samples: Vec<ForecastSample>) -> Self {
        let daily = daily_forecast(&samples);
        let hourly = samples.into_iter().take(HOURLY_STEPS).collect();

        Self { current, daily, hourly }
    }
}

#[derive(Serialize, Debug)]
pub struct CurrentView {
    pub city: String,
    pub country: String,
    pub temp: i64,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub visibility_km: Option<f64>,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub sunrise: String,
    pub sunset: String,
}

impl From<&CurrentConditions> for CurrentView {
    fn from(c: &CurrentConditions) -> Self {
        Self {
            city: c.city.clone(),
            country: c.country.clone(),
            temp: round_temp(c.temp),
            description: c.description.clone(),
            icon: c.icon.clone(),
            humidity: c.humidity,
            visibility_km: c.visibility.map(meters_to_kilometers),
            wind_speed: c.wind_speed,
            wind_direction: degree_to_direction(c.wind_deg).to_string(),
            sunrise: local_clock(c.sunrise),
            sunset: local_clock(c.sunset),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HourlyView {
    pub time: String,
    pub temp: i64,
    pub icon: String,
}

impl From<&ForecastSample> for HourlyView {
    fn from(s: &ForecastSample) -> Self {
        let time = DateTime::from_timestamp(s.timestamp, 0)
            .map(local_clock)
            .unwrap_or_else(|| s.dt_txt.clone());

        Self { time, temp: round_temp(s.temp), icon: s.icon.clone() }
    }
}

/// Weather part of the dashboard as handed to the renderer
#[derive(Serialize, Debug)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherView {
    Idle,
    Loading,
    Ready {
        current: CurrentView,
        daily: Vec<DailySummary>,
        hourly: Vec<HourlyView>,
    },
    Failed {
        reason: String,
    },
}

impl From<&WeatherReport> for WeatherView {
    fn from(report: &WeatherReport) -> Self {
        WeatherView::Ready {
            current: CurrentView::from(&report.current),
            daily: report.daily.clone(),
            hourly: report.hourly.iter().map(HourlyView::from).collect(),
        }
    }
}

/// Snapshot of the whole dashboard
#[derive(Serialize, Debug)]
pub struct DashboardView {
    pub selected_city: String,
    pub favorites: Vec<CityRecord>,
    pub menu_open: bool,
    pub search_open: bool,
    pub search_query: String,
    pub search_results: Vec<CityRecord>,
    pub weather: WeatherView,
}
