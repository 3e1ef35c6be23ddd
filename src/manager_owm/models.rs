use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};

#[derive(Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub humidity: u8,
}

#[serde_as]
#[derive(Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunrise: DateTime<Utc>,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunset: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

/// Document returned by the `weather` endpoint
#[derive(Deserialize)]
pub struct CurrentDocument {
    pub name: String,
    pub main: CurrentMain,
    pub weather: Vec<Condition>,
    pub sys: Sys,
    pub wind: Wind,
    pub visibility: Option<f64>,
}

#[derive(Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: ForecastMain,
    pub weather: Vec<Condition>,
    pub dt_txt: String,
}

/// Document returned by the `forecast` endpoint, 3 hour steps over 5 days
#[derive(Deserialize)]
pub struct ForecastDocument {
    pub list: Vec<ForecastItem>,
}

/// Error body the API sends along with non-success status codes
#[derive(Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Current conditions for a city
#[serde_as]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub temp: f64,
    pub humidity: u8,
    pub visibility: Option<f64>,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub description: String,
    pub icon: String,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunrise: DateTime<Utc>,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunset: DateTime<Utc>,
}

impl From<CurrentDocument> for CurrentConditions {
    fn from(doc: CurrentDocument) -> Self {
        let (description, icon) = first_condition(doc.weather);
        Self {
            city: doc.name,
            country: doc.sys.country,
            temp: doc.main.temp,
            humidity: doc.main.humidity,
            visibility: doc.visibility,
            wind_speed: doc.wind.speed,
            wind_deg: doc.wind.deg,
            description,
            icon,
            sunrise: doc.sys.sunrise,
            sunset: doc.sys.sunset,
        }
    }
}

/// One 3 hour forecast step
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub dt_txt: String,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub icon: String,
    pub description: String,
}

impl From<ForecastItem> for ForecastSample {
    fn from(item: ForecastItem) -> Self {
        let (description, icon) = first_condition(item.weather);
        Self {
            timestamp: item.dt,
            dt_txt: item.dt_txt,
            temp: item.main.temp,
            temp_min: item.main.temp_min,
            temp_max: item.main.temp_max,
            icon,
            description,
        }
    }
}

/// The API lists conditions with the primary one first, missing means empty strings
fn first_condition(conditions: Vec<Condition>) -> (String, String) {
    conditions
        .into_iter()
        .next()
        .map(|c| (c.description, c.icon))
        .unwrap_or_default()
}
