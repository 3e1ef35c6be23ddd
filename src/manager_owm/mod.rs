pub mod errors;
pub mod models;

use std::time::Duration;
use log::info;
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::initialization::WeatherConfig;
use crate::manager_owm::errors::OwmError;
use crate::manager_owm::models::{ApiMessage, CurrentConditions, CurrentDocument, ForecastDocument, ForecastSample};


/// Struct for fetching current conditions and forecasts from OpenWeatherMap
#[derive(Clone)]
pub struct OWM {
    client: Client,
    base_url: String,
    api_key: String,
    units: String,
}

impl OWM {
    /// Returns an OWM struct ready for fetching weather data
    ///
    /// # Arguments
    ///
    /// * 'config' - weather section of the configuration
    pub fn new(config: &WeatherConfig) -> Result<OWM, OwmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        })
    }

    /// Retrieves the current conditions for the given city
    ///
    /// # Arguments
    ///
    /// * 'city' - city name as understood by the API, e.g. "Seoul"
    pub async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, OwmError> {
        let doc: CurrentDocument = self.get_document("weather", city).await?;

        Ok(CurrentConditions::from(doc))
    }

    /// Retrieves the 5 day forecast in 3 hour steps for the given city, in the order the
    /// API delivers it (chronological)
    ///
    /// # Arguments
    ///
    /// * 'city' - city name as understood by the API, e.g. "Seoul"
    pub async fn forecast_samples(&self, city: &str) -> Result<Vec<ForecastSample>, OwmError> {
        let doc: ForecastDocument = self.get_document("forecast", city).await?;

        Ok(doc.list.into_iter().map(ForecastSample::from).collect())
    }

    /// Makes a GET request against one of the API endpoints and decodes the result.
    /// Non success status codes are turned into errors carrying the API's own message if
    /// there is one.
    ///
    /// # Arguments
    ///
    /// * 'endpoint' - endpoint name relative to base url
    /// * 'city' - city name to put in the query
    async fn get_document<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, OwmError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        info!("fetching {} for {}", endpoint, city);

        let req = self.client
            .get(url)
            .query(&[("q", city), ("units", self.units.as_str()), ("appid", self.api_key.as_str())])
            .send().await?;

        let status = req.status();
        let json = req.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiMessage>(&json)
                .map(|m| m.message)
                .unwrap_or_default();
            return Err(OwmError::Status(status, message));
        }

        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> OWM {
        OWM::new(&WeatherConfig {
            api_key: "test_key".to_string(),
            base_url: uri.to_string(),
            units: "metric".to_string(),
            timeout_secs: 5,
            refresh_interval_secs: 600,
        }).unwrap()
    }

    #[tokio::test]
    async fn test_current_conditions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Seoul"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Seoul",
                "main": { "temp": 21.3, "humidity": 60 },
                "weather": [{ "description": "clear sky", "icon": "01d" }],
                "sys": { "country": "KR", "sunrise": 1704060000, "sunset": 1704096000 },
                "wind": { "speed": 1.5, "deg": 200 },
                "visibility": 10000
            })))
            .mount(&mock_server)
            .await;

        let current = client(&mock_server.uri()).current_conditions("Seoul").await.unwrap();

        assert_eq!(current.city, "Seoul");
        assert_eq!(current.country, "KR");
        assert_eq!(current.humidity, 60);
        assert_eq!(current.icon, "01d");
        assert_eq!(current.visibility, Some(10000.0));
        assert_eq!(current.sunrise.timestamp(), 1704060000);
    }

    #[tokio::test]
    async fn test_forecast_samples() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": "200",
                "list": [
                    {
                        "dt": 1704099600,
                        "main": { "temp": 12.0, "temp_min": 10.4, "temp_max": 15.6 },
                        "weather": [{ "description": "clear sky", "icon": "01d" }],
                        "dt_txt": "2024-01-01 09:00:00"
                    },
                    {
                        "dt": 1704132000,
                        "main": { "temp": 9.0, "temp_min": 8.2, "temp_max": 17.1 },
                        "weather": [],
                        "dt_txt": "2024-01-01 18:00:00"
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        let samples = client(&mock_server.uri()).forecast_samples("Seoul").await.unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].dt_txt, "2024-01-01 09:00:00");
        assert_eq!(samples[0].icon, "01d");
        assert_eq!(samples[1].icon, "");
    }

    #[tokio::test]
    async fn test_unknown_city() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri()).current_conditions("Nowhere").await;

        match result {
            Err(OwmError::Status(status, message)) => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(message, "city not found");
            }
            _ => panic!("expected status error"),
        }
    }

    #[tokio::test]
    async fn test_bad_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri()).forecast_samples("Seoul").await;

        assert!(matches!(result, Err(OwmError::Document(_))));
    }
}
