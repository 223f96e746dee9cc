//! HTTP client for the OpenWeatherMap API.
//!
//! This module provides the [`OwmRequester`] struct for fetching current
//! weather conditions at a circuit location.

use anyhow::Result;
use log::{debug, info};
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;

/// Base URL of the OpenWeatherMap API.
const OPEN_WEATHER_MAP_API_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Current weather conditions at a location.
#[derive(Deserialize, Debug, Clone)]
pub struct WeatherReport {
    /// Active weather conditions. The first entry is the primary one.
    pub weather: Vec<WeatherCondition>,
    /// Temperature and humidity readings.
    pub main: WeatherReadings,
    /// Wind readings.
    pub wind: WindReadings,
}

impl WeatherReport {
    /// Primary weather condition of the report, if any.
    pub fn condition(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }
}

/// A single weather condition of a report.
#[derive(Deserialize, Debug, Clone)]
pub struct WeatherCondition {
    /// OpenWeatherMap weather condition code.
    pub id: u32,
    /// Condition description, localized to the requested language.
    pub description: String,
}

/// Temperature and humidity readings of a report.
#[derive(Deserialize, Debug, Clone)]
pub struct WeatherReadings {
    /// Temperature in the requested units.
    pub temp: f64,
    /// Relative humidity in percent.
    pub humidity: u32,
}

/// Wind readings of a report.
#[derive(Deserialize, Debug, Clone)]
pub struct WindReadings {
    /// Wind speed in the requested units.
    pub speed: f64,
}

/// Trait for fetching weather data.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait WeatherApi {
    /// Fetches the current weather at a location.
    ///
    /// # Arguments
    ///
    /// * `city` - City to look up.
    /// * `country` - Country of the city, to disambiguate the lookup.
    /// * `lang` - Language of the condition descriptions, e.g. `en`.
    /// * `units` - Unit system of the readings, `metric` or `imperial`.
    async fn get_weather(
        &self,
        city: &str,
        country: &str,
        lang: &str,
        units: &str,
    ) -> Result<WeatherReport>;
}

/// HTTP client for requesting data from the OpenWeatherMap API.
pub struct OwmRequester {
    /// Api key sent with every request.
    api_key: String,
    /// API base url.
    url: String,
    /// HTTP client
    client: Client,
}

impl OwmRequester {
    /// Create a new [OwmRequester].
    ///
    /// # Arguments
    ///
    /// * `api_key` - The OpenWeatherMap api key.
    pub fn new(api_key: &str) -> Self {
        OwmRequester {
            api_key: api_key.to_string(),
            url: OPEN_WEATHER_MAP_API_URL.to_string(),
            client: Client::new(),
        }
    }
}

impl WeatherApi for OwmRequester {
    /// Request `/weather/` to get the current weather at a location.
    ///
    /// This api call returns a json object with the current conditions:
    /// ```json
    /// {
    ///   "weather": [{ "id": 800, "description": "clear sky" }],
    ///   "main": { "temp": 28.5, "humidity": 40 },
    ///   "wind": { "speed": 3.6 }
    /// }
    /// ```
    /// This method transforms this json into a [`WeatherReport`].
    async fn get_weather(
        &self,
        city: &str,
        country: &str,
        lang: &str,
        units: &str,
    ) -> Result<WeatherReport> {
        let url = format!("{}/weather/", &self.url);
        let location = format!("{},{}", city, country);
        info!("request {} weather at {}", units, &location);
        debug!("request {}?q={}&lang={}&units={}", &url, &location, lang, units);

        let report: WeatherReport = self
            .client
            .get(&url)
            .query(&[
                ("q", location.as_str()),
                ("lang", lang),
                ("units", units),
                ("APPID", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {:?}", &url, &report);

        Ok(report)
    }
}
