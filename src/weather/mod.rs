//! Weather enrichment for session alerts.
//!
//! Session start alerts carry the current weather at the circuit in both
//! alert languages. This module fetches the two localized reports and
//! maps weather condition codes to emojis.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the OpenWeatherMap API

mod requester;

#[cfg(test)]
pub use crate::weather::requester::MockWeatherApi;
pub use crate::weather::requester::{
    OwmRequester, WeatherApi, WeatherCondition, WeatherReadings, WeatherReport, WindReadings,
};

use anyhow::{Result, bail};

/// Weather reports for a session in both alert languages.
///
/// The english report uses imperial units, the spanish one metric units.
#[derive(Debug, Clone)]
pub struct SessionWeather {
    pub english: WeatherReport,
    pub spanish: WeatherReport,
}

/// Fetch the weather reports for a session in both alert languages.
///
/// The two lookups run concurrently. The enrichment is all or nothing:
/// when either lookup fails or comes back without condition data, an
/// error is returned and the caller sends its alert without weather.
pub async fn fetch_session_weather<W: WeatherApi>(
    api: &W,
    city: &str,
    country: &str,
) -> Result<SessionWeather> {
    let (english, spanish) = futures::join!(
        api.get_weather(city, country, "en", "imperial"),
        api.get_weather(city, country, "es", "metric"),
    );

    Ok(SessionWeather {
        english: complete_report(english?)?,
        spanish: complete_report(spanish?)?,
    })
}

/// Reject weather reports without condition data.
fn complete_report(report: WeatherReport) -> Result<WeatherReport> {
    if report.weather.is_empty() {
        bail!("weather report has no condition data");
    }

    Ok(report)
}

/// Emoji for an OpenWeatherMap weather condition code.
pub fn emoji_for_weather_code(code: u32) -> &'static str {
    match code {
        200..=299 => "\u{1F4A8}",              // storm
        300..=399 => "\u{1F4A7}",              // drizzle
        500..=599 => "\u{2614}",               // rain
        600..=699 | 903 | 906 => "\u{26C4}",   // snow
        700..=799 => "\u{1F301}",              // atmosphere
        800 => "\u{2600}",                     // clear
        801 => "\u{26C5}",                     // clear with some clouds
        802..=804 => "\u{2601}",               // clouds
        904 => "\u{1F525}",                    // hot
        _ => "\u{1F300}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_report(code: u32, temp: f64) -> WeatherReport {
        WeatherReport {
            weather: vec![WeatherCondition {
                id: code,
                description: "clear sky".to_string(),
            }],
            main: WeatherReadings {
                temp,
                humidity: 40,
            },
            wind: WindReadings { speed: 3.6 },
        }
    }

    #[tokio::test]
    async fn test_fetch_session_weather() {
        let mut api = MockWeatherApi::new();
        api.expect_get_weather()
            .withf(|city, country, lang, units| {
                city == "Budapest" && country == "HU" && lang == "en" && units == "imperial"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(create_test_report(800, 83.1)));
        api.expect_get_weather()
            .withf(|city, country, lang, units| {
                city == "Budapest" && country == "HU" && lang == "es" && units == "metric"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(create_test_report(800, 28.4)));

        let weather = fetch_session_weather(&api, "Budapest", "HU").await.unwrap();

        assert_eq!(weather.english.main.temp, 83.1);
        assert_eq!(weather.spanish.main.temp, 28.4);
    }

    #[tokio::test]
    async fn test_fetch_session_weather_fails_when_one_lookup_fails() {
        let mut api = MockWeatherApi::new();
        api.expect_get_weather()
            .withf(|_, _, lang, _| lang == "en")
            .returning(|_, _, _, _| Ok(create_test_report(800, 83.1)));
        api.expect_get_weather()
            .withf(|_, _, lang, _| lang == "es")
            .returning(|_, _, _, _| Err(anyhow::anyhow!("network error")));

        assert!(
            fetch_session_weather(&api, "Budapest", "HU")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_fetch_session_weather_fails_without_condition_data() {
        let mut api = MockWeatherApi::new();
        api.expect_get_weather().returning(|_, _, _, _| {
            Ok(WeatherReport {
                weather: vec![],
                main: WeatherReadings {
                    temp: 28.4,
                    humidity: 40,
                },
                wind: WindReadings { speed: 3.6 },
            })
        });

        assert!(
            fetch_session_weather(&api, "Budapest", "HU")
                .await
                .is_err()
        );
    }

    #[test]
    fn test_emoji_for_weather_code() {
        assert_eq!(emoji_for_weather_code(210), "\u{1F4A8}");
        assert_eq!(emoji_for_weather_code(301), "\u{1F4A7}");
        assert_eq!(emoji_for_weather_code(502), "\u{2614}");
        assert_eq!(emoji_for_weather_code(600), "\u{26C4}");
        assert_eq!(emoji_for_weather_code(903), "\u{26C4}");
        assert_eq!(emoji_for_weather_code(906), "\u{26C4}");
        assert_eq!(emoji_for_weather_code(741), "\u{1F301}");
        assert_eq!(emoji_for_weather_code(800), "\u{2600}");
        assert_eq!(emoji_for_weather_code(801), "\u{26C5}");
        assert_eq!(emoji_for_weather_code(803), "\u{2601}");
        assert_eq!(emoji_for_weather_code(904), "\u{1F525}");
        assert_eq!(emoji_for_weather_code(950), "\u{1F300}");
    }
}
