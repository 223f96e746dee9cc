//! Configuration file structures for the F1 alerts bot.
//!
//! This module defines the configuration file format using YAML. The
//! configuration is split into five sections: Telegram credentials, Formula 1
//! API access, OpenWeatherMap API access, alert timing and local resources.
//!
//! # Configuration File Format
//!
//! The bot uses a YAML configuration file with the following structure:
//!
//! ```yaml
//! # Telegram Bot Configuration
//! telegram:
//!   # Bot token obtained from @BotFather
//!   bot_token: "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11"
//!
//!   # Channel the alerts are published to
//!   channel_id: "@f1alerts"
//!
//! # Formula 1 API Configuration
//! formula1:
//!   # Api key sent with event tracker requests
//!   api_key: "your-api-key"
//!
//! # OpenWeatherMap API Configuration
//! open_weather_map:
//!   # Api key sent with weather requests
//!   api_key: "your-api-key"
//!
//! # Alert Timing Configuration
//! alerts:
//!   # Six field cron expression driving the poll loop
//!   cron: "0 */3 * * * *"
//!
//!   # How long before a session start the schedule alert fires, in milliseconds
//!   schedule_lead_ms: 3600000
//!
//!   # How long before a session start the session start alert fires, in milliseconds
//!   session_lead_ms: 600000
//!
//!   # Delay between the race results and the standings update, in milliseconds
//!   standings_delay_ms: 1800000
//!
//! # Local Resources Configuration
//! resources:
//!   # Directory containing the circuit layout images
//!   circuit_images: "./resources/circuits"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Every value can be overridden with an environment variable using the
//! `F1BOT_` prefix and `__` as the section separator:
//!
//! ```bash
//! export F1BOT_TELEGRAM__BOT_TOKEN="123456:ABC..."
//! export F1BOT_FORMULA1__API_KEY="your-api-key"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Root configuration structure for the F1 alerts bot.
///
/// This structure represents the complete bot configuration.
///
/// # Structure
///
/// The configuration is divided into five sections:
/// - [`Telegram`] - Telegram bot credentials and target channel
/// - [`Formula1`] - Formula 1 API access
/// - [`OpenWeatherMap`] - OpenWeatherMap API access
/// - [`Alerts`] - Poll cadence and alert timing
/// - [`Resources`] - Local resources used by the alerts
#[derive(Deserialize)]
pub struct Config {
    /// Telegram bot configuration
    pub telegram: Telegram,
    /// Formula 1 API configuration
    pub formula1: Formula1,
    /// OpenWeatherMap API configuration
    pub open_weather_map: OpenWeatherMap,
    /// Alert timing configuration
    pub alerts: Alerts,
    /// Local resources configuration
    pub resources: Resources,
}

impl Config {
    /// Load the configuration from a YAML file, with environment variable
    /// overrides applied on top.
    ///
    /// Environment variables use the `F1BOT_` prefix and `__` as the section
    /// separator, e.g. `F1BOT_TELEGRAM__BOT_TOKEN` overrides
    /// `telegram.bot_token`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a required value is
    /// missing from both the file and the environment.
    pub fn load(path: &str) -> Result<Config, anyhow::Error> {
        let config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("F1BOT_").split("__"))
            .extract()?;
        Ok(config)
    }
}

/// Telegram bot configuration.
///
/// Contains the credentials and the target channel for alert delivery.
///
/// # YAML Section
///
/// ```yaml
/// telegram:
///   bot_token: "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11"
///   channel_id: "@f1alerts"
/// ```
#[derive(Deserialize)]
pub struct Telegram {
    /// Bot token issued by @BotFather.
    ///
    /// Used to authenticate every Bot API request.
    pub bot_token: String,

    /// Channel the alerts are published to.
    ///
    /// Either a public channel username or a numeric chat id.
    ///
    /// # Examples
    ///
    /// - `@f1alerts`
    /// - `-1001234567890`
    pub channel_id: String,
}

/// Formula 1 API configuration.
///
/// # YAML Section
///
/// ```yaml
/// formula1:
///   api_key: "your-api-key"
/// ```
#[derive(Deserialize)]
pub struct Formula1 {
    /// Api key sent with event tracker requests.
    pub api_key: String,
}

/// OpenWeatherMap API configuration.
///
/// # YAML Section
///
/// ```yaml
/// open_weather_map:
///   api_key: "your-api-key"
/// ```
#[derive(Deserialize)]
pub struct OpenWeatherMap {
    /// Api key sent with weather requests.
    pub api_key: String,
}

/// Alert timing configuration.
///
/// # YAML Section
///
/// ```yaml
/// alerts:
///   cron: "0 */3 * * * *"
///   schedule_lead_ms: 3600000
///   session_lead_ms: 600000
///   standings_delay_ms: 1800000
/// ```
#[derive(Deserialize)]
pub struct Alerts {
    /// Six field cron expression driving the poll loop.
    ///
    /// # Examples
    ///
    /// - `0 */3 * * * *` - every three minutes
    /// - `*/30 * * * * *` - every thirty seconds
    pub cron: String,

    /// How long before a session start the schedule alert fires, in
    /// milliseconds.
    pub schedule_lead_ms: u64,

    /// How long before a session start the session start alert fires, in
    /// milliseconds.
    pub session_lead_ms: u64,

    /// Delay between the race results and the standings update, in
    /// milliseconds.
    pub standings_delay_ms: u64,
}

/// Local resources configuration.
///
/// # YAML Section
///
/// ```yaml
/// resources:
///   circuit_images: "./resources/circuits"
/// ```
#[derive(Deserialize)]
pub struct Resources {
    /// Directory containing the circuit layout images.
    ///
    /// Images are named after the circuit, e.g. `hungary.png`. A missing
    /// image only skips the circuit photo alert.
    pub circuit_images: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const CONFIG_YAML: &str = "\
telegram:
  bot_token: \"123456:ABC-token\"
  channel_id: \"@f1alerts\"
formula1:
  api_key: \"event-tracker-key\"
open_weather_map:
  api_key: \"owm-key\"
alerts:
  cron: \"0 */3 * * * *\"
  schedule_lead_ms: 3600000
  session_lead_ms: 600000
  standings_delay_ms: 1800000
resources:
  circuit_images: \"./resources/circuits\"
";

    fn write_test_config(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, CONFIG_YAML).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    #[serial]
    fn test_load_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_config(&dir);

        let config = Config::load(&path).unwrap();

        assert_eq!(config.telegram.bot_token, "123456:ABC-token");
        assert_eq!(config.telegram.channel_id, "@f1alerts");
        assert_eq!(config.formula1.api_key, "event-tracker-key");
        assert_eq!(config.open_weather_map.api_key, "owm-key");
        assert_eq!(config.alerts.cron, "0 */3 * * * *");
        assert_eq!(config.alerts.schedule_lead_ms, 3_600_000);
        assert_eq!(config.alerts.session_lead_ms, 600_000);
        assert_eq!(config.alerts.standings_delay_ms, 1_800_000);
        assert_eq!(config.resources.circuit_images, "./resources/circuits");
    }

    #[test]
    #[serial]
    fn test_environment_variables_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_config(&dir);

        // SAFETY: tests mutating the environment are marked serial
        unsafe { std::env::set_var("F1BOT_TELEGRAM__BOT_TOKEN", "token-from-env") };
        let config = Config::load(&path);
        unsafe { std::env::remove_var("F1BOT_TELEGRAM__BOT_TOKEN") };

        let config = config.unwrap();
        assert_eq!(config.telegram.bot_token, "token-from-env");
        assert_eq!(config.telegram.channel_id, "@f1alerts");
    }

    #[test]
    #[serial]
    fn test_missing_section_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "telegram:\n  bot_token: \"token\"\n  channel_id: \"@f1alerts\"\n",
        )
        .unwrap();

        assert!(Config::load(&path.to_string_lossy()).is_err());
    }
}
