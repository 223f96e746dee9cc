//! F1 Alerts Bot - A Telegram bot for Formula 1 race weekend alerts.
//!
//! This is the main entry point for the F1 alerts bot, which watches the
//! Formula 1 upstream APIs and publishes race weekend alerts to a Telegram
//! channel.
//!
//! # Overview
//!
//! The bot follows the currently tracked race weekend and keeps a channel
//! informed about it: when a session is scheduled soon, when it is about to
//! start (with the current weather at the circuit), the final classification
//! once the session is over, and the championship standings after the race.
//! Every message is published in English and Spanish.
//!
//! # Features
//!
//! - **Schedule Alerts**: A heads-up when a session is scheduled within the lead window
//! - **Session Start Alerts**: A reminder shortly before lights out, with circuit weather
//! - **Circuit Photo**: The track layout, posted with the first alert of a weekend
//! - **Session Results**: The final classification as soon as the archive has it
//! - **Standings Update**: Driver and constructor championship tables after the race
//! - **Bilingual Messages**: Every alert in English and Spanish
//! - **YAML Configuration**: Single configuration file, every value overridable from the environment
//!
//! # Configuration
//!
//! Provide a `config.yaml` file:
//!
//! ```yaml
//! telegram:
//!   bot_token: "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11"
//!   channel_id: "@f1alerts"
//!
//! formula1:
//!   api_key: "your-event-tracker-api-key"
//!
//! open_weather_map:
//!   api_key: "your-owm-api-key"
//!
//! alerts:
//!   cron: "0 */3 * * * *"
//!   schedule_lead_ms: 3600000
//!   session_lead_ms: 600000
//!   standings_delay_ms: 1800000
//!
//! resources:
//!   circuit_images: "./resources/circuits"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `F1BOT_` prefix:
//!
//! ```bash
//! export F1BOT_TELEGRAM__BOT_TOKEN="123456:ABC..."
//! export F1BOT_TELEGRAM__CHANNEL_ID="@f1alerts"
//! export F1BOT_FORMULA1__API_KEY="your-api-key"
//! export F1BOT_OPEN_WEATHER_MAP__API_KEY="your-api-key"
//! ```
//!
//! # Usage
//!
//! ```bash
//! f1-alerts-bot --config config.yaml
//! ```
//!
//! # Architecture
//!
//! The bot is split into the following modules:
//!
//! - [`alerts`] - Alert decision logic and per weekend state tracking
//! - [`bot`] - Main bot logic running the cron driven poll loop
//! - [`circuits`] - Static circuit table with localities and layout images
//! - [`config`] - YAML configuration file structures and loading with environment variable support
//! - [`f1`] - Formula 1 upstream API clients and response structures
//! - [`telegram`] - Telegram Bot API client, message templates and alert delivery
//! - [`weather`] - OpenWeatherMap client and bilingual weather enrichment
//!
//! # Runtime Behavior
//!
//! Once started, the bot polls the Formula 1 event tracker and the live
//! timing archive on the configured cron schedule. Each poll is evaluated
//! against the tracked race weekend and due alerts are published to the
//! channel. After the race results a deferred task publishes the
//! championship standings.
//!
//! The loop runs indefinitely until the process is terminated.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Log level filter (default: `info`; `debug` traces every
//!   poll and gate decision)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod alerts;
mod bot;
mod circuits;
mod config;
mod f1;
mod telegram;
mod weather;

/// Command-line arguments for the F1 alerts bot.
///
/// The bot takes a single command-line argument: the path to the YAML
/// configuration file. Everything else is configured through that file
/// (see [`config::Config`]).
///
/// # Examples
///
/// ```bash
/// f1-alerts-bot --config config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// The configuration file should contain the Telegram credentials, the
    /// upstream API keys and the alert timing. See the [`config`] module
    /// for the expected format.
    ///
    /// # Example
    ///
    /// ```yaml
    /// telegram:
    ///   bot_token: "123456:ABC..."
    ///   channel_id: "@f1alerts"
    ///
    /// formula1:
    ///   api_key: "your-api-key"
    ///
    /// open_weather_map:
    ///   api_key: "your-api-key"
    ///
    /// alerts:
    ///   cron: "0 */3 * * * *"
    ///   schedule_lead_ms: 3600000
    ///   session_lead_ms: 600000
    ///   standings_delay_ms: 1800000
    ///
    /// resources:
    ///   circuit_images: "./resources/circuits"
    /// ```
    ///
    /// With environment variable overrides:
    ///
    /// ```bash
    /// export F1BOT_TELEGRAM__BOT_TOKEN="secret-from-env"
    /// f1-alerts-bot --config config.yaml
    /// ```
    #[arg(short, long)]
    config: String,
}

/// Main entry point for the F1 alerts bot.
///
/// Startup sequence:
///
/// 1. **Logging Setup**: Logger at `info` level unless `RUST_LOG` says
///    otherwise
/// 2. **Argument Parsing**: Command-line arguments via `clap`
/// 3. **Configuration Loading**: YAML configuration file with environment
///    variable overrides applied on top
/// 4. **Bot Initialization**: Upstream requesters, Telegram notifier and
///    alert tracker
/// 5. **Bot Execution**: The cron driven poll loop
///
/// # Error Handling
///
/// Startup errors never panic: an unreadable or incomplete config file and
/// an invalid cron expression are both logged and the process returns
/// early. Once the loop runs, network errors are logged and retried on the
/// next poll.
///
/// # Examples
///
/// ```bash
/// f1-alerts-bot --config config.yaml
/// ```
///
/// With debug logging and the secrets coming from the environment:
///
/// ```bash
/// export F1BOT_TELEGRAM__BOT_TOKEN="123456:ABC..."
/// export F1BOT_FORMULA1__API_KEY="your-api-key"
/// export F1BOT_OPEN_WEATHER_MAP__API_KEY="your-api-key"
/// RUST_LOG=debug f1-alerts-bot --config config.yaml
/// ```
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting f1-alerts-bot {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from YAML file with environment variable overrides
    let config: Config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    // Launch bot
    let bot = match Bot::new(config) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };
    bot.start().await;
}
