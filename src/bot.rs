//! Bot module wiring the Formula 1 upstreams to the Telegram channel.
//!
//! This module provides the main [`Bot`] implementation that connects the
//! Formula 1 data sources with the Telegram alert channel. It orchestrates
//! the complete bot lifecycle: the cron driven poll loop, alert evaluation
//! and the deferred championship standings update after a race.
//!
//! # Overview
//!
//! The bot polls the Formula 1 event tracker and the live timing archive on
//! a cron schedule. Each poll is handed to the [`SessionAlertTracker`],
//! which decides what became due and publishes it through the
//! [`TelegramNotifier`]: session schedule alerts, session start alerts with
//! circuit weather, session results and the post race standings update.
//!
//! # Architecture
//!
//! A single loop drives everything:
//!
//! ```text
//! cron fire → fetch event tracker + session info → tracker tick → Telegram channel
//! ```
//!
//! The two upstream fetches run concurrently and fail independently; a
//! failed fetch skips its half of the evaluation until the next poll. The
//! standings update runs outside the loop as a deferred task spawned when
//! the race results go out.
//!
//! # Example
//!
//! ```no_run
//! # use f1_alerts_bot::bot::Bot;
//! # use f1_alerts_bot::config::Config;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load("config.yaml")?;
//!
//! // Create and start the bot
//! let bot = Bot::new(config)?;
//! bot.start().await; // Runs indefinitely
//! # Ok(())
//! # }
//! ```

use chrono::Utc;
use cron::Schedule;
use log::{debug, error, info};
use std::{str::FromStr, sync::Arc, time::Duration};
use tokio::time;

use crate::{
    alerts::SessionAlertTracker,
    config::Config,
    f1::{Formula1Api, Formula1Requester},
    telegram::{Notifier, TelegramClient, TelegramNotifier},
    weather::OwmRequester,
};

/// Main bot structure that publishes Formula 1 alerts to a Telegram channel.
///
/// The `Bot` owns the upstream requesters, the notifier and the alert
/// tracker, and runs the cron driven poll loop that feeds them.
///
/// # Poll Cycle
///
/// On every cron firing the bot:
///
/// 1. Fetches the event tracker state and the live timing session info
///    concurrently
/// 2. Hands both snapshots to the [`SessionAlertTracker`]
/// 3. The tracker sends whatever alerts became due through the notifier
///
/// # Standings Update
///
/// When the tracker reports the race results it schedules a deferred
/// standings update. The bot resolves that callback by fetching the driver
/// and constructor standings concurrently and publishing both tables in a
/// single message.
pub struct Bot {
    /// Formula 1 requester for the event tracker, live timing and Ergast
    /// upstreams.
    ///
    /// Shared with the tracker, which uses it to fetch session results.
    f1_requester: Arc<Formula1Requester>,

    /// Telegram notifier used for every alert.
    ///
    /// Shared with the tracker; the bot itself only uses it for the
    /// deferred standings update.
    notifier: Arc<TelegramNotifier>,

    /// Alert decision logic for the currently tracked race weekend.
    ///
    /// Owns all per weekend state. Only the poll loop touches it, so no
    /// locking is needed.
    tracker: SessionAlertTracker<Formula1Requester, OwmRequester, TelegramNotifier>,

    /// Parsed cron schedule driving the poll loop.
    schedule: Schedule,

    /// Original cron expression, kept for logging.
    cron_expression: String,
}

impl Bot {
    /// Creates a new Bot instance from the loaded configuration.
    ///
    /// This constructor initializes all bot components: the Formula 1
    /// requester, the OpenWeatherMap requester, the Telegram notifier and
    /// the alert tracker. No network request is made yet.
    ///
    /// # Arguments
    ///
    /// * `config` - YAML configuration loaded from file, see [`Config`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the configured cron expression
    /// cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use f1_alerts_bot::bot::Bot;
    /// # use f1_alerts_bot::config::Config;
    /// # async fn example() -> Result<(), anyhow::Error> {
    /// let config = Config::load("config.yaml")?;
    ///
    /// let bot = Bot::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        // Create the upstream requesters
        let f1_requester = Arc::new(Formula1Requester::new(&config.formula1.api_key));
        let weather_requester = Arc::new(OwmRequester::new(&config.open_weather_map.api_key));

        // Create the telegram notifier
        let client = TelegramClient::new(&config.telegram.bot_token);
        let notifier = Arc::new(TelegramNotifier::new(
            client,
            &config.telegram.channel_id,
            &config.resources.circuit_images,
        ));

        let tracker = SessionAlertTracker::new(
            Arc::clone(&f1_requester),
            weather_requester,
            Arc::clone(&notifier),
            config.alerts.schedule_lead_ms,
            config.alerts.session_lead_ms,
            config.alerts.standings_delay_ms,
        );

        let schedule = Schedule::from_str(&config.alerts.cron)?;

        Ok(Bot {
            f1_requester,
            notifier,
            tracker,
            schedule,
            cron_expression: config.alerts.cron,
        })
    }

    /// Starts the bot and begins polling the Formula 1 upstreams.
    ///
    /// This method consumes `self` and runs indefinitely. On every firing
    /// of the configured cron schedule it fetches the upstream snapshots
    /// and evaluates the alerts for the tracked race weekend.
    ///
    /// # Lifecycle
    ///
    /// This method runs forever and only terminates if the process
    /// receives a termination signal (SIGINT, SIGTERM).
    pub async fn start(mut self) {
        info!(
            "polling the formula 1 upstreams on cron schedule {}",
            self.cron_expression
        );

        loop {
            let Some(next) = self.schedule.upcoming(Utc).next() else {
                error!(
                    "cron schedule {} has no upcoming firings, stopping",
                    self.cron_expression
                );
                return;
            };

            let delay = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            debug!("next poll at {}", next);
            time::sleep(delay).await;

            self.run_poll().await;
        }
    }

    /// Runs a single poll cycle.
    ///
    /// Fetches the event tracker state and the live timing session info
    /// concurrently and hands both to the tracker. A failed fetch is
    /// logged and its half of the evaluation skipped; the tracker keeps
    /// its state and the next poll retries.
    async fn run_poll(&mut self) {
        let (event, session) = tokio::join!(
            self.f1_requester.get_event_info(),
            self.f1_requester.get_current_session_info(),
        );

        let event = match event {
            Ok(event) => Some(event),
            Err(err) => {
                error!("failed to fetch the event tracker state: {}", err);
                None
            }
        };
        let session = match session {
            Ok(session) => Some(session),
            Err(err) => {
                error!("failed to fetch the live timing session info: {}", err);
                None
            }
        };

        let f1_requester = Arc::clone(&self.f1_requester);
        let notifier = Arc::clone(&self.notifier);
        self.tracker
            .tick(event.as_ref(), session.as_ref(), move || {
                Self::publish_standings(f1_requester, notifier);
            })
            .await;
    }

    /// Fetches and publishes the championship standings.
    ///
    /// Invoked by the tracker once the deferred standings update becomes
    /// due after a race. Spawns its own task so the tracker never waits on
    /// the standings fetch.
    fn publish_standings(f1_requester: Arc<Formula1Requester>, notifier: Arc<TelegramNotifier>) {
        tokio::spawn(async move {
            info!("fetching championship standings");
            let (drivers, constructors) = tokio::join!(
                f1_requester.get_driver_standings(),
                f1_requester.get_constructor_standings(),
            );

            let (drivers, constructors) = match (drivers, constructors) {
                (Ok(drivers), Ok(constructors)) => (drivers, constructors),
                (Err(err), _) | (_, Err(err)) => {
                    error!("failed to fetch the championship standings: {}", err);
                    return;
                }
            };

            if let Err(err) = notifier.send_standings_update(drivers, constructors).await {
                error!("failed to deliver the standings update: {}", err);
            }
        });
    }
}
