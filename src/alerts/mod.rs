//! Alert decision logic for Formula 1 race weekends.
//!
//! This module decides which channel alerts to send from the polled
//! upstream snapshots. The system consists of two main components:
//!
//! - [`Weekend`] and its per session state: what was already announced
//!   for the currently tracked race weekend
//! - [`SessionAlertTracker`]: evaluates fresh snapshots against that
//!   state and sends the alerts that became due
//!
//! # Architecture
//!
//! The tracker keeps the state of a single weekend at a time and rebuilds
//! it whenever the event tracker starts reporting a different meeting.
//! Alerts are idempotent across polls: every schedule alert, session
//! start alert and results alert of a weekend fires at most once, in
//! session order, no matter how often the same upstream data is observed.
//!
//! # Example Usage
//!
//! ```no_run
//! # use f1_alerts_bot::alerts::SessionAlertTracker;
//! # use f1_alerts_bot::f1::{EventSnapshot, Formula1Api, SessionSnapshot};
//! # use f1_alerts_bot::telegram::Notifier;
//! # use f1_alerts_bot::weather::WeatherApi;
//! # use std::sync::Arc;
//! # async fn example<F: Formula1Api, W: WeatherApi, N: Notifier>(
//! #     f1_api: Arc<F>,
//! #     weather_api: Arc<W>,
//! #     notifier: Arc<N>,
//! #     event: EventSnapshot,
//! # ) {
//! // One hour schedule window, 15 minute session start window, one
//! // hour standings update delay.
//! let mut tracker =
//!     SessionAlertTracker::new(f1_api, weather_api, notifier, 3_600_000, 900_000, 3_600_000);
//!
//! // Evaluate one poll; the session snapshot fetch failed this time.
//! tracker.tick(Some(&event), None, || {}).await;
//! # }
//! ```

mod tracker;
mod weekend;

pub use crate::alerts::tracker::SessionAlertTracker;
pub use crate::alerts::weekend::{SessionAlertStatus, Weekend, WeekendState};
