//! Telegram channel delivery.
//!
//! This module renders the bilingual alert messages and delivers them to
//! the configured Telegram channel through the Bot API.
//!
//! # Modules
//!
//! - `client` - HTTP client for the Telegram Bot API
//! - `notifier` - The [`Notifier`] delivery trait and its Telegram implementation
//! - `templates` - HTML message templates for the channel alerts
//! - `translate` - Spanish translations for alert messages

mod client;
mod notifier;
pub mod templates;
mod translate;

pub use crate::telegram::client::TelegramClient;
#[cfg(test)]
pub use crate::telegram::notifier::MockNotifier;
pub use crate::telegram::notifier::{Notifier, TelegramNotifier};
