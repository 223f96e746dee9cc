//! Channel notification delivery.
//!
//! This module defines the [`Notifier`] trait consumed by the alert
//! tracking logic and its Telegram implementation, which renders the
//! alert templates and delivers them to the configured channel.

use anyhow::Result;
use log::warn;
use mockall::automock;
use std::path::PathBuf;

use crate::alerts::Weekend;
use crate::circuits::lookup_circuit;
use crate::f1::{ConstructorStanding, DriverStanding, SessionResults, TimetableEntry};
use crate::telegram::client::TelegramClient;
use crate::telegram::templates;
use crate::weather::SessionWeather;

/// Trait for delivering weekend alerts to a channel.
///
/// This trait abstracts the delivery so the alert tracking logic can be
/// tested with mocks.
#[automock]
pub trait Notifier {
    /// Announces an upcoming session, some time before it starts.
    async fn send_schedule_alert(&self, entry: &TimetableEntry, weekend: &Weekend) -> Result<()>;
    /// Announces a session about to start, with the circuit weather when
    /// available.
    async fn send_session_alert(
        &self,
        entry: &TimetableEntry,
        weekend: &Weekend,
        weather: Option<SessionWeather>,
    ) -> Result<()>;
    /// Publishes the final classification of a completed session.
    async fn send_results_alert(&self, results: &SessionResults) -> Result<()>;
    /// Publishes the championship standings after a race weekend.
    async fn send_standings_update(
        &self,
        drivers: Vec<DriverStanding>,
        constructors: Vec<ConstructorStanding>,
    ) -> Result<()>;
    /// Sends the circuit layout photo of a weekend.
    async fn send_circuit_photo(&self, weekend: &Weekend) -> Result<()>;
}

/// [`Notifier`] delivering alerts to a Telegram channel.
pub struct TelegramNotifier {
    /// Telegram Bot API client.
    client: TelegramClient,
    /// Target channel of all alerts.
    channel_id: String,
    /// Directory holding the circuit layout images.
    circuit_images_dir: PathBuf,
}

impl TelegramNotifier {
    /// Create a new [TelegramNotifier].
    ///
    /// # Arguments
    ///
    /// * `client` - The Telegram Bot API client to deliver with.
    /// * `channel_id` - The target chat or channel, e.g. `@f1alerts`.
    /// * `circuit_images_dir` - Directory holding the circuit layout images.
    pub fn new(client: TelegramClient, channel_id: &str, circuit_images_dir: &str) -> Self {
        TelegramNotifier {
            client,
            channel_id: channel_id.to_string(),
            circuit_images_dir: PathBuf::from(circuit_images_dir),
        }
    }
}

impl Notifier for TelegramNotifier {
    async fn send_schedule_alert(&self, entry: &TimetableEntry, weekend: &Weekend) -> Result<()> {
        let message = templates::incoming_session_message(entry, weekend);
        self.client.send_message(&self.channel_id, &message).await
    }

    async fn send_session_alert(
        &self,
        entry: &TimetableEntry,
        weekend: &Weekend,
        weather: Option<SessionWeather>,
    ) -> Result<()> {
        let message = templates::session_starting_message(entry, weekend, weather.as_ref());
        self.client.send_message(&self.channel_id, &message).await
    }

    /// Delivers the results as two messages: the bilingual header first,
    /// then the preformatted classification table.
    async fn send_results_alert(&self, results: &SessionResults) -> Result<()> {
        let data = &results.free.data;

        self.client
            .send_message(&self.channel_id, &templates::results_header_message(data))
            .await?;
        self.client
            .send_message(&self.channel_id, &templates::results_table_message(data))
            .await
    }

    async fn send_standings_update(
        &self,
        drivers: Vec<DriverStanding>,
        constructors: Vec<ConstructorStanding>,
    ) -> Result<()> {
        let message = templates::standings_update_message(&drivers, &constructors);
        self.client.send_message(&self.channel_id, &message).await
    }

    /// Sends the circuit layout photo of the weekend.
    ///
    /// The photo is best effort: weekends without circuit data or with a
    /// missing image file are skipped without error.
    async fn send_circuit_photo(&self, weekend: &Weekend) -> Result<()> {
        let Some(circuit) = lookup_circuit(&weekend.country) else {
            warn!("no circuit data for {}, skipping layout photo", weekend.country);
            return Ok(());
        };

        let path = self.circuit_images_dir.join(circuit.layout_image);
        let photo = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(
                    "cannot read circuit layout image {}: {}",
                    path.display(),
                    err
                );
                return Ok(());
            }
        };

        self.client
            .send_photo(
                &self.channel_id,
                &templates::circuit_photo_caption(weekend),
                photo,
                circuit.layout_image,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_weekend(country: &str) -> Weekend {
        Weekend {
            official_name: "FORMULA 1 MAGYAR NAGYDIJ 2026".to_string(),
            country: country.to_string(),
            locality: "Budapest".to_string(),
        }
    }

    fn create_test_notifier(api_url: &str, images_dir: &str) -> TelegramNotifier {
        TelegramNotifier::new(
            TelegramClient::with_api_url("test-token", api_url),
            "@channel",
            images_dir,
        )
    }

    #[tokio::test]
    async fn test_send_schedule_alert() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/bottest-token/sendMessage")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "result": {}}"#)
            .create_async()
            .await;

        let entry = TimetableEntry {
            state: "upcoming".to_string(),
            session: "q".to_string(),
            description: "Qualifying".to_string(),
            start_time: "2026-07-18T15:00:00".to_string(),
            gmt_offset: "+02:00".to_string(),
        };

        let notifier = create_test_notifier(&server.url(), "./resources/circuits");
        notifier
            .send_schedule_alert(&entry, &create_test_weekend("Hungary"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_results_alert_sends_header_and_table() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/bottest-token/sendMessage")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "result": {}}"#)
            .expect(2)
            .create_async()
            .await;

        let results: SessionResults = serde_json::from_str(
            r#"{"free": {"data": {"R": "Hungarian Grand Prix", "S": "Race", "L": 70,
                "DR": [{"F": ["44", "L. HAMILTON", "Mercedes", 1, "1:36:12.473"]}]}}}"#,
        )
        .unwrap();

        let notifier = create_test_notifier(&server.url(), "./resources/circuits");
        notifier.send_results_alert(&results).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_circuit_photo() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/bottest-token/sendPhoto")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "result": {}}"#)
            .create_async()
            .await;

        let images_dir = tempfile::tempdir().unwrap();
        std::fs::write(images_dir.path().join("hungary.png"), b"png bytes").unwrap();

        let notifier =
            create_test_notifier(&server.url(), images_dir.path().to_str().unwrap());
        notifier
            .send_circuit_photo(&create_test_weekend("Hungary"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_circuit_photo_without_circuit_data() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/bottest-token/sendPhoto")
            .expect(0)
            .create_async()
            .await;

        let notifier = create_test_notifier(&server.url(), "./resources/circuits");
        notifier
            .send_circuit_photo(&create_test_weekend("Atlantis"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_circuit_photo_with_missing_image_file() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/bottest-token/sendPhoto")
            .expect(0)
            .create_async()
            .await;

        let images_dir = tempfile::tempdir().unwrap();

        let notifier =
            create_test_notifier(&server.url(), images_dir.path().to_str().unwrap());
        notifier
            .send_circuit_photo(&create_test_weekend("Hungary"))
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
