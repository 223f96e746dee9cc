//! HTTP client for the Telegram Bot API.
//!
//! This module provides the [`TelegramClient`] struct for delivering
//! messages and photos to a Telegram channel.

use anyhow::{Result, bail};
use log::{debug, info};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;

/// Base URL of the Telegram Bot API.
const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Response envelope of every Telegram Bot API method.
///
/// Failed requests come back with `ok` set to `false` and a human readable
/// description, also on non 2xx status codes, so responses are parsed
/// without checking the status first.
#[derive(Deserialize, Debug)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// HTTP client for delivering messages through the Telegram Bot API.
pub struct TelegramClient {
    /// API base url.
    api_url: String,
    /// Bot token, part of every request path.
    bot_token: String,
    /// HTTP client
    client: Client,
}

impl TelegramClient {
    /// Create a new [TelegramClient].
    ///
    /// # Arguments
    ///
    /// * `bot_token` - The token of the bot, as issued by BotFather.
    pub fn new(bot_token: &str) -> Self {
        TelegramClient {
            api_url: TELEGRAM_API_URL.to_string(),
            bot_token: bot_token.to_string(),
            client: Client::new(),
        }
    }

    #[cfg(test)]
    pub fn with_api_url(bot_token: &str, api_url: &str) -> Self {
        TelegramClient {
            api_url: api_url.to_string(),
            bot_token: bot_token.to_string(),
            client: Client::new(),
        }
    }

    /// Request `sendMessage` to deliver an HTML formatted message.
    ///
    /// # Arguments
    ///
    /// * `chat_id` - The target chat or channel, e.g. `@f1alerts`.
    /// * `html` - The message body, using Telegram HTML formatting.
    pub async fn send_message(&self, chat_id: &str, html: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", &self.api_url, &self.bot_token);
        info!("send message to {}", chat_id);
        debug!("message body: {}", html);

        let response: ApiResponse = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": chat_id,
                "text": html,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            }))
            .send()
            .await?
            .json()
            .await?;

        Self::ensure_delivered(response)
    }

    /// Request `sendPhoto` to deliver a photo with an HTML formatted caption.
    ///
    /// # Arguments
    ///
    /// * `chat_id` - The target chat or channel.
    /// * `caption` - The photo caption, using Telegram HTML formatting.
    /// * `photo` - The PNG image bytes.
    /// * `file_name` - The file name reported for the upload.
    pub async fn send_photo(
        &self,
        chat_id: &str,
        caption: &str,
        photo: Vec<u8>,
        file_name: &str,
    ) -> Result<()> {
        let url = format!("{}/bot{}/sendPhoto", &self.api_url, &self.bot_token);
        info!("send photo {} to {}", file_name, chat_id);

        let part = Part::bytes(photo)
            .file_name(file_name.to_string())
            .mime_str(mime::IMAGE_PNG.as_ref())?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .text("parse_mode", "HTML".to_string())
            .part("photo", part);

        let response: ApiResponse = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        Self::ensure_delivered(response)
    }

    /// Turn a rejected API response into an error.
    fn ensure_delivered(response: ApiResponse) -> Result<()> {
        if !response.ok {
            bail!(
                "telegram api rejected the request: {}",
                response
                    .description
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_message() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/bottest-token/sendMessage")
            .match_body(mockito::Matcher::PartialJson(json!({
                "chat_id": "@channel",
                "text": "<b>hello</b>",
                "parse_mode": "HTML",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "result": {}}"#)
            .create_async()
            .await;

        let client = TelegramClient::with_api_url("test-token", &server.url());
        client
            .send_message("@channel", "<b>hello</b>")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_message_rejected() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/bottest-token/sendMessage")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error_code": 400, "description": "Bad Request: message is too long"}"#)
            .create_async()
            .await;

        let client = TelegramClient::with_api_url("test-token", &server.url());
        let error = client
            .send_message("@channel", "<b>hello</b>")
            .await
            .unwrap_err();

        assert!(error.to_string().contains("message is too long"));
    }

    #[tokio::test]
    async fn test_send_photo() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/bottest-token/sendPhoto")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "result": {}}"#)
            .create_async()
            .await;

        let client = TelegramClient::with_api_url("test-token", &server.url());
        client
            .send_photo("@channel", "caption", vec![1, 2, 3], "hungary.png")
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
