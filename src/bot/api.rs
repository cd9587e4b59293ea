//! Minimal Telegram Bot API client
//!
//! Only the surface the delivery shell needs: long-poll updates, text
//! messages, message edits, file resolution, and document upload. Every
//! call checks the API envelope and surfaces the server's description on
//! failure.

use crate::io::configuration::HTTP_TIMEOUT_SECS;
use crate::io::error::{Result, bot_api_error};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// Incoming update delivered by `getUpdates`
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonically increasing update identifier
    pub update_id: i64,
    /// New incoming message, when the update carries one
    #[serde(default)]
    pub message: Option<Message>,
}

/// Chat message
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier, unique within the chat
    pub message_id: i64,
    /// Chat the message belongs to
    pub chat: Chat,
    /// Text content, for text messages
    #[serde(default)]
    pub text: Option<String>,
    /// Available photo resolutions, smallest first
    #[serde(default)]
    pub photo: Vec<PhotoSize>,
    /// Attached file, for messages sent as documents
    #[serde(default)]
    pub document: Option<Document>,
}

/// Chat descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Unique chat identifier
    pub id: i64,
}

/// One resolution of an incoming photo
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    /// File identifier usable with `getFile`
    pub file_id: String,
    /// Photo width in pixels
    pub width: i64,
    /// Photo height in pixels
    pub height: i64,
}

/// File attached as a document
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// File identifier usable with `getFile`
    pub file_id: String,
    /// MIME type reported by the sender
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// File metadata resolved via `getFile`
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramFile {
    /// Relative path on the file download host
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

/// Blocking client for the Telegram Bot API
#[derive(Debug, Clone)]
pub struct BotClient {
    http: reqwest::blocking::Client,
    token: String,
}

impl BotClient {
    /// Create a client whose HTTP timeout accommodates long polling
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::BotApi`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(token: String, poll_timeout_secs: u64) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| bot_api_error("client", &format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, token })
    }

    /// URL for downloading a file path returned by `getFile`
    pub fn file_url(&self, file_path: &str) -> String {
        format!("https://api.telegram.org/file/bot{}/{file_path}", self.token)
    }

    fn method_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{method}", self.token)
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        payload: &serde_json::Value,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(payload)
            .send()
            .map_err(|e| bot_api_error(method, &format!("request failed: {e}")))?;

        let envelope: Envelope<T> = response
            .json()
            .map_err(|e| bot_api_error(method, &format!("malformed response: {e}")))?;

        if !envelope.ok {
            let reason = envelope
                .description
                .unwrap_or_else(|| "no description".to_string());
            return Err(bot_api_error(method, &reason));
        }
        envelope
            .result
            .ok_or_else(|| bot_api_error(method, &"response carried no result"))
    }

    /// Fetch updates after `offset`, long-polling up to `timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::BotApi`] on transport or API failure.
    pub fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message"],
            }),
        )
    }

    /// Send a text message, optionally as a reply
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::BotApi`] on transport or API failure.
    pub fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<Message> {
        let mut payload = json!({ "chat_id": chat_id, "text": text });
        if let (Some(message_id), Some(map)) = (reply_to, payload.as_object_mut()) {
            map.insert("reply_to_message_id".to_string(), json!(message_id));
        }
        self.call("sendMessage", &payload)
    }

    /// Replace the text of a previously sent message
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::BotApi`] on transport or API failure.
    pub fn edit_message_text(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        self.call::<serde_json::Value>(
            "editMessageText",
            &json!({ "chat_id": chat_id, "message_id": message_id, "text": text }),
        )
        .map(|_| ())
    }

    /// Resolve a file identifier into a download path
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::BotApi`] on transport or API failure.
    pub fn get_file(&self, file_id: &str) -> Result<TelegramFile> {
        self.call("getFile", &json!({ "file_id": file_id }))
    }

    /// Upload a document with a caption, optionally as a reply
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::BotApi`] on transport or API failure,
    /// or when the attachment cannot be assembled.
    pub fn send_document(
        &self,
        chat_id: i64,
        filename: &str,
        bytes: Vec<u8>,
        caption: &str,
        reply_to: Option<i64>,
    ) -> Result<()> {
        let part = reqwest::blocking::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("image/png")
            .map_err(|e| bot_api_error("sendDocument", &format!("invalid attachment: {e}")))?;

        let mut form = reqwest::blocking::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("document", part);
        if let Some(message_id) = reply_to {
            form = form.text("reply_to_message_id", message_id.to_string());
        }

        let response = self
            .http
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .map_err(|e| bot_api_error("sendDocument", &format!("request failed: {e}")))?;

        let envelope: Envelope<serde_json::Value> = response
            .json()
            .map_err(|e| bot_api_error("sendDocument", &format!("malformed response: {e}")))?;
        if envelope.ok {
            Ok(())
        } else {
            let reason = envelope
                .description
                .unwrap_or_else(|| "no description".to_string());
            Err(bot_api_error("sendDocument", &reason))
        }
    }
}
