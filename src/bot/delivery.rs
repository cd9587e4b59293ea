//! Long-poll update loop and message routing
//!
//! Receives photos, drives the synthesis pipeline, and relays results and
//! status updates back to the sender. Failures inside a single update are
//! reported to the user and logged; only update-transport failures end
//! the loop.

use crate::bot::api::{BotClient, Message, Update};
use crate::fetch::adapter::ImageFetchAdapter;
use crate::fetch::http::HttpClient;
use crate::io::error::{Result, TextureError, bot_api_error};
use crate::synthesis::pipeline::{BlendConfig, TextureMetadata, TextureSynthesizer};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Onboarding text sent for `/start`
pub const WELCOME_TEXT: &str = "Welcome!\n\n\
    I turn photos of surfaces into seamless (tileable) textures.\n\n\
    How to use:\n\
    1. Photograph a surface (wall, wood, fabric)\n\
    2. Send the photo, uncompressed if possible\n\
    3. Receive a square PNG texture\n\n\
    Tips for best results:\n\
    - shoot close to and parallel to the surface\n\
    - even lighting, no hard shadows\n\
    - avoid perspective distortion\n\n\
    Just send me a photo!";

/// Short usage text sent for `/help`
pub const HELP_TEXT: &str = "Send a photo of any surface and I will turn it \
    into a texture for 3D graphics or games.\n\nUse /start for a full introduction.";

/// Liveness text sent for `/status`
pub const STATUS_TEXT: &str =
    "Up and running. Send a photo; processing usually takes under a minute.";

/// Nudge sent for plain text messages
pub const PROMPT_TEXT: &str = "Send me a photo of a surface to get a tileable texture!";

/// What the shell should do with an incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind<'a> {
    /// `/start` onboarding request
    Start,
    /// `/help` request
    Help,
    /// `/status` request
    Status,
    /// Photo or image document to process, with its file identifier
    Photo(&'a str),
    /// Any other text, answered with a usage prompt
    Chatter,
    /// Nothing actionable (stickers, non-image documents, ...)
    Ignore,
}

/// Classify an incoming message into a shell action
///
/// Photos use the highest-resolution variant (the last entry the API
/// sends). Documents count only when their MIME type marks them as images,
/// so users can bypass photo compression by attaching the file directly.
pub fn classify(message: &Message) -> MessageKind<'_> {
    if let Some(photo) = message.photo.last() {
        return MessageKind::Photo(&photo.file_id);
    }
    if let Some(document) = &message.document {
        if document
            .mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("image/"))
        {
            return MessageKind::Photo(&document.file_id);
        }
        return MessageKind::Ignore;
    }
    match message.text.as_deref() {
        Some("/start") => MessageKind::Start,
        Some("/help") => MessageKind::Help,
        Some("/status") => MessageKind::Status,
        Some(text) if !text.starts_with('/') => MessageKind::Chatter,
        _ => MessageKind::Ignore,
    }
}

/// User-facing failure prose with remediation hints
///
/// The only place pipeline errors are turned into chat text.
pub fn failure_text(error: &TextureError) -> String {
    format!(
        "Processing failed: {error}\n\n\
        Possible causes:\n\
        - the image is too large\n\
        - the format is not supported\n\
        - the download was interrupted\n\n\
        Try a smaller image, or send the photo as a file."
    )
}

/// Caption attached to a delivered texture document
pub fn caption_text(metadata: &TextureMetadata) -> String {
    format!("Your texture is ready\n\n{metadata}")
}

/// Output filename stamped with the current Unix time
pub fn texture_filename() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    format!("texture_{seconds}.png")
}

/// Long-poll delivery shell relaying photos in and textures out
pub struct DeliveryShell<C: HttpClient> {
    api: BotClient,
    fetcher: ImageFetchAdapter<C>,
    synthesizer: TextureSynthesizer,
    poll_timeout_secs: u64,
    next_offset: i64,
}

impl<C: HttpClient> DeliveryShell<C> {
    /// Create a shell after validating the pipeline configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::InvalidConfiguration`] for invalid
    /// pipeline parameters.
    pub fn new(
        api: BotClient,
        fetcher: ImageFetchAdapter<C>,
        config: BlendConfig,
        poll_timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            api,
            fetcher,
            synthesizer: TextureSynthesizer::new(config)?,
            poll_timeout_secs,
            next_offset: 0,
        })
    }

    /// Poll for updates until the transport fails
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::BotApi`] when `getUpdates` fails;
    /// failures while handling a single update never end the loop.
    pub fn run(&mut self) -> Result<()> {
        info!("delivery shell started");
        loop {
            let updates = self
                .api
                .get_updates(self.next_offset, self.poll_timeout_secs)?;
            for update in updates {
                self.next_offset = self.next_offset.max(update.update_id + 1);
                self.handle_update(&update);
            }
        }
    }

    fn handle_update(&self, update: &Update) {
        let Some(message) = &update.message else {
            return;
        };
        let outcome = match classify(message) {
            MessageKind::Start => self.reply(message, WELCOME_TEXT),
            MessageKind::Help => self.reply(message, HELP_TEXT),
            MessageKind::Status => self.reply(message, STATUS_TEXT),
            MessageKind::Photo(file_id) => self.process_photo(message, file_id),
            MessageKind::Chatter => self.reply(message, PROMPT_TEXT),
            MessageKind::Ignore => Ok(()),
        };
        if let Err(error) = outcome {
            warn!(%error, update_id = update.update_id, "update handling failed");
        }
    }

    fn reply(&self, message: &Message, text: &str) -> Result<()> {
        self.api.send_message(message.chat.id, text, None).map(|_| ())
    }

    fn process_photo(&self, message: &Message, file_id: &str) -> Result<()> {
        info!(chat = message.chat.id, "processing incoming photo");
        let status = self.api.send_message(
            message.chat.id,
            "Photo received. Processing...",
            Some(message.message_id),
        )?;

        match self.deliver_texture(message, file_id, status.message_id) {
            Ok(()) => self.api.edit_message_text(
                message.chat.id,
                status.message_id,
                "Done. Texture delivered.",
            ),
            Err(error) => {
                warn!(%error, chat = message.chat.id, "texture synthesis failed");
                self.api.edit_message_text(
                    message.chat.id,
                    status.message_id,
                    &failure_text(&error),
                )
            }
        }
    }

    fn deliver_texture(&self, message: &Message, file_id: &str, status_id: i64) -> Result<()> {
        self.api
            .edit_message_text(message.chat.id, status_id, "Downloading image...")?;

        let file = self.api.get_file(file_id)?;
        let file_path = file
            .file_path
            .ok_or_else(|| bot_api_error("getFile", &"response carried no file path"))?;
        let source = self.fetcher.fetch_raster(&self.api.file_url(&file_path))?;

        self.api
            .edit_message_text(message.chat.id, status_id, "Synthesizing texture...")?;
        let result = self.synthesizer.synthesize(&source)?;
        info!(bytes = result.bytes.len(), "texture encoded");

        let caption = caption_text(&result.metadata);
        self.api.send_document(
            message.chat.id,
            &texture_filename(),
            result.bytes,
            &caption,
            Some(message.message_id),
        )
    }
}
