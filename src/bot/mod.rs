//! Telegram delivery shell
//!
//! A thin transport around the synthesis pipeline: photos come in over
//! the Bot API, textures and status messages go back out. All user-facing
//! prose lives here; the core never formats messages.

/// Minimal Telegram Bot API client and payload types
pub mod api;
/// Long-poll update loop and message routing
pub mod delivery;

pub use api::BotClient;
pub use delivery::DeliveryShell;
