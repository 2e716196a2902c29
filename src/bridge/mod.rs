//! Host bridge module.
//!
//! Models the API surface the Telegram client injects into a Mini App
//! (`window.Telegram.WebApp`) as an injectable capability, so the rest of
//! the crate never reads process-wide state.

mod host;
mod init_data;
mod json_host;
mod types;

pub use host::{Capability, HostBridge, HostBridgeError, MainButtonHandler};
pub use init_data::parse_init_data;
pub use json_host::{HostCallLog, HostCapabilities, HostEnvironment, HostReport, JsonHostBridge};
pub use types::{InitData, UserRecord, mock_user};

/// Base URL for opening a user profile by username.
pub const PROFILE_LINK_BASE: &str = "https://t.me";

/// Builds the fully-qualified profile link for a username.
#[must_use]
pub fn profile_link(username: &str) -> String {
    format!("{PROFILE_LINK_BASE}/{username}")
}
