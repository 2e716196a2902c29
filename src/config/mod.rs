//! Configuration module for the mini app.
//!
//! Settings come from environment variables (optionally loaded from a
//! `.env` file by the binaries) with defaults for everything.

mod settings;

pub use settings::{AppSettings, ConfigError};

/// Identicon service used when a user has no photo.
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://avatars.dicebear.com/api/identicon";
