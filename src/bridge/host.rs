//! The host bridge capability and its errors.

use std::fmt;

use thiserror::Error;

use super::types::InitData;

/// Handler attached to the host main button. Returns the message to alert.
pub type MainButtonHandler = Box<dyn Fn() -> String>;

/// Optional operations a host bridge may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `ready()` notification.
    Ready,
    /// `openTelegramLink(url)` navigation.
    OpenTelegramLink,
    /// `MainButton` controls.
    MainButton,
}

impl Capability {
    /// All known capabilities.
    pub const ALL: [Self; 3] = [Self::Ready, Self::OpenTelegramLink, Self::MainButton];

    /// Name of the capability as the host script spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::OpenTelegramLink => "openTelegramLink",
            Self::MainButton => "MainButton",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while probing or calling the host bridge.
#[derive(Debug, Error)]
pub enum HostBridgeError {
    #[error("Host does not support {0}")]
    Unsupported(Capability),

    #[error("Malformed init data: {0}")]
    MalformedInitData(String),

    #[error("Failed to read host environment: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse host environment: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Host call failed: {0}")]
    Host(String),
}

/// API surface of the embedding Telegram client.
///
/// Implementations are injected into the resolver and the view actions;
/// "not running inside Telegram" is expressed by passing no bridge at all.
pub trait HostBridge {
    /// Client platform identifier (`ios`, `android`, `tdesktop`, ...).
    fn platform(&self) -> Option<&str> {
        None
    }

    /// Whether the host exposes the given optional operation.
    fn supports(&self, capability: Capability) -> bool;

    /// Tells the host the app is ready to be displayed.
    fn ready(&self) -> Result<(), HostBridgeError>;

    /// Reads the unverified launch data, if the host provided any.
    fn init_data_unsafe(&self) -> Result<Option<InitData>, HostBridgeError>;

    /// Opens a `t.me` link inside the Telegram client.
    fn open_telegram_link(&self, url: &str) -> Result<(), HostBridgeError>;

    /// Sets the label of the host main button.
    fn main_button_set_text(&self, text: &str) -> Result<(), HostBridgeError>;

    /// Shows the host main button.
    fn main_button_show(&self) -> Result<(), HostBridgeError>;

    /// Registers a click handler on the host main button.
    fn main_button_on_click(&self, handler: MainButtonHandler) -> Result<(), HostBridgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names() {
        assert_eq!(Capability::Ready.to_string(), "ready");
        assert_eq!(Capability::OpenTelegramLink.to_string(), "openTelegramLink");
        assert_eq!(Capability::MainButton.to_string(), "MainButton");
    }

    #[test]
    fn test_unsupported_error_message() {
        let err = HostBridgeError::Unsupported(Capability::MainButton);
        assert_eq!(err.to_string(), "Host does not support MainButton");
    }
}
