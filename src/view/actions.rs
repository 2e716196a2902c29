//! Card actions: open the profile and arm the host main button.

use tracing::{debug, error};

use crate::bridge::{Capability, HostBridge, HostBridgeError, profile_link};
use crate::resolver::ResolvedState;

/// Fixed alert texts.
pub mod messages {
    pub const HOSTED_NO_USERNAME: &str = "Bu kullanıcının kullanıcı adı yok.";
    pub const NO_USERNAME: &str = "Kullanıcı adı yok.";
    pub const LINK_FAILED: &str = "Telegram bağlantısı açılamadı.";
    pub const MAIN_BUTTON_TEXT: &str = "Kullanıcı ID Gönder";
    pub const MAIN_BUTTON_CLICKED: &str = "MainButton tıklandı. Sunucuya gönderme eklemeniz gerekir.";
    pub const MAIN_BUTTON_UNAVAILABLE: &str = "Telegram MainButton kullanılamadı.";
    pub const TELEGRAM_ONLY: &str = "Sadece Telegram içinde kullanılabilir.";
}

/// Result of a user-triggered action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The host opened the link itself.
    OpenedInHost(String),
    /// The link should be opened in a new browsing context.
    OpenNewContext(String),
    /// The host main button is labelled, shown and has a handler.
    MainButtonArmed,
    /// A blocking informational alert.
    Alert(String),
}

impl ActionOutcome {
    fn alert(message: &str) -> Self {
        Self::Alert(message.to_owned())
    }
}

/// Opens the displayed user's `t.me` profile.
///
/// Inside Telegram the host navigates; otherwise the link is returned for a
/// new browsing context. Without a username only an alert is produced.
#[must_use]
pub fn open_profile(state: &ResolvedState, bridge: Option<&dyn HostBridge>) -> ActionOutcome {
    let username = state.user().and_then(|u| u.username());

    match bridge.filter(|_| state.is_hosted()) {
        Some(bridge) => {
            let Some(username) = username else {
                return ActionOutcome::alert(messages::HOSTED_NO_USERNAME);
            };
            let url = profile_link(username);
            match bridge.open_telegram_link(&url) {
                Ok(()) => ActionOutcome::OpenedInHost(url),
                Err(e) => {
                    error!("Failed to open {} in host: {}", url, e);
                    ActionOutcome::alert(messages::LINK_FAILED)
                }
            }
        }
        None => username.map_or_else(
            || ActionOutcome::alert(messages::NO_USERNAME),
            |username| ActionOutcome::OpenNewContext(profile_link(username)),
        ),
    }
}

/// Labels, shows and arms the host main button.
#[must_use]
pub fn send_id(bridge: Option<&dyn HostBridge>) -> ActionOutcome {
    let Some(bridge) = bridge else {
        return ActionOutcome::alert(messages::TELEGRAM_ONLY);
    };

    match arm_main_button(bridge) {
        Ok(()) => {
            debug!("Main button armed");
            ActionOutcome::MainButtonArmed
        }
        Err(e) => {
            error!("{}", e);
            ActionOutcome::alert(messages::MAIN_BUTTON_UNAVAILABLE)
        }
    }
}

fn arm_main_button(bridge: &dyn HostBridge) -> Result<(), HostBridgeError> {
    if !bridge.supports(Capability::MainButton) {
        return Err(HostBridgeError::Unsupported(Capability::MainButton));
    }
    bridge.main_button_set_text(messages::MAIN_BUTTON_TEXT)?;
    bridge.main_button_show()?;
    bridge.main_button_on_click(Box::new(|| messages::MAIN_BUTTON_CLICKED.to_owned()))
}
