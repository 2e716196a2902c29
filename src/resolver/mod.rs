//! Host detection and user resolution.
//!
//! Decides, once per view lifecycle, whether the app runs inside a
//! Telegram client and which user record to display. Failures never
//! escape: every error path ends in the mock identity.

mod state;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

pub use state::{MissingUserPolicy, ResolvedState, UserSource};

use crate::bridge::{Capability, HostBridge, HostBridgeError, InitData, mock_user};

/// Resolves the user record from an optional host bridge.
///
/// Without a bridge the state is not hosted and shows the mock user. With a
/// bridge, the host is signalled `ready` (when supported) and the launch
/// data user is taken verbatim. Bridge errors keep `is_hosted` and fall
/// back to the mock user. The returned state is always ready.
#[must_use]
pub fn resolve(bridge: Option<&dyn HostBridge>, policy: MissingUserPolicy) -> ResolvedState {
    let Some(bridge) = bridge else {
        debug!("No host bridge detected, using mock user");
        return ResolvedState::completed(false, Some(mock_user()), UserSource::Mock, None, None);
    };

    let platform = bridge.platform().map(str::to_owned);

    match read_launch_data(bridge) {
        Ok(data) => {
            let auth_date = data
                .as_ref()
                .and_then(|d| d.auth_date)
                .and_then(|secs| DateTime::from_timestamp(secs, 0));

            match data.and_then(|d| d.user) {
                Some(user) => {
                    info!("Resolved host user (id: {:?})", user.id);
                    ResolvedState::completed(true, Some(user), UserSource::Host, platform, auth_date)
                }
                None => resolve_missing_user(policy, platform, auth_date),
            }
        }
        Err(e) => {
            warn!("Telegram WebApp error: {}", e);
            ResolvedState::completed(true, Some(mock_user()), UserSource::Mock, platform, None)
        }
    }
}

fn read_launch_data(bridge: &dyn HostBridge) -> Result<Option<InitData>, HostBridgeError> {
    if bridge.supports(Capability::Ready) {
        bridge.ready()?;
    }
    bridge.init_data_unsafe()
}

fn resolve_missing_user(
    policy: MissingUserPolicy,
    platform: Option<String>,
    auth_date: Option<DateTime<Utc>>,
) -> ResolvedState {
    match policy {
        MissingUserPolicy::Mock => {
            warn!("Host sent no user, substituting mock user");
            ResolvedState::completed(true, Some(mock_user()), UserSource::Mock, platform, auth_date)
        }
        MissingUserPolicy::Anonymous => {
            info!("Host sent no user, showing anonymous session");
            ResolvedState::completed(true, None, UserSource::None, platform, auth_date)
        }
    }
}

/// One view lifecycle: resolves at most once.
#[derive(Debug, Default)]
pub struct ProfileSession {
    policy: MissingUserPolicy,
    state: ResolvedState,
}

impl ProfileSession {
    /// Creates an uninitialized session.
    #[must_use]
    pub fn new(policy: MissingUserPolicy) -> Self {
        Self {
            policy,
            state: ResolvedState::pending(),
        }
    }

    /// Resolves the state on the first call; later calls are no-ops.
    pub fn initialize(&mut self, bridge: Option<&dyn HostBridge>) -> &ResolvedState {
        if self.state.is_ready() {
            debug!("Session already initialized");
        } else {
            self.state = resolve(bridge, self.policy);
        }
        &self.state
    }

    /// Current state (pending until initialized).
    #[must_use]
    pub const fn state(&self) -> &ResolvedState {
        &self.state
    }
}
