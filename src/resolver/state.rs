//! Resolved view state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bridge::UserRecord;

/// Where the displayed user record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSource {
    /// Read from the host launch data.
    Host,
    /// The built-in mock identity.
    Mock,
    /// No record at all.
    None,
}

/// What to show when the host is present but sends no user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingUserPolicy {
    /// Substitute the mock identity.
    #[default]
    Mock,
    /// Keep the session hosted but anonymous.
    Anonymous,
}

impl FromStr for MissingUserPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "anonymous" | "anon" => Ok(Self::Anonymous),
            other => Err(format!("unknown missing-user policy: {other}")),
        }
    }
}

impl fmt::Display for MissingUserPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => f.write_str("mock"),
            Self::Anonymous => f.write_str("anonymous"),
        }
    }
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedState {
    is_hosted: bool,
    user: Option<UserRecord>,
    source: UserSource,
    ready: bool,
    platform: Option<String>,
    auth_date: Option<DateTime<Utc>>,
}

impl ResolvedState {
    /// State before resolution has run.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            is_hosted: false,
            user: None,
            source: UserSource::None,
            ready: false,
            platform: None,
            auth_date: None,
        }
    }

    pub(crate) fn completed(
        is_hosted: bool,
        user: Option<UserRecord>,
        source: UserSource,
        platform: Option<String>,
        auth_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            is_hosted,
            user,
            source,
            ready: true,
            platform,
            auth_date,
        }
    }

    /// Whether a host bridge was detected.
    #[must_use]
    pub const fn is_hosted(&self) -> bool {
        self.is_hosted
    }

    /// The record to display, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    /// Where the record came from.
    #[must_use]
    pub const fn source(&self) -> UserSource {
        self.source
    }

    /// Whether resolution has completed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Host platform, when hosted and reported.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// When the host issued the launch data.
    #[must_use]
    pub const fn auth_date(&self) -> Option<DateTime<Utc>> {
        self.auth_date
    }
}

impl Default for ResolvedState {
    fn default() -> Self {
        Self::pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_state() {
        let state = ResolvedState::pending();
        assert!(!state.is_ready());
        assert!(!state.is_hosted());
        assert!(state.user().is_none());
        assert_eq!(state.source(), UserSource::None);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("mock".parse::<MissingUserPolicy>(), Ok(MissingUserPolicy::Mock));
        assert_eq!(" Anonymous ".parse::<MissingUserPolicy>(), Ok(MissingUserPolicy::Anonymous));
        assert!("guest".parse::<MissingUserPolicy>().is_err());
        assert_eq!(MissingUserPolicy::default().to_string(), "mock");
    }
}
