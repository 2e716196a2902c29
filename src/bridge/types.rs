//! User and init data records supplied by the host.

use serde::{Deserialize, Serialize};

/// A Telegram user as delivered in `initDataUnsafe.user`.
///
/// Every field is optional so that partial or guest payloads can be
/// represented. Absent fields are skipped when serialized and fields not
/// listed here are kept in `extra`, so a host payload stays identical
/// field-for-field after a round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bot: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Handle without the leading `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_write_to_pm: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// Fields the host sent that are not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    /// Returns the username if it is present and non-empty.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }
}

/// The fixed identity shown whenever no real host identity is available.
#[must_use]
pub fn mock_user() -> UserRecord {
    UserRecord {
        id: Some(123_456_789),
        is_bot: Some(false),
        first_name: Some("Ahmet".to_owned()),
        last_name: Some("Yılmaz".to_owned()),
        username: Some("ahmetyilmaz".to_owned()),
        language_code: Some("tr".to_owned()),
        ..UserRecord::default()
    }
}

/// Parsed, unverified launch data (`initDataUnsafe`).
///
/// `hash` is carried as received and never checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_instance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_param: Option<String>,

    /// Unix timestamp (seconds) at which the launch data was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_date: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}
