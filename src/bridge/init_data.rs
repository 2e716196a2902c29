//! Parsing of the raw `initData` launch string.
//!
//! The host passes launch data as an URL-encoded query string whose `user`
//! entry is a JSON document. The signature is not verified here.

use url::form_urlencoded;

use super::host::HostBridgeError;
use super::types::{InitData, UserRecord};

/// Parses a raw `initData` query string into its unverified form.
///
/// Unknown keys are ignored. An empty string yields empty init data.
///
/// # Errors
///
/// Returns [`HostBridgeError::MalformedInitData`] if `user` is not valid
/// JSON or `auth_date` is not an integer.
pub fn parse_init_data(raw: &str) -> Result<InitData, HostBridgeError> {
    let mut data = InitData::default();

    for (key, value) in form_urlencoded::parse(raw.trim().as_bytes()) {
        match key.as_ref() {
            "user" => {
                let user: UserRecord = serde_json::from_str(&value)
                    .map_err(|e| HostBridgeError::MalformedInitData(format!("user: {e}")))?;
                data.user = Some(user);
            }
            "auth_date" => {
                let secs = value.parse().map_err(|_| {
                    HostBridgeError::MalformedInitData(format!("auth_date: {value}"))
                })?;
                data.auth_date = Some(secs);
            }
            "query_id" => data.query_id = Some(value.into_owned()),
            "chat_type" => data.chat_type = Some(value.into_owned()),
            "chat_instance" => data.chat_instance = Some(value.into_owned()),
            "start_param" => data.start_param = Some(value.into_owned()),
            "hash" => data.hash = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok(data)
}
