//! Host bridge backed by a JSON host environment file.
//!
//! Outside of a Telegram client there is nothing to inject the bridge, so
//! the terminal front end reads an environment file describing what the
//! client would provide and records the calls made against it.

use std::cell::RefCell;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::host::{Capability, HostBridge, HostBridgeError, MainButtonHandler};
use super::init_data::parse_init_data;
use super::types::{InitData, UserRecord};

/// Which optional operations the emulated host exposes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostCapabilities {
    #[serde(default = "enabled")]
    pub ready: bool,

    #[serde(default = "enabled")]
    pub open_telegram_link: bool,

    #[serde(default = "enabled")]
    pub main_button: bool,
}

const fn enabled() -> bool {
    true
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            ready: true,
            open_telegram_link: true,
            main_button: true,
        }
    }
}

impl HostCapabilities {
    /// Whether the given capability is enabled.
    #[must_use]
    pub const fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Ready => self.ready,
            Capability::OpenTelegramLink => self.open_telegram_link,
            Capability::MainButton => self.main_button,
        }
    }
}

/// Contents of a host environment file, mirroring `Telegram.WebApp`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostEnvironment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Raw, signed launch string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_data: Option<String>,

    /// Already-parsed launch data. Takes precedence over `init_data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_data_unsafe: Option<InitData>,

    #[serde(default)]
    pub capabilities: HostCapabilities,
}

impl HostEnvironment {
    /// Loads a host environment from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, HostBridgeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let env: Self = serde_json::from_str(&content)?;
        debug!("Loaded host environment from {}", path.display());
        Ok(env)
    }

    /// Saves the host environment to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), HostBridgeError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the launch data the host would expose as `initDataUnsafe`.
    ///
    /// Falls back to parsing the raw `initData` string, the way the host
    /// script derives one from the other.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw string is malformed.
    pub fn resolved_init_data(&self) -> Result<Option<InitData>, HostBridgeError> {
        if let Some(data) = &self.init_data_unsafe {
            return Ok(Some(data.clone()));
        }

        match self.init_data.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_init_data(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Creates an example environment for a desktop client.
    #[must_use]
    pub fn example() -> Self {
        Self {
            platform: Some("tdesktop".to_owned()),
            version: Some("7.10".to_owned()),
            init_data: None,
            init_data_unsafe: Some(InitData {
                query_id: Some("AAHdF6IQAAAAAN0XohDhrOrc".to_owned()),
                user: Some(UserRecord {
                    id: Some(987_654_321),
                    is_bot: Some(false),
                    first_name: Some("Zeynep".to_owned()),
                    last_name: Some("Kaya".to_owned()),
                    username: Some("zeynepkaya".to_owned()),
                    language_code: Some("tr".to_owned()),
                    photo_url: Some("https://t.me/i/userpic/320/zeynepkaya.jpg".to_owned()),
                    ..UserRecord::default()
                }),
                auth_date: Some(1_735_689_600),
                ..InitData::default()
            }),
            capabilities: HostCapabilities::default(),
        }
    }
}

/// Findings from [`HostEnvironment::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl HostReport {
    /// Whether the environment can be used as-is.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl HostEnvironment {
    /// Checks the environment for problems the app would silently absorb.
    #[must_use]
    pub fn validate(&self) -> HostReport {
        let mut report = HostReport::default();

        if self.init_data.is_some() && self.init_data_unsafe.is_some() {
            report
                .warnings
                .push("Both initData and initDataUnsafe are set; initDataUnsafe wins".to_owned());
        }

        match self.resolved_init_data() {
            Err(e) => report.errors.push(e.to_string()),
            Ok(None) => report
                .warnings
                .push("No launch data; the app will show the mock user".to_owned()),
            Ok(Some(data)) => match data.user {
                None => report
                    .warnings
                    .push("Launch data has no user; the app will show the mock user".to_owned()),
                Some(user) => {
                    if user.id.is_none() {
                        report.errors.push("User has no id".to_owned());
                    }
                    if user.username().is_none() {
                        report
                            .warnings
                            .push("User has no username; profile links are unavailable".to_owned());
                    }
                }
            },
        }

        for capability in Capability::ALL {
            if !self.capabilities.has(capability) {
                report.warnings.push(format!("Capability disabled: {capability}"));
            }
        }

        report
    }
}

/// Calls observed by a [`JsonHostBridge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostCallLog {
    pub ready_calls: usize,
    pub opened_links: Vec<String>,
    pub main_button_text: Option<String>,
    pub main_button_visible: bool,
}

/// Host bridge emulated from a [`HostEnvironment`].
pub struct JsonHostBridge {
    env: HostEnvironment,
    calls: RefCell<HostCallLog>,
    main_button_handler: RefCell<Option<MainButtonHandler>>,
}

impl JsonHostBridge {
    /// Wraps a host environment.
    #[must_use]
    pub fn new(env: HostEnvironment) -> Self {
        Self {
            env,
            calls: RefCell::new(HostCallLog::default()),
            main_button_handler: RefCell::new(None),
        }
    }

    /// Loads the environment file and wraps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HostBridgeError> {
        HostEnvironment::load_from_file(path).map(Self::new)
    }

    /// The underlying environment.
    #[must_use]
    pub const fn environment(&self) -> &HostEnvironment {
        &self.env
    }

    /// Snapshot of the calls made so far.
    #[must_use]
    pub fn calls(&self) -> HostCallLog {
        self.calls.borrow().clone()
    }

    /// Simulates the user pressing the main button.
    ///
    /// Returns the handler's alert message, or `None` if the button is
    /// hidden or has no handler.
    pub fn click_main_button(&self) -> Option<String> {
        if !self.calls.borrow().main_button_visible {
            return None;
        }
        self.main_button_handler.borrow().as_ref().map(|handler| handler())
    }

    fn require(&self, capability: Capability) -> Result<(), HostBridgeError> {
        if self.env.capabilities.has(capability) {
            Ok(())
        } else {
            Err(HostBridgeError::Unsupported(capability))
        }
    }
}

impl HostBridge for JsonHostBridge {
    fn platform(&self) -> Option<&str> {
        self.env.platform.as_deref()
    }

    fn supports(&self, capability: Capability) -> bool {
        self.env.capabilities.has(capability)
    }

    fn ready(&self) -> Result<(), HostBridgeError> {
        self.require(Capability::Ready)?;
        self.calls.borrow_mut().ready_calls += 1;
        info!("Host notified: ready");
        Ok(())
    }

    fn init_data_unsafe(&self) -> Result<Option<InitData>, HostBridgeError> {
        self.env.resolved_init_data()
    }

    fn open_telegram_link(&self, url: &str) -> Result<(), HostBridgeError> {
        self.require(Capability::OpenTelegramLink)?;
        info!("Host opening link: {}", url);
        self.calls.borrow_mut().opened_links.push(url.to_owned());
        Ok(())
    }

    fn main_button_set_text(&self, text: &str) -> Result<(), HostBridgeError> {
        self.require(Capability::MainButton)?;
        self.calls.borrow_mut().main_button_text = Some(text.to_owned());
        Ok(())
    }

    fn main_button_show(&self) -> Result<(), HostBridgeError> {
        self.require(Capability::MainButton)?;
        self.calls.borrow_mut().main_button_visible = true;
        Ok(())
    }

    fn main_button_on_click(&self, handler: MainButtonHandler) -> Result<(), HostBridgeError> {
        self.require(Capability::MainButton)?;
        *self.main_button_handler.borrow_mut() = Some(handler);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.json");

        let env = HostEnvironment::example();
        env.save_to_file(&path).unwrap();

        let loaded = HostEnvironment::load_from_file(&path).unwrap();
        assert_eq!(loaded, env);
    }

    #[test]
    fn test_capabilities_default_to_enabled() {
        let env: HostEnvironment = serde_json::from_str(r#"{"platform": "android"}"#).unwrap();
        assert_eq!(env.capabilities, HostCapabilities::default());

        let env: HostEnvironment =
            serde_json::from_str(r#"{"capabilities": {"mainButton": false}}"#).unwrap();
        assert!(env.capabilities.ready);
        assert!(!env.capabilities.main_button);
    }

    #[test]
    fn test_init_data_falls_back_to_raw_string() {
        let env = HostEnvironment {
            init_data: Some("user=%7B%22id%22%3A5%7D&auth_date=10".to_owned()),
            ..HostEnvironment::default()
        };
        let data = env.resolved_init_data().unwrap().unwrap();
        assert_eq!(data.user.unwrap().id, Some(5));
        assert_eq!(data.auth_date, Some(10));
    }

    #[test]
    fn test_init_data_absent() {
        let env = HostEnvironment {
            init_data: Some("   ".to_owned()),
            ..HostEnvironment::default()
        };
        assert!(env.resolved_init_data().unwrap().is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let err = HostEnvironment::load_from_file("/nonexistent/host.json").unwrap_err();
        assert!(matches!(err, HostBridgeError::Io(_)));
    }

    #[test]
    fn test_validate_example() {
        let report = HostEnvironment::example().validate();
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_validate_user_without_id() {
        let env = HostEnvironment {
            init_data: Some("user=%7B%22first_name%22%3A%22Can%22%7D".to_owned()),
            ..HostEnvironment::default()
        };
        let report = env.validate();
        assert_eq!(report.errors, vec!["User has no id".to_owned()]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_validate_malformed_and_disabled() {
        let env = HostEnvironment {
            init_data: Some("auth_date=soon".to_owned()),
            capabilities: HostCapabilities {
                ready: false,
                ..HostCapabilities::default()
            },
            ..HostEnvironment::default()
        };
        let report = env.validate();
        assert!(!report.is_valid());
        assert!(report.warnings.contains(&"Capability disabled: ready".to_owned()));
    }

    #[test]
    fn test_bridge_records_calls() {
        let bridge = JsonHostBridge::new(HostEnvironment::example());
        bridge.ready().unwrap();
        bridge.open_telegram_link("https://t.me/zeynepkaya").unwrap();

        let calls = bridge.calls();
        assert_eq!(calls.ready_calls, 1);
        assert_eq!(calls.opened_links, vec!["https://t.me/zeynepkaya".to_owned()]);
    }

    #[test]
    fn test_unsupported_capability_errors() {
        let env = HostEnvironment {
            capabilities: HostCapabilities {
                ready: false,
                open_telegram_link: false,
                main_button: false,
            },
            ..HostEnvironment::default()
        };
        let bridge = JsonHostBridge::new(env);

        assert!(!bridge.supports(Capability::Ready));
        assert!(matches!(
            bridge.main_button_show(),
            Err(HostBridgeError::Unsupported(Capability::MainButton))
        ));
        assert!(bridge.calls().opened_links.is_empty());
    }

    #[test]
    fn test_main_button_click() {
        let bridge = JsonHostBridge::new(HostEnvironment::example());
        bridge
            .main_button_on_click(Box::new(|| "clicked".to_owned()))
            .unwrap();
        assert_eq!(bridge.click_main_button(), None);

        bridge.main_button_show().unwrap();
        assert_eq!(bridge.click_main_button().as_deref(), Some("clicked"));
    }
}
