//! Profile card view model.

use chrono::{DateTime, Utc};

use crate::resolver::ResolvedState;

const LOADING: &str = "Yükleniyor...";
const NO_USERNAME: &str = "Kullanıcı adı yok";
const UNKNOWN_LANGUAGE: &str = "bilinmiyor";
const GUEST_AVATAR_KEY: &str = "guest";

const HOSTED_NOTE: &str =
    "Uygulama Telegram içinde açıldı — bilgiler Telegram tarafından sağlandı.";
const BROWSER_NOTE: &str = "Tarayıcıda açıldı — bu yüzden örnek (mock) kullanıcı gösteriliyor. \
     Gerçek kullanım için Telegram içinden açın.";

/// Label of the open-profile action.
pub const OPEN_PROFILE_LABEL: &str = "Profili Aç";

/// Label of the send-id action.
pub const SEND_ID_LABEL: &str = "ID Gönder (Örnek)";

/// Display-ready card contents with every field defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub display_name: String,
    /// `@username`, or `None` when the placeholder should be shown.
    pub handle: Option<String>,
    pub id: String,
    pub language: String,
    pub avatar_url: String,
    pub note: &'static str,
    pub platform: Option<String>,
    pub auth_date: Option<DateTime<Utc>>,
}

impl ProfileCard {
    /// The handle line as displayed.
    #[must_use]
    pub fn handle_line(&self) -> &str {
        self.handle.as_deref().unwrap_or(NO_USERNAME)
    }
}

/// What the screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    /// Resolution has not completed yet.
    Loading,
    /// The resolved profile card.
    Card(ProfileCard),
}

impl ProfileView {
    /// Builds the view for a state.
    ///
    /// `avatar_base` is the identicon service used when no photo is set.
    #[must_use]
    pub fn build(state: &ResolvedState, avatar_base: &str) -> Self {
        if !state.is_ready() {
            return Self::Loading;
        }

        let user = state.user();
        let display_name = format!(
            "{} {}",
            user.and_then(|u| u.first_name.as_deref()).unwrap_or_default(),
            user.and_then(|u| u.last_name.as_deref()).unwrap_or_default()
        );

        let handle = user.and_then(|u| u.username()).map(|u| format!("@{u}"));

        let id = user
            .and_then(|u| u.id)
            .map(|id| id.to_string())
            .unwrap_or_default();

        let language = user
            .and_then(|u| u.language_code.clone())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_owned());

        let avatar_url = user
            .and_then(|u| u.photo_url.clone())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| identicon_url(avatar_base, user.and_then(|u| u.id)));

        let note = if state.is_hosted() {
            HOSTED_NOTE
        } else {
            BROWSER_NOTE
        };

        Self::Card(ProfileCard {
            display_name,
            handle,
            id,
            language,
            avatar_url,
            note,
            platform: state.platform().map(str::to_owned),
            auth_date: state.auth_date(),
        })
    }

    /// Loading placeholder text.
    #[must_use]
    pub const fn loading_text() -> &'static str {
        LOADING
    }
}

/// Generated avatar keyed by user id, or `guest` without one.
#[must_use]
pub fn identicon_url(base: &str, id: Option<i64>) -> String {
    let key = id
        .filter(|&id| id != 0)
        .map_or_else(|| GUEST_AVATAR_KEY.to_owned(), |id| id.to_string());
    format!("{}/{key}.svg", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{InitData, UserRecord};
    use crate::config::DEFAULT_AVATAR_BASE_URL;
    use crate::resolver::{MissingUserPolicy, resolve};

    fn card(view: ProfileView) -> ProfileCard {
        match view {
            ProfileView::Card(card) => card,
            ProfileView::Loading => panic!("expected a card"),
        }
    }

    #[test]
    fn test_loading_before_ready() {
        let view = ProfileView::build(&ResolvedState::pending(), DEFAULT_AVATAR_BASE_URL);
        assert_eq!(view, ProfileView::Loading);
        assert_eq!(ProfileView::loading_text(), "Yükleniyor...");
    }

    #[test]
    fn test_mock_card() {
        let state = resolve(None, MissingUserPolicy::Mock);
        let card = card(ProfileView::build(&state, DEFAULT_AVATAR_BASE_URL));

        assert_eq!(card.display_name, "Ahmet Yılmaz");
        assert_eq!(card.handle_line(), "@ahmetyilmaz");
        assert_eq!(card.id, "123456789");
        assert_eq!(card.language, "tr");
        assert_eq!(
            card.avatar_url,
            "https://avatars.dicebear.com/api/identicon/123456789.svg"
        );
        assert!(card.note.starts_with("Tarayıcıda açıldı"));
    }

    #[test]
    fn test_anonymous_card_defaults() {
        let env = crate::bridge::HostEnvironment {
            init_data_unsafe: Some(InitData::default()),
            ..crate::bridge::HostEnvironment::default()
        };
        let bridge = crate::bridge::JsonHostBridge::new(env);
        let state = resolve(Some(&bridge), MissingUserPolicy::Anonymous);
        let card = card(ProfileView::build(&state, DEFAULT_AVATAR_BASE_URL));

        assert_eq!(card.display_name, " ");
        assert_eq!(card.handle_line(), "Kullanıcı adı yok");
        assert_eq!(card.id, "");
        assert_eq!(card.language, "bilinmiyor");
        assert_eq!(
            card.avatar_url,
            "https://avatars.dicebear.com/api/identicon/guest.svg"
        );
        assert!(card.note.starts_with("Uygulama Telegram içinde"));
    }

    #[test]
    fn test_photo_url_preferred() {
        let env = crate::bridge::HostEnvironment::example();
        let bridge = crate::bridge::JsonHostBridge::new(env);
        let state = resolve(Some(&bridge), MissingUserPolicy::Mock);
        let card = card(ProfileView::build(&state, DEFAULT_AVATAR_BASE_URL));

        assert_eq!(card.avatar_url, "https://t.me/i/userpic/320/zeynepkaya.jpg");
        assert_eq!(card.platform.as_deref(), Some("tdesktop"));
        assert!(card.auth_date.is_some());
    }

    #[test]
    fn test_identicon_url() {
        assert_eq!(identicon_url("https://example.com/id/", Some(5)), "https://example.com/id/5.svg");
        assert_eq!(identicon_url("https://example.com/id", None), "https://example.com/id/guest.svg");
        assert_eq!(identicon_url("https://example.com/id", Some(0)), "https://example.com/id/guest.svg");
    }

    #[test]
    fn test_missing_last_name() {
        let user = UserRecord {
            first_name: Some("Can".to_owned()),
            ..UserRecord::default()
        };
        let env = crate::bridge::HostEnvironment {
            init_data_unsafe: Some(InitData {
                user: Some(user),
                ..InitData::default()
            }),
            ..crate::bridge::HostEnvironment::default()
        };
        let bridge = crate::bridge::JsonHostBridge::new(env);
        let state = resolve(Some(&bridge), MissingUserPolicy::Mock);
        let card = card(ProfileView::build(&state, DEFAULT_AVATAR_BASE_URL));

        assert_eq!(card.display_name, "Can ");
    }
}
