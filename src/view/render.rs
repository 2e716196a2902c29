//! Terminal rendering of the card and action outcomes.

use std::io::{self, Write};

use crossterm::style::Stylize;
use qrcode::QrCode;
use qrcode::render::unicode;
use tracing::warn;

use super::actions::{ActionOutcome, messages};
use super::profile::{OPEN_PROFILE_LABEL, ProfileCard, ProfileView, SEND_ID_LABEL};

const INFO_TITLE: &str = "Bilgi";

/// Writes the profile screen.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_view(out: &mut impl Write, view: &ProfileView) -> io::Result<()> {
    match view {
        ProfileView::Loading => writeln!(out, "{}", ProfileView::loading_text().dim()),
        ProfileView::Card(card) => render_card(out, card),
    }
}

fn render_card(out: &mut impl Write, card: &ProfileCard) -> io::Result<()> {
    writeln!(out, "{}", card.display_name.as_str().bold())?;
    match &card.handle {
        Some(handle) => writeln!(out, "{}", handle.as_str().cyan())?,
        None => writeln!(out, "{}", card.handle_line().italic())?,
    }
    writeln!(out, "ID: {}", card.id)?;
    writeln!(out, "Dil: {}", card.language)?;
    writeln!(out, "Avatar: {}", card.avatar_url.as_str().underlined())?;

    if let Some(platform) = &card.platform {
        writeln!(out, "Platform: {platform}")?;
    }
    if let Some(auth_date) = card.auth_date {
        writeln!(out, "Oturum: {}", auth_date.format("%Y-%m-%d %H:%M UTC"))?;
    }

    writeln!(out)?;
    writeln!(out, "[{OPEN_PROFILE_LABEL}]  [{SEND_ID_LABEL}]")?;
    writeln!(out)?;
    writeln!(out, "{}", INFO_TITLE.bold())?;
    writeln!(out, "{}", card.note)
}

/// Writes the result of an action.
///
/// Links meant for a new browsing context are printed together with a QR
/// code so they can be opened on a phone.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_outcome(out: &mut impl Write, outcome: &ActionOutcome) -> io::Result<()> {
    match outcome {
        ActionOutcome::Alert(message) => writeln!(out, "{} {}", "⚠".yellow(), message),
        ActionOutcome::OpenedInHost(url) => {
            writeln!(out, "{} Telegram içinde açıldı: {}", "✓".green(), url)
        }
        ActionOutcome::OpenNewContext(url) => {
            writeln!(out, "{} Yeni sekmede açın: {}", "→".green(), url.as_str().underlined())?;
            match link_qr(url) {
                Some(qr) => writeln!(out, "{qr}"),
                None => Ok(()),
            }
        }
        ActionOutcome::MainButtonArmed => writeln!(
            out,
            "{} MainButton gösterildi: {}",
            "✓".green(),
            messages::MAIN_BUTTON_TEXT
        ),
    }
}

fn link_qr(url: &str) -> Option<String> {
    match QrCode::new(url.as_bytes()) {
        Ok(code) => Some(
            code.render::<unicode::Dense1x2>()
                .dark_color(unicode::Dense1x2::Light)
                .light_color(unicode::Dense1x2::Dark)
                .quiet_zone(true)
                .build(),
        ),
        Err(e) => {
            warn!("Failed to build QR code for {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_AVATAR_BASE_URL;
    use crate::resolver::{MissingUserPolicy, ResolvedState, resolve};

    fn rendered(view: &ProfileView) -> String {
        let mut buf = Vec::new();
        render_view(&mut buf, view).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_render_loading() {
        let view = ProfileView::build(&ResolvedState::pending(), DEFAULT_AVATAR_BASE_URL);
        assert!(rendered(&view).contains("Yükleniyor..."));
    }

    #[test]
    fn test_render_mock_card() {
        let state = resolve(None, MissingUserPolicy::Mock);
        let text = rendered(&ProfileView::build(&state, DEFAULT_AVATAR_BASE_URL));

        assert!(text.contains("Ahmet Yılmaz"));
        assert!(text.contains("@ahmetyilmaz"));
        assert!(text.contains("ID: 123456789"));
        assert!(text.contains("Dil: tr"));
        assert!(text.contains("identicon/123456789.svg"));
        assert!(text.contains("Profili Aç"));
        assert!(text.contains("Tarayıcıda açıldı"));
        assert!(!text.contains("Platform:"));
    }

    #[test]
    fn test_render_alert() {
        let mut buf = Vec::new();
        render_outcome(&mut buf, &ActionOutcome::Alert("Kullanıcı adı yok.".to_owned())).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("Kullanıcı adı yok."));
    }

    #[test]
    fn test_render_new_context_includes_qr() {
        let mut buf = Vec::new();
        let outcome = ActionOutcome::OpenNewContext("https://t.me/ahmetyilmaz".to_owned());
        render_outcome(&mut buf, &outcome).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("https://t.me/ahmetyilmaz"));
        assert!(text.lines().count() > 10);
    }
}
