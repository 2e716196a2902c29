//! User Info Mini App - Main Entry Point
//!
//! Renders the profile card in a terminal. Pass a host environment file to
//! emulate running inside a Telegram client; without one the app behaves as
//! if opened in a plain browser.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Select;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use user_info_mini_app::bridge::{HostBridge, HostEnvironment, JsonHostBridge};
use user_info_mini_app::config::AppSettings;
use user_info_mini_app::resolver::{MissingUserPolicy, ProfileSession, ResolvedState};
use user_info_mini_app::view::{
    ActionOutcome, ProfileView, open_profile, render_outcome, render_view, send_id,
};

/// Telegram Mini App showing the current user's profile.
#[derive(Parser, Debug)]
#[command(name = "user_info_app")]
#[command(about = "Show the Telegram user profile, or a mock user outside Telegram")]
#[command(version)]
struct Args {
    /// Host environment JSON file emulating the Telegram client.
    #[arg(long)]
    host: Option<String>,

    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Show an anonymous card instead of the mock user when the host sends no user.
    #[arg(long)]
    anonymous_when_missing: bool,

    /// Offer the card actions in an interactive menu.
    #[arg(short, long)]
    interactive: bool,

    /// Generate an example host environment file at the specified path and exit.
    #[arg(long)]
    generate_host: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    if let Some(output_path) = &args.generate_host {
        return generate_example_host(output_path);
    }

    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let settings = AppSettings::from_env().context("Failed to load settings from environment")?;

    let policy = if args.anonymous_when_missing {
        MissingUserPolicy::Anonymous
    } else {
        settings.missing_user_policy
    };

    let host_path = args
        .host
        .clone()
        .or_else(|| settings.host_env_path.as_ref().map(|p| p.display().to_string()));

    let host = host_path.and_then(|path| match JsonHostBridge::from_file(&path) {
        Ok(bridge) => {
            info!("Using host environment: {}", path);
            Some(bridge)
        }
        Err(e) => {
            warn!("Host environment unavailable ({}): {}", path, e);
            None
        }
    });
    let bridge = host.as_ref().map(|b| b as &dyn HostBridge);

    let mut stdout = io::stdout().lock();
    let mut session = ProfileSession::new(policy);

    render_view(&mut stdout, &ProfileView::build(session.state(), &settings.avatar_base_url))?;
    let state = session.initialize(bridge).clone();
    writeln!(stdout)?;
    render_view(&mut stdout, &ProfileView::build(&state, &settings.avatar_base_url))?;
    stdout.flush()?;

    if args.interactive {
        run_menu(&mut stdout, &state, host.as_ref())?;
    }

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Generates an example host environment file.
fn generate_example_host(output_path: &str) -> Result<()> {
    HostEnvironment::example()
        .save_to_file(output_path)
        .context("Failed to write example host environment")?;

    println!("✓ Example host environment written to: {output_path}");
    println!("\nTo use it:");
    println!("1. Edit the user under initDataUnsafe (or paste a raw initData string)");
    println!("2. Disable capabilities to see the fallbacks");
    println!("3. Run: user_info_app --host {output_path} --interactive");

    Ok(())
}

/// Offers the card actions until the user quits.
fn run_menu(
    out: &mut impl Write,
    state: &ResolvedState,
    host: Option<&JsonHostBridge>,
) -> Result<()> {
    const ITEMS: [&str; 4] = ["Profili Aç", "ID Gönder (Örnek)", "MainButton'a bas", "Çıkış"];
    let bridge = host.map(|b| b as &dyn HostBridge);

    loop {
        let choice = Select::new()
            .with_prompt("İşlem seçin")
            .items(&ITEMS)
            .default(0)
            .interact()
            .context("Failed to read menu selection")?;

        let outcome = match choice {
            0 => open_profile(state, bridge),
            1 => send_id(bridge),
            2 => match host.and_then(JsonHostBridge::click_main_button) {
                Some(message) => ActionOutcome::Alert(message),
                None => {
                    writeln!(out, "MainButton görünmüyor.")?;
                    continue;
                }
            },
            _ => break,
        };

        render_outcome(out, &outcome)?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_host_takes_path() {
        let args = Args::try_parse_from(["user_info_app", "--generate-host", "mine.json"]).unwrap();
        assert_eq!(args.generate_host.as_deref(), Some("mine.json"));

        let args = Args::try_parse_from(["user_info_app"]).unwrap();
        assert!(args.generate_host.is_none());
    }

    #[test]
    fn test_generate_example_host_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.json");
        let path = path.to_str().unwrap();

        generate_example_host(path).unwrap();
        assert_eq!(
            HostEnvironment::load_from_file(path).unwrap(),
            HostEnvironment::example()
        );
    }
}
