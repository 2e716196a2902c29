//! Standalone validator for host environment files.
//!
//! Checks that a host environment file parses, shows what the app would
//! resolve from it, and reports problems the app would otherwise absorb
//! by falling back to the mock user.

use std::process::ExitCode;

use clap::Parser;

use user_info_mini_app::bridge::{Capability, HostEnvironment, JsonHostBridge};
use user_info_mini_app::resolver::{MissingUserPolicy, UserSource, resolve};

/// Host environment validator.
#[derive(Parser, Debug)]
#[command(name = "validate_host")]
#[command(about = "Validates host environment files for the Telegram user info mini app")]
#[command(version)]
struct Args {
    /// Path to the host environment JSON file to validate.
    #[arg(short, long, default_value = "host.json")]
    file: String,

    /// Generate an example host environment at the specified path.
    #[arg(long)]
    generate_example: Option<String>,

    /// Show the resolved user and capabilities.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(output_path) = args.generate_example {
        return generate_example(&output_path);
    }

    validate_host(&args.file, args.verbose)
}

fn generate_example(output_path: &str) -> ExitCode {
    match HostEnvironment::example().save_to_file(output_path) {
        Ok(()) => {
            println!("✓ Example host environment written to: {output_path}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Failed to write example file: {e}");
            ExitCode::FAILURE
        }
    }
}

fn validate_host(path: &str, verbose: bool) -> ExitCode {
    println!("Validating: {path}");

    let env = match HostEnvironment::load_from_file(path) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("✗ Failed to load host environment: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Platform: {} (version {})\n",
        env.platform.as_deref().unwrap_or("unknown"),
        env.version.as_deref().unwrap_or("unknown")
    );

    let report = env.validate();

    if verbose {
        for capability in Capability::ALL {
            let mark = if env.capabilities.has(capability) { "✓" } else { "✗" };
            println!("  {mark} {capability}");
        }

        let bridge = JsonHostBridge::new(env);
        let state = resolve(Some(&bridge), MissingUserPolicy::Mock);
        let source = match state.source() {
            UserSource::Host => "host",
            UserSource::Mock => "mock",
            UserSource::None => "none",
        };
        if let Some(user) = state.user() {
            println!(
                "\nResolved user ({source}): id={:?} username={:?} language={:?}",
                user.id, user.username, user.language_code
            );
        }
        println!();
    }

    for warning in &report.warnings {
        println!("  ⚠ Warning: {warning}");
    }
    for error in &report.errors {
        println!("  ✗ Error: {error}");
    }

    if report.is_valid() {
        println!("✓ Host environment is valid!");
        if !report.warnings.is_empty() {
            println!("  ({} warning(s))", report.warnings.len());
        }
        ExitCode::SUCCESS
    } else {
        println!("✗ Validation failed: {} error(s)", report.errors.len());
        ExitCode::FAILURE
    }
}
