//! Tracing subscriber initialisation.
//!
//! Only the CLI crate calls [`init_logging`]. `popcat-core` and
//! `popcat-adapters` only emit spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
/// Returns an error if a subscriber was already registered in this process.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);

    // RUST_LOG wins; otherwise every popcat crate gets the same level.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn filter_directive(level: &str) -> String {
    format!("popcat={level},popcat_core={level},popcat_adapters={level}")
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
