//! Observability wiring.
//!
//! Installs a `tracing-subscriber` fmt layer on stderr so stdout carries only
//! the report. `RUST_LOG` takes precedence over the level chosen from flags
//! and config. Log lines go through the spinner's writer (see
//! [`crate::progress::SpinnerProgress::log_writer`]) so they never land in the
//! middle of a spinner frame.

use anyhow::{anyhow, Context};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Default filter when neither flags, config, nor `RUST_LOG` choose one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Maps `-q` / `-v` flags and the configured level to a filter directive.
pub fn level_for(quiet: bool, verbose: u8, configured: Option<&str>) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.unwrap_or(DEFAULT_LEVEL).to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if `level` is not a valid filter directive or a subscriber is
/// already installed.
pub fn init<W>(level: &str, json: bool, writer: W) -> anyhow::Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{level}'"))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!(e).context("Failed to install log subscriber"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(level_for(true, 3, Some("debug")), "error");
    }

    #[test]
    fn verbosity_steps_up_from_configured_level() {
        assert_eq!(level_for(false, 0, None), DEFAULT_LEVEL);
        assert_eq!(level_for(false, 0, Some("counter=debug")), "counter=debug");
        assert_eq!(level_for(false, 1, Some("error")), "info");
        assert_eq!(level_for(false, 2, None), "debug");
        assert_eq!(level_for(false, 7, None), "trace");
    }
}
