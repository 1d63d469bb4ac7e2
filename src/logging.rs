//! Structured logging setup using the `tracing` ecosystem.
//!
//! The alert action logs on two independent channels:
//!
//! - the event channel ([`EVENT_TARGET`]), holding the start, success and
//!   failure events an operator reads in `splunkd.log`;
//! - the debug channel ([`DEBUG_TARGET`]), holding a verbose trace of the
//!   payload, the extracted settings and every field comparison. It is
//!   silent unless `--debug` is given.
//!
//! Output goes to stdout as JSON (non-TTY, the Splunk case) or pretty
//! text (TTY), and can be forced via `--json` or `--pretty`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogLevel;

pub const EVENT_TARGET: &str = "discord_alert_action";
pub const DEBUG_TARGET: &str = "discord_alert_action::debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[must_use]
pub fn resolve_format(pretty: bool, json: bool) -> LogFormat {
    if json {
        LogFormat::Json
    } else if pretty || std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Per-target filter: `level` for everything, the debug channel on its own switch.
#[must_use]
pub fn filter(level: &LogLevel, debug: bool) -> Targets {
    let debug_level = if debug {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };
    Targets::new()
        .with_default(level.to_tracing_level())
        .with_target(DEBUG_TARGET, debug_level)
}

pub fn init(level: &LogLevel, debug: bool, format: LogFormat) {
    let filter = filter(level, debug);

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        // The target tells the event channel from the debug channel.
        LogFormat::Json => {
            registry.with(fmt::layer().json()).init();
        }
        LogFormat::Pretty => {
            registry.with(fmt::layer().pretty()).init();
        }
    }
}
