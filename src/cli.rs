//! Command-line interface definitions using clap derive macros.
//!
//! Splunk invokes the alert action as `discord-alert-action --execute`
//! and pipes the alert payload to stdin. Every other flag tunes logging
//! or delivery and has an environment variable equivalent so it can be
//! set from the Splunk service environment.

use std::time::Duration;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Parser, Debug)]
#[command(
    name = "discord-alert-action",
    version,
    about = "Splunk alert action that posts triggered alerts to a Discord webhook",
    after_help = "\x1b[1mExamples:\x1b[0m\n  \
        discord-alert-action --execute < payload.json            Deliver one alert\n  \
        discord-alert-action --execute --debug < payload.json    Also log the debug channel"
)]
pub struct Cli {
    /// Read an alert payload from stdin and deliver it
    #[arg(long)]
    pub execute: bool,

    // -- Logging --
    /// Level of the main event channel
    #[arg(short, long, env = "DISCORD_ALERT_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Enable the verbose debug channel
    #[arg(
        long,
        env = "DISCORD_ALERT_DEBUG",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub debug: bool,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Webhook request timeout in milliseconds
    #[arg(
        long,
        env = "DISCORD_ALERT_TIMEOUT_MS",
        default_value_t = DEFAULT_TIMEOUT_MS,
        help_heading = "Tuning"
    )]
    pub timeout: u64,
}

impl Cli {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Settings used when the command line or environment cannot be parsed.
    ///
    /// Splunk passes `--execute` as the first argument; when it is there
    /// the alert is still processed, with default logging and timeout.
    #[must_use]
    pub fn fallback<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString>,
    {
        let execute = args
            .into_iter()
            .nth(1)
            .is_some_and(|arg| {
                let arg: std::ffi::OsString = arg.into();
                arg == "--execute"
            });
        Self {
            execute,
            log_level: LogLevel::Info,
            debug: false,
            pretty: false,
            json: false,
            timeout: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Whether a parse error is a help or version request rather than a failure.
#[must_use]
pub fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}
