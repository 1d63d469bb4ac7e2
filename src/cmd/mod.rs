//! Top-level control.
//!
//! [`dispatch`] sets up logging, announces the start, and either stays
//! idle (no `--execute`) or hands over to [`execute`]. It never fails:
//! the hosting alerting platform only looks at the logs, and the process
//! exits with status 0 in every case.

pub mod execute;

use tracing::Instrument;

use crate::cli::Cli;
use crate::logging::{self, EVENT_TARGET};

/// Run with `cli`; `parse_error` is set when `cli` holds fallback settings.
pub async fn dispatch(cli: Cli, parse_error: Option<clap::Error>) {
    let log_format = logging::resolve_format(cli.pretty, cli.json);
    logging::init(&cli.log_level, cli.debug, log_format);

    tracing::info!(
        target: EVENT_TARGET,
        version = env!("CARGO_PKG_VERSION"),
        "Starting discord_alert_action"
    );

    if let Some(e) = parse_error {
        let detail = e.to_string();
        tracing::error!(
            target: EVENT_TARGET,
            error = %detail.trim_end(),
            execute = cli.execute,
            "Invalid arguments, continuing with defaults"
        );
    }

    if !cli.execute {
        return;
    }

    let span = tracing::info_span!(
        target: EVENT_TARGET,
        "alert_action",
        invocation_id = %uuid::Uuid::new_v4()
    );
    execute::execute(cli.request_timeout())
        .instrument(span)
        .await;
}
