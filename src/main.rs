use std::ffi::OsString;

use clap::Parser;

use discord_alert_action::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();

    // Splunk treats any non-zero exit as a script failure; an unparsable
    // command line is logged and handled with default settings instead.
    match Cli::try_parse_from(args.clone()) {
        Ok(cli) => discord_alert_action::cmd::dispatch(cli, None).await,
        Err(e) if cli::is_informational(&e) => {
            let _ = e.print();
        }
        Err(e) => discord_alert_action::cmd::dispatch(Cli::fallback(args), Some(e)).await,
    }
}
