//! Integration tests driving the compiled binary the way Splunk does.
//!
//! Every scenario must exit with status 0; outcomes are only visible in
//! the log output on stdout (JSON, since stdout is not a terminal here).

mod common;

use axum::http::StatusCode;
use common::{alert_json, MockWebhook};
use predicates::prelude::*;

fn alert_action_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("discord-alert-action");
    for key in [
        "DISCORD_ALERT_LOG_LEVEL",
        "DISCORD_ALERT_DEBUG",
        "DISCORD_ALERT_TIMEOUT_MS",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn without_execute_only_logs_startup() {
    alert_action_cmd()
        .write_stdin("this is never read")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting discord_alert_action"))
        .stdout(predicate::str::contains("Running as alert action").not());
}

#[test]
fn unknown_argument_is_logged_and_exits_zero() {
    alert_action_cmd()
        .arg("--run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting discord_alert_action"))
        .stdout(predicate::str::contains("Invalid arguments, continuing with defaults"))
        .stdout(predicate::str::contains(r#""level":"ERROR""#))
        .stdout(predicate::str::contains("--run"))
        .stdout(predicate::str::contains("Running as alert action").not());
}

#[test]
fn invalid_environment_is_logged_and_exits_zero() {
    alert_action_cmd()
        .env("DISCORD_ALERT_TIMEOUT_MS", "soon")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting discord_alert_action"))
        .stdout(predicate::str::contains("Invalid arguments, continuing with defaults"));
}

#[test]
fn events_carry_their_channel() {
    alert_action_cmd()
        .args(["--execute", "--debug"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""target":"discord_alert_action""#))
        .stdout(predicate::str::contains(r#""target":"discord_alert_action::debug""#));
}

#[tokio::test(flavor = "multi_thread")]
async fn execute_with_extra_arguments_still_delivers() {
    let hook = MockWebhook::start(StatusCode::NO_CONTENT).await;
    let input = alert_json(&hook.url(), "cpu");

    tokio::task::spawn_blocking(move || {
        alert_action_cmd()
            .args(["--execute", "--unexpected"])
            .write_stdin(input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Invalid arguments, continuing with defaults"))
            .stdout(predicate::str::contains("Message sent successfully."));
    })
    .await
    .unwrap();

    assert_eq!(hook.requests().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn debug_switch_from_environment_delivers_and_traces() {
    let hook = MockWebhook::start(StatusCode::NO_CONTENT).await;
    let input = alert_json(&hook.url(), "cpu");

    tokio::task::spawn_blocking(move || {
        alert_action_cmd()
            .arg("--execute")
            .env("DISCORD_ALERT_DEBUG", "1")
            .write_stdin(input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Starting discord_alert_action"))
            .stdout(predicate::str::contains(r#""message":"Key and Field Name""#))
            .stdout(predicate::str::contains("Message sent successfully."))
            .stdout(predicate::str::contains("Invalid arguments").not());
    })
    .await
    .unwrap();

    assert_eq!(hook.requests().len(), 1);
}

#[test]
fn malformed_json_is_logged_and_exits_zero() {
    alert_action_cmd()
        .arg("--execute")
        .write_stdin("{not json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Running as alert action"))
        .stdout(predicate::str::contains("An error occurred"))
        .stdout(predicate::str::contains("not valid JSON"));
}

#[test]
fn missing_configuration_logs_one_error() {
    let assert = alert_action_cmd()
        .arg("--execute")
        .write_stdin(r#"{"search_name":"s","results_link":"l","server_host":"h","result":{}}"#)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let errors: Vec<&str> = stdout
        .lines()
        .filter(|line| line.contains(r#""level":"ERROR""#))
        .collect();
    assert_eq!(errors.len(), 1, "log output:\n{stdout}");
    assert!(errors[0].contains("missing required field 'configuration'"));
}

#[test]
fn debug_channel_is_opt_in() {
    let input = r#"{"search_name":"s"}"#;

    alert_action_cmd()
        .arg("--execute")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""message":"Payload""#).not());

    alert_action_cmd()
        .args(["--execute", "--debug"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""message":"Payload""#));
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_is_logged_once_and_exits_zero() {
    let hook = MockWebhook::start(StatusCode::INTERNAL_SERVER_ERROR).await;
    let input = alert_json(&hook.url(), "cpu");

    tokio::task::spawn_blocking(move || {
        alert_action_cmd()
            .arg("--execute")
            .write_stdin(input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Failed to send message."))
            .stdout(predicate::str::contains(r#""status_code":500"#));
    })
    .await
    .unwrap();

    assert_eq!(hook.requests().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn delivered_alert_logs_success() {
    let hook = MockWebhook::start(StatusCode::NO_CONTENT).await;
    let input = alert_json(&hook.url(), "cpu,mem");

    tokio::task::spawn_blocking(move || {
        alert_action_cmd()
            .arg("--execute")
            .write_stdin(input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Message sent successfully."))
            .stdout(predicate::str::contains("invocation_id"));
    })
    .await
    .unwrap();

    let requests = hook.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body["content"],
        "# [High CPU](http://x) from `h1`\n**Alert Fields**\n- **cpu:** 99%\n- **mem:** 10%\n---\n"
    );
}
