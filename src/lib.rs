//! Discord alert action is a Splunk alert-action script.
//!
//! Splunk runs it with `--execute` when a saved search triggers, writing
//! the alert as JSON to stdin. The selected result fields are formatted
//! as a Markdown message, trimmed to Discord's 2000 character limit, and
//! posted once to the alert's incoming webhook.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Top-level control: idle without `--execute`, otherwise
//!   the read, format, deliver pipeline.
//! - [`error`] -- Unified error type using `thiserror`.
//! - [`logging`] -- Structured tracing setup with the event and debug channels.
//! - [`message`] -- Field selection by glob pattern, formatting, trimming.
//! - [`payload`] -- Typed view of the Splunk alert payload.
//! - [`webhook`] -- HTTP client and the single webhook POST.

// Public items exist for the binary and the integration tests.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod error;
pub mod logging;
pub mod message;
pub mod payload;
pub mod webhook;
