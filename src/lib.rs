//! `sqa_tracker` - issue tracker for software quality assurance testing
//!
//! This crate provides the `sqa` command-line front end over `sqa-lib`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Data directory and `config.yaml` handling
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - tracing subscriber setup
//!
//! Projects, issues, filtering, persistence and export live in `sqa-lib`.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;

pub use sqa_lib::{Result, SqaError};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}

/// Text written to stderr when a command fails.
///
/// Validation failures list each field on its own line; input mistakes get
/// a usage hint.
#[must_use]
pub fn error_report(err: &anyhow::Error) -> String {
    use std::fmt::Write as _;

    let mut out = format!("Error: {err}");
    if let Some(sqa) = err.downcast_ref::<SqaError>() {
        let fields = sqa.field_errors();
        if fields.len() > 1 {
            for field in &fields {
                let _ = write!(out, "\n  - {field}");
            }
        }
        if sqa.is_user_error() {
            out.push_str("\nHint: check the values given; `sqa --help` lists the options.");
        }
    }
    out
}
