//! Albatross: comment-preserving YAML configuration files
//!
//! Entry point for the albatross command-line tool.

use std::process::ExitCode;

use albatross::cli::Cli;

mod app;

use app::{dispatch, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);
    dispatch(cli.command, &cli.namespace)
}
