//! MediStock command-line entry point.
//!
//! All logic lives in the library; this file only parses arguments and
//! maps the outcome to an exit code.

use std::process::ExitCode;

use clap::Parser;
use medistock_cli::{report_error, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}
