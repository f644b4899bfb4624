//! `tokensmith` — submit one tokensmith transaction and report the result.
//!
//! # Exit Codes
//! - `0`: the node accepted the transaction (receipt JSON on stdout)
//! - `1`: anything else; the error and at most one hint are logged to stderr

use clap::Parser;
use std::process::ExitCode;

use tokensmith_runner::cli::{self, Cli};
use tokensmith_runner::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    match cli::run(&cli).await {
        Ok(outcome) => {
            let json = outcome.to_json();
            match serde_json::to_string_pretty(&json) {
                Ok(text) => println!("{}", text),
                Err(_) => println!("{}", json),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Runner failures already logged their hint inside the run span.
            tracing::error!(error = %err, "Program failed");
            ExitCode::FAILURE
        }
    }
}
