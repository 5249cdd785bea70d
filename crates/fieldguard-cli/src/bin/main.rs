//! fieldguard CLI - encrypt/decrypt protected fields and run validators
//!
//! The encryption secret comes from `--secret` or `SSN_ENCRYPTION_KEY`.
//! Without one, the development key is used unless `--require-secret`
//! (or `FIELDGUARD_REQUIRE_SECRET`) is set.

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use fieldguard_cli::{run, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok((output, ok)) => {
            println!("{}", output);
            if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
