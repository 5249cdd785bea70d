//! # fieldguard-cli
//!
//! Operator command line for fieldguard: encrypt and decrypt protected
//! fields, and run the onboarding validators from a shell.

mod commands;
pub mod verdict;

pub use commands::{run, run_with_config, Args, Command};
pub use verdict::Verdict;
