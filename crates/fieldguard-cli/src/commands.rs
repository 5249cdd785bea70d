//! Argument parsing and command dispatch

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

use fieldguard_core::validators::{is_at_least_18, is_valid_card_number, FixedClock, SystemClock};
use fieldguard_core::{FieldCipher, FieldGuardConfig};

use crate::verdict::{Verdict, INVALID_CARD_REASON, UNDERAGE_REASON};

/// fieldguard - protect and validate sensitive onboarding fields
///
/// The secret defaults to `SSN_ENCRYPTION_KEY`; `FIELDGUARD_REQUIRE_SECRET`
/// forbids the development key just like `--require-secret`.
#[derive(Parser, Debug)]
#[command(name = "fieldguard")]
#[command(version)]
#[command(about = "Encrypt taxpayer identifiers and validate onboarding inputs")]
pub struct Args {
    /// Encryption secret the field key is derived from (overrides SSN_ENCRYPTION_KEY)
    #[arg(long, global = true)]
    pub secret: Option<String>,

    /// Fail instead of using the development key when no secret is set
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub require_secret: bool,

    /// Print validator verdicts as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Encrypt a field value and print its envelope
    Encrypt { value: String },

    /// Decrypt an `iv:tag:ciphertext` envelope
    Decrypt { envelope: String },

    /// Check that a date of birth is at least 18 years ago
    CheckAge {
        date: String,

        /// Evaluate against this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Check a payment card number's length and Luhn checksum
    CheckCard { number: String },
}

impl Args {
    fn cipher(&self, base: FieldGuardConfig) -> Result<FieldCipher> {
        let source = base
            .with_overrides(self.secret.as_deref(), self.require_secret)
            .key_source()
            .context("Failed to select an encryption key")?;
        Ok(FieldCipher::new(source))
    }
}

/// Execute a command against the process environment
pub fn run(args: &Args) -> Result<(String, bool)> {
    run_with_config(args, FieldGuardConfig::from_env)
}

/// Execute a command, returning the text to print and whether it succeeded
///
/// `load` is only called by commands that need the encryption key.
pub fn run_with_config<F>(args: &Args, load: F) -> Result<(String, bool)>
where
    F: FnOnce() -> fieldguard_core::Result<FieldGuardConfig>,
{
    match &args.command {
        Command::Encrypt { value } => {
            let config = load().context("Invalid field protection settings")?;
            let envelope = args
                .cipher(config)?
                .encrypt_field(value)
                .context("Failed to encrypt field")?;
            Ok((envelope, true))
        }
        Command::Decrypt { envelope } => {
            let config = load().context("Invalid field protection settings")?;
            let plaintext = args
                .cipher(config)?
                .decrypt_field(envelope)
                .context("Failed to decrypt envelope")?;
            Ok((plaintext, true))
        }
        Command::CheckAge { date, today } => {
            let valid = match today {
                Some(today) => is_at_least_18(date, &FixedClock(*today)),
                None => is_at_least_18(date, &SystemClock),
            };
            let verdict = Verdict::from_check(valid, UNDERAGE_REASON);
            Ok((verdict.render(args.json)?, verdict.valid))
        }
        Command::CheckCard { number } => {
            let verdict = Verdict::from_check(is_valid_card_number(number), INVALID_CARD_REASON);
            Ok((verdict.render(args.json)?, verdict.valid))
        }
    }
}
