//! # fieldguard-core
//!
//! Protection and validation primitives for sensitive onboarding fields:
//! - AES-256-GCM field encryption with a stable `iv:tag:ciphertext` envelope
//! - SHA-256 key derivation from an operator secret, with an explicit
//!   development fallback
//! - Age-of-majority and payment card (Luhn) validators

pub mod config;
pub mod crypto;
pub mod error;
pub mod validators;

pub use config::FieldGuardConfig;
pub use crypto::{derive_key, EncryptedEnvelope, EncryptionKey, FieldCipher, KeySource};
pub use error::{FieldGuardError, Result};
pub use validators::{is_at_least_18, is_valid_card_number, Clock, FixedClock, SystemClock};
