//! Field-level cipher bound to a single key source

use tracing::debug;

use super::encryption::{decrypt_string, encrypt_string};
use super::key_source::{derive_key, KeySource};
use super::EncryptionKey;
use crate::error::Result;

/// Encrypts and decrypts individual sensitive fields
///
/// The key is derived once from the [`KeySource`] and kept read-only, so a
/// single cipher can be shared across threads. Only one active key per
/// deployment is supported.
#[derive(Debug, Clone)]
pub struct FieldCipher {
    key: EncryptionKey,
    insecure: bool,
}

impl FieldCipher {
    pub fn new(source: KeySource) -> Self {
        Self {
            key: derive_key(&source),
            insecure: source.is_insecure(),
        }
    }

    /// Whether this cipher runs on the development fallback key
    pub fn is_insecure(&self) -> bool {
        self.insecure
    }

    /// Encrypt a field into an `iv:tag:ciphertext` envelope
    pub fn encrypt_field(&self, plaintext: &str) -> Result<String> {
        let envelope = encrypt_string(plaintext, &self.key)?;
        debug!(bytes = plaintext.len(), "Encrypted field");
        Ok(envelope)
    }

    /// Decrypt an envelope produced by [`FieldCipher::encrypt_field`]
    pub fn decrypt_field(&self, envelope: &str) -> Result<String> {
        let plaintext = decrypt_string(envelope, &self.key)?;
        debug!(bytes = plaintext.len(), "Decrypted field");
        Ok(plaintext)
    }

    /// Encrypt a taxpayer identifier (SSN)
    pub fn encrypt_ssn(&self, ssn: &str) -> Result<String> {
        self.encrypt_field(ssn)
    }

    pub fn decrypt_ssn(&self, envelope: &str) -> Result<String> {
        self.decrypt_field(envelope)
    }
}
