//! Key derivation from an operator secret
//!
//! The key is `SHA-256(secret)`, which normalizes any secret length to the
//! 32 bytes AES-256 needs. Without a configured secret the key comes from a
//! fixed, publicly known placeholder, usable only in development.

use sha2::{Digest, Sha256};
use std::sync::Once;
use tracing::warn;

use super::secure_memory::{EncryptionKey, SecretString, KEY_LEN};

/// Placeholder hashed when no secret is configured. Public knowledge.
const DEVELOPMENT_PLACEHOLDER: &str = "local-dev-ssn-key";

static FALLBACK_WARNING: Once = Once::new();

/// Where the field encryption key comes from
///
/// Selected once at startup and handed to the cipher, so the insecure
/// fallback shows up explicitly wherever it is used.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// An operator-supplied secret
    ConfiguredSecret(SecretString),
    /// Fixed development placeholder. Never use for real data.
    InsecureDevelopmentDefault,
}

impl KeySource {
    /// Select a source from an optional secret. Missing or empty secrets
    /// select the development default.
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(s) if !s.is_empty() => Self::ConfiguredSecret(SecretString::from(s)),
            _ => Self::InsecureDevelopmentDefault,
        }
    }

    pub fn is_insecure(&self) -> bool {
        matches!(self, Self::InsecureDevelopmentDefault)
    }
}

/// Derive the 256-bit field key for a source
pub fn derive_key(source: &KeySource) -> EncryptionKey {
    let digest = match source {
        KeySource::ConfiguredSecret(secret) => Sha256::digest(secret.expose().as_bytes()),
        KeySource::InsecureDevelopmentDefault => {
            FALLBACK_WARNING.call_once(|| {
                warn!("No encryption secret configured, using the insecure development key");
            });
            Sha256::digest(DEVELOPMENT_PLACEHOLDER.as_bytes())
        }
    };

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&digest);
    EncryptionKey::new(key)
}
