//! AES-256-GCM authenticated encryption
//!
//! Envelope format: `{iv_hex}:{auth_tag_hex}:{ciphertext_hex}`
//! - IV: 12 bytes (96 bits), fresh from the OS CSPRNG on every call
//! - Auth tag: 16 bytes (128 bits)
//! - Ciphertext: same length as the plaintext (GCM does not pad)
//!
//! This is the persisted representation of protected fields. Changing it
//! makes stored values undecryptable.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use std::str::FromStr;
use tracing::warn;

use super::EncryptionKey;
use crate::error::{FieldGuardError, Result};

/// IV length in bytes
pub const IV_LEN: usize = 12;

/// Authentication tag length in bytes
pub const TAG_LEN: usize = 16;

const SEPARATOR: char = ':';

/// One encryption's IV, auth tag and ciphertext
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedEnvelope {
    /// Initialization vector (12 bytes for GCM)
    pub iv: [u8; IV_LEN],
    /// Authentication tag (16 bytes)
    pub auth_tag: [u8; TAG_LEN],
    /// Encrypted ciphertext
    pub ciphertext: Vec<u8>,
}

impl std::fmt::Display for EncryptedEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            hex::encode(self.iv),
            hex::encode(self.auth_tag),
            hex::encode(&self.ciphertext)
        )
    }
}

impl FromStr for EncryptedEnvelope {
    type Err = FieldGuardError;

    /// Parse from the format: `{iv_hex}:{auth_tag_hex}:{ciphertext_hex}`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(FieldGuardError::MalformedEnvelope(format!(
                "expected iv:tag:ciphertext, got {} segment(s)",
                parts.len()
            )));
        }

        let iv = decode_fixed::<IV_LEN>(parts[0], "IV")?;
        let auth_tag = decode_fixed::<TAG_LEN>(parts[1], "auth tag")?;
        let ciphertext = hex::decode(parts[2]).map_err(|e| {
            FieldGuardError::MalformedEnvelope(format!("Invalid ciphertext hex: {}", e))
        })?;

        Ok(Self {
            iv,
            auth_tag,
            ciphertext,
        })
    }
}

fn decode_fixed<const N: usize>(segment: &str, what: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(segment)
        .map_err(|e| FieldGuardError::MalformedEnvelope(format!("Invalid {} hex: {}", what, e)))?;

    bytes.as_slice().try_into().map_err(|_| {
        FieldGuardError::MalformedEnvelope(format!(
            "Invalid {} length: expected {}, got {}",
            what,
            N,
            bytes.len()
        ))
    })
}

fn cipher_for(key: &EncryptionKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| FieldGuardError::EncryptionError(e.to_string()))
}

/// Encrypt plaintext using AES-256-GCM with no associated data
pub fn encrypt(plaintext: &[u8], key: &EncryptionKey) -> Result<EncryptedEnvelope> {
    let cipher = cipher_for(key)?;

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    let nonce = Nonce::from_slice(&iv);

    // aes-gcm appends the auth tag to the ciphertext
    let mut sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| FieldGuardError::EncryptionError(e.to_string()))?;

    if sealed.len() < TAG_LEN {
        return Err(FieldGuardError::EncryptionError(
            "Ciphertext too short".to_string(),
        ));
    }

    let tag = sealed.split_off(sealed.len() - TAG_LEN);
    let mut auth_tag = [0u8; TAG_LEN];
    auth_tag.copy_from_slice(&tag);

    Ok(EncryptedEnvelope {
        iv,
        auth_tag,
        ciphertext: sealed,
    })
}

/// Encrypt a string and return the serialized envelope
pub fn encrypt_string(plaintext: &str, key: &EncryptionKey) -> Result<String> {
    Ok(encrypt(plaintext.as_bytes(), key)?.to_string())
}

/// Decrypt an envelope using AES-256-GCM
///
/// Fails with [`FieldGuardError::AuthenticationFailed`] when the tag does not
/// verify; no plaintext is released in that case.
pub fn decrypt(envelope: &EncryptedEnvelope, key: &EncryptionKey) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;
    let nonce = Nonce::from_slice(&envelope.iv);

    // Reconstruct ciphertext with tag appended (as expected by aes-gcm)
    let mut sealed = Vec::with_capacity(envelope.ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(&envelope.ciphertext);
    sealed.extend_from_slice(&envelope.auth_tag);

    cipher.decrypt(nonce, sealed.as_slice()).map_err(|_| {
        warn!("Envelope failed authentication");
        FieldGuardError::AuthenticationFailed
    })
}

/// Decrypt from the serialized envelope and return the UTF-8 plaintext
pub fn decrypt_string(envelope: &str, key: &EncryptionKey) -> Result<String> {
    let envelope: EncryptedEnvelope = envelope.parse()?;
    let plaintext = decrypt(&envelope, key)?;
    String::from_utf8(plaintext)
        .map_err(|_| FieldGuardError::MalformedEnvelope("plaintext is not valid UTF-8".to_string()))
}
