//! Cryptographic primitives for field-level protection
//!
//! This module provides:
//! - SHA-256 key derivation from an operator secret
//! - AES-256-GCM authenticated encryption with a textual envelope
//! - Secure memory handling with zeroize

mod encryption;
mod field_cipher;
mod key_source;
mod secure_memory;

pub use encryption::{
    decrypt, decrypt_string, encrypt, encrypt_string, EncryptedEnvelope, IV_LEN, TAG_LEN,
};
pub use field_cipher::FieldCipher;
pub use key_source::{derive_key, KeySource};
pub use secure_memory::{EncryptionKey, SecretString, KEY_LEN};
