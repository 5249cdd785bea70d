//! Error types for fieldguard-core

use thiserror::Error;

/// Result type alias for field protection operations
pub type Result<T> = std::result::Result<T, FieldGuardError>;

/// Field protection error types
///
/// Every variant is terminal for the call that produced it; retrying the
/// same input gives the same answer. Validators never produce these; they
/// answer `false` for bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldGuardError {
    /// The envelope text is not `iv:tag:ciphertext` with valid hex segments
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The GCM tag did not verify (tampering, wrong key, or corruption)
    #[error("Authentication failed - envelope was tampered with or encrypted under a different key")]
    AuthenticationFailed,

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    /// A secret is required by configuration but none was provided
    #[error("No encryption secret configured - set SSN_ENCRYPTION_KEY")]
    MissingSecret,

    /// A configuration variable holds a value that cannot be interpreted
    #[error("Invalid value {value:?} for {name}")]
    InvalidConfig { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = FieldGuardError::MalformedEnvelope("expected 3 segments, got 2".to_string());
        assert!(err.to_string().contains("expected 3 segments, got 2"));
    }

    #[test]
    fn test_invalid_config_names_variable() {
        let err = FieldGuardError::InvalidConfig {
            name: "FIELDGUARD_REQUIRE_SECRET",
            value: "ture".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("FIELDGUARD_REQUIRE_SECRET"));
        assert!(message.contains("\"ture\""));
    }
}
