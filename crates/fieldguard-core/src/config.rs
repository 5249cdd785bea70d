//! Configuration for field protection
//!
//! Read once at process startup. The secret never leaves this struct except
//! as a [`KeySource`].

use serde::Deserialize;
use tracing::debug;

use crate::crypto::{KeySource, SecretString};
use crate::error::{FieldGuardError, Result};

/// Environment variable holding the encryption secret
pub const SECRET_ENV: &str = "SSN_ENCRYPTION_KEY";

/// Environment variable that forbids the development fallback key
pub const REQUIRE_SECRET_ENV: &str = "FIELDGUARD_REQUIRE_SECRET";

/// Field protection settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGuardConfig {
    /// Operator secret the field key is derived from
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub secret: Option<SecretString>,
    /// Refuse to fall back to the development key when no secret is set
    #[serde(default)]
    pub require_secret: bool,
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(SecretString::new))
}

impl FieldGuardConfig {
    pub fn new(secret: Option<&str>, require_secret: bool) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(SecretString::from),
            require_secret,
        }
    }

    /// Load from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup
    ///
    /// An unrecognised `FIELDGUARD_REQUIRE_SECRET` value is an error rather
    /// than `false`, so a typo cannot re-enable the development key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_ENV);
        let require_secret = match lookup(REQUIRE_SECRET_ENV) {
            Some(value) => parse_flag(&value).ok_or(FieldGuardError::InvalidConfig {
                name: REQUIRE_SECRET_ENV,
                value,
            })?,
            None => false,
        };

        debug!(
            secret_configured = secret.as_deref().is_some_and(|s| !s.is_empty()),
            require_secret, "Loaded field protection config"
        );

        Ok(Self::new(secret.as_deref(), require_secret))
    }

    /// Override with values given on the command line
    pub fn with_overrides(mut self, secret: Option<&str>, require_secret: bool) -> Self {
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            self.secret = Some(SecretString::from(secret));
        }
        self.require_secret |= require_secret;
        self
    }

    /// Resolve the key source this deployment should use
    pub fn key_source(&self) -> Result<KeySource> {
        match &self.secret {
            Some(secret) => Ok(KeySource::ConfiguredSecret(secret.clone())),
            None if self.require_secret => Err(FieldGuardError::MissingSecret),
            None => Ok(KeySource::InsecureDevelopmentDefault),
        }
    }
}

/// Interpret a boolean setting, `None` for anything unrecognised
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_to_development_key() {
        let config = FieldGuardConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.secret.is_none());
        assert!(!config.require_secret);
        assert!(config.key_source().unwrap().is_insecure());
    }

    #[test]
    fn test_configured_secret() {
        let config = FieldGuardConfig::from_lookup(lookup(&[(SECRET_ENV, "prod-secret")])).unwrap();
        let source = config.key_source().unwrap();
        assert!(!source.is_insecure());
    }

    #[test]
    fn test_empty_secret_counts_as_missing() {
        let config = FieldGuardConfig::from_lookup(lookup(&[
            (SECRET_ENV, ""),
            (REQUIRE_SECRET_ENV, "true"),
        ]))
        .unwrap();
        assert_eq!(config.key_source().unwrap_err(), FieldGuardError::MissingSecret);
    }

    #[test]
    fn test_unrecognised_require_secret_is_rejected() {
        for value in ["ture", "maybe", "enabled", ""] {
            let result = FieldGuardConfig::from_lookup(lookup(&[(REQUIRE_SECRET_ENV, value)]));
            assert_eq!(
                result.unwrap_err(),
                FieldGuardError::InvalidConfig {
                    name: REQUIRE_SECRET_ENV,
                    value: value.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_flag_spellings() {
        for value in ["1", "true", "TRUE", "yes", "y", "t", " on "] {
            assert_eq!(parse_flag(value), Some(true), "{:?}", value);
        }
        for value in ["0", "false", "No", "n", "f", "off"] {
            assert_eq!(parse_flag(value), Some(false), "{:?}", value);
        }
        assert_eq!(parse_flag("nope"), None);
    }

    #[test]
    fn test_overrides_only_tighten_require_secret() {
        let config = FieldGuardConfig::new(None, true).with_overrides(None, false);
        assert!(config.require_secret);

        let config = FieldGuardConfig::default().with_overrides(Some("cli-secret"), true);
        assert!(config.require_secret);
        assert_eq!(config.secret.as_ref().unwrap().expose(), "cli-secret");

        let config = FieldGuardConfig::new(Some("env-secret"), false).with_overrides(Some(""), false);
        assert_eq!(config.secret.as_ref().unwrap().expose(), "env-secret");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_selecting_fallback_logs_nothing() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let source = FieldGuardConfig::default().key_source().unwrap();
            assert!(source.is_insecure());
        });

        assert!(logs.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: FieldGuardConfig =
            serde_json::from_str(r#"{"secret":"from-file","requireSecret":true}"#).unwrap();
        assert!(config.require_secret);
        assert_eq!(config.secret.as_ref().unwrap().expose(), "from-file");
    }
}
