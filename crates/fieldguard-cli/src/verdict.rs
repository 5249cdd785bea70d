//! Validator results with user-facing reasons

use serde::Serialize;

pub const UNDERAGE_REASON: &str = "You must be at least 18 years old";
pub const INVALID_CARD_REASON: &str = "Invalid card number";

/// A validator's answer plus the message shown when it fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl Verdict {
    pub fn from_check(valid: bool, reason: &'static str) -> Self {
        Self {
            valid,
            reason: (!valid).then_some(reason),
        }
    }

    pub fn render(&self, json: bool) -> serde_json::Result<String> {
        if json {
            return serde_json::to_string(self);
        }
        Ok(match self.reason {
            Some(reason) => format!("invalid: {}", reason),
            None => "valid".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_only_on_failure() {
        assert_eq!(Verdict::from_check(true, INVALID_CARD_REASON).reason, None);
        assert_eq!(
            Verdict::from_check(false, INVALID_CARD_REASON).reason,
            Some(INVALID_CARD_REASON)
        );
    }

    #[test]
    fn test_render() {
        let ok = Verdict::from_check(true, UNDERAGE_REASON);
        let bad = Verdict::from_check(false, UNDERAGE_REASON);

        assert_eq!(ok.render(false).unwrap(), "valid");
        assert_eq!(ok.render(true).unwrap(), r#"{"valid":true}"#);
        assert_eq!(
            bad.render(false).unwrap(),
            "invalid: You must be at least 18 years old"
        );
        assert_eq!(
            bad.render(true).unwrap(),
            r#"{"valid":false,"reason":"You must be at least 18 years old"}"#
        );
    }
}
