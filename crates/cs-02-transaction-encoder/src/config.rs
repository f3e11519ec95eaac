//! # Encoder Configuration

use serde::{Deserialize, Serialize};

/// What to do with a short-string field longer than 31 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPolicy {
    /// Cut to the longest prefix that fits.
    #[default]
    Truncate,
    /// Fail with `FieldTooLong`.
    Reject,
}

/// Encoder configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Policy for over-long title/type/hash fields.
    #[serde(default)]
    pub field_policy: FieldPolicy,
}

impl EncoderConfig {
    /// Create a config for testing (strict: over-long fields are errors).
    pub fn for_testing() -> Self {
        Self {
            field_policy: FieldPolicy::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.field_policy, FieldPolicy::Truncate);
    }

    #[test]
    fn test_testing_config() {
        let config = EncoderConfig::for_testing();
        assert_eq!(config.field_policy, FieldPolicy::Reject);
    }

    #[test]
    fn test_policy_deserializes_snake_case() {
        let config: EncoderConfig = serde_json::from_str(r#"{"field_policy":"reject"}"#).unwrap();
        assert_eq!(config.field_policy, FieldPolicy::Reject);
        let config: EncoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.field_policy, FieldPolicy::Truncate);
    }
}
