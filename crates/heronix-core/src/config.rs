use crate::{HeronixError, Result};
use serde::{Deserialize, Serialize};

/// Default process-wide salt for pseudonymous reference derivation.
pub const DEFAULT_PSEUDONYM_SALT: &str = "heronix-salt";

/// Privacy configuration for the sanitization gateway.
///
/// Constructed in-process by the embedding deployment and handed to the
/// sanitizer once at startup; there are no environment variables, files, or
/// persisted state behind it. The salt is never rotated per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacyConfig {
    /// Salt mixed into pseudonymous reference derivation.
    pub pseudonym_salt: String,

    /// Extra lowercase tokens appended to the built-in removal list for
    /// every sanitization context.
    pub extra_remove_tokens: Vec<String>,

    /// Replacement for the built-in US street-address pattern, for
    /// deployments expecting non-US data.
    pub address_pattern: Option<String>,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            pseudonym_salt: DEFAULT_PSEUDONYM_SALT.to_string(),
            extra_remove_tokens: Vec::new(),
            address_pattern: None,
        }
    }
}

impl PrivacyConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.pseudonym_salt.is_empty() {
            return Err(HeronixError::ConfigInvalid {
                issue: "pseudonym_salt must not be empty".to_string(),
            });
        }

        for token in &self.extra_remove_tokens {
            if token.is_empty() {
                return Err(HeronixError::ConfigInvalid {
                    issue: "extra_remove_tokens must not contain empty tokens".to_string(),
                });
            }
            if token.chars().any(|c| c.is_ascii_uppercase()) {
                return Err(HeronixError::ConfigInvalid {
                    issue: format!("removal token '{}' must be lowercase", token),
                });
            }
        }

        if let Some(pattern) = &self.address_pattern {
            regex::Regex::new(pattern).map_err(|e| HeronixError::PatternInvalid {
                pattern: pattern.clone(),
                source: e,
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = PrivacyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pseudonym_salt, "heronix-salt");
    }

    #[test]
    fn empty_salt_is_rejected() {
        let config = PrivacyConfig {
            pseudonym_salt: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn uppercase_removal_tokens_are_rejected() {
        let config = PrivacyConfig {
            extra_remove_tokens: vec!["legacyId".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_address_override_is_rejected() {
        let config = PrivacyConfig {
            address_pattern: Some("[unclosed".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(HeronixError::PatternInvalid { .. })
        ));
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = PrivacyConfig {
            pseudonym_salt: "district-42".to_string(),
            extra_remove_tokens: vec!["homeroom".to_string()],
            address_pattern: None,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PrivacyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.pseudonym_salt, "district-42");
        assert_eq!(parsed.extra_remove_tokens, vec!["homeroom".to_string()]);
    }
}
