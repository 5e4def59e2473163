//! Provider configuration checks
//!
//! Inspects an [`SmsConfig`] without constructing a provider, so startup
//! code can report every problem at once.

use pv_shared::phone::is_e164;
use serde::Serialize;

use crate::config::{env_var_for_field, SmsConfig, SmsProviderKind};

/// Result of a configuration check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigValidation {
    /// Whether the selected provider could be constructed
    pub valid: bool,
    /// Human readable reason when invalid
    pub error: Option<String>,
    /// Missing settings, by field name or environment variable name
    pub missing: Vec<String>,
}

impl ConfigValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            missing: Vec::new(),
        }
    }

    fn invalid(error: impl Into<String>, missing: Vec<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            missing,
        }
    }
}

/// Check a configuration, reporting missing settings by field name
pub fn validate_config(config: &SmsConfig) -> ConfigValidation {
    check(config, |field| field.to_string(), "")
}

/// Check the configuration loaded from the environment
///
/// Missing settings are reported by environment variable name
/// (`TWILIO_AUTH_TOKEN`, ...).
pub fn validate_env_config() -> ConfigValidation {
    dotenvy::dotenv().ok();
    let config = SmsConfig::from_env();
    check(
        &config,
        |field| env_var_for_field(field).to_string(),
        ". Please check your .env file.",
    )
}

fn check(config: &SmsConfig, name: impl Fn(&str) -> String, hint: &str) -> ConfigValidation {
    let kind = match config.provider_kind() {
        Ok(kind) => kind,
        Err(e) => return ConfigValidation::invalid(e.to_string(), Vec::new()),
    };

    match kind {
        SmsProviderKind::Mock => ConfigValidation::ok(),
        SmsProviderKind::Twilio => {
            let missing: Vec<String> = config
                .missing_twilio_fields()
                .into_iter()
                .map(|field| name(field))
                .collect();

            if !missing.is_empty() {
                let error = format!("Missing Twilio configuration: {}{}", missing.join(", "), hint);
                return ConfigValidation::invalid(error, missing);
            }

            match config.from_number.as_deref() {
                Some(from) if !is_e164(from.trim()) => ConfigValidation::invalid(
                    format!(
                        "{} must be in E.164 format (e.g., +15551234567)",
                        name("from_number")
                    ),
                    Vec::new(),
                ),
                _ => ConfigValidation::ok(),
            }
        }
        SmsProviderKind::AwsSns => ConfigValidation::invalid(
            "AWS SNS provider is not yet implemented. Use \"twilio\" or \"mock\" instead.",
            Vec::new(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_is_valid() {
        let result = validate_config(&SmsConfig::mock());
        assert!(result.valid);
        assert!(result.error.is_none());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_env_hint_only_on_env_check() {
        let mut config = SmsConfig::twilio("ACtest", "token", "+15551234567");
        config.account_sid = None;

        let result = check(&config, |f| env_var_for_field(f).to_string(), ". Please check your .env file.");
        assert_eq!(result.missing, vec!["TWILIO_ACCOUNT_SID"]);
        assert_eq!(
            result.error.as_deref(),
            Some("Missing Twilio configuration: TWILIO_ACCOUNT_SID. Please check your .env file.")
        );
    }
}
