//! SMS provider configuration
//!
//! Handles:
//! - Provider selection (`SMS_PROVIDER`)
//! - Twilio credentials
//! - AWS SNS credentials (accepted, the provider is reserved)

use std::fmt;
use std::str::FromStr;

use pv_shared::{Environment, LoggingConfig};
use serde::{Deserialize, Serialize};

use crate::InfrastructureError;

/// Environment variable selecting the provider
pub const SMS_PROVIDER_ENV: &str = "SMS_PROVIDER";
/// Environment variable holding the Twilio account SID
pub const TWILIO_ACCOUNT_SID_ENV: &str = "TWILIO_ACCOUNT_SID";
/// Environment variable holding the Twilio auth token
pub const TWILIO_AUTH_TOKEN_ENV: &str = "TWILIO_AUTH_TOKEN";
/// Environment variable holding the Twilio sender number
pub const TWILIO_PHONE_NUMBER_ENV: &str = "TWILIO_PHONE_NUMBER";
/// Environment variable holding the AWS region
pub const AWS_REGION_ENV: &str = "AWS_REGION";
/// Environment variable holding the AWS access key id
pub const AWS_ACCESS_KEY_ID_ENV: &str = "AWS_ACCESS_KEY_ID";
/// Environment variable holding the AWS secret access key
pub const AWS_SECRET_ACCESS_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";

/// Provider used when nothing is configured
pub const DEFAULT_PROVIDER: &str = "mock";

/// Closed set of SMS provider variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmsProviderKind {
    /// Log-only development provider
    Mock,
    /// Twilio SMS gateway
    Twilio,
    /// AWS SNS, reserved and not implemented
    AwsSns,
}

impl SmsProviderKind {
    /// Every known variant
    pub const ALL: [SmsProviderKind; 3] = [
        SmsProviderKind::Mock,
        SmsProviderKind::Twilio,
        SmsProviderKind::AwsSns,
    ];

    /// Configuration name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            SmsProviderKind::Mock => "mock",
            SmsProviderKind::Twilio => "twilio",
            SmsProviderKind::AwsSns => "aws-sns",
        }
    }

    /// Whether selecting this variant can produce a working provider
    pub fn is_implemented(&self) -> bool {
        !matches!(self, SmsProviderKind::AwsSns)
    }
}

impl fmt::Display for SmsProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmsProviderKind {
    type Err = InfrastructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(SmsProviderKind::Mock),
            "twilio" => Ok(SmsProviderKind::Twilio),
            "aws-sns" => Ok(SmsProviderKind::AwsSns),
            _ => Err(InfrastructureError::UnknownProvider(s.to_string())),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsConfig {
    /// SMS service provider ("mock", "twilio", "aws-sns")
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Twilio account SID
    #[serde(default)]
    pub account_sid: Option<String>,
    /// Twilio auth token
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Twilio sender number (E.164)
    #[serde(default)]
    pub from_number: Option<String>,
    /// AWS region
    #[serde(default)]
    pub aws_region: Option<String>,
    /// AWS access key id
    #[serde(default)]
    pub aws_access_key_id: Option<String>,
    /// AWS secret access key
    #[serde(default)]
    pub aws_secret_access_key: Option<String>,
    /// Print mock messages to stdout as well as the log
    #[serde(default)]
    pub mock_console_output: bool,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            account_sid: None,
            auth_token: None,
            from_number: None,
            aws_region: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            mock_console_output: false,
        }
    }
}

impl SmsConfig {
    /// Configuration selecting the mock provider
    pub fn mock() -> Self {
        Self::default()
    }

    /// Configuration selecting the Twilio gateway
    pub fn twilio(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            provider: SmsProviderKind::Twilio.as_str().to_string(),
            account_sid: Some(account_sid.into()),
            auth_token: Some(auth_token.into()),
            from_number: Some(from_number.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Values are trimmed and blank values are treated as unset.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        Self {
            provider: env_value(SMS_PROVIDER_ENV).unwrap_or_else(default_provider),
            account_sid: env_value(TWILIO_ACCOUNT_SID_ENV),
            auth_token: env_value(TWILIO_AUTH_TOKEN_ENV),
            from_number: env_value(TWILIO_PHONE_NUMBER_ENV),
            aws_region: env_value(AWS_REGION_ENV),
            aws_access_key_id: env_value(AWS_ACCESS_KEY_ID_ENV),
            aws_secret_access_key: env_value(AWS_SECRET_ACCESS_KEY_ENV),
            mock_console_output: LoggingConfig::for_environment(environment).console_sms,
        }
    }

    /// Parse the provider name into a known variant
    pub fn provider_kind(&self) -> Result<SmsProviderKind, InfrastructureError> {
        self.provider.parse()
    }

    /// Names of the Twilio fields that are unset or blank, in declaration order
    pub fn missing_twilio_fields(&self) -> Vec<&'static str> {
        [
            ("account_sid", &self.account_sid),
            ("auth_token", &self.auth_token),
            ("from_number", &self.from_number),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }
}

/// Environment variable backing a configuration field
pub fn env_var_for_field(field: &str) -> &str {
    match field {
        "provider" => SMS_PROVIDER_ENV,
        "account_sid" => TWILIO_ACCOUNT_SID_ENV,
        "auth_token" => TWILIO_AUTH_TOKEN_ENV,
        "from_number" => TWILIO_PHONE_NUMBER_ENV,
        "aws_region" => AWS_REGION_ENV,
        "aws_access_key_id" => AWS_ACCESS_KEY_ID_ENV,
        "aws_secret_access_key" => AWS_SECRET_ACCESS_KEY_ENV,
        other => other,
    }
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("mock".parse::<SmsProviderKind>().unwrap(), SmsProviderKind::Mock);
        assert_eq!("Twilio".parse::<SmsProviderKind>().unwrap(), SmsProviderKind::Twilio);
        assert_eq!("aws-sns".parse::<SmsProviderKind>().unwrap(), SmsProviderKind::AwsSns);

        match "carrier-pigeon".parse::<SmsProviderKind>() {
            Err(InfrastructureError::UnknownProvider(name)) => assert_eq!(name, "carrier-pigeon"),
            other => panic!("Expected UnknownProvider, got {:?}", other),
        }
    }

    #[test]
    fn test_provider_kind_round_trips_names() {
        for kind in SmsProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<SmsProviderKind>().unwrap(), kind);
        }
        assert!(!SmsProviderKind::AwsSns.is_implemented());
        assert!(SmsProviderKind::Twilio.is_implemented());
    }

    #[test]
    fn test_default_is_mock() {
        let config = SmsConfig::default();
        assert_eq!(config.provider, "mock");
        assert_eq!(config.provider_kind().unwrap(), SmsProviderKind::Mock);
    }

    #[test]
    fn test_missing_twilio_fields() {
        let mut config = SmsConfig::twilio("ACtest", "token", "+15551234567");
        assert!(config.missing_twilio_fields().is_empty());

        config.auth_token = None;
        assert_eq!(config.missing_twilio_fields(), vec!["auth_token"]);

        config.account_sid = Some("   ".to_string());
        assert_eq!(config.missing_twilio_fields(), vec!["account_sid", "auth_token"]);
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: SmsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SmsConfig::default());

        let config: SmsConfig =
            serde_json::from_str(r#"{"provider":"twilio","account_sid":"ACx"}"#).unwrap();
        assert_eq!(config.provider_kind().unwrap(), SmsProviderKind::Twilio);
        assert_eq!(config.missing_twilio_fields(), vec!["auth_token", "from_number"]);
    }

    #[test]
    fn test_env_value_trims_and_drops_blank() {
        std::env::set_var("PV_INFRA_TEST_PADDED_SENDER", "  +15551234567 ");
        std::env::set_var("PV_INFRA_TEST_BLANK_SENDER", "   ");

        assert_eq!(
            env_value("PV_INFRA_TEST_PADDED_SENDER").as_deref(),
            Some("+15551234567")
        );
        assert_eq!(env_value("PV_INFRA_TEST_BLANK_SENDER"), None);
        assert_eq!(env_value("PV_INFRA_TEST_UNSET_SENDER"), None);

        std::env::remove_var("PV_INFRA_TEST_PADDED_SENDER");
        std::env::remove_var("PV_INFRA_TEST_BLANK_SENDER");
    }

    #[test]
    fn test_env_var_for_field() {
        assert_eq!(env_var_for_field("auth_token"), "TWILIO_AUTH_TOKEN");
        assert_eq!(env_var_for_field("from_number"), "TWILIO_PHONE_NUMBER");
        assert_eq!(env_var_for_field("unknown"), "unknown");
    }
}
