//! Twilio SMS Service Implementation
//!
//! This module provides SMS sending capabilities using the Twilio API.
//! It implements the SmsService trait for production SMS delivery.
//!
//! ## Features
//!
//! - Credential validation at construction time
//! - E.164 destination validation
//! - Automatic retry logic with exponential backoff
//! - Security: Phone number masking in logs

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use pv_shared::phone::{is_e164, mask_phone_number};

use crate::{
    config::SmsConfig,
    sms::sms_service::{SmsService, MAX_MESSAGE_LENGTH},
    InfrastructureError,
};

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum send attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TwilioConfig {
    /// Create configuration with default retry settings
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }

    /// Extract Twilio settings from the generic SMS configuration
    ///
    /// Surrounding whitespace is stripped from every credential.
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let missing = config.missing_twilio_fields();
        if !missing.is_empty() {
            return Err(InfrastructureError::Config(format!(
                "Missing Twilio configuration: {}",
                missing.join(", ")
            )));
        }

        let setting = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();
        let twilio_config = Self::new(
            setting(&config.account_sid),
            setting(&config.auth_token),
            setting(&config.from_number),
        );
        twilio_config.validate()?;
        Ok(twilio_config)
    }

    /// Override the retry policy
    pub fn with_retry(mut self, max_retries: u32, retry_delay_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Check that credentials are present and the sender number is E.164
    pub fn validate(&self) -> Result<(), InfrastructureError> {
        let missing: Vec<&str> = [
            ("account_sid", &self.account_sid),
            ("auth_token", &self.auth_token),
            ("from_number", &self.from_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(InfrastructureError::Config(format!(
                "Missing Twilio configuration: {}",
                missing.join(", ")
            )));
        }

        if !is_e164(&self.from_number) {
            return Err(InfrastructureError::Config(
                "Twilio from_number must be in E.164 format (starting with '+')".to_string()
            ));
        }

        Ok(())
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    ///
    /// Fails with a configuration error before any network traffic when the
    /// credentials are incomplete.
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        config.validate()?;

        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self { client, config })
    }

    /// Sender number used for outbound messages
    pub fn from_number(&self) -> &str {
        &self.config.from_number
    }

    /// Validate and normalize a destination to E.164
    fn validate_phone_number(&self, phone: &str) -> Result<String, InfrastructureError> {
        if !phone.starts_with('+') {
            return Err(InfrastructureError::Sms(
                "Phone number must be in E.164 format (e.g., +15551234567)".to_string()
            ));
        }

        match phone.parse::<PhoneNumber>() {
            Ok(parsed) => {
                let formatted = parsed.format().mode(Mode::E164).to_string();
                debug!("Validated phone number: {}", mask_phone_number(&formatted));
                Ok(formatted)
            }
            Err(e) => {
                error!("Invalid phone number format: {}", e);
                Err(InfrastructureError::Sms(format!(
                    "Invalid phone number format: {}",
                    e
                )))
            }
        }
    }

    /// Send SMS, retrying transient gateway failures with capped backoff
    async fn send_with_retry(
        &self,
        to: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let max_attempts = self.config.max_retries.max(1);
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        for attempt in 1..=max_attempts {
            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempt,
                max_attempts,
                mask_phone_number(to)
            );

            let msg = OutboundMessage::new(&self.config.from_number, to, message);
            let error_msg = match self.client.send_message(msg).await {
                Ok(response) => {
                    info!(
                        "SMS sent successfully to {} with SID: {}",
                        mask_phone_number(to),
                        response.sid
                    );
                    return Ok(response.sid);
                }
                Err(e) => e.to_string(),
            };

            error!(
                "Failed to send SMS (attempt {}/{}): {}",
                attempt, max_attempts, error_msg
            );

            let failure = SendFailure::classify(&error_msg);
            if failure == SendFailure::Rejected {
                return Err(InfrastructureError::Sms(format!("Invalid request: {}", error_msg)));
            }
            if attempt == max_attempts {
                return Err(InfrastructureError::Sms(format!(
                    "Failed to send SMS after {} attempts: {}",
                    max_attempts, error_msg
                )));
            }

            warn!(?failure, "Retrying SMS send after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay = next_delay(delay);
        }

        Err(InfrastructureError::Sms("No SMS send attempt was made".to_string()))
    }
}

/// Upper bound on the wait between send attempts
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

fn next_delay(delay: Duration) -> Duration {
    delay.saturating_mul(2).min(MAX_RETRY_DELAY)
}

/// How a failed gateway call should be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SendFailure {
    RateLimited,
    ServerError,
    /// The gateway refused the request itself; resending cannot help
    Rejected,
    Other,
}

impl SendFailure {
    fn classify(error_msg: &str) -> Self {
        let lowered = error_msg.to_lowercase();
        if lowered.contains("429") || lowered.contains("rate") {
            SendFailure::RateLimited
        } else if ["500", "502", "503", "504"].iter().any(|code| lowered.contains(code)) {
            SendFailure::ServerError
        } else if lowered.contains("400") || lowered.contains("invalid") {
            SendFailure::Rejected
        } else {
            SendFailure::Other
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let normalized_phone = self.validate_phone_number(phone_number)?;

        info!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(&normalized_phone),
            message.len()
        );

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        self.send_with_retry(&normalized_phone, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> TwilioSmsService {
        TwilioSmsService::new(TwilioConfig::new("ACtest", "test_token", "+14155550100")).unwrap()
    }

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let mut delay = Duration::from_millis(1000);
        let mut seen = Vec::new();
        for _ in 0..6 {
            delay = next_delay(delay);
            seen.push(delay.as_secs());
        }
        assert_eq!(seen, vec![2, 4, 8, 8, 8, 8]);
        assert_eq!(next_delay(Duration::MAX), MAX_RETRY_DELAY);
    }

    #[test]
    fn test_send_failure_classification() {
        assert_eq!(SendFailure::classify("HTTP 429 Too Many Requests"), SendFailure::RateLimited);
        assert_eq!(SendFailure::classify("status 503"), SendFailure::ServerError);
        assert_eq!(SendFailure::classify("400: Invalid 'To' number"), SendFailure::Rejected);
        assert_eq!(SendFailure::classify("connection reset"), SendFailure::Other);
    }

    #[test]
    fn test_phone_validation() {
        let service = test_service();

        assert_eq!(
            service.validate_phone_number("+14155552671").unwrap(),
            "+14155552671"
        );

        // No country code guessing
        assert!(service.validate_phone_number("4155552671").is_err());
    }

    #[tokio::test]
    async fn test_message_length_limit() {
        let service = test_service();
        let long_message = "a".repeat(MAX_MESSAGE_LENGTH + 1);

        let result = service.send_sms("+14155552671", &long_message).await;
        match result {
            Err(InfrastructureError::Sms(msg)) => assert!(msg.contains("maximum length")),
            other => panic!("Expected Sms error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_invalid_destination_rejected_before_send() {
        let service = test_service();
        let result = service.send_sms("not-a-number", "hello").await;
        assert!(matches!(result, Err(InfrastructureError::Sms(_))));
    }
}
