//! SMS Service Module
//!
//! This module provides the delivery providers used to transmit verification
//! codes, plus the factory that selects one by name.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Log sink for development
//! - **Twilio Support**: Production SMS via Twilio API
//! - **Validation**: Startup checks listing missing settings
//! - **Adapter**: Bridges any provider onto the core delivery seam

pub mod adapter;
pub mod mock_sms;
pub mod sms_service;
pub mod validation;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use adapter::SmsServiceAdapter;
pub use mock_sms::{MockSmsService, SentMessage};
pub use pv_shared::phone::{is_e164, mask_phone_number};
pub use sms_service::{SmsService, MAX_MESSAGE_LENGTH};
pub use validation::{validate_config, validate_env_config, ConfigValidation};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

use crate::config::{SmsConfig, SmsProviderKind};
use crate::InfrastructureError;

/// Create an SMS service based on configuration
///
/// Constructs exactly the provider named by `config.provider`. There is no
/// fallback: an unknown name, the reserved AWS SNS variant or incomplete
/// credentials all fail here.
pub fn create_sms_service(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    let kind = config.provider_kind().map_err(|e| {
        tracing::error!(provider = %config.provider, "Unknown SMS provider requested");
        e
    })?;

    let service: Box<dyn SmsService> = match kind {
        SmsProviderKind::Mock => Box::new(MockSmsService::with_options(
            config.mock_console_output,
            false,
        )),
        SmsProviderKind::Twilio => create_twilio_service(config)?,
        SmsProviderKind::AwsSns => {
            tracing::error!("AWS SNS SMS provider selected but not implemented");
            return Err(InfrastructureError::ProviderNotImplemented {
                provider: kind.as_str().to_string(),
            });
        }
    };

    tracing::info!(
        provider = kind.as_str(),
        "SMS service created: {}",
        service.provider_name()
    );
    Ok(service)
}

/// Create the SMS service selected by the environment
///
/// Loads `.env` if present, then reads `SMS_PROVIDER` (default `mock`) and the
/// provider credentials.
pub fn create_from_env() -> Result<Box<dyn SmsService>, InfrastructureError> {
    dotenvy::dotenv().ok();
    create_sms_service(&SmsConfig::from_env())
}

#[cfg(feature = "twilio-sms")]
fn create_twilio_service(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    let twilio_config = TwilioConfig::from_sms_config(config).map_err(|e| {
        tracing::error!("Failed to initialize Twilio SMS service: {}", e);
        e
    })?;
    Ok(Box::new(TwilioSmsService::new(twilio_config)?))
}

#[cfg(not(feature = "twilio-sms"))]
fn create_twilio_service(_config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "Twilio support requires the twilio-sms feature".to_string()
    ))
}
