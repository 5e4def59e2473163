//! # Infrastructure Layer
//!
//! Concrete SMS delivery providers for the PhoneVerify verification engine.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Config**: SMS provider selection and credentials (`SmsConfig`)
//! - **SMS**: provider implementations (mock, Twilio), the provider factory,
//!   configuration validation and the adapter onto the core delivery seam
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS gateway (default)

/// Configuration module for SMS providers
pub mod config;

/// SMS service module - External SMS providers
pub mod sms;

pub use config::{SmsConfig, SmsProviderKind};

/// Infrastructure-specific error types
///
/// Every variant except `Sms` is a configuration-time failure raised while
/// selecting or constructing a provider.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Missing or malformed provider configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider name that is not one of the known variants
    #[error("Unknown SMS provider: {0}. Valid options are: \"mock\", \"twilio\", \"aws-sns\"")]
    UnknownProvider(String),

    /// Known provider variant that has no working implementation
    #[error("{provider} provider is not yet implemented. Use \"twilio\" or \"mock\" instead.")]
    ProviderNotImplemented { provider: String },

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl InfrastructureError {
    /// Whether the error was raised while selecting or building a provider
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, InfrastructureError::Sms(_))
    }
}
