//! Verification service module for SMS-based phone verification
//!
//! This module provides the complete one-time passcode workflow:
//! - Code generation and delivery through an injected SMS seam
//! - In-memory storage with expiry and attempt tracking
//! - Attempt-limited, one-shot verification

mod config;
mod service;
mod store;
mod traits;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use store::OtpStore;
pub use traits::SmsServiceTrait;
