//! Value objects representing immutable domain concepts.

pub mod otp_outcome;

// Re-export commonly used types
pub use otp_outcome::{OtpOutcome, SendStatus, VerifyStatus};
