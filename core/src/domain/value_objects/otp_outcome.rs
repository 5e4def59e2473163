//! Outcome value objects returned by OTP request and verification.

use serde::{Deserialize, Serialize};

/// User-facing result of an OTP operation
///
/// Every request-time path ends in one of these; the message is safe to show
/// to the end user and never contains the code or raw provider errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpOutcome {
    /// Whether the operation succeeded
    pub success: bool,

    /// Actionable message for the end user
    pub message: String,
}

impl OtpOutcome {
    /// Creates a successful outcome
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Creates a failed outcome
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Result of dispatching a freshly issued code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendStatus {
    /// Provider accepted the message
    Sent {
        /// Destination with everything but the trailing digits masked
        masked_phone: String,
        /// Provider message identifier
        message_id: String,
    },
    /// Provider rejected the message or the transport failed
    DeliveryFailed,
}

impl From<SendStatus> for OtpOutcome {
    fn from(status: SendStatus) -> Self {
        match status {
            SendStatus::Sent { masked_phone, .. } => {
                OtpOutcome::success(format!("OTP sent to {}", masked_phone))
            }
            SendStatus::DeliveryFailed => {
                OtpOutcome::failure("Failed to send OTP. Please try again.")
            }
        }
    }
}

/// Transition taken by a single verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStatus {
    /// Code matched; the record was consumed
    Verified,
    /// No pending record for the phone number
    NotFound,
    /// Record had expired; it was deleted
    Expired,
    /// Attempt budget was already spent; the record was deleted
    TooManyAttempts,
    /// Code did not match
    Invalid {
        /// Attempts left before the record is discarded
        remaining: u32,
    },
}

impl VerifyStatus {
    /// Whether the attempt verified the phone number
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyStatus::Verified)
    }
}

impl From<VerifyStatus> for OtpOutcome {
    fn from(status: VerifyStatus) -> Self {
        match status {
            VerifyStatus::Verified => OtpOutcome::success("Phone number verified successfully!"),
            VerifyStatus::NotFound => {
                OtpOutcome::failure("OTP not found. Please request a new one.")
            }
            VerifyStatus::Expired => {
                OtpOutcome::failure("OTP has expired. Please request a new one.")
            }
            VerifyStatus::TooManyAttempts => {
                OtpOutcome::failure("Too many failed attempts. Please request a new OTP.")
            }
            VerifyStatus::Invalid { remaining } => OtpOutcome::failure(format!(
                "Invalid OTP. {} attempts remaining.",
                remaining
            )),
        }
    }
}
