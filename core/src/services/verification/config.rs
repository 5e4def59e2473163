//! Configuration for the verification service

use chrono::Duration;

use crate::domain::entities::otp_record::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// How long an issued code stays valid
    pub code_expiration: Duration,
    /// Maximum number of failed verification attempts allowed
    pub max_attempts: u32,
}

impl VerificationServiceConfig {
    /// Whole minutes of validity, as quoted in the SMS body
    pub fn expiration_minutes(&self) -> i64 {
        self.code_expiration.num_minutes()
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration: Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
            max_attempts: MAX_ATTEMPTS,
        }
    }
}
