//! One-time passcode record for phone-based verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum number of failed verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Pending OTP for a single phone number
///
/// A record only exists while a verification is outstanding. It is removed
/// by the verification service on success, on expiry detection and once the
/// attempt limit is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// The 6-digit code, secret until consumed
    pub code: String,

    /// Number of failed verification attempts
    pub attempts: u32,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record for an already generated code
    pub fn new(code: String, expiration: Duration) -> Self {
        let now = Utc::now();
        Self {
            code,
            attempts: 0,
            created_at: now,
            expires_at: now + expiration,
        }
    }

    /// Creates a record with a freshly generated code
    pub fn issue(expiration: Duration) -> Self {
        Self::new(Self::generate_code(), expiration)
    }

    /// Generates a 6-digit code drawn uniformly from 100000..=999999
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Checks if the record has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks if the record has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks if the attempt budget is used up
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Compares a candidate against the stored code
    ///
    /// Exact byte equality, evaluated in constant time for equal lengths.
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Records a failed attempt and returns the new attempt count
    pub fn record_failure(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Gets the time remaining until expiration, zero once expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
