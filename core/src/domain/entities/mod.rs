//! Domain entities representing core business objects.

pub mod otp_record;

#[cfg(test)]
mod tests;

pub use otp_record::{
    OtpRecord, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};
