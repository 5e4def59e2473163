//! # PhoneVerify Core
//!
//! Core business logic for phone number verification.
//! This crate contains the OTP domain entity, the verification outcome types
//! and the verification engine that issues and checks one-time passcodes
//! through an injected SMS delivery seam.

pub mod domain;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
