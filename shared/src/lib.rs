//! Shared utilities and common types for the PhoneVerify server
//!
//! This crate provides common functionality used across all server modules:
//! - Environment detection and logging configuration
//! - Phone number helpers (masking, E.164 checks)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{Environment, LogFormat, LoggingConfig};
pub use utils::phone;
