//! Unit tests for domain entities

mod otp_record_tests;
