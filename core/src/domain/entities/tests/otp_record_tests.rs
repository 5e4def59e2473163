//! Unit tests for the OTP record entity

use std::collections::HashSet;
use std::thread;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use crate::domain::entities::otp_record::{
    OtpRecord, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};

#[test]
fn test_issue_record() {
    let record = OtpRecord::issue(Duration::minutes(DEFAULT_EXPIRATION_MINUTES));

    assert_eq!(record.code.len(), CODE_LENGTH);
    assert_eq!(record.attempts, 0);
    assert!(!record.is_expired());
    assert!(!record.is_exhausted(MAX_ATTEMPTS));
    assert_eq!(
        record.expires_at,
        record.created_at + Duration::minutes(DEFAULT_EXPIRATION_MINUTES)
    );
}

#[test]
fn test_generate_code_format() {
    for _ in 0..1000 {
        let code = OtpRecord::generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let num: u32 = code.parse().expect("Generated code should be a valid number");
        assert!((CODE_MIN..=CODE_MAX).contains(&num));
    }
}

#[test]
fn test_code_uniqueness() {
    let codes: HashSet<String> = (0..100).map(|_| OtpRecord::generate_code()).collect();
    assert!(codes.len() > 1);
}

#[test]
fn test_matches_is_exact() {
    let record = OtpRecord::new("123456".to_string(), Duration::minutes(5));

    assert!(record.matches("123456"));
    assert!(!record.matches("123457"));
    assert!(!record.matches(" 123456"));
    assert!(!record.matches("12345"));
    assert!(!record.matches(""));
}

#[test]
fn test_record_failure_counts_down() {
    let mut record = OtpRecord::new("123456".to_string(), Duration::minutes(5));

    assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 3);
    assert_eq!(record.record_failure(), 1);
    assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 2);
    assert_eq!(record.record_failure(), 2);
    assert_eq!(record.record_failure(), 3);
    assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 0);
    assert!(record.is_exhausted(MAX_ATTEMPTS));

    // Never underflows
    record.record_failure();
    assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 0);
}

#[test]
fn test_is_expired() {
    let record = OtpRecord::new("123456".to_string(), Duration::zero());
    thread::sleep(StdDuration::from_millis(10));

    assert!(record.is_expired());
    assert_eq!(record.time_until_expiration(), Duration::zero());
}

#[test]
fn test_is_expired_at_boundary() {
    let record = OtpRecord::new("123456".to_string(), Duration::minutes(5));

    // Expiry is strict: the exact expiry instant is still valid
    assert!(!record.is_expired_at(record.expires_at));
    assert!(record.is_expired_at(record.expires_at + Duration::milliseconds(1)));
    assert!(!record.is_expired_at(Utc::now()));
}

#[test]
fn test_time_until_expiration() {
    let record = OtpRecord::issue(Duration::minutes(DEFAULT_EXPIRATION_MINUTES));

    let time_remaining = record.time_until_expiration();
    assert!(time_remaining <= Duration::minutes(DEFAULT_EXPIRATION_MINUTES));
    assert!(time_remaining > Duration::minutes(DEFAULT_EXPIRATION_MINUTES - 1));
}

#[test]
fn test_serialization() {
    let record = OtpRecord::issue(Duration::minutes(5));

    let json = serde_json::to_string(&record).unwrap();
    let deserialized: OtpRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(record, deserialized);
}
