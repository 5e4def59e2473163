//! In-memory OTP storage keyed by phone number

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::entities::otp_record::OtpRecord;

/// Map from phone number to its single pending OTP record
///
/// All access goes through one mutex so that the verification
/// check-then-mutate sequence runs as a single critical section. Expired
/// records are only reclaimed when a verification touches them or when
/// [`OtpStore::purge_expired`] is called; nothing sweeps in the background.
#[derive(Debug, Default)]
pub struct OtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
}

impl OtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing (and returning) any previous one for the number
    pub async fn insert(&self, phone: &str, record: OtpRecord) -> Option<OtpRecord> {
        self.records.lock().await.insert(phone.to_string(), record)
    }

    /// Snapshot of the pending record for a number
    pub async fn get(&self, phone: &str) -> Option<OtpRecord> {
        self.records.lock().await.get(phone).cloned()
    }

    /// Remove the pending record for a number
    pub async fn remove(&self, phone: &str) -> Option<OtpRecord> {
        self.records.lock().await.remove(phone)
    }

    /// Check if a record is pending for a number
    pub async fn contains(&self, phone: &str) -> bool {
        self.records.lock().await.contains_key(phone)
    }

    /// Number of pending records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Check if no record is pending
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Drop every record that has expired at `now`, returning how many were removed
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        before - records.len()
    }

    /// Exclusive access for multi-step transitions
    pub(super) async fn lock(&self) -> MutexGuard<'_, HashMap<String, OtpRecord>> {
        self.records.lock().await
    }
}
