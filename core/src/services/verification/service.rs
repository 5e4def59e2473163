//! Main verification service implementation

use std::sync::Arc;

use chrono::Utc;
use pv_shared::phone::mask_phone_number;

use crate::domain::entities::otp_record::OtpRecord;
use crate::domain::value_objects::otp_outcome::{OtpOutcome, SendStatus, VerifyStatus};

use super::config::VerificationServiceConfig;
use super::store::OtpStore;
use super::traits::SmsServiceTrait;

/// Verification service issuing and checking one-time passcodes
///
/// The service exclusively owns its [`OtpStore`] and holds the SMS delivery
/// seam for its whole lifetime. It is meant to be constructed once at startup
/// and shared by reference (or behind an `Arc`) with whatever calls it.
pub struct VerificationService<S: SmsServiceTrait> {
    /// SMS service for sending messages
    sms_service: Arc<S>,
    /// Pending codes keyed by phone number
    store: OtpStore,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S: SmsServiceTrait> VerificationService<S> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `sms_service` - SMS delivery implementation
    /// * `config` - Service configuration
    pub fn new(sms_service: Arc<S>, config: VerificationServiceConfig) -> Self {
        tracing::info!(
            provider = sms_service.provider_name(),
            max_attempts = config.max_attempts,
            expiration_seconds = config.code_expiration.num_seconds(),
            "Verification service initialized"
        );

        Self {
            sms_service,
            store: OtpStore::new(),
            config,
        }
    }

    /// Service configuration
    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Name of the delivery provider in use
    pub fn provider_name(&self) -> &str {
        self.sms_service.provider_name()
    }

    /// Generate a 6-digit code in 100000..=999999
    pub fn generate_code() -> String {
        OtpRecord::generate_code()
    }

    /// Issue a new code for a phone number and send it
    ///
    /// Any code previously pending for the same number is replaced. The
    /// returned outcome never contains the code itself.
    pub async fn request_otp(&self, phone: &str) -> OtpOutcome {
        self.send_code(phone).await.into()
    }

    /// Issue and dispatch a code, reporting the typed delivery status
    ///
    /// The record is stored before sending. When delivery fails the record is
    /// kept, so a code that never reached the user stays verifiable until it
    /// expires or is replaced.
    pub async fn send_code(&self, phone: &str) -> SendStatus {
        let masked_phone = mask_phone_number(phone);
        let record = OtpRecord::issue(self.config.code_expiration);
        let code = record.code.clone();
        let expires_at = record.expires_at;

        if self.store.insert(phone, record).await.is_some() {
            tracing::info!(
                phone = %masked_phone,
                event = "invalidate_previous_code",
                "Replaced pending verification code for phone number"
            );
        }

        tracing::info!(
            phone = %masked_phone,
            event = "otp_generated",
            expires_at = %expires_at,
            "Generated new verification code for phone number"
        );

        let message = format!(
            "Your verification code is: {}. Valid for {} minutes.",
            code,
            self.config.expiration_minutes()
        );

        match self.sms_service.send_sms(phone, &message).await {
            Ok(message_id) => {
                tracing::info!(
                    phone = %masked_phone,
                    provider = self.sms_service.provider_name(),
                    message_id = %message_id,
                    event = "otp_sent",
                    "Verification code sent"
                );
                SendStatus::Sent {
                    masked_phone,
                    message_id,
                }
            }
            Err(e) => {
                tracing::error!(
                    phone = %masked_phone,
                    provider = self.sms_service.provider_name(),
                    error = %e,
                    event = "otp_send_failed",
                    "Failed to send verification code"
                );
                SendStatus::DeliveryFailed
            }
        }
    }

    /// Verify a submitted code
    pub async fn verify_otp(&self, phone: &str, candidate: &str) -> OtpOutcome {
        self.verify_status(phone, candidate).await.into()
    }

    /// Verify a submitted code, reporting the typed transition
    ///
    /// Checks run in order: presence, expiry, attempt limit, equality. The
    /// whole sequence holds the store lock, so concurrent attempts for the
    /// same number cannot both observe the same attempt count.
    pub async fn verify_status(&self, phone: &str, candidate: &str) -> VerifyStatus {
        let masked_phone = mask_phone_number(phone);
        let max_attempts = self.config.max_attempts;
        let now = Utc::now();

        let mut records = self.store.lock().await;

        let Some(record) = records.get_mut(phone) else {
            tracing::info!(
                phone = %masked_phone,
                event = "otp_not_found",
                "No pending verification code for phone number"
            );
            return VerifyStatus::NotFound;
        };

        if record.is_expired_at(now) {
            records.remove(phone);
            tracing::warn!(
                phone = %masked_phone,
                event = "otp_expired",
                "Verification code expired"
            );
            return VerifyStatus::Expired;
        }

        if record.is_exhausted(max_attempts) {
            records.remove(phone);
            tracing::warn!(
                phone = %masked_phone,
                event = "max_attempts_exceeded",
                "Verification attempted after attempt limit was reached"
            );
            return VerifyStatus::TooManyAttempts;
        }

        if record.matches(candidate) {
            records.remove(phone);
            tracing::info!(
                phone = %masked_phone,
                event = "otp_verified_success",
                "Verification code successfully verified"
            );
            return VerifyStatus::Verified;
        }

        let attempts = record.record_failure();
        let remaining = record.remaining_attempts(max_attempts);

        tracing::warn!(
            phone = %masked_phone,
            event = "otp_verification_failed",
            attempts = attempts,
            remaining_attempts = remaining,
            "Verification code verification failed"
        );

        if remaining == 0 {
            records.remove(phone);
            tracing::error!(
                phone = %masked_phone,
                event = "max_attempts_exceeded",
                "Maximum verification attempts exceeded, code discarded"
            );
        }

        VerifyStatus::Invalid { remaining }
    }

    /// Check if a code is pending for a phone number
    ///
    /// Expired records still count until a verification or a purge removes them.
    pub async fn has_pending(&self, phone: &str) -> bool {
        self.store.contains(phone).await
    }

    /// Remaining attempts for the pending code, `None` when nothing is pending
    pub async fn remaining_attempts(&self, phone: &str) -> Option<u32> {
        self.store
            .get(phone)
            .await
            .map(|record| record.remaining_attempts(self.config.max_attempts))
    }

    /// Number of pending records held in memory
    pub async fn pending_count(&self) -> usize {
        self.store.len().await
    }

    /// Reclaim every expired record
    ///
    /// Expiry is otherwise lazy; callers that care about memory can run this
    /// periodically.
    pub async fn purge_expired(&self) -> usize {
        let purged = self.store.purge_expired(Utc::now()).await;
        if purged > 0 {
            tracing::debug!(purged = purged, event = "otp_purged", "Purged expired verification codes");
        }
        purged
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &OtpStore {
        &self.store
    }
}
