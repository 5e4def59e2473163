//! Mock SMS Service Implementation
//!
//! Development provider that writes messages to the log sink instead of
//! sending them. Sends always succeed unless failure simulation is switched
//! on, which only tests do.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use pv_shared::phone::{is_e164, mask_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Simulated network delay per message
const DEFAULT_LATENCY: Duration = Duration::from_millis(100);

/// A message accepted by the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Generated message id
    pub message_id: String,
    /// Destination number, unmasked
    pub to: String,
    /// Message body
    pub body: String,
}

/// Mock SMS service for development and testing
///
/// Clones share the message counter and the sent-message log.
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Every accepted message, oldest first
    sent: Arc<Mutex<Vec<SentMessage>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
    /// Delay applied before each send completes
    latency: Duration,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::with_options(false, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
            simulate_failure,
            console_output,
            latency: DEFAULT_LATENCY,
        }
    }

    /// Override the simulated network delay
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter and the sent-message log
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
        self.sent_log().clear();
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    /// Messages accepted so far
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent_log().clone()
    }

    /// Last message accepted for a destination
    pub fn last_message_to(&self, phone_number: &str) -> Option<SentMessage> {
        self.sent_log()
            .iter()
            .rev()
            .find(|m| m.to == phone_number)
            .cloned()
    }

    fn sent_log(&self) -> std::sync::MutexGuard<'_, Vec<SentMessage>> {
        self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);

        if self.simulate_failure {
            warn!(
                "Mock SMS service simulating failure for phone: {}",
                masked_phone
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string()
            ));
        }

        if !is_e164(phone_number) {
            warn!(
                target: "sms_service",
                phone = %masked_phone,
                "Destination is not in E.164 format, a real gateway would reject it"
            );
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        self.sent_log().push(SentMessage {
            message_id: message_id.clone(),
            to: phone_number.to_string(),
            body: message.to_string(),
        });

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", masked_phone);
            println!("Message ID: {}", message_id);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        // Development sink, the body carries the code
        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            body = %message,
            "SMS sent successfully (mock)"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
