//! Trait for SMS delivery integration

use async_trait::async_trait;

/// Delivery seam used by the verification service
///
/// Implementations live in the infrastructure layer. The error string is
/// only logged; it is never surfaced to the end user.
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send a text message, returning the provider message id
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String>;
    /// Name of the underlying provider, for logging
    fn provider_name(&self) -> &str;
}
