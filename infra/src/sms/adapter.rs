//! Adapter from infrastructure providers onto the core delivery seam

use async_trait::async_trait;
use pv_core::services::SmsServiceTrait;

use super::sms_service::SmsService;
use super::{create_from_env, create_sms_service};
use crate::{config::SmsConfig, InfrastructureError};

/// Wraps any [`SmsService`] so the verification engine can drive it
pub struct SmsServiceAdapter {
    inner: Box<dyn SmsService>,
}

impl SmsServiceAdapter {
    /// Wrap an already constructed provider
    pub fn new(inner: Box<dyn SmsService>) -> Self {
        Self { inner }
    }

    /// Build the configured provider and wrap it
    pub fn from_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        create_sms_service(config).map(Self::new)
    }

    /// Build the provider selected by the environment and wrap it
    pub fn from_env() -> Result<Self, InfrastructureError> {
        create_from_env().map(Self::new)
    }

    /// The wrapped provider
    pub fn inner(&self) -> &dyn SmsService {
        self.inner.as_ref()
    }
}

#[async_trait]
impl SmsServiceTrait for SmsServiceAdapter {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        self.inner
            .send_sms(phone, message)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
