//! Unit tests for the core seam adapter

use std::time::Duration;

use pv_core::services::SmsServiceTrait;

use crate::config::SmsConfig;
use crate::sms::{MockSmsService, SmsServiceAdapter};

#[tokio::test]
async fn test_adapter_forwards_send() {
    let mock = MockSmsService::with_options(false, false).with_latency(Duration::ZERO);
    let adapter = SmsServiceAdapter::new(Box::new(mock.clone()));

    let id = adapter.send_sms("+15551234567", "hello").await.unwrap();

    assert!(id.starts_with("mock_"));
    assert_eq!(mock.get_message_count(), 1);
    assert_eq!(SmsServiceTrait::provider_name(&adapter), "Mock");
}

#[tokio::test]
async fn test_adapter_stringifies_provider_errors() {
    let mock = MockSmsService::with_options(false, true).with_latency(Duration::ZERO);
    let adapter = SmsServiceAdapter::new(Box::new(mock));

    let err = adapter.send_sms("+15551234567", "hello").await.unwrap_err();
    assert!(err.contains("Simulated SMS sending failure"));
}

#[test]
fn test_adapter_from_config_propagates_factory_errors() {
    let config = SmsConfig {
        provider: "aws-sns".to_string(),
        ..Default::default()
    };
    assert!(SmsServiceAdapter::from_config(&config).is_err());

    let adapter = SmsServiceAdapter::from_config(&SmsConfig::mock()).unwrap();
    assert_eq!(adapter.inner().provider_name(), "Mock");
}
