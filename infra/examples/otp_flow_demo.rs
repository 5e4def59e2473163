//! Example walking one phone number through the OTP flow
//!
//! Uses the provider selected by `SMS_PROVIDER` (default `mock`).
//!
//! Run with: cargo run --example otp_flow_demo -- +15551234567 [code]

use std::sync::Arc;

use pv_core::services::{VerificationService, VerificationServiceConfig};
use pv_infra::sms::{validate_env_config, SmsServiceAdapter};
use pv_shared::{Environment, LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    let logging = LoggingConfig::for_environment(environment);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().pretty().with_env_filter(filter).init(),
        LogFormat::Compact => tracing_subscriber::fmt().compact().with_env_filter(filter).init(),
    }

    let validation = validate_env_config();
    if !validation.valid {
        anyhow::bail!(validation.error.unwrap_or_else(|| "Invalid SMS configuration".to_string()));
    }

    let adapter = SmsServiceAdapter::from_env()?;
    let service = VerificationService::new(Arc::new(adapter), VerificationServiceConfig::default());

    let mut args = std::env::args().skip(1);
    let phone = args.next().unwrap_or_else(|| "+15551234567".to_string());

    tracing::info!(%environment, provider = service.provider_name(), "Starting OTP demo");

    let outcome = service.request_otp(&phone).await;
    println!("request: success={} message={}", outcome.success, outcome.message);

    if let Some(code) = args.next() {
        let outcome = service.verify_otp(&phone, &code).await;
        println!("verify: success={} message={}", outcome.success, outcome.message);
    } else {
        let outcome = service.verify_otp(&phone, "000000").await;
        println!("verify (wrong code): success={} message={}", outcome.success, outcome.message);
    }

    Ok(())
}
