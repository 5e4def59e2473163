//! Deployment environment and the logging defaults derived from it

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Variables consulted by [`Environment::from_env`], first set one wins
pub const ENVIRONMENT_VARS: [&str; 3] = ["ENVIRONMENT", "ENV", "RUST_ENV"];

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Read the environment from [`ENVIRONMENT_VARS`]
    ///
    /// Unset or unrecognised values fall back to development.
    pub fn from_env() -> Self {
        ENVIRONMENT_VARS
            .iter()
            .find_map(|key| env::var(key).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

/// Logging defaults for one environment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
    /// Echo mock SMS messages to stdout as well as the log sink
    #[serde(default)]
    pub console_sms: bool,
}

impl LoggingConfig {
    /// Development logs verbosely and echoes mock SMS; deployed
    /// environments log JSON and keep codes off stdout.
    pub fn for_environment(env: Environment) -> Self {
        let (level, format, console_sms) = match env {
            Environment::Development => ("debug", LogFormat::Pretty, true),
            Environment::Staging => ("info", LogFormat::Json, false),
            Environment::Production => ("warn", LogFormat::Json, false),
        };

        Self {
            level: level.to_string(),
            format,
            console_sms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(" Staging ".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("invalid".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_display_round_trips() {
        for env in [Environment::Development, Environment::Staging, Environment::Production] {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
    }

    #[test]
    fn test_logging_config_for_environment() {
        let dev_log = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev_log.level, "debug");
        assert_eq!(dev_log.format, LogFormat::Pretty);
        assert!(dev_log.console_sms);

        let staging_log = LoggingConfig::for_environment(Environment::Staging);
        assert_eq!(staging_log.level, "info");
        assert!(!staging_log.console_sms);

        let prod_log = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod_log.level, "warn");
        assert_eq!(prod_log.format, LogFormat::Json);
        assert!(!prod_log.console_sms);
    }

    #[test]
    fn test_logging_config_deserialize() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level":"trace","format":"compact"}"#).unwrap();
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.console_sms);
    }
}
