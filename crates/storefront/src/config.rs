//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BONPRIX_BASE_URL` - Origin of the storefront server (e.g., <https://boncoinbonprix.com>)
//!
//! ## Optional
//! - `BONPRIX_WHATSAPP_NUMBER` - Primary contact number for order handoff
//! - `BONPRIX_SPEAKER_ACTIVE` - Read replies aloud by default (default: false)
//! - `BONPRIX_STORAGE_PATH` - Local storage file (default: .bonprix/storage.json)
//! - `BONPRIX_TYPING_DELAY_MS` - Reply reveal speed per character (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use bonprix_core::ContactNumber;
use thiserror::Error;
use url::Url;

const DEFAULT_STORAGE_PATH: &str = ".bonprix/storage.json";
const DEFAULT_TYPING_DELAY_MS: &str = "30";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin for the order and assistant endpoints
    pub base_url: Url,
    /// Primary WhatsApp number; checkout cannot hand off without it
    pub whatsapp_number: Option<ContactNumber>,
    /// Initial read-aloud flag when nothing is stored yet
    pub speaker_active: bool,
    /// Local key-value storage file
    pub storage_path: PathBuf,
    /// Delay between revealed characters
    pub typing_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let base_url = env.required("BONPRIX_BASE_URL")?;
        let base_url = Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("BONPRIX_BASE_URL".to_string(), e.to_string()))?;

        let whatsapp_number = env
            .optional("BONPRIX_WHATSAPP_NUMBER")
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                ContactNumber::parse(&v).map_err(|e| {
                    ConfigError::InvalidEnvVar("BONPRIX_WHATSAPP_NUMBER".to_string(), e.to_string())
                })
            })
            .transpose()?;

        let speaker_active = parse_bool(
            "BONPRIX_SPEAKER_ACTIVE",
            &env.or_default("BONPRIX_SPEAKER_ACTIVE", "false"),
        )?;

        let storage_path = PathBuf::from(env.or_default("BONPRIX_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        let typing_delay = env
            .or_default("BONPRIX_TYPING_DELAY_MS", DEFAULT_TYPING_DELAY_MS)
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BONPRIX_TYPING_DELAY_MS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            whatsapp_number,
            speaker_active,
            storage_path,
            typing_delay,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse a boolean flag, accepting the usual spellings.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
