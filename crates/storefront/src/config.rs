//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults match the bundled static site.
//!
//! - `DARIY_CATALOG_PATH` - Product catalog JSON (default: data/products.json)
//! - `DARIY_STORAGE_DIR` - Directory for persisted cart/favorites (default: .dariy)
//! - `DARIY_TOAST_DURATION_MS` - Time a toast stays fully visible (default: 2500)
//! - `DARIY_TOAST_EXIT_MS` - Toast exit transition length (default: 300)
//! - `DARIY_CONTACT_PHONE` - Shop phone number (default: +79999999999)
//! - `DARIY_CONTACT_TELEGRAM` - Telegram profile URL (default: https://t.me/dariyshopp)
//! - `DARIY_CONTACT_WHATSAPP` - WhatsApp chat URL (default: https://wa.me/79999999999)
//! - `DARIY_CONTACT_EMAIL` - Shop email address (default: hello@dariy.lv)

use std::path::PathBuf;
use std::time::Duration;

use dariy_core::PhoneNumber;
use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_PATH: &str = "data/products.json";
const DEFAULT_STORAGE_DIR: &str = ".dariy";
const DEFAULT_TOAST_DURATION_MS: &str = "2500";
const DEFAULT_TOAST_EXIT_MS: &str = "300";
const DEFAULT_PHONE: &str = "+79999999999";
const DEFAULT_TELEGRAM: &str = "https://t.me/dariyshopp";
const DEFAULT_WHATSAPP: &str = "https://wa.me/79999999999";
const DEFAULT_EMAIL: &str = "hello@dariy.lv";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Path of the bundled product catalog
    pub catalog_path: PathBuf,
    /// Directory holding the persisted store slots
    pub storage_dir: PathBuf,
    /// Toast display timings
    pub toast: ToastTimings,
    /// Shop contact channels used for the checkout hand-off
    pub contact: ContactConfig,
}

/// How long a toast stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    /// Fully visible duration before the exit transition starts
    pub visible: Duration,
    /// Exit transition duration; the message is cleared when it ends
    pub exit: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(2500),
            exit: Duration::from_millis(300),
        }
    }
}

/// Shop contact channels.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// Phone number for calls
    pub phone: PhoneNumber,
    /// Telegram profile URL
    pub telegram: Url,
    /// WhatsApp chat URL
    pub whatsapp: Url,
    /// Email address
    pub email: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let catalog_path = PathBuf::from(get("DARIY_CATALOG_PATH", DEFAULT_CATALOG_PATH));
        let storage_dir = PathBuf::from(get("DARIY_STORAGE_DIR", DEFAULT_STORAGE_DIR));

        let toast = ToastTimings {
            visible: parse_millis(
                "DARIY_TOAST_DURATION_MS",
                &get("DARIY_TOAST_DURATION_MS", DEFAULT_TOAST_DURATION_MS),
            )?,
            exit: parse_millis(
                "DARIY_TOAST_EXIT_MS",
                &get("DARIY_TOAST_EXIT_MS", DEFAULT_TOAST_EXIT_MS),
            )?,
        };

        let contact = ContactConfig {
            phone: get("DARIY_CONTACT_PHONE", DEFAULT_PHONE)
                .parse::<PhoneNumber>()
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("DARIY_CONTACT_PHONE".to_string(), e.to_string())
                })?,
            telegram: parse_url(
                "DARIY_CONTACT_TELEGRAM",
                &get("DARIY_CONTACT_TELEGRAM", DEFAULT_TELEGRAM),
            )?,
            whatsapp: parse_url(
                "DARIY_CONTACT_WHATSAPP",
                &get("DARIY_CONTACT_WHATSAPP", DEFAULT_WHATSAPP),
            )?,
            email: validate_email("DARIY_CONTACT_EMAIL", get("DARIY_CONTACT_EMAIL", DEFAULT_EMAIL))?,
        };

        Ok(Self {
            catalog_path,
            storage_dir,
            toast,
            contact,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a millisecond duration.
fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse an absolute `https` URL.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected an https URL, got scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Basic email validation.
fn validate_email(key: &str, email: String) -> Result<String, ConfigError> {
    let email = email.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(email)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("'{email}' is not an email address"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("data/products.json"));
        assert_eq!(config.storage_dir, PathBuf::from(".dariy"));
        assert_eq!(config.toast, ToastTimings::default());
        assert_eq!(config.contact.phone.digits(), "79999999999");
        assert_eq!(config.contact.telegram.as_str(), "https://t.me/dariyshopp");
        assert_eq!(config.contact.email, "hello@dariy.lv");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DARIY_STORAGE_DIR", "/tmp/dariy"),
            ("DARIY_TOAST_DURATION_MS", "1000"),
            ("DARIY_TOAST_EXIT_MS", "0"),
            ("DARIY_CONTACT_PHONE", "+7 (928) 000-00-00"),
        ])
        .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/dariy"));
        assert_eq!(config.toast.visible, Duration::from_millis(1000));
        assert_eq!(config.toast.exit, Duration::ZERO);
        assert_eq!(config.contact.phone.digits(), "79280000000");
    }

    #[test]
    fn test_invalid_duration() {
        let err = config_from(&[("DARIY_TOAST_DURATION_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "DARIY_TOAST_DURATION_MS"));
    }

    #[test]
    fn test_rejects_plain_http_contact_url() {
        let err = config_from(&[("DARIY_CONTACT_TELEGRAM", "http://t.me/dariyshopp")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "DARIY_CONTACT_TELEGRAM"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(config_from(&[("DARIY_CONTACT_EMAIL", "nobody")]).is_err());
        assert!(config_from(&[("DARIY_CONTACT_EMAIL", "@dariy.lv")]).is_err());
    }
}
