//! Runtime configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any key or
//! image is produced.
//!
//! ```bash
//! export MACHINE_ID="7"
//! export REDIRECT_BASE_URL="https://zaplink.app"
//! export LOGO_RESOURCE_DIR="./resources"
//! ```
//!
//! ## Optional Variables
//!
//! - `MACHINE_ID` - Short-key generator machine id, 0-1023 (default: `0`)
//! - `KEY_FOLD_MODULUS` - Modulus folding ids into keys (default: `62^8`)
//! - `REDIRECT_BASE_URL` - Base of dynamic QR redirect links (default: `https://zaplink.app`)
//! - `LOGO_RESOURCE_DIR` - Root for local logo paths (default: `resources`)
//! - `LOGO_FETCH_TIMEOUT_SECS` - HTTP timeout for remote logos (default: `5`)
//! - `QR_MAX_SIZE` - Largest accepted image size in pixels (default: `4096`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use url::Url;

use crate::keygen::KEY_SPACE;
use crate::keygen::snowflake::MAX_MACHINE_ID;

/// Smallest image that can hold a version 1 symbol at one pixel per module.
pub const MIN_QR_SIZE: u32 = 21;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub machine_id: u16,
    pub key_fold_modulus: u64,
    /// Dynamic QR codes encode `{redirect_base_url}/r/{key}`.
    pub redirect_base_url: String,
    pub logo_resource_dir: String,
    pub logo_fetch_timeout_secs: u64,
    pub qr_max_size: u32,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            machine_id: 0,
            key_fold_modulus: KEY_SPACE,
            redirect_base_url: "https://zaplink.app".to_string(),
            logo_resource_dir: "resources".to_string(),
            logo_fetch_timeout_secs: 5,
            qr_max_size: 4096,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let machine_id = parse_var("MACHINE_ID", defaults.machine_id)?;
        let key_fold_modulus = parse_var("KEY_FOLD_MODULUS", defaults.key_fold_modulus)?;
        let logo_fetch_timeout_secs =
            parse_var("LOGO_FETCH_TIMEOUT_SECS", defaults.logo_fetch_timeout_secs)?;
        let qr_max_size = parse_var("QR_MAX_SIZE", defaults.qr_max_size)?;

        let redirect_base_url = env::var("REDIRECT_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.redirect_base_url);
        let logo_resource_dir = env::var("LOGO_RESOURCE_DIR").unwrap_or(defaults.logo_resource_dir);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            machine_id,
            key_fold_modulus,
            redirect_base_url,
            logo_resource_dir,
            logo_fetch_timeout_secs,
            qr_max_size,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `machine_id` is above 1023
    /// - `key_fold_modulus` is 0 or above `62^8`
    /// - `redirect_base_url` is not an absolute http(s) URL
    /// - `logo_fetch_timeout_secs` is 0
    /// - `qr_max_size` is below 21
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.machine_id > MAX_MACHINE_ID {
            anyhow::bail!(
                "MACHINE_ID must be between 0 and {}, got {}",
                MAX_MACHINE_ID,
                self.machine_id
            );
        }

        if self.key_fold_modulus == 0 || self.key_fold_modulus > KEY_SPACE {
            anyhow::bail!(
                "KEY_FOLD_MODULUS must be between 1 and {}, got {}",
                KEY_SPACE,
                self.key_fold_modulus
            );
        }

        let url = Url::parse(&self.redirect_base_url).with_context(|| {
            format!(
                "REDIRECT_BASE_URL must be an absolute URL, got '{}'",
                self.redirect_base_url
            )
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "REDIRECT_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.redirect_base_url
            );
        }

        if self.logo_fetch_timeout_secs == 0 {
            anyhow::bail!("LOGO_FETCH_TIMEOUT_SECS must be greater than 0");
        }

        if self.qr_max_size < MIN_QR_SIZE {
            anyhow::bail!(
                "QR_MAX_SIZE must be at least {}, got {}",
                MIN_QR_SIZE,
                self.qr_max_size
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Machine id: {}", self.machine_id);
        tracing::info!("  Key fold modulus: {}", self.key_fold_modulus);
        tracing::info!("  Redirect base URL: {}", self.redirect_base_url);
        tracing::info!("  Logo resources: {}", self.logo_resource_dir);
        tracing::info!("  Logo fetch timeout: {}s", self.logo_fetch_timeout_secs);
        tracing::info!("  Max QR size: {}px", self.qr_max_size);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads `name`, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "MACHINE_ID",
        "KEY_FOLD_MODULUS",
        "REDIRECT_BASE_URL",
        "LOGO_RESOURCE_DIR",
        "LOGO_FETCH_TIMEOUT_SECS",
        "QR_MAX_SIZE",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.machine_id = 1024;
        assert!(config.validate().is_err());
        config.machine_id = 1023;
        assert!(config.validate().is_ok());

        config.key_fold_modulus = 0;
        assert!(config.validate().is_err());
        config.key_fold_modulus = KEY_SPACE + 1;
        assert!(config.validate().is_err());
        config.key_fold_modulus = KEY_SPACE;

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.redirect_base_url = "zaplink.app".to_string();
        assert!(config.validate().is_err());
        config.redirect_base_url = "ftp://zaplink.app".to_string();
        assert!(config.validate().is_err());
        config.redirect_base_url = "http://localhost:8080".to_string();

        config.qr_max_size = 20;
        assert!(config.validate().is_err());
        config.qr_max_size = 21;

        config.logo_fetch_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.machine_id, 0);
        assert_eq!(config.key_fold_modulus, 218_340_105_584_896);
        assert_eq!(config.redirect_base_url, "https://zaplink.app");
        assert_eq!(config.logo_resource_dir, "resources");
        assert_eq!(config.qr_max_size, 4096);
    }

    #[test]
    #[serial]
    fn test_reads_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("MACHINE_ID", "42");
            env::set_var("KEY_FOLD_MODULUS", "1000");
            env::set_var("REDIRECT_BASE_URL", "https://qr.example.com/");
            env::set_var("QR_MAX_SIZE", "1024");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.machine_id, 42);
        assert_eq!(config.key_fold_modulus, 1000);
        assert_eq!(config.redirect_base_url, "https://qr.example.com");
        assert_eq!(config.qr_max_size, 1024);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparsable_number_is_error() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("MACHINE_ID", "node-7");
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("MACHINE_ID"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_out_of_range_machine_id_fails_validation() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("MACHINE_ID", "5000");
        }

        assert!(load_from_env().is_err());

        clear_env();
    }
}
