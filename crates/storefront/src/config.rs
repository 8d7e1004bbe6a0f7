//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MARKETPLACE_STORAGE_DIR` - Directory for persisted client state (default: .marketplace)
//! - `MARKETPLACE_CART_KEY` - Storage key for the cart (default: `online_marketplace_cart`)
//! - `MARKETPLACE_WHATSAPP_NUMBER` - Seller number for checkout handoff (default: 6283897685406)
//! - `MARKETPLACE_API_BASE_URL` - Backend API base URL (default: <http://localhost:3000/api/>)

use std::path::PathBuf;

use marketplace_core::OrderId;
use thiserror::Error;
use url::Url;

use crate::storage::keys;

const DEFAULT_STORAGE_DIR: &str = ".marketplace";
const DEFAULT_WHATSAPP_NUMBER: &str = "6283897685406";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/";

/// Accepted WhatsApp number length (E.164 without the `+`).
const WHATSAPP_DIGITS: std::ops::RangeInclusive<usize> = 8..=15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory backing [`FileStorage`](crate::storage::FileStorage)
    pub storage_dir: PathBuf,
    /// Storage key the cart persists under
    pub cart_key: String,
    /// WhatsApp number (digits only, country code first) for order handoff
    pub whatsapp_number: String,
    /// Backend REST API base URL, always ending in `/`
    pub api_base_url: Url,
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

        let storage_dir =
            PathBuf::from(get_env_or_default("MARKETPLACE_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        let cart_key = get_env_or_default("MARKETPLACE_CART_KEY", keys::CART);
        if cart_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "MARKETPLACE_CART_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let whatsapp_number =
            get_env_or_default("MARKETPLACE_WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
        validate_whatsapp_number(&whatsapp_number, "MARKETPLACE_WHATSAPP_NUMBER")?;

        let api_base_url = parse_base_url(
            "MARKETPLACE_API_BASE_URL",
            &get_env_or_default("MARKETPLACE_API_BASE_URL", DEFAULT_API_BASE_URL),
        )?;

        Ok(Self {
            storage_dir,
            cart_key,
            whatsapp_number,
            api_base_url,
        })
    }

    /// Endpoint for order creation.
    #[must_use]
    pub fn orders_endpoint(&self) -> Url {
        self.api_base_url
            .join("orders")
            .unwrap_or_else(|_| self.api_base_url.clone())
    }

    /// Endpoint for looking up one order. The ID is percent-encoded.
    #[must_use]
    pub fn order_endpoint(&self, order_id: &OrderId) -> Url {
        let mut url = self.orders_endpoint();
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            urlencoding::encode(order_id.as_str())
        );
        url.set_path(&path);
        url
    }

    /// Endpoint for one page of the user's order history.
    #[must_use]
    pub fn order_history_endpoint(&self, page: u32, limit: u32) -> Url {
        let mut url = self.orders_endpoint();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate a WhatsApp number is digits only with a plausible length.
fn validate_whatsapp_number(number: &str, var_name: &str) -> Result<(), ConfigError> {
    if !WHATSAPP_DIGITS.contains(&number.len()) || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!(
                "must be {}-{} digits with country code and no '+' (got {number:?})",
                WHATSAPP_DIGITS.start(),
                WHATSAPP_DIGITS.end()
            ),
        ));
    }
    Ok(())
}

/// Parse an http(s) base URL, adding the trailing slash `Url::join` needs.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
