//! Bank account resolution API configuration.

use std::time::Duration;
use url::Url;

/// Paystack API settings.
#[derive(Debug, Clone)]
pub struct PaystackConfig {
    /// API root, e.g. `https://api.paystack.co`.
    pub base_url: Url,
    /// Secret key sent as a bearer token. Account resolution is unavailable without it.
    pub secret_key: Option<String>,
    /// Timeout applied to every API request.
    pub timeout: Duration,
}
