//! Application state shared across all request handlers.

use crate::config::runtime::SharedConfig;
use paysender_core::processors::{BusinessQrGenerator, PaystackResolver};

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: SharedConfig,
    /// HTTP client shared by all outbound API calls.
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: SharedConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// A generator bound to the current QR configuration.
    pub async fn qr_generator(&self) -> BusinessQrGenerator {
        BusinessQrGenerator::new(self.config.qr.read().await.clone())
    }

    /// A resolver bound to the current Paystack configuration.
    pub async fn paystack_resolver(&self) -> PaystackResolver {
        let config = self.config.paystack.read().await.clone();
        PaystackResolver::new(self.http_client.clone(), config)
    }
}
