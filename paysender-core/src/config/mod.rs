//! Configuration types for PaySender.
//!
//! These types represent the validated runtime configuration used by the
//! server. The actual config loading/parsing is handled by the server crate.

mod conversion;
mod paystack;
mod qr;
mod server;

pub use conversion::ConversionConfig;
pub use paystack::PaystackConfig;
pub use qr::{OutputMode, QrGeneratorConfig};
pub use server::ServerConfig;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared configuration state with separate locks for each section.
///
/// This allows independent access to different configuration sections
/// without blocking other readers/writers.
#[derive(Clone)]
pub struct SharedConfig {
    /// QR generation settings.
    pub qr: Arc<RwLock<QrGeneratorConfig>>,
    /// Bank account resolution API settings.
    pub paystack: Arc<RwLock<PaystackConfig>>,
    /// Naira → USDC display rate.
    pub conversion: Arc<RwLock<ConversionConfig>>,
}

impl SharedConfig {
    pub fn new(
        qr: QrGeneratorConfig,
        paystack: PaystackConfig,
        conversion: ConversionConfig,
    ) -> Self {
        Self {
            qr: Arc::new(RwLock::new(qr)),
            paystack: Arc::new(RwLock::new(paystack)),
            conversion: Arc::new(RwLock::new(conversion)),
        }
    }
}
