use rust_decimal::Decimal;

/// Naira → USDC conversion settings.
#[derive(Debug, Clone, Copy)]
pub struct ConversionConfig {
    /// Naira per USDC.
    pub naira_per_usdc: Decimal,
}
