//! Payment page objects.
//!
//! These are what a payer sees after scanning a business QR code.

use serde::{Deserialize, Serialize};

use super::business::BusinessRecord;

/// Asset accepted on the wallet payment option.
pub const WALLET_ASSET: &str = "USDC";

/// A resolved payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPage {
    pub business: BusinessRecord,
    pub options: Vec<PaymentOption>,
}

impl PaymentPage {
    /// Build the page for a business, offering bank transfer and wallet payment.
    pub fn new(business: BusinessRecord) -> Self {
        let options = vec![
            PaymentOption::Bank {
                bank_name: business.bank_name.clone(),
                account_number: business.account_number.clone(),
            },
            PaymentOption::Wallet {
                wallet_address: business.wallet_address.clone(),
                asset: WALLET_ASSET.to_string(),
            },
        ];
        Self { business, options }
    }
}

/// A way for the payer to settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum PaymentOption {
    #[serde(rename_all = "camelCase")]
    Bank {
        bank_name: String,
        account_number: String,
    },
    #[serde(rename_all = "camelCase")]
    Wallet {
        wallet_address: String,
        asset: String,
    },
}

/// Body of every failed API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
