//! Business records as entered by a merchant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four-field merchant payment profile carried by a payment token.
///
/// A `BusinessRecord` only leaves the [`token`](crate::token) module in
/// trimmed, validated form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    pub business_name: String,
    pub bank_name: String,
    pub account_number: String,
    pub wallet_address: String,
}

impl BusinessRecord {
    pub fn new(
        business_name: impl Into<String>,
        bank_name: impl Into<String>,
        account_number: impl Into<String>,
        wallet_address: impl Into<String>,
    ) -> Self {
        Self {
            business_name: business_name.into(),
            bank_name: bank_name.into(),
            account_number: account_number.into(),
            wallet_address: wallet_address.into(),
        }
    }

    /// The value of a single field.
    pub fn field(&self, field: BusinessField) -> &str {
        match field {
            BusinessField::BusinessName => &self.business_name,
            BusinessField::BankName => &self.bank_name,
            BusinessField::AccountNumber => &self.account_number,
            BusinessField::WalletAddress => &self.wallet_address,
        }
    }

    /// A copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.business_name.trim(),
            self.bank_name.trim(),
            self.account_number.trim(),
            self.wallet_address.trim(),
        )
    }
}

/// Untrusted, record-shaped input.
///
/// Every field is kept as a raw JSON value so that a missing or
/// non-string field can be reported by name instead of failing the
/// whole parse. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<serde_json::Value>,
}

impl BusinessForm {
    /// The raw value of a single field, if present.
    pub fn field(&self, field: BusinessField) -> Option<&serde_json::Value> {
        match field {
            BusinessField::BusinessName => self.business_name.as_ref(),
            BusinessField::BankName => self.bank_name.as_ref(),
            BusinessField::AccountNumber => self.account_number.as_ref(),
            BusinessField::WalletAddress => self.wallet_address.as_ref(),
        }
    }
}

impl From<BusinessRecord> for BusinessForm {
    fn from(record: BusinessRecord) -> Self {
        Self {
            business_name: Some(record.business_name.into()),
            bank_name: Some(record.bank_name.into()),
            account_number: Some(record.account_number.into()),
            wallet_address: Some(record.wallet_address.into()),
        }
    }
}

/// The required fields of a business record, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BusinessField {
    BusinessName,
    BankName,
    AccountNumber,
    WalletAddress,
}

impl BusinessField {
    pub const ALL: [BusinessField; 4] = [
        BusinessField::BusinessName,
        BusinessField::BankName,
        BusinessField::AccountNumber,
        BusinessField::WalletAddress,
    ];

    /// The camelCase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessField::BusinessName => "businessName",
            BusinessField::BankName => "bankName",
            BusinessField::AccountNumber => "accountNumber",
            BusinessField::WalletAddress => "walletAddress",
        }
    }
}

impl fmt::Display for BusinessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
