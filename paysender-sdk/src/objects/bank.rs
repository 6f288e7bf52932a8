//! Bank account verification objects.
//!
//! Field names follow the snake_case convention of the upstream
//! account-resolution API.

use serde::{Deserialize, Serialize};

/// Request body of `POST /api/verify-account`.
///
/// Both fields are optional on the wire so that their absence can be
/// reported instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyAccountRequest {
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bank_code: Option<String>,
}

/// Response of `POST /api/verify-account`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyAccountResponse {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AccountDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyAccountResponse {
    pub fn verified(data: AccountDetails) -> Self {
        Self {
            status: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// A resolved bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub account_name: String,
    pub account_number: String,
    pub bank_code: String,
}

/// An entry of the bank list shown on the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}
