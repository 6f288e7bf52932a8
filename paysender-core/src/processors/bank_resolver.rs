//! Paystack bank API processor.
//!
//! Resolves the holder name of a bank account before a business registers,
//! and lists the banks offered on the registration form. Requests carry
//! the configured timeout and are never retried.

use crate::config::PaystackConfig;
use kanau::processor::Processor;
use paysender_sdk::objects::{AccountDetails, Bank, VerifyAccountResponse};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Message returned when Paystack rejects an account without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Could not verify account";

/// Errors that can occur while talking to Paystack.
#[derive(Debug, Error)]
pub enum BankError {
    /// No secret key is configured.
    #[error("paystack secret key is not configured")]
    NotConfigured,

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// A successful response could not be parsed.
    #[error("API response parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    /// API returned an error
    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),
}

/// Resolve the holder of an account.
#[derive(Debug, Clone)]
pub struct ResolveBankAccount {
    pub account_number: String,
    pub bank_code: String,
}

/// List the banks of a country.
#[derive(Debug, Clone)]
pub struct ListBanks {
    /// Paystack country slug, e.g. `nigeria`.
    pub country: String,
}

#[derive(Debug, Deserialize)]
struct PaystackResponse<T> {
    status: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ResolvedAccount {
    account_name: String,
    account_number: String,
}

/// Client for the Paystack bank endpoints.
pub struct PaystackResolver {
    http_client: reqwest::Client,
    config: PaystackConfig,
}

impl PaystackResolver {
    /// Create a resolver sharing an existing HTTP client.
    ///
    /// The configured timeout is applied per request, so the client can be
    /// shared across configuration reloads.
    pub fn new(http_client: reqwest::Client, config: PaystackConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
    }
}

impl Processor<ResolveBankAccount> for PaystackResolver {
    type Output = VerifyAccountResponse;
    type Error = BankError;

    #[tracing::instrument(skip_all, err, name = "Paystack:ResolveBankAccount")]
    async fn process(&self, request: ResolveBankAccount) -> Result<VerifyAccountResponse, BankError> {
        let secret = self
            .config
            .secret_key
            .as_deref()
            .ok_or(BankError::NotConfigured)?;

        let response = self
            .http_client
            .get(self.endpoint("bank/resolve")?)
            .timeout(self.config.timeout)
            .bearer_auth(secret)
            .query(&[
                ("account_number", request.account_number.as_str()),
                ("bank_code", request.bank_code.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, "Paystack account resolution responded");

        interpret_resolution(status, &body, request.bank_code)
    }
}

impl Processor<ListBanks> for PaystackResolver {
    type Output = Vec<Bank>;
    type Error = BankError;

    #[tracing::instrument(skip_all, err, name = "Paystack:ListBanks")]
    async fn process(&self, request: ListBanks) -> Result<Vec<Bank>, BankError> {
        let mut builder = self
            .http_client
            .get(self.endpoint("bank")?)
            .timeout(self.config.timeout)
            .query(&[("country", request.country.as_str())]);
        if let Some(secret) = self.config.secret_key.as_deref() {
            builder = builder.bearer_auth(secret);
        }

        let body = builder.send().await?.bytes().await?;
        interpret_bank_list(&body)
    }
}

/// Unwrap a Paystack `/bank` envelope. Anything but `status: true` with a
/// list is an API error.
fn interpret_bank_list(body: &[u8]) -> Result<Vec<Bank>, BankError> {
    let response: PaystackResponse<Vec<Bank>> = serde_json::from_slice(body)?;
    match response {
        PaystackResponse {
            status: true,
            data: Some(banks),
            ..
        } => Ok(banks),
        PaystackResponse { message, .. } => Err(BankError::ApiError {
            message: message.unwrap_or_else(|| "failed to list banks".to_string()),
        }),
    }
}

/// Map a Paystack `/bank/resolve` response onto a verification result.
///
/// Rejections (non-2xx or `status: false`) are a negative verification,
/// not an error. Only a 2xx body that cannot be parsed is an error.
fn interpret_resolution(
    status: StatusCode,
    body: &[u8],
    bank_code: String,
) -> Result<VerifyAccountResponse, BankError> {
    let parsed: Result<PaystackResponse<ResolvedAccount>, _> = serde_json::from_slice(body);
    match parsed {
        Ok(PaystackResponse {
            status: true,
            data: Some(account),
            ..
        }) if status.is_success() => Ok(VerifyAccountResponse::verified(AccountDetails {
            account_name: account.account_name,
            account_number: account.account_number,
            bank_code,
        })),
        Ok(PaystackResponse { message, .. }) => {
            warn!(%status, ?message, "Paystack rejected account resolution");
            Ok(VerifyAccountResponse::failed(
                message.unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            ))
        }
        Err(e) if status.is_success() => Err(BankError::Parse(e)),
        Err(_) => {
            warn!(%status, "Paystack returned an unreadable error response");
            Ok(VerifyAccountResponse::failed(DEFAULT_FAILURE_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_resolved_account() {
        let body = br#"{
            "status": true,
            "message": "Account number resolved",
            "data": {"account_number": "0123456789", "account_name": "ACME LTD", "bank_id": 9}
        }"#;
        let response = interpret_resolution(StatusCode::OK, body, "058".to_string()).unwrap();
        assert!(response.status);
        let data = response.data.unwrap();
        assert_eq!(data.account_name, "ACME LTD");
        assert_eq!(data.account_number, "0123456789");
        assert_eq!(data.bank_code, "058");
    }

    #[test]
    fn test_rejected_account_keeps_message() {
        let body = br#"{"status": false, "message": "Could not resolve account name"}"#;
        let response =
            interpret_resolution(StatusCode::UNPROCESSABLE_ENTITY, body, "058".to_string())
                .unwrap();
        assert!(!response.status);
        assert_eq!(
            response.message.as_deref(),
            Some("Could not resolve account name")
        );
    }

    #[test]
    fn test_unreadable_rejection_uses_default_message() {
        let response =
            interpret_resolution(StatusCode::BAD_GATEWAY, b"<html>", "058".to_string()).unwrap();
        assert!(!response.status);
        assert_eq!(response.message.as_deref(), Some(DEFAULT_FAILURE_MESSAGE));
    }

    #[test]
    fn test_unreadable_success_is_an_error() {
        let err = interpret_resolution(StatusCode::OK, b"not json", "058".to_string()).unwrap_err();
        assert!(matches!(err, BankError::Parse(_)));
    }

    #[test]
    fn test_bank_list() {
        let body = br#"{
            "status": true,
            "message": "Banks retrieved",
            "data": [
                {"id": 1, "name": "Access Bank", "slug": "access-bank", "code": "044"},
                {"id": 2, "name": "Zenith Bank", "slug": null, "code": "057"}
            ]
        }"#;
        let banks = interpret_bank_list(body).unwrap();
        assert_eq!(banks.len(), 2);
        assert_eq!(banks[0].code, "044");
        assert_eq!(banks[0].slug.as_deref(), Some("access-bank"));
        assert_eq!(banks[1].slug, None);
    }

    #[test]
    fn test_bank_list_rejection() {
        let err = interpret_bank_list(br#"{"status": false, "message": "Invalid key"}"#)
            .unwrap_err();
        assert!(matches!(err, BankError::ApiError { message } if message == "Invalid key"));

        // status true without a list
        let err = interpret_bank_list(br#"{"status": true}"#).unwrap_err();
        assert!(
            matches!(err, BankError::ApiError { message } if message == "failed to list banks")
        );

        let err = interpret_bank_list(b"<html>").unwrap_err();
        assert!(matches!(err, BankError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_secret_is_not_configured() {
        let config = PaystackConfig {
            base_url: Url::parse("https://api.paystack.co").unwrap(),
            secret_key: None,
            timeout: Duration::from_secs(1),
        };
        let resolver = PaystackResolver::new(reqwest::Client::new(), config);
        let err = resolver
            .process(ResolveBankAccount {
                account_number: "0123456789".to_string(),
                bank_code: "058".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BankError::NotConfigured));
    }
}
