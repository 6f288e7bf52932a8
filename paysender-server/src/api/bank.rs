//! Bank account verification and bank listing, proxied to Paystack.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kanau::processor::Processor;
use paysender_core::processors::{BankError, ListBanks, ResolveBankAccount};
use paysender_sdk::objects::{ApiErrorBody, Bank, VerifyAccountRequest, VerifyAccountResponse};
use serde::Deserialize;

use crate::state::AppState;

const DEFAULT_COUNTRY: &str = "nigeria";

/// Errors returned by `POST /api/verify-account`.
///
/// Every variant answers with a [`VerifyAccountResponse`] so that clients
/// always read the same shape.
#[derive(Debug)]
pub enum VerifyAccountError {
    MissingFields,
    NotConfigured,
    Upstream(BankError),
}

impl IntoResponse for VerifyAccountError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            VerifyAccountError::MissingFields => (
                StatusCode::BAD_REQUEST,
                "Account number and bank code are required",
            ),
            VerifyAccountError::NotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Bank account verification is not available",
            ),
            VerifyAccountError::Upstream(e) => {
                tracing::error!(error = %e, "Bank account verification failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error verifying bank account. Please try again",
                )
            }
        };
        (status, Json(VerifyAccountResponse::failed(message))).into_response()
    }
}

impl From<BankError> for VerifyAccountError {
    fn from(err: BankError) -> Self {
        match err {
            BankError::NotConfigured => Self::NotConfigured,
            other => Self::Upstream(other),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `POST /api/verify-account` — resolve the holder name of a bank account.
///
/// A rejection by Paystack is a normal `200` with `status: false`.
pub(super) async fn verify_account(
    State(state): State<AppState>,
    body: Result<Json<VerifyAccountRequest>, JsonRejection>,
) -> Result<Json<VerifyAccountResponse>, VerifyAccountError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let (Some(account_number), Some(bank_code)) = (
        non_blank(request.account_number),
        non_blank(request.bank_code),
    ) else {
        return Err(VerifyAccountError::MissingFields);
    };

    let response = state
        .paystack_resolver()
        .await
        .process(ResolveBankAccount {
            account_number,
            bank_code,
        })
        .await?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub(super) struct BanksQuery {
    country: Option<String>,
}

/// Errors returned by `GET /api/banks`.
#[derive(Debug)]
pub struct ListBanksError(BankError);

impl IntoResponse for ListBanksError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Failed to fetch bank list");
        (
            StatusCode::BAD_GATEWAY,
            Json(ApiErrorBody::new("Failed to fetch bank list")),
        )
            .into_response()
    }
}

/// `GET /api/banks?country=…` — banks offered on the registration form.
pub(super) async fn list_banks(
    State(state): State<AppState>,
    Query(query): Query<BanksQuery>,
) -> Result<Json<Vec<Bank>>, ListBanksError> {
    let country = non_blank(query.country).unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

    let banks = state
        .paystack_resolver()
        .await
        .process(ListBanks { country })
        .await
        .map_err(ListBanksError)?;

    Ok(Json(banks))
}
