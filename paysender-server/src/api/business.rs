//! Business QR generation and payment-page resolution.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kanau::processor::Processor;
use paysender_core::processors::{GenerateBusinessQr, GenerateError};
use paysender_sdk::objects::{
    ApiErrorBody, BusinessForm, BusinessRecord, PaymentPage, QrGenerationResponse,
};
use paysender_sdk::token::ValidationError;

use super::extractors::{BusinessDataError, PaymentData, decode_business};
use crate::state::AppState;

/// Errors returned by `POST /api/generate-business-qr`.
#[derive(Debug)]
pub enum GenerateApiError {
    InvalidBody(JsonRejection),
    Validation(ValidationError),
    Internal(GenerateError),
}

impl From<GenerateError> for GenerateApiError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Validation(e) => Self::Validation(e),
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for GenerateApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GenerateApiError::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection, "Unparsable business form");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid data format: expected an object".to_string(),
                )
            }
            GenerateApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            GenerateApiError::Internal(e) => {
                tracing::error!(error = %e, "QR generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate QR code".to_string(),
                )
            }
        };
        (status, Json(ApiErrorBody::new(message))).into_response()
    }
}

/// `POST /api/generate-business-qr` — register a business and get its payment QR.
pub(super) async fn generate_business_qr(
    State(state): State<AppState>,
    body: Result<Json<BusinessForm>, JsonRejection>,
) -> Result<Json<QrGenerationResponse>, GenerateApiError> {
    let Json(form) = body.map_err(GenerateApiError::InvalidBody)?;

    let generated = state
        .qr_generator()
        .await
        .process(GenerateBusinessQr::from(form))
        .await?;

    Ok(Json(generated.into()))
}

/// `GET /api/verify-business/{encoded_data}` — decode a token from the path.
pub(super) async fn verify_business(
    Path(encoded_data): Path<String>,
) -> Result<Json<BusinessRecord>, BusinessDataError> {
    decode_business(&encoded_data).map(Json)
}

/// `GET /payment?data=…` — resolve a scanned payment link.
pub async fn payment_page(PaymentData(business): PaymentData) -> Json<PaymentPage> {
    Json(PaymentPage::new(business))
}
