//! Custom Axum extractors.
//!
//! Provides `PaymentData`, which reads the `data` query parameter of a
//! payment link and decodes it into a validated [`BusinessRecord`].
//! Token handling is delegated to [`paysender_sdk::token`].

use axum::{
    Json,
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use paysender_sdk::link::DATA_PARAM;
use paysender_sdk::objects::{ApiErrorBody, BusinessRecord};
use paysender_sdk::token::{self, TokenError, ValidationError};
use std::collections::HashMap;

/// Errors produced while turning a payment token into a business record.
#[derive(Debug, thiserror::Error)]
pub enum BusinessDataError {
    #[error("No business data available")]
    Missing,
    #[error("Invalid business data format")]
    Malformed,
    #[error(transparent)]
    Invalid(ValidationError),
}

impl From<TokenError> for BusinessDataError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Validation(e) => Self::Invalid(e),
            TokenError::Malformed(_) | TokenError::Serialize(_) => Self::Malformed,
        }
    }
}

impl IntoResponse for BusinessDataError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejected business data");
        (StatusCode::BAD_REQUEST, Json(ApiErrorBody::new(self.to_string()))).into_response()
    }
}

/// Decode a token into a business record.
pub fn decode_business(token: &str) -> Result<BusinessRecord, BusinessDataError> {
    if token.is_empty() {
        return Err(BusinessDataError::Missing);
    }
    Ok(token::decode(token)?)
}

/// An Axum extractor for the `data` query parameter of a payment link.
///
/// Query decoding turns `+` into a space; the token decoder maps spaces
/// back, so links produced by other encoders still resolve.
pub struct PaymentData(pub BusinessRecord);

impl<S: Send + Sync> FromRequestParts<S> for PaymentData {
    type Rejection = BusinessDataError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(mut params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| BusinessDataError::Malformed)?;

        let data = params.remove(DATA_PARAM).ok_or(BusinessDataError::Missing)?;
        decode_business(&data).map(PaymentData)
    }
}
