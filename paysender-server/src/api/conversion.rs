use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use paysender_sdk::objects::{ApiErrorBody, Conversion, ConversionError, NairaAmount};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct ConvertQuery {
    #[serde(default)]
    amount: String,
}

/// Errors returned by `GET /api/convert`.
#[derive(Debug)]
pub struct ConvertError(ConversionError);

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorBody::new(self.0.to_string())),
        )
            .into_response()
    }
}

/// `GET /api/convert?amount=…` — naira amount in USDC at the configured rate.
pub(super) async fn convert(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<Conversion>, ConvertError> {
    let amount: NairaAmount = query.amount.parse().map_err(ConvertError)?;
    let rate = state.config.conversion.read().await.naira_per_usdc;
    Conversion::new(amount, rate).map(Json).map_err(ConvertError)
}
