//! JSON API handlers.
//!
//! # Endpoints
//!
//! - `POST /generate-business-qr`           – validate a business and render its payment QR
//! - `GET  /verify-business/{encoded_data}` – decode a payment token
//! - `GET  /payment?data=…`                 – resolve a payment page
//! - `POST /verify-account`                 – resolve a bank account holder via Paystack
//! - `GET  /banks?country=…`                – list banks via Paystack
//! - `GET  /convert?amount=…`               – naira → USDC at the configured rate

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

mod bank;
pub mod business;
mod conversion;
pub mod extractors;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-business-qr", post(business::generate_business_qr))
        .route(
            "/verify-business/{encoded_data}",
            get(business::verify_business),
        )
        .route("/payment", get(business::payment_page))
        .route("/verify-account", post(bank::verify_account))
        .route("/banks", get(bank::list_banks))
        .route("/convert", get(conversion::convert))
}
