//! Request and response objects of the PaySender API.

pub mod bank;
pub mod business;
pub mod conversion;
pub mod payment;
pub mod qr;

pub use bank::{AccountDetails, Bank, VerifyAccountRequest, VerifyAccountResponse};
pub use business::{BusinessField, BusinessForm, BusinessRecord};
pub use conversion::{Conversion, ConversionError, NairaAmount};
pub use payment::{ApiErrorBody, PaymentOption, PaymentPage};
pub use qr::QrGenerationResponse;
