//! Request processors.
//!
//! Each processor implements [`kanau::processor::Processor`] for the
//! messages it handles:
//!
//! - [`BusinessQrGenerator`]: turns a business form into a payment link and
//!   its QR code image.
//! - [`PaystackResolver`]: resolves bank accounts and lists banks through
//!   the Paystack API.

pub mod bank_resolver;
pub mod qr_generator;

pub use bank_resolver::{BankError, ListBanks, PaystackResolver, ResolveBankAccount};
pub use qr_generator::{
    BusinessQrGenerator, GenerateBusinessQr, GenerateError, GeneratedQr, QrArtifact,
};
