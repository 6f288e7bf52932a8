//! PaySender SDK.
//!
//! Shared types for the PaySender server and its clients: the business
//! payment token codec, payment-link helpers, and the request/response
//! objects of the HTTP API. The typed HTTP client lives behind the
//! `client` feature.

pub mod link;
pub mod objects;
pub mod token;

#[cfg(feature = "client")]
pub mod client;
