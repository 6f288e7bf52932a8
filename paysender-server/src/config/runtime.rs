//! Runtime configuration re-exports.
//!
//! The actual config types are defined in `paysender_core::config`.

pub use paysender_core::config::{
    ConversionConfig, OutputMode, PaystackConfig, QrGeneratorConfig, ServerConfig, SharedConfig,
};
