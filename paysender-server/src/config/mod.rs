//! Configuration module for paysender-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables.

pub mod file;
pub mod runtime;

use crate::config::file::{FileConfig, OutputKind};
use crate::config::runtime::{
    ConversionConfig, OutputMode, PaystackConfig, QrGeneratorConfig, ServerConfig, SharedConfig,
};
use paysender_core::qr::{MAX_QR_WIDTH, QrStyle};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable holding the Paystack secret key.
pub const PAYSTACK_SECRET_ENV: &str = "PAYSTACK_SECRET_KEY";

/// Smallest image that can hold a version 1 QR code at one pixel per module.
const MIN_QR_WIDTH: u32 = 21;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub qr: QrGeneratorConfig,
    pub paystack: PaystackConfig,
    pub conversion: ConversionConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with Arc<RwLock<T>> wrappers.
    ///
    /// The server section is only read at startup and is not shared.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig::new(self.qr, self.paystack, self.conversion)
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
    public_url_override: Option<Url>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(
        config_path: impl AsRef<Path>,
        listen_override: Option<SocketAddr>,
        public_url_override: Option<Url>,
    ) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
            public_url_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Pick up secrets from the environment
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }
        if let Some(public_url) = &self.public_url_override {
            file_config.server.public_url = public_url.clone();
        }

        validate(&file_config)?;

        let secret_key = get_paystack_secret();
        if secret_key.is_none() {
            tracing::warn!(
                "{} is not set; bank account verification is disabled",
                PAYSTACK_SECRET_ENV
            );
        }

        Ok(build_loaded_config(file_config, secret_key))
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    let scheme = config.server.public_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::ValidationError(format!(
            "server.public_url must be http or https, got {scheme}"
        )));
    }
    if config.server.public_url.cannot_be_a_base() {
        return Err(ConfigError::ValidationError(
            "server.public_url cannot carry a path".to_string(),
        ));
    }
    if config.server.public_url.query().is_some() || config.server.public_url.fragment().is_some()
    {
        return Err(ConfigError::ValidationError(
            "server.public_url must not have a query or fragment".to_string(),
        ));
    }

    if !(MIN_QR_WIDTH..=MAX_QR_WIDTH).contains(&config.qr.width) {
        return Err(ConfigError::ValidationError(format!(
            "qr.width must be between {MIN_QR_WIDTH} and {MAX_QR_WIDTH}, got {}",
            config.qr.width
        )));
    }
    if config.qr.output == OutputKind::File {
        let prefix = config.qr.url_prefix.trim_end_matches('/');
        if !prefix.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "qr.url_prefix must be an absolute path below /, got {:?}",
                config.qr.url_prefix
            )));
        }
    }

    if config.conversion.naira_per_usdc <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "conversion.naira_per_usdc must be positive".to_string(),
        ));
    }
    Ok(())
}

fn build_loaded_config(file_config: FileConfig, secret_key: Option<String>) -> LoadedConfig {
    let FileConfig {
        server,
        qr,
        paystack,
        conversion,
    } = file_config;

    let output = match qr.output {
        OutputKind::File => OutputMode::File {
            dir: qr.output_dir,
            url_prefix: qr.url_prefix.trim_end_matches('/').to_string(),
        },
        OutputKind::Inline => OutputMode::Inline,
    };

    LoadedConfig {
        qr: QrGeneratorConfig {
            base_url: server.public_url,
            style: QrStyle {
                error_correction: qr.error_correction,
                margin: qr.margin,
                width: qr.width,
                dark: qr.dark_color,
                light: qr.light_color,
            },
            output,
        },
        server: ServerConfig {
            listen: server.listen,
        },
        paystack: PaystackConfig {
            base_url: paystack.base_url,
            secret_key,
            timeout: Duration::from_secs(paystack.timeout_secs),
        },
        conversion: ConversionConfig {
            naira_per_usdc: conversion.naira_per_usdc,
        },
    }
}

/// Get the Paystack secret key from the environment. Empty values count as unset.
pub fn get_paystack_secret() -> Option<String> {
    std::env::var(PAYSTACK_SECRET_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}
