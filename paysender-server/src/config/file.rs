//! TOML file configuration structures.
//!
//! These structs directly map to the `paysender-config.toml` file format.
//! Every section has defaults, so an empty file is a valid development
//! configuration.

use paysender_core::qr::{ErrorCorrection, HexColor};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub qr: QrConfig,
    #[serde(default)]
    pub paystack: PaystackConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:3000").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
    /// Public base URL payment links point at.
    #[serde(default = "default_public_url")]
    pub public_url: Url,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
            public_url: default_public_url(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:3000".parse().expect("valid default address")
}

fn default_public_url() -> Url {
    Url::parse("http://localhost:3000").expect("valid default url")
}

/// How generated QR images are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// PNG files served from `url_prefix`.
    #[default]
    File,
    /// `data:` URIs in the response body.
    Inline,
}

/// QR generation section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    pub output: OutputKind,
    /// Directory generated images are written to (file output only).
    pub output_dir: PathBuf,
    /// URL path the output directory is served under (file output only).
    pub url_prefix: String,
    pub width: u32,
    pub margin: u32,
    pub error_correction: ErrorCorrection,
    pub dark_color: HexColor,
    pub light_color: HexColor,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            output: OutputKind::File,
            output_dir: PathBuf::from("./public/qrcodes"),
            url_prefix: "/qrcodes".to_string(),
            width: 300,
            margin: 1,
            error_correction: ErrorCorrection::High,
            dark_color: HexColor::BLACK,
            light_color: HexColor::WHITE,
        }
    }
}

/// Paystack API section. The secret key comes from `PAYSTACK_SECRET_KEY`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaystackConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
}

impl Default for PaystackConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://api.paystack.co").expect("valid default url"),
            timeout_secs: 30,
        }
    }
}

/// Currency conversion section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Naira per USDC.
    pub naira_per_usdc: Decimal,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            naira_per_usdc: Decimal::new(170_915, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r##"
[server]
listen = "127.0.0.1:8080"
public_url = "https://pay.example.com"

[qr]
output = "inline"
width = 512
margin = 2
error_correction = "Q"
dark_color = "#112233"

[paystack]
timeout_secs = 5

[conversion]
naira_per_usdc = "1600.50"
"##;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 8080);
        assert_eq!(config.server.public_url.as_str(), "https://pay.example.com/");
        assert_eq!(config.qr.output, OutputKind::Inline);
        assert_eq!(config.qr.width, 512);
        assert_eq!(config.qr.error_correction, ErrorCorrection::Quartile);
        assert_eq!(config.qr.dark_color, HexColor::new(0x11, 0x22, 0x33));
        assert_eq!(config.qr.light_color, HexColor::WHITE);
        assert_eq!(config.qr.url_prefix, "/qrcodes");
        assert_eq!(config.paystack.timeout_secs, 5);
        assert_eq!(config.paystack.base_url.as_str(), "https://api.paystack.co/");
        assert_eq!(config.conversion.naira_per_usdc, Decimal::new(160_050, 2));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.qr.output, OutputKind::File);
        assert_eq!(config.qr.width, 300);
        assert_eq!(config.qr.margin, 1);
        assert_eq!(config.qr.error_correction, ErrorCorrection::High);
        assert_eq!(config.conversion.naira_per_usdc.to_string(), "1709.15");
    }

    #[test]
    fn test_rejects_bad_color() {
        let toml_str = r##"
[qr]
dark_color = "black"
"##;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }
}
