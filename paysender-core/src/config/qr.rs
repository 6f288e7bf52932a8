//! QR generation configuration.

use std::path::PathBuf;
use url::Url;

use crate::qr::QrStyle;

/// Where generated QR images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Write a PNG into `dir` and hand out `{url_prefix}/{file_name}`.
    File { dir: PathBuf, url_prefix: String },
    /// Return the PNG inline as a `data:` URI.
    Inline,
}

/// Configuration of the business QR generator.
#[derive(Debug, Clone)]
pub struct QrGeneratorConfig {
    /// Base URL of the payment page.
    pub base_url: Url,
    pub style: QrStyle,
    pub output: OutputMode,
}
