//! QR code rendering.
//!
//! Codes are rasterized by hand instead of through the `qrcode` image
//! renderer so that the margin (in modules) and the exact output width can
//! be set independently: every output pixel `p` shows module
//! `floor(p * (modules + 2 * margin) / width) - margin`.

mod color;

pub use color::{HexColor, ParseColorError};

use image::{ImageEncoder, Rgb, RgbImage};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of an inline PNG image.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Largest image side, in pixels, that will be rendered.
pub const MAX_QR_WIDTH: u32 = 4096;

/// Errors that can occur while rendering a QR code.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The text could not be encoded, typically because it is too long
    /// for the chosen error-correction level.
    #[error("QR encoding failed: {0}")]
    Encode(#[from] QrError),

    /// The image would be wider than [`MAX_QR_WIDTH`].
    #[error("QR image of {width} pixels exceeds the {MAX_QR_WIDTH} pixel limit")]
    TooLarge { width: u64 },

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% of codewords can be restored.
    #[serde(rename = "L")]
    Low,
    /// ~15%.
    #[serde(rename = "M")]
    Medium,
    /// ~25%.
    #[serde(rename = "Q")]
    Quartile,
    /// ~30%.
    #[default]
    #[serde(rename = "H")]
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Rendering parameters of a QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrStyle {
    pub error_correction: ErrorCorrection,
    /// Quiet zone around the code, in modules.
    pub margin: u32,
    /// Width and height of the image in pixels.
    pub width: u32,
    pub dark: HexColor,
    pub light: HexColor,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::High,
            margin: 1,
            width: 300,
            dark: HexColor::BLACK,
            light: HexColor::WHITE,
        }
    }
}

/// Render `text` as a PNG image.
pub fn render_png(text: &str, style: &QrStyle) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), style.error_correction.into())?;
    let image = rasterize(&code, style)?;

    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

/// Render `text` as a `data:image/png;base64,…` URI.
pub fn render_data_uri(text: &str, style: &QrStyle) -> Result<String, RenderError> {
    let png = render_png(text, style)?;
    Ok(png_data_uri(&png))
}

/// Wrap PNG bytes in a data URI.
pub fn png_data_uri(png: &[u8]) -> String {
    format!(
        "{PNG_DATA_URI_PREFIX}{}",
        fast32::base64::RFC4648.encode(png)
    )
}

fn rasterize(code: &QrCode, style: &QrStyle) -> Result<RgbImage, RenderError> {
    let modules = code.width() as u64;
    let margin = u64::from(style.margin);
    let span = modules + 2 * margin;
    // never fewer than one pixel per module
    let width = u64::from(style.width).max(span);
    let side = match u32::try_from(width) {
        Ok(side) if side <= MAX_QR_WIDTH => side,
        _ => return Err(RenderError::TooLarge { width }),
    };
    let colors = code.to_colors();

    let dark: Rgb<u8> = style.dark.into();
    let light: Rgb<u8> = style.light.into();

    let module_at = |pixel: u32| -> Option<u64> {
        (u64::from(pixel) * span / width)
            .checked_sub(margin)
            .filter(|m| *m < modules)
    };

    Ok(RgbImage::from_fn(side, side, |x, y| {
        match (module_at(x), module_at(y)) {
            (Some(mx), Some(my)) => {
                let index = usize::try_from(my * modules + mx).unwrap_or(usize::MAX);
                match colors.get(index) {
                    Some(Color::Dark) => dark,
                    _ => light,
                }
            }
            _ => light,
        }
    }))
}
