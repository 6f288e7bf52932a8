use serde::{Deserialize, Serialize};

/// Response of `POST /api/generate-business-qr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrGenerationResponse {
    /// Name of the written image file. Absent for inline images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Relative URL path of the image file, or a `data:` URI.
    pub qr_code_url: String,
    /// Absolute payment link encoded in the QR code.
    pub payment_url: String,
    /// The payment token carried by `payment_url`.
    pub encoded_data: String,
}
