//! Business QR generator.
//!
//! The generator is responsible for:
//! - Validating the submitted business form
//! - Encoding it into a payment token and payment link
//! - Rendering the link as a QR code
//! - Writing the image to the public QR directory, or inlining it
//!
//! A generation either returns the full (artifact, link, token) triple or
//! fails without leaving a referenced file behind.

use crate::config::{OutputMode, QrGeneratorConfig};
use crate::qr::{self, RenderError};
use kanau::processor::Processor;
use paysender_sdk::link;
use paysender_sdk::objects::{BusinessForm, BusinessRecord, QrGenerationResponse};
use paysender_sdk::token::{self, PaymentToken, TokenError, ValidationError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

/// Prefix of every generated QR file name.
pub const FILE_PREFIX: &str = "business_";

/// Errors that can occur during QR generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The business form was rejected. Nothing was rendered or written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The record could not be serialized into a token.
    #[error("failed to encode payment token: {0}")]
    Token(TokenError),

    /// The configured base URL cannot carry a payment link.
    #[error("invalid payment url: {0}")]
    Url(#[from] url::ParseError),

    /// QR rendering failed. Nothing was written.
    #[error("failed to render QR code: {0}")]
    Render(#[from] RenderError),

    /// Creating the output directory or writing the image failed.
    #[error("failed to store QR code: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<TokenError> for GenerateError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Validation(e) => Self::Validation(e),
            other => Self::Token(other),
        }
    }
}

/// Request to generate a QR code for a business.
#[derive(Debug, Clone)]
pub struct GenerateBusinessQr {
    pub business: BusinessForm,
}

impl From<BusinessForm> for GenerateBusinessQr {
    fn from(business: BusinessForm) -> Self {
        Self { business }
    }
}

impl From<BusinessRecord> for GenerateBusinessQr {
    fn from(record: BusinessRecord) -> Self {
        Self {
            business: record.into(),
        }
    }
}

/// The rendered QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrArtifact {
    /// A PNG file in the public QR directory.
    File {
        file_name: String,
        /// Relative URL path the file is served under.
        url_path: String,
    },
    /// A `data:image/png;base64,…` URI.
    Inline { data_uri: String },
}

/// A successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedQr {
    pub artifact: QrArtifact,
    pub payment_url: Url,
    pub token: PaymentToken,
}

impl From<GeneratedQr> for QrGenerationResponse {
    fn from(generated: GeneratedQr) -> Self {
        let (file_name, qr_code_url) = match generated.artifact {
            QrArtifact::File {
                file_name,
                url_path,
            } => (Some(file_name), url_path),
            QrArtifact::Inline { data_uri } => (None, data_uri),
        };
        Self {
            file_name,
            qr_code_url,
            payment_url: generated.payment_url.into(),
            encoded_data: generated.token.into_string(),
        }
    }
}

/// Generates payment links and QR codes for businesses.
///
/// Stateless apart from its configuration; concurrent generations only
/// share the output directory, and file names never collide.
pub struct BusinessQrGenerator {
    config: QrGeneratorConfig,
}

impl BusinessQrGenerator {
    pub fn new(config: QrGeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QrGeneratorConfig {
        &self.config
    }
}

impl Processor<GenerateBusinessQr> for BusinessQrGenerator {
    type Output = GeneratedQr;
    type Error = GenerateError;

    #[tracing::instrument(skip_all, err, name = "GenerateBusinessQr")]
    async fn process(&self, request: GenerateBusinessQr) -> Result<GeneratedQr, GenerateError> {
        let record = BusinessRecord::try_from(request.business)?;
        let token = token::encode(&record)?;
        let payment_url = link::payment_url(&self.config.base_url, &token)?;

        let artifact = match &self.config.output {
            OutputMode::Inline => QrArtifact::Inline {
                data_uri: qr::render_data_uri(payment_url.as_str(), &self.config.style)?,
            },
            OutputMode::File { dir, url_prefix } => {
                let png = qr::render_png(payment_url.as_str(), &self.config.style)?;
                store_png(dir, url_prefix, &png).await?
            }
        };

        info!(
            business = %record.business_name,
            inline = matches!(artifact, QrArtifact::Inline { .. }),
            "Generated business QR code"
        );

        Ok(GeneratedQr {
            artifact,
            payment_url,
            token,
        })
    }
}

// ---------------------------------------------------------------------------
// File output
// ---------------------------------------------------------------------------

/// A fresh file name: time-ordered, with enough random bits that
/// concurrent generations cannot collide.
fn unique_file_name() -> String {
    format!("{FILE_PREFIX}{}.png", Uuid::now_v7().simple())
}

/// Write `png` into `dir` under a fresh name.
///
/// The image is written to a temporary file and renamed into place, so a
/// file under the final name is always complete. The temporary file is
/// removed on failure.
async fn store_png(dir: &Path, url_prefix: &str, png: &[u8]) -> Result<QrArtifact, std::io::Error> {
    tokio::fs::create_dir_all(dir).await?;

    let file_name = unique_file_name();
    let path = dir.join(&file_name);
    let temp_path = temp_path_for(&path);

    if let Err(e) = write_new(&temp_path, png).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }
    if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }
    debug!(path = %path.display(), bytes = png.len(), "Wrote QR image");

    Ok(QrArtifact::File {
        url_path: format!("{}/{}", url_prefix.trim_end_matches('/'), file_name),
        file_name,
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension("png.tmp")
}

async fn write_new(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::{PNG_DATA_URI_PREFIX, QrStyle};
    use std::collections::HashSet;

    fn acme() -> BusinessRecord {
        BusinessRecord::new(
            "Acme Ltd",
            "First Bank",
            "0123456789",
            format!("0x{}", "a".repeat(40)),
        )
    }

    fn file_generator(dir: &Path) -> BusinessQrGenerator {
        BusinessQrGenerator::new(QrGeneratorConfig {
            base_url: Url::parse("http://localhost:3000").unwrap(),
            style: QrStyle::default(),
            output: OutputMode::File {
                dir: dir.to_path_buf(),
                url_prefix: "/qrcodes".to_string(),
            },
        })
    }

    fn list_dir(dir: &Path) -> Vec<String> {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_generate_end_to_end() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("public").join("qrcodes");
        let generator = file_generator(&dir);

        let generated = generator
            .process(GenerateBusinessQr::from(acme()))
            .await
            .unwrap();

        let prefix = "http://localhost:3000/payment?data=";
        assert!(generated.payment_url.as_str().starts_with(prefix));
        assert_eq!(
            &generated.payment_url.as_str()[prefix.len()..],
            generated.token.as_str()
        );

        let extracted = link::token_from_payment_url(&generated.payment_url).unwrap();
        assert_eq!(token::decode(&extracted).unwrap(), acme());

        let QrArtifact::File {
            file_name,
            url_path,
        } = &generated.artifact
        else {
            panic!("expected a file artifact");
        };
        assert!(file_name.starts_with(FILE_PREFIX));
        assert_eq!(url_path, &format!("/qrcodes/{file_name}"));

        let png = std::fs::read(dir.join(file_name)).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
        assert_eq!(list_dir(&dir), vec![file_name.clone()]);

        let response = QrGenerationResponse::from(generated.clone());
        assert_eq!(response.file_name.as_deref(), Some(file_name.as_str()));
        assert_eq!(response.encoded_data, generated.token.as_str());
    }

    #[tokio::test]
    async fn test_rejection_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("qrcodes");
        let generator = file_generator(&dir);

        let mut record = acme();
        record.wallet_address = "not-a-wallet".to_string();
        let err = generator
            .process(GenerateBusinessQr::from(record))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GenerateError::Validation(ValidationError::InvalidWalletAddress)
        ));
        assert!(err.to_string().contains("wallet address"));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_render_failure_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("qrcodes");
        let generator = file_generator(&dir);

        let mut record = acme();
        record.business_name = "A".repeat(3000);
        let err = generator
            .process(GenerateBusinessQr::from(record))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Render(RenderError::Encode(_))));
        assert!(list_dir(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        // a regular file where the output directory should be
        let blocker = temp.path().join("qrcodes");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let generator = file_generator(&blocker);

        let err = generator
            .process(GenerateBusinessQr::from(acme()))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Storage(_)));
    }

    #[tokio::test]
    async fn test_inline_mode() {
        let generator = BusinessQrGenerator::new(QrGeneratorConfig {
            base_url: Url::parse("https://pay.example.com").unwrap(),
            style: QrStyle::default(),
            output: OutputMode::Inline,
        });

        let generated = generator
            .process(GenerateBusinessQr::from(acme()))
            .await
            .unwrap();

        let QrArtifact::Inline { data_uri } = &generated.artifact else {
            panic!("expected an inline artifact");
        };
        assert!(data_uri.starts_with(PNG_DATA_URI_PREFIX));

        let response = QrGenerationResponse::from(generated);
        assert!(response.file_name.is_none());
        assert!(response.qr_code_url.starts_with(PNG_DATA_URI_PREFIX));
    }

    #[tokio::test]
    async fn test_concurrent_generations_do_not_collide() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("qrcodes");
        let generator = std::sync::Arc::new(file_generator(&dir));

        let tasks = (0..100).map(|i| {
            let generator = generator.clone();
            tokio::spawn(async move {
                let record = BusinessRecord::new(
                    format!("Business {i}"),
                    "First Bank",
                    format!("{:010}", i),
                    format!("0x{:040x}", i),
                );
                let generated = generator
                    .process(GenerateBusinessQr::from(record.clone()))
                    .await
                    .unwrap();
                (record, generated)
            })
        });
        let results = futures_util::future::join_all(tasks).await;

        let mut paths = HashSet::new();
        for result in results {
            let (record, generated) = result.unwrap();
            let QrArtifact::File { file_name, .. } = generated.artifact else {
                panic!("expected a file artifact");
            };
            assert!(paths.insert(file_name.clone()));

            // the file holds this business's link, not another one's
            assert_eq!(token::decode(generated.token.as_str()).unwrap(), record);
            let png = std::fs::read(dir.join(&file_name)).unwrap();
            let expected = qr::render_png(generated.payment_url.as_str(), &QrStyle::default())
                .unwrap();
            assert_eq!(png, expected);
        }

        assert_eq!(paths.len(), 100);
        assert_eq!(list_dir(&dir).len(), 100);
    }
}
