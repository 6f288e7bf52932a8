use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::link::DATA_PARAM;
use crate::objects::{
    Bank, BusinessForm, BusinessRecord, Conversion, PaymentPage, QrGenerationResponse,
    VerifyAccountRequest, VerifyAccountResponse,
};

/// Typed HTTP client for a PaySender server.
#[derive(Debug, Clone)]
pub struct PaySenderClient {
    http: Client,
    base_url: Url,
}

impl PaySenderClient {
    /// Create a new `PaySenderClient`.
    ///
    /// * `base_url` – root URL of the PaySender server (e.g. `https://pay.example.com`).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /api/generate-business-qr` – register a business and get its QR code.
    pub async fn generate_business_qr(
        &self,
        business: impl Into<BusinessForm>,
    ) -> Result<QrGenerationResponse, ClientError> {
        let url = self.base_url.join("/api/generate-business-qr")?;
        let resp = self
            .http
            .post(url)
            .json(&business.into())
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /api/verify-business/{token}` – decode a payment token server-side.
    pub async fn verify_business(&self, token: &str) -> Result<BusinessRecord, ClientError> {
        let mut url = self.base_url.join("/api/verify-business/")?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(token);
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/payment?data={token}` – resolve a payment page.
    pub async fn payment_page(&self, token: &str) -> Result<PaymentPage, ClientError> {
        let url = self.base_url.join("/api/payment")?;
        let resp = self
            .http
            .get(url)
            .query(&[(DATA_PARAM, token)])
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /api/verify-account` – resolve the holder of a bank account.
    ///
    /// A failed verification is not an error: it comes back as a response
    /// with `status: false` and a message.
    pub async fn verify_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<VerifyAccountResponse, ClientError> {
        let url = self.base_url.join("/api/verify-account")?;
        let body = VerifyAccountRequest {
            account_number: Some(account_number.to_owned()),
            bank_code: Some(bank_code.to_owned()),
        };
        let resp = self.http.post(url).json(&body).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|_| ClientError::Api {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// `GET /api/banks?country={country}` – list banks for the registration form.
    pub async fn list_banks(&self, country: &str) -> Result<Vec<Bank>, ClientError> {
        let url = self.base_url.join("/api/banks")?;
        let resp = self
            .http
            .get(url)
            .query(&[("country", country)])
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /api/convert?amount={amount}` – naira to USDC at the server's rate.
    pub async fn convert(&self, amount: &str) -> Result<Conversion, ClientError> {
        let url = self.base_url.join("/api/convert")?;
        let resp = self
            .http
            .get(url)
            .query(&[("amount", amount)])
            .send()
            .await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
