//! Business payment tokens.
//!
//! A payment token carries a whole [`BusinessRecord`] by value so that a
//! payment link can be resolved without any server-side lookup. The wire
//! format is:
//!
//! ```text
//! base64url_nopad(json({"businessName":…,"bankName":…,"accountNumber":…,"walletAddress":…}))
//! ```
//!
//! The URL-safe alphabet means a token never needs escaping inside a query
//! value. Decoding also accepts the standard alphabet, with or without
//! padding, since links get rewritten by the environments they pass
//! through.
//!
//! Tokens are encoded, not encrypted: anyone holding a link can read the
//! bank and wallet details it carries.

use crate::objects::business::{BusinessField, BusinessForm, BusinessRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length of a trimmed business name.
pub const MIN_BUSINESS_NAME_LEN: usize = 2;

/// Minimum length of a trimmed account number.
pub const MIN_ACCOUNT_NUMBER_LEN: usize = 10;

/// Number of hex digits following the `0x` prefix of a wallet address.
pub const WALLET_ADDRESS_HEX_LEN: usize = 40;

/// Rejection of a business record, naming the first rule it breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing or invalid required field: {0}")]
    MissingField(BusinessField),
    #[error("invalid wallet address")]
    InvalidWalletAddress,
    #[error("business name too short")]
    BusinessNameTooShort,
    #[error("invalid account number")]
    InvalidAccountNumber,
}

impl ValidationError {
    /// The field the error is about.
    pub fn field(&self) -> BusinessField {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::InvalidWalletAddress => BusinessField::WalletAddress,
            ValidationError::BusinessNameTooShort => BusinessField::BusinessName,
            ValidationError::InvalidAccountNumber => BusinessField::AccountNumber,
        }
    }
}

/// A token that cannot be turned back into a record shape.
#[derive(Debug, thiserror::Error)]
pub enum MalformedTokenError {
    #[error("empty token")]
    Empty,
    #[error("invalid base64 encoding")]
    InvalidEncoding,
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("token does not hold a json object")]
    NotAnObject,
}

/// Errors produced by [`encode`] and [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("malformed payment token: {0}")]
    Malformed(#[from] MalformedTokenError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to serialize business record: {0}")]
    Serialize(serde_json::Error),
}

/// An opaque, URL-safe encoding of a [`BusinessRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentToken(String);

impl PaymentToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for PaymentToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check a record against every business rule, in order:
///
/// 1. all four fields are non-empty after trimming
/// 2. the wallet address is `0x` followed by 40 hex digits
/// 3. the business name has at least [`MIN_BUSINESS_NAME_LEN`] characters
/// 4. the account number has at least [`MIN_ACCOUNT_NUMBER_LEN`] characters
pub fn validate(record: &BusinessRecord) -> Result<(), ValidationError> {
    if let Some(field) = BusinessField::ALL
        .into_iter()
        .find(|field| record.field(*field).trim().is_empty())
    {
        return Err(ValidationError::MissingField(field));
    }

    if !is_wallet_address(record.wallet_address.trim()) {
        return Err(ValidationError::InvalidWalletAddress);
    }

    if record.business_name.trim().chars().count() < MIN_BUSINESS_NAME_LEN {
        return Err(ValidationError::BusinessNameTooShort);
    }

    if record.account_number.trim().chars().count() < MIN_ACCOUNT_NUMBER_LEN {
        return Err(ValidationError::InvalidAccountNumber);
    }

    Ok(())
}

/// Whether `value` is an EVM address: `0x` followed by 40 hex digits.
pub fn is_wallet_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| {
            hex.len() == WALLET_ADDRESS_HEX_LEN && hex.bytes().all(|b| b.is_ascii_hexdigit())
        })
}

impl TryFrom<BusinessForm> for BusinessRecord {
    type Error = ValidationError;

    /// Require every field to be a string, then trim and validate.
    fn try_from(form: BusinessForm) -> Result<Self, Self::Error> {
        let take = |field: BusinessField| -> Result<String, ValidationError> {
            match form.field(field) {
                Some(serde_json::Value::String(value)) if !value.trim().is_empty() => {
                    Ok(value.trim().to_owned())
                }
                _ => Err(ValidationError::MissingField(field)),
            }
        };

        let record = BusinessRecord {
            business_name: take(BusinessField::BusinessName)?,
            bank_name: take(BusinessField::BankName)?,
            account_number: take(BusinessField::AccountNumber)?,
            wallet_address: take(BusinessField::WalletAddress)?,
        };
        validate(&record)?;
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a record into a payment token.
///
/// The record is validated and trimmed first; an invalid record never
/// produces a token.
pub fn encode(record: &BusinessRecord) -> Result<PaymentToken, TokenError> {
    validate(record)?;
    let json = serde_json::to_vec(&record.trimmed()).map_err(TokenError::Serialize)?;
    Ok(PaymentToken(fast32::base64::RFC4648_URL_NOPAD.encode(&json)))
}

/// Decode and validate a payment token.
///
/// `+`, `/`, spaces and `=` padding are tolerated so that tokens which
/// went through the standard base64 alphabet or form decoding still
/// resolve.
pub fn decode(token: &str) -> Result<BusinessRecord, TokenError> {
    if token.is_empty() {
        return Err(MalformedTokenError::Empty.into());
    }

    let normalized: String = token
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            // form decoding turns '+' into a space
            '+' | ' ' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = fast32::base64::RFC4648_URL_NOPAD
        .decode_str(&normalized)
        .map_err(|_| MalformedTokenError::InvalidEncoding)?;
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(MalformedTokenError::InvalidJson)?;
    if !value.is_object() {
        return Err(MalformedTokenError::NotAnObject.into());
    }
    let form: BusinessForm =
        serde_json::from_value(value).map_err(MalformedTokenError::InvalidJson)?;

    Ok(BusinessRecord::try_from(form)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> BusinessRecord {
        BusinessRecord::new(
            "Acme Ltd",
            "First Bank",
            "0123456789",
            format!("0x{}", "a".repeat(40)),
        )
    }

    #[test]
    fn test_round_trip() {
        let record = acme();
        let token = encode(&record).unwrap();
        assert_eq!(decode(token.as_str()).unwrap(), record);
    }

    #[test]
    fn test_round_trip_trims_fields() {
        let record = BusinessRecord::new(
            "  Acme Ltd ",
            "\tFirst Bank",
            " 0123456789 ",
            format!(" 0x{} ", "B".repeat(40)),
        );
        let token = encode(&record).unwrap();
        assert_eq!(decode(token.as_str()).unwrap(), record.trimmed());
    }

    #[test]
    fn test_token_uses_url_safe_alphabet() {
        // '?' and '>' push the JSON into base64 positions that would
        // produce '+' and '/' in the standard alphabet
        let record = BusinessRecord::new(
            "Acme ??? >>> Ltd",
            "First Bank ~~~",
            "0123456789",
            format!("0x{}", "f".repeat(40)),
        );
        let token = encode(&record).unwrap();
        assert!(
            token
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        );
    }

    #[test]
    fn test_decode_accepts_standard_alphabet() {
        let record = BusinessRecord::new(
            "Acme ??? >>> Ltd",
            "First Bank ~~~",
            "0123456789",
            format!("0x{}", "f".repeat(40)),
        );
        let json = serde_json::to_vec(&record).unwrap();
        let standard = fast32::base64::RFC4648.encode(&json);
        assert_eq!(decode(&standard).unwrap(), record);

        let form_decoded = standard.replace('+', " ");
        assert_eq!(decode(&form_decoded).unwrap(), record);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let good = acme();
        assert_eq!(validate(&good), validate(&good));

        let mut bad = acme();
        bad.wallet_address = "0xZZ".to_string();
        assert_eq!(validate(&bad), validate(&bad));
    }

    #[test]
    fn test_missing_fields_are_named() {
        for field in BusinessField::ALL {
            let mut form = BusinessForm::from(acme());
            match field {
                BusinessField::BusinessName => form.business_name = None,
                BusinessField::BankName => form.bank_name = None,
                BusinessField::AccountNumber => form.account_number = None,
                BusinessField::WalletAddress => form.wallet_address = None,
            }
            let err = BusinessRecord::try_from(form).unwrap_err();
            assert_eq!(err, ValidationError::MissingField(field));
            assert!(err.to_string().contains(field.as_str()));
        }
    }

    #[test]
    fn test_non_string_and_blank_fields_are_missing() {
        let mut form = BusinessForm::from(acme());
        form.account_number = Some(serde_json::json!(123456789012u64));
        assert_eq!(
            BusinessRecord::try_from(form).unwrap_err(),
            ValidationError::MissingField(BusinessField::AccountNumber)
        );

        let mut record = acme();
        record.bank_name = "   ".to_string();
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField(BusinessField::BankName))
        );
    }

    #[test]
    fn test_first_missing_field_wins() {
        let form = BusinessForm {
            bank_name: Some("First Bank".into()),
            ..Default::default()
        };
        assert_eq!(
            BusinessRecord::try_from(form).unwrap_err(),
            ValidationError::MissingField(BusinessField::BusinessName)
        );
    }

    #[test]
    fn test_wallet_address_rules() {
        let mut record = acme();
        record.wallet_address = format!("0x{}", "Z".repeat(40));
        assert_eq!(validate(&record), Err(ValidationError::InvalidWalletAddress));

        record.wallet_address = format!("0x{}", "a".repeat(39));
        assert_eq!(validate(&record), Err(ValidationError::InvalidWalletAddress));

        record.wallet_address = format!("0x{}", "a".repeat(41));
        assert_eq!(validate(&record), Err(ValidationError::InvalidWalletAddress));

        record.wallet_address = "not-a-wallet".to_string();
        let err = validate(&record).unwrap_err();
        assert!(err.to_string().contains("wallet address"));

        record.wallet_address = format!("0x{}", "aBcDeF0123".repeat(4));
        assert_eq!(validate(&record), Ok(()));
    }

    #[test]
    fn test_length_rules() {
        let mut record = acme();
        record.business_name = "A".to_string();
        assert_eq!(validate(&record), Err(ValidationError::BusinessNameTooShort));

        let mut record = acme();
        record.account_number = "012345678".to_string();
        assert_eq!(validate(&record), Err(ValidationError::InvalidAccountNumber));
    }

    #[test]
    fn test_rule_order() {
        let mut record = acme();
        record.business_name = "A".to_string();
        record.wallet_address = "0x123".to_string();
        assert_eq!(validate(&record), Err(ValidationError::InvalidWalletAddress));
    }

    #[test]
    fn test_encode_rejects_invalid_record() {
        let mut record = acme();
        record.account_number = "123".to_string();
        assert!(matches!(
            encode(&record),
            Err(TokenError::Validation(ValidationError::InvalidAccountNumber))
        ));
    }

    #[test]
    fn test_decode_malformed_tokens() {
        assert!(matches!(
            decode(""),
            Err(TokenError::Malformed(MalformedTokenError::Empty))
        ));
        assert!(matches!(
            decode("!!not base64!!"),
            Err(TokenError::Malformed(MalformedTokenError::InvalidEncoding))
        ));

        let not_json = fast32::base64::RFC4648_URL_NOPAD.encode(b"hello world");
        assert!(matches!(
            decode(&not_json),
            Err(TokenError::Malformed(MalformedTokenError::InvalidJson(_)))
        ));

        let not_object = fast32::base64::RFC4648_URL_NOPAD.encode(b"[1,2,3]");
        assert!(matches!(
            decode(&not_object),
            Err(TokenError::Malformed(MalformedTokenError::NotAnObject))
        ));
    }

    #[test]
    fn test_decode_validates_record() {
        let json = serde_json::json!({
            "businessName": "Acme Ltd",
            "bankName": "First Bank",
            "accountNumber": "0123456789",
        });
        let token = fast32::base64::RFC4648_URL_NOPAD.encode(json.to_string().as_bytes());
        assert!(matches!(
            decode(&token),
            Err(TokenError::Validation(ValidationError::MissingField(
                BusinessField::WalletAddress
            )))
        ));
    }
}
