//! Naira → USDC conversion shown on the payment page.
//!
//! The rate is a configured figure, not a market quote.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum fractional digits of a naira amount.
pub const NAIRA_DECIMALS: u32 = 2;

/// Minimum and maximum fractional digits of a displayed USDC amount.
pub const USDC_DISPLAY_DECIMALS: (u32, u32) = (2, 6);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("amount must be digits with at most {NAIRA_DECIMALS} decimal places")]
    InvalidAmount,
    #[error("conversion rate must be positive")]
    InvalidRate,
    #[error("amount out of range")]
    Overflow,
}

/// A naira amount as typed by a payer.
///
/// Accepts digits with an optional decimal point and at most two
/// fractional digits. An empty input, or a lone `.`, is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NairaAmount(Decimal);

impl NairaAmount {
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for NairaAmount {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) || fraction.len() > NAIRA_DECIMALS as usize
        {
            return Err(ConversionError::InvalidAmount);
        }

        if whole.is_empty() && fraction.is_empty() {
            return Ok(Self(Decimal::ZERO));
        }

        let normalized = format!(
            "{}.{}",
            if whole.is_empty() { "0" } else { whole },
            if fraction.is_empty() { "0" } else { fraction }
        );
        Decimal::from_str(&normalized)
            .map(Self)
            .map_err(|_| ConversionError::Overflow)
    }
}

/// A naira amount with its USDC equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub naira: Decimal,
    pub usdc: Decimal,
    /// Naira per USDC.
    pub rate: Decimal,
}

impl Conversion {
    pub fn new(amount: NairaAmount, naira_per_usdc: Decimal) -> Result<Self, ConversionError> {
        if naira_per_usdc <= Decimal::ZERO {
            return Err(ConversionError::InvalidRate);
        }

        let (min_dp, max_dp) = USDC_DISPLAY_DECIMALS;
        let mut usdc = amount
            .value()
            .checked_div(naira_per_usdc)
            .ok_or(ConversionError::Overflow)?
            .round_dp_with_strategy(max_dp, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        if usdc.scale() < min_dp {
            usdc.rescale(min_dp);
        }

        Ok(Self {
            naira: amount.value(),
            usdc,
            rate: naira_per_usdc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate() -> Decimal {
        Decimal::from_str("1709.15").unwrap()
    }

    #[test]
    fn test_amount_pattern() {
        assert_eq!("".parse::<NairaAmount>().unwrap().value(), Decimal::ZERO);
        assert_eq!(".".parse::<NairaAmount>().unwrap().value(), Decimal::ZERO);
        assert_eq!(
            "1500.5".parse::<NairaAmount>().unwrap().value(),
            Decimal::from_str("1500.5").unwrap()
        );
        assert_eq!(
            ".25".parse::<NairaAmount>().unwrap().value(),
            Decimal::from_str("0.25").unwrap()
        );
        assert!("12.345".parse::<NairaAmount>().is_err());
        assert!("-5".parse::<NairaAmount>().is_err());
        assert!("1,000".parse::<NairaAmount>().is_err());
        assert!("1.2.3".parse::<NairaAmount>().is_err());
    }

    #[test]
    fn test_conversion_rounds_to_six_places() {
        let conversion = Conversion::new("1000".parse().unwrap(), rate()).unwrap();
        // 1000 / 1709.15 = 0.5850861...
        assert_eq!(conversion.usdc.to_string(), "0.585086");
    }

    #[test]
    fn test_conversion_pads_to_two_places() {
        let conversion = Conversion::new("3418.30".parse().unwrap(), rate()).unwrap();
        assert_eq!(conversion.usdc.to_string(), "2.00");

        let zero = Conversion::new("".parse().unwrap(), rate()).unwrap();
        assert_eq!(zero.usdc.to_string(), "0.00");
    }

    #[test]
    fn test_conversion_rejects_bad_rate() {
        assert_eq!(
            Conversion::new("10".parse().unwrap(), Decimal::ZERO),
            Err(ConversionError::InvalidRate)
        );
    }
}
