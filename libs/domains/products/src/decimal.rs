//! Conversion between [`Decimal`] and BSON `Decimal128`.
//!
//! Both sides go through decimal text, which keeps the scale: `8500.00` is
//! stored with exponent -2 and comes back as `8500.00`, not `8500`.

use mongodb::bson::Decimal128;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecimalCodecError {
    #[error("{0} cannot be encoded as Decimal128")]
    Encode(String),

    #[error("Decimal128 value {0} does not fit a decimal")]
    OutOfRange(String),
}

pub fn to_decimal128(value: &Decimal) -> Result<Decimal128, DecimalCodecError> {
    let text = value.to_string();
    text.parse::<Decimal128>()
        .map_err(|_| DecimalCodecError::Encode(text))
}

/// Decode a stored value. NaN, infinities and anything beyond the
/// 28-digit range of [`Decimal`] are errors.
pub fn from_decimal128(value: &Decimal128) -> Result<Decimal, DecimalCodecError> {
    let text = value.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| DecimalCodecError::OutOfRange(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn stored(text: &str) -> Decimal128 {
        text.parse().unwrap()
    }

    #[test]
    fn test_scale_is_preserved() {
        for text in ["8500.00", "4.500", "0", "0.000", "-7.5", "0.0000001"] {
            let encoded = to_decimal128(&dec(text)).unwrap();
            let decoded = from_decimal128(&encoded).unwrap();
            assert_eq!(decoded.to_string(), text);
        }
    }

    #[test]
    fn test_decimal_max_fits() {
        let encoded = to_decimal128(&Decimal::MAX).unwrap();
        assert_eq!(from_decimal128(&encoded).unwrap(), Decimal::MAX);
    }

    #[test]
    fn test_matches_bson_parser() {
        assert_eq!(to_decimal128(&dec("8500.00")).unwrap(), stored("8500.00"));
    }

    #[test]
    fn test_exponent_forms_are_read() {
        assert_eq!(from_decimal128(&stored("85E+2")).unwrap(), dec("8500"));
        assert_eq!(from_decimal128(&stored("1E-27")).unwrap(), Decimal::new(1, 27));
    }

    #[test]
    fn test_special_values_are_rejected() {
        // Combination field 11110 is infinity, 11111 is NaN
        for bits in [0b11110u128 << 122, 0b11111u128 << 122] {
            let value = Decimal128::from_bytes(bits.to_le_bytes());
            assert!(matches!(
                from_decimal128(&value),
                Err(DecimalCodecError::OutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_beyond_decimal_range() {
        assert!(from_decimal128(&stored("1E+30")).is_err());
        assert!(from_decimal128(&stored("1E-40")).is_err());
    }
}
