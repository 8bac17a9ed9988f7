//! Token amounts are kept as base-10 integer strings of base units.
//!
//! Token balances are 256-bit on chain, so nothing here goes through a
//! fixed width integer.

use std::cmp::Ordering;

/// Largest decimals value whose unit (10^decimals) still fits in 256 bits.
pub const MAX_TOKEN_DECIMALS: u8 = 77;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,
    #[error("Amount contains invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("Amount has more than one decimal point")]
    MultiplePoints,
    #[error("Amount has {found} decimal places, token allows {allowed}")]
    TooManyDecimals { found: usize, allowed: u8 },
    #[error("Token decimals {0} exceed the maximum of {max}", max = MAX_TOKEN_DECIMALS)]
    DecimalsOutOfRange(u8),
}

fn normalize_digits(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn check_digits(text: &str) -> Result<(), AmountError> {
    match text.chars().find(|c| !c.is_ascii_digit()) {
        Some(c) => Err(AmountError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

/// Render a raw balance with `decimals` fractional digits, trailing zeros removed.
pub fn format_token_amount(raw: &str, decimals: u8) -> Result<String, AmountError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AmountError::Empty);
    }
    check_digits(raw)?;
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(AmountError::DecimalsOutOfRange(decimals));
    }

    let digits = normalize_digits(raw);
    if decimals == 0 {
        return Ok(digits);
    }

    let decimals = decimals as usize;
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        Ok(whole.to_string())
    } else {
        Ok(format!("{}.{}", whole, fraction))
    }
}

/// Parse a user entered amount into raw base units.
pub fn parse_token_amount(text: &str, decimals: u8) -> Result<String, AmountError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AmountError::Empty);
    }
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(AmountError::DecimalsOutOfRange(decimals));
    }

    let mut parts = text.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(AmountError::MultiplePoints);
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::Empty);
    }
    check_digits(whole)?;
    check_digits(fraction)?;

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals {
            found: fraction.len(),
            allowed: decimals,
        });
    }

    let mut raw = String::with_capacity(whole.len() + decimals as usize);
    raw.push_str(whole);
    raw.push_str(fraction);
    raw.push_str(&"0".repeat(decimals as usize - fraction.len()));
    Ok(normalize_digits(&raw))
}

/// Numeric ordering of two raw amounts (leading zeros ignored).
pub fn compare_raw_amounts(a: &str, b: &str) -> Ordering {
    let a = normalize_digits(a.trim());
    let b = normalize_digits(b.trim());
    a.len().cmp(&b.len()).then_with(|| a.cmp(&b))
}

pub fn is_zero_amount(raw: &str) -> bool {
    raw.trim().chars().all(|c| c == '0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_inserts_decimal_point() {
        assert_eq!(format_token_amount("123456789", 8).unwrap(), "1.23456789");
        assert_eq!(format_token_amount("100000000", 8).unwrap(), "1");
        assert_eq!(format_token_amount("120000000", 8).unwrap(), "1.2");
        assert_eq!(format_token_amount("5", 3).unwrap(), "0.005");
        assert_eq!(format_token_amount("0", 18).unwrap(), "0");
        assert_eq!(format_token_amount("000042", 0).unwrap(), "42");
    }

    #[test]
    fn format_handles_values_wider_than_u128() {
        let raw = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let formatted = format_token_amount(raw, 18).unwrap();
        assert!(formatted.starts_with("115792089237316195423570985008687907853269984665640564039457."));
    }

    #[test]
    fn format_rejects_garbage() {
        assert_eq!(format_token_amount("", 8), Err(AmountError::Empty));
        assert_eq!(
            format_token_amount("12a", 8),
            Err(AmountError::InvalidCharacter('a'))
        );
        assert_eq!(
            format_token_amount("1", 78),
            Err(AmountError::DecimalsOutOfRange(78))
        );
    }

    #[test]
    fn parse_scales_to_base_units() {
        assert_eq!(parse_token_amount("1.5", 8).unwrap(), "150000000");
        assert_eq!(parse_token_amount("0.00000001", 8).unwrap(), "1");
        assert_eq!(parse_token_amount(".25", 2).unwrap(), "25");
        assert_eq!(parse_token_amount("7.", 0).unwrap(), "7");
        assert_eq!(parse_token_amount("1.500", 1).unwrap(), "15");
        assert_eq!(parse_token_amount("0", 4).unwrap(), "0");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(parse_token_amount("  ", 8), Err(AmountError::Empty));
        assert_eq!(parse_token_amount(".", 8), Err(AmountError::Empty));
        assert_eq!(parse_token_amount("1.2.3", 8), Err(AmountError::MultiplePoints));
        assert_eq!(
            parse_token_amount("-1", 8),
            Err(AmountError::InvalidCharacter('-'))
        );
        assert_eq!(
            parse_token_amount("0.001", 2),
            Err(AmountError::TooManyDecimals {
                found: 3,
                allowed: 2
            })
        );
    }

    #[test]
    fn compare_ignores_leading_zeros() {
        assert_eq!(compare_raw_amounts("0010", "10"), Ordering::Equal);
        assert_eq!(compare_raw_amounts("9", "10"), Ordering::Less);
        assert_eq!(compare_raw_amounts("200", "199"), Ordering::Greater);
        assert!(is_zero_amount("000"));
        assert!(!is_zero_amount("010"));
    }
}
