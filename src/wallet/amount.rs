//! MAS Amount Conversion
//!
//! Amounts travel as u64 nanoMAS (1 MAS = 10^9 nanoMAS). Decimal strings are
//! parsed exactly: no floating point, at most 9 fractional digits, and the
//! result must fit in 63 bits.

use crate::error::ArithmeticError;

/// Fractional digits of one MAS
pub const MAS_DECIMALS: usize = 9;

/// nanoMAS per MAS
pub const NANOMAS_PER_MAS: u64 = 1_000_000_000;

/// Largest representable amount (2^63 - 1 nanoMAS)
pub const MAX_NANOMAS: u64 = i64::MAX as u64;

/// Parse a decimal MAS string (`"1.5"`, `"0.01"`, `"42"`) into nanoMAS
pub fn parse_mas_amount(amount: &str) -> Result<u64, ArithmeticError> {
    let trimmed = amount.trim();
    let format_error = || ArithmeticError::Format(amount.to_string());

    let (integer, fraction) = match trimmed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (trimmed, None),
    };

    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_error());
    }
    let fraction = match fraction {
        Some(f) if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(format_error())
        }
        Some(f) => f,
        None => "",
    };

    if fraction.len() > MAS_DECIMALS {
        return Err(ArithmeticError::Precision(fraction.len()));
    }

    let whole = integer.bytes().try_fold(0u128, |acc, b| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(b - b'0')))
            .filter(|v| *v <= u128::from(MAX_NANOMAS))
            .ok_or(ArithmeticError::Overflow)
    })?;

    // right-pad to nanoMAS precision
    let fractional = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(MAS_DECIMALS)
        .fold(0u128, |acc, b| acc * 10 + u128::from(b - b'0'));

    let total = whole * u128::from(NANOMAS_PER_MAS) + fractional;
    if total > u128::from(MAX_NANOMAS) {
        return Err(ArithmeticError::Overflow);
    }

    u64::try_from(total).map_err(|_| ArithmeticError::Overflow)
}

/// Format nanoMAS as a decimal MAS string with trailing zeros trimmed
pub fn format_nanomas(nanomas: u64) -> String {
    let integer = nanomas / NANOMAS_PER_MAS;
    let fractional = nanomas % NANOMAS_PER_MAS;

    if fractional == 0 {
        integer.to_string()
    } else {
        let frac_str = format!("{:0>width$}", fractional, width = MAS_DECIMALS);
        format!("{}.{}", integer, frac_str.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amounts() {
        assert_eq!(parse_mas_amount("0.123456789"), Ok(123_456_789));
        assert_eq!(parse_mas_amount("1.5"), Ok(1_500_000_000));
        assert_eq!(parse_mas_amount("0.01"), Ok(10_000_000));
        assert_eq!(parse_mas_amount("42"), Ok(42_000_000_000));
        assert_eq!(parse_mas_amount(" 0 "), Ok(0));
        assert_eq!(parse_mas_amount("007.000000001"), Ok(7_000_000_001));
    }

    #[test]
    fn test_precision_limit() {
        assert_eq!(
            parse_mas_amount("0.1234567891"),
            Err(ArithmeticError::Precision(10))
        );
        assert_eq!(
            parse_mas_amount("1.0000000000"),
            Err(ArithmeticError::Precision(10))
        );
    }

    #[test]
    fn test_63_bit_limit() {
        assert_eq!(parse_mas_amount("9223372036.854775807"), Ok(MAX_NANOMAS));
        assert_eq!(
            parse_mas_amount("9223372036.854775808"),
            Err(ArithmeticError::Overflow)
        );
        assert_eq!(parse_mas_amount("9223372037"), Err(ArithmeticError::Overflow));
        assert_eq!(
            parse_mas_amount("99999999999999999999999999999999999999999"),
            Err(ArithmeticError::Overflow)
        );
    }

    #[test]
    fn test_malformed_amounts() {
        for bad in ["", ".5", "1.", "-1", "+1", "1.2.3", "1,5", "abc", "1e9", "0x10", "1 000"] {
            assert_eq!(
                parse_mas_amount(bad),
                Err(ArithmeticError::Format(bad.to_string())),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_format_nanomas() {
        assert_eq!(format_nanomas(0), "0");
        assert_eq!(format_nanomas(1), "0.000000001");
        assert_eq!(format_nanomas(1_500_000_000), "1.5");
        assert_eq!(format_nanomas(42_000_000_000), "42");
        assert_eq!(format_nanomas(MAX_NANOMAS), "9223372036.854775807");
    }
}
