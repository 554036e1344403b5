//! # Decimal Amount Scaling
//!
//! Converts a human decimal string into an integer count of the asset's
//! smallest unit: `round_half_up(amount × 10^decimals)`. Arithmetic is
//! arbitrary precision throughout; there is no floating point.
//!
//! Accepted grammar: `[+]digits[.digits]` or `[+].digits`, optionally
//! followed by `e[+-]digits`.

use super::errors::{MultiChainError, MultiChainResult};
use num_bigint::BigUint;
use num_traits::Zero;

/// Largest accepted exponent magnitude.
pub const MAX_EXPONENT: u32 = 1024;

/// A non-negative decimal `mantissa × 10^(exponent - fraction_len)`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedDecimal {
    mantissa: BigUint,
    mantissa_digits: usize,
    fraction_len: usize,
    exponent: i64,
}

fn parse_decimal(amount: &str) -> Result<ParsedDecimal, &'static str> {
    if amount.is_empty() {
        return Err("empty amount");
    }
    if amount.starts_with('-') {
        return Err("amount is negative");
    }
    let unsigned = amount.strip_prefix('+').unwrap_or(amount);

    let (number, exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
        Some(pos) => (&unsigned[..pos], parse_exponent(&unsigned[pos + 1..])?),
        None => (unsigned, 0),
    };

    let (integer, fraction) = match number.split_once('.') {
        Some((_, "")) => return Err("no digits after decimal point"),
        Some(parts) => parts,
        None => (number, ""),
    };
    if integer.is_empty() && fraction.is_empty() {
        return Err("no digits");
    }
    if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err("not a decimal number");
    }

    let digits = format!("{integer}{fraction}");
    let mantissa = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or("not a decimal number")?;

    Ok(ParsedDecimal {
        mantissa,
        mantissa_digits: digits.len(),
        fraction_len: fraction.len(),
        exponent,
    })
}

fn parse_exponent(exponent: &str) -> Result<i64, &'static str> {
    let (negative, digits) = match exponent.as_bytes().first() {
        Some(b'-') => (true, &exponent[1..]),
        Some(b'+') => (false, &exponent[1..]),
        _ => (false, exponent),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("malformed exponent");
    }
    let significant = digits.trim_start_matches('0');
    let magnitude = match significant.len() {
        0 => 0,
        1..=4 => significant.parse::<u32>().map_err(|_| "malformed exponent")?,
        _ => return Err("exponent out of range"),
    };
    if magnitude > MAX_EXPONENT {
        return Err("exponent out of range");
    }
    let magnitude = i64::from(magnitude);
    Ok(if negative { -magnitude } else { magnitude })
}

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}

/// Scale `amount` to an integer count of units with `decimals` places,
/// rounding half up.
///
/// ```
/// use c3_multichain::scale_amount;
/// assert_eq!(scale_amount("1.5", 6).unwrap().to_string(), "1500000");
/// ```
///
/// # Errors
///
/// [`MultiChainError::InvalidAmount`] for negative, empty or non-numeric
/// input, and for exponents beyond [`MAX_EXPONENT`].
pub fn scale_amount(amount: &str, decimals: u32) -> MultiChainResult<BigUint> {
    let parsed = parse_decimal(amount).map_err(|reason| MultiChainError::InvalidAmount {
        amount: amount.to_string(),
        reason: reason.to_string(),
    })?;

    let shift = parsed.exponent - parsed.fraction_len as i64 + i64::from(decimals);

    if shift >= 0 {
        let shift = u32::try_from(shift).map_err(|_| MultiChainError::InvalidAmount {
            amount: amount.to_string(),
            reason: "amount out of range".to_string(),
        })?;
        return Ok(parsed.mantissa * pow10(shift));
    }

    let drop = shift.unsigned_abs();
    // mantissa < 10^digits <= divisor / 10, so the result rounds to zero
    if drop > parsed.mantissa_digits as u64 {
        return Ok(BigUint::zero());
    }

    let divisor = pow10(drop as u32);
    let quotient = &parsed.mantissa / &divisor;
    let remainder = &parsed.mantissa % &divisor;
    if remainder * 2u32 >= divisor {
        Ok(quotient + 1u32)
    } else {
        Ok(quotient)
    }
}
