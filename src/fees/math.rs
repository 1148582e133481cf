//! Exact big-integer helpers shared by the fee calculator.

use num::{One, ToPrimitive};
use num_bigint::BigUint;

use crate::error::{TipError, TipResult};

/// Parse a base-10 non-negative integer. `label` names the field in the error.
///
/// Only ASCII digits are accepted: no sign, no whitespace, no separators.
pub fn parse_decimal(s: &str, label: &'static str) -> TipResult<BigUint> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TipError::InvalidAmount {
            label,
            value: s.to_string(),
        });
    }
    BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(|| TipError::InvalidAmount {
        label,
        value: s.to_string(),
    })
}

/// `ceil(x * mul / div)` without leaving the integers. `div` must be non-zero.
pub fn ceil_mul_div(x: &BigUint, mul: u32, div: u32) -> BigUint {
    debug_assert!(div > 0, "ceil_mul_div: zero divisor");
    let d = BigUint::from(div);
    let num = x * BigUint::from(mul) + &d - BigUint::one();
    num / d
}

/// Narrow to u64, reporting the full decimal value on overflow.
pub fn to_u64(x: &BigUint, label: &'static str) -> TipResult<u64> {
    x.to_u64().ok_or_else(|| TipError::AmountOverflow {
        label,
        value: x.to_string(),
    })
}
