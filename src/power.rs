//! General powers, computed through base-2 logarithms.

use primitive_types::U256;

use crate::arith::div;
use crate::error::MathError;
use crate::fixed::FixedPoint64;
use crate::logarithm::{log2_extended, EXTENDED_FRAC_BITS};
use crate::pow2::{inv_pow2, pow2};

/// Computes the exponent `p · log2(a)`, truncated to 64 fractional bits.
///
/// The logarithm is carried with extra fractional bits through the product,
/// so its truncation is not magnified by a large `p`.
fn exponent(
    a: FixedPoint64,
    p: FixedPoint64,
) -> Result<FixedPoint64, MathError> {
    let product = p.raw().full_mul(log2_extended(a)?) >> EXTENDED_FRAC_BITS;

    U256::try_from(product)
        .map(FixedPoint64::from_raw)
        .map_err(|_| {
            log::debug!("pow: exponent {p} · log2({a}) overflows");
            MathError::Overflow
        })
}

/// Computes `a^p = 2^(p · log2(a))` for `a ≥ 1`.
///
/// # Examples
///
/// ```
/// use q64_math::{pow, FixedPoint64};
///
/// let four = FixedPoint64::from_integer(4);
/// let half = "0.5".parse().unwrap();
///
/// assert_eq!(pow(four, half), Ok(FixedPoint64::TWO));
/// ```
pub fn pow(
    a: FixedPoint64,
    p: FixedPoint64,
) -> Result<FixedPoint64, MathError> {
    pow2(exponent(a, p)?)
}

/// Computes `a^-p = 2^-(log2(a) · p)` for `a ≥ 1`.
pub fn inv_pow(
    a: FixedPoint64,
    p: FixedPoint64,
) -> Result<FixedPoint64, MathError> {
    inv_pow2(exponent(a, p)?)
}

/// Computes `(a / b)^p`.
///
/// The ratio is inverted when `a < b` so the logarithm is always taken of a
/// value of at least one.
pub fn safe_pow(
    a: FixedPoint64,
    b: FixedPoint64,
    p: FixedPoint64,
) -> Result<FixedPoint64, MathError> {
    if a < b {
        inv_pow(div(b, a)?, p)
    } else {
        pow(div(a, b)?, p)
    }
}
