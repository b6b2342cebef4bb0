//! Binary and natural logarithms.

use primitive_types::{U256, U512};

use crate::arith::mul;
use crate::error::MathError;
use crate::fixed::{FixedPoint64, FRAC_BITS};

/// Fractional bits of the normalized mantissa.
const MANTISSA_BITS: usize = 192;

/// Fractional bits of [`log2_extended`].
pub(crate) const EXTENDED_FRAC_BITS: usize = 128;

/// Computes `log2(a)` for `a ≥ 1`.
///
/// The integer part is the position of the leading bit. The fractional bits
/// are extracted one at a time by repeatedly squaring the mantissa, which is
/// normalized to `[1, 2)` with 192 fractional bits, so the result agrees with
/// the exact floor up to truncation in the final bit.
///
/// # Examples
///
/// ```
/// use q64_math::{log2, FixedPoint64, MathError};
///
/// let eight = FixedPoint64::from_integer(8);
/// assert_eq!(log2(eight), Ok(FixedPoint64::from_integer(3)));
///
/// let half = "0.5".parse().unwrap();
/// assert_eq!(log2(half), Err(MathError::Domain));
/// ```
pub fn log2(a: FixedPoint64) -> Result<FixedPoint64, MathError> {
    binary_logarithm(a, FRAC_BITS).map(FixedPoint64::from_raw)
}

/// Computes `log2(a)` for `a ≥ 1` with [`EXTENDED_FRAC_BITS`] fractional
/// bits, for callers that scale the logarithm by a large factor.
pub(crate) fn log2_extended(a: FixedPoint64) -> Result<U256, MathError> {
    binary_logarithm(a, EXTENDED_FRAC_BITS)
}

/// The floor of `log2(a)` with `frac_bits` fractional bits.
fn binary_logarithm(
    a: FixedPoint64,
    frac_bits: usize,
) -> Result<U256, MathError> {
    if a < FixedPoint64::ONE {
        log::debug!("log2: {a} is below one");
        return Err(MathError::Domain);
    }

    let msb = a.raw().bits() - 1;
    let mut result = U256::from(msb - FRAC_BITS) << frac_bits;

    let mut mantissa = U512::from(a.raw());
    mantissa = if msb <= MANTISSA_BITS {
        mantissa << (MANTISSA_BITS - msb)
    } else {
        mantissa >> (msb - MANTISSA_BITS)
    };

    for bit in (0..frac_bits).rev() {
        // Squares stay below 4, so the product fits comfortably.
        mantissa = (mantissa * mantissa) >> MANTISSA_BITS;

        if mantissa.bit(MANTISSA_BITS + 1) {
            result = result | (U256::one() << bit);
            mantissa = mantissa >> 1;
        }
    }

    Ok(result)
}

/// Computes `ln(a) = log2(a) · ln(2)` for `a ≥ 1`.
pub fn ln(a: FixedPoint64) -> Result<FixedPoint64, MathError> {
    mul(log2(a)?, FixedPoint64::LN2)
}
