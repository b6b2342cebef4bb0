//! Exact multiplication and division.

use primitive_types::U256;

use crate::error::MathError;
use crate::fixed::{FixedPoint64, FRAC_BITS};
use crate::tables::TABLE_BITS;

/// Largest dividend accepted by [`div`]: `a · 2^64` must fit in 256 bits.
const DIV_MAX_DIVIDEND_BITS: usize = 256 - FRAC_BITS;

/// Computes `a · b`, truncated to 64 fractional bits.
///
/// The product is formed at double width, so the result is exact (floored)
/// whenever it fits in 256 bits; otherwise fails with
/// [`MathError::Overflow`].
///
/// # Examples
///
/// ```
/// use q64_math::{mul, FixedPoint64, MathError};
///
/// let a: FixedPoint64 = "1.5".parse().unwrap();
/// let b: FixedPoint64 = "0.25".parse().unwrap();
///
/// assert_eq!(mul(a, b), Ok("0.375".parse().unwrap()));
/// assert_eq!(
///     mul(FixedPoint64::MAX, FixedPoint64::TWO),
///     Err(MathError::Overflow)
/// );
/// ```
pub fn mul(
    a: FixedPoint64,
    b: FixedPoint64,
) -> Result<FixedPoint64, MathError> {
    let product = a.raw().full_mul(b.raw()) >> FRAC_BITS;

    U256::try_from(product)
        .map(FixedPoint64::from_raw)
        .map_err(|_| {
            log::debug!("mul: {a} * {b} overflows");
            MathError::Overflow
        })
}

/// Computes `a / b`, truncated to 64 fractional bits.
///
/// Fails with [`MathError::DivisionByZero`] if `b` is zero and with
/// [`MathError::Overflow`] if `a ≥ 2^192`.
pub fn div(
    a: FixedPoint64,
    b: FixedPoint64,
) -> Result<FixedPoint64, MathError> {
    if b.is_zero() {
        log::debug!("div: {a} / 0");
        return Err(MathError::DivisionByZero);
    }

    if a.raw().bits() > DIV_MAX_DIVIDEND_BITS {
        log::debug!("div: dividend {a} is too wide");
        return Err(MathError::Overflow);
    }

    Ok(FixedPoint64::from_raw((a.raw() << FRAC_BITS) / b.raw()))
}

/// The fractional bits of `x` below those resolved by table lookup.
pub(crate) fn residual(x: FixedPoint64) -> FixedPoint64 {
    let mask = (U256::one() << (FRAC_BITS - TABLE_BITS)) - 1;
    FixedPoint64::from_raw(x.raw() & mask)
}

/// Approximates `e^t` for `0 ≤ t < 2^-20` by `1 + t + t²/2`.
///
/// The omitted terms are below `2^-62` relative to the result, which is
/// within the rounding of the final multiplication.
pub(crate) fn exp_tail(t: FixedPoint64) -> Result<FixedPoint64, MathError> {
    let half_square = mul(t, t)?.raw() >> 1;

    Ok(FixedPoint64::from_raw(
        FixedPoint64::ONE.raw() + t.raw() + half_square,
    ))
}

/// Approximates `e^-t` for `0 ≤ t < 2^-20` by `1 - t + t²/2`.
pub(crate) fn inv_exp_tail(t: FixedPoint64) -> Result<FixedPoint64, MathError> {
    let half_square = mul(t, t)?.raw() >> 1;

    Ok(FixedPoint64::from_raw(
        FixedPoint64::ONE.raw() - t.raw() + half_square,
    ))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn x64(n: u64) -> FixedPoint64 {
        FixedPoint64::from_integer(n)
    }

    #[test]
    fn mul_exact() {
        assert_eq!(mul(x64(3), x64(7)), Ok(x64(21)));
        assert_eq!(
            mul(FixedPoint64::ZERO, FixedPoint64::MAX),
            Ok(FixedPoint64::ZERO)
        );
        assert_eq!(
            mul(FixedPoint64::MAX, FixedPoint64::ONE),
            Ok(FixedPoint64::MAX)
        );
        assert_eq!(
            mul("1.5".parse().unwrap(), "0.25".parse().unwrap()),
            Ok("0.375".parse().unwrap())
        );

        // 2^-64 · 2^-64 truncates to zero.
        let ulp = FixedPoint64::from_raw(U256::one());
        assert_eq!(mul(ulp, ulp), Ok(FixedPoint64::ZERO));
    }

    #[test]
    fn mul_overflow() {
        assert_eq!(mul(FixedPoint64::MAX, x64(2)), Err(MathError::Overflow));

        // 2^96 · 2^96 = 2^192, which is one bit too wide.
        let a = FixedPoint64::from_raw(U256::one() << 160);
        assert_eq!(mul(a, a), Err(MathError::Overflow));

        let b = FixedPoint64::from_raw((U256::one() << 160) - 1);
        assert!(mul(b, b).is_ok());
    }

    #[test]
    fn div_exact() {
        assert_eq!(div(x64(21), x64(7)), Ok(x64(3)));
        assert_eq!(div(x64(1), x64(4)), Ok("0.25".parse().unwrap()));
        assert_eq!(div(FixedPoint64::ZERO, x64(5)), Ok(FixedPoint64::ZERO));
    }

    #[test]
    fn div_errors() {
        assert_eq!(
            div(x64(1), FixedPoint64::ZERO),
            Err(MathError::DivisionByZero)
        );
        assert_eq!(
            div(FixedPoint64::ZERO, FixedPoint64::ZERO),
            Err(MathError::DivisionByZero)
        );

        let widest = FixedPoint64::from_raw((U256::one() << 192) - 1);
        assert!(div(widest, FixedPoint64::MAX).is_ok());
        assert_eq!(
            div(FixedPoint64::from_raw(U256::one() << 192), FixedPoint64::MAX),
            Err(MathError::Overflow)
        );
    }

    #[test]
    fn tails() {
        assert_eq!(exp_tail(FixedPoint64::ZERO), Ok(FixedPoint64::ONE));
        assert_eq!(inv_exp_tail(FixedPoint64::ZERO), Ok(FixedPoint64::ONE));

        let t = FixedPoint64::from_raw(U256::one() << 40);
        let up = exp_tail(t).unwrap().raw();
        let down = inv_exp_tail(t).unwrap().raw();

        let square = mul(t, t).unwrap().raw();
        assert_eq!(up + down, FixedPoint64::TWO.raw() + square);
    }

    fn integer_x64() -> impl Strategy<Value = FixedPoint64> {
        (1u64..).prop_map(FixedPoint64::from_integer)
    }

    fn narrow_x64() -> impl Strategy<Value = FixedPoint64> {
        any::<[u64; 2]>()
            .prop_map(|[lo, hi]| FixedPoint64::from_limbs([lo, hi, 0, 0]))
    }

    proptest! {
        #[test]
        fn div_inverts_mul(a in narrow_x64(), b in integer_x64()) {
            let product = mul(a, b).unwrap();
            prop_assert_eq!(div(product, b), Ok(a));
        }

        #[test]
        fn mul_commutes(a in narrow_x64(), b in narrow_x64()) {
            prop_assert_eq!(mul(a, b), mul(b, a));
        }
    }
}
