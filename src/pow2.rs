//! Powers of two with fixed-point exponents.

use primitive_types::U256;

use crate::arith::{exp_tail, inv_exp_tail, mul, residual};
use crate::error::MathError;
use crate::fixed::{FixedPoint64, FRAC_BITS};
use crate::tables::{INV_LOG2_TABLE, LOG2_TABLE, TABLE_BITS};

/// Exponents at or above this many whole units cannot be represented.
const POW2_MAX_EXPONENT: u64 = 192;

/// Exponents at or above this many whole units are rejected by [`inv_pow2`].
const INV_POW2_MAX_EXPONENT: u64 = 41;

/// Multiplies together the table factors selected by the leading fractional
/// bits of `x`, then corrects for the remaining bits with `tail`.
fn fractional_power(
    x: FixedPoint64,
    table: &[FixedPoint64; TABLE_BITS],
    tail: fn(FixedPoint64) -> Result<FixedPoint64, MathError>,
) -> Result<FixedPoint64, MathError> {
    let mut acc = FixedPoint64::ONE;

    for (i, &factor) in table.iter().enumerate() {
        if x.raw().bit(FRAC_BITS - 1 - i) {
            acc = mul(acc, factor)?;
        }
    }

    mul(acc, tail(mul(residual(x), FixedPoint64::LN2)?)?)
}

/// Computes `2^x`.
///
/// Fails with [`MathError::Overflow`] if `x ≥ 192` or if the result does not
/// fit in 256 bits.
pub fn pow2(x: FixedPoint64) -> Result<FixedPoint64, MathError> {
    let whole = x.integer_part();

    if whole >= U256::from(POW2_MAX_EXPONENT) {
        log::debug!("pow2: exponent {x} is too large");
        return Err(MathError::Overflow);
    }

    let shift = whole.low_u64() as usize;
    let acc = fractional_power(x, &LOG2_TABLE, exp_tail)?;

    if acc.raw().bits() + shift > 256 {
        log::debug!("pow2: 2^{x} overflows");
        return Err(MathError::Overflow);
    }

    Ok(FixedPoint64::from_raw(acc.raw() << shift))
}

/// Computes `2^-x` for `x < 41`.
///
/// Larger exponents fail with [`MathError::Domain`]; their results would be
/// indistinguishable from zero.
pub fn inv_pow2(x: FixedPoint64) -> Result<FixedPoint64, MathError> {
    let whole = x.integer_part();

    if whole >= U256::from(INV_POW2_MAX_EXPONENT) {
        log::debug!("inv_pow2: exponent {x} is too large");
        return Err(MathError::Domain);
    }

    let shift = whole.low_u64() as usize;
    let acc = fractional_power(x, &INV_LOG2_TABLE, inv_exp_tail)?;

    Ok(FixedPoint64::from_raw(acc.raw() >> shift))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::logarithm::log2;
    use crate::reference::{self, relative_error};

    #[test]
    fn whole_exponents() {
        for k in 0..192 {
            let x = FixedPoint64::from_integer(k);
            let expected = U256::one() << (FRAC_BITS + k as usize);

            assert_eq!(pow2(x).map(FixedPoint64::raw), Ok(expected), "2^{k}");
        }

        for k in 0..41 {
            let x = FixedPoint64::from_integer(k);
            let expected = U256::one() << (FRAC_BITS - k as usize);

            let result = inv_pow2(x).map(FixedPoint64::raw);
            assert_eq!(result, Ok(expected), "2^-{k}");
        }
    }

    #[test]
    fn square_root_of_two() {
        let half = "0.5".parse().unwrap();

        assert_eq!(inv_pow2(half), Ok(INV_LOG2_TABLE[0]));

        let truth = reference::pow2(half).unwrap();
        assert!(relative_error(pow2(half).unwrap(), truth) < 1e-10);
    }

    #[test]
    fn limits() {
        let largest =
            FixedPoint64::from_raw((U256::from(192) << FRAC_BITS) - 1);

        assert!(pow2(largest).is_ok());
        assert_eq!(
            pow2(FixedPoint64::from_integer(192)),
            Err(MathError::Overflow)
        );
        assert_eq!(pow2(FixedPoint64::MAX), Err(MathError::Overflow));

        let largest = FixedPoint64::from_raw((U256::from(41) << FRAC_BITS) - 1);

        assert_eq!(
            inv_pow2(largest),
            Ok(FixedPoint64::from_raw(U256::from(8388607)))
        );
        assert_eq!(
            inv_pow2(FixedPoint64::from_integer(41)),
            Err(MathError::Domain)
        );
        assert_eq!(inv_pow2(FixedPoint64::MAX), Err(MathError::Domain));
    }

    fn exponent(max: u64) -> impl Strategy<Value = FixedPoint64> {
        (0..max, any::<u64>())
            .prop_map(|(whole, frac)| {
                FixedPoint64::from_limbs([frac, whole, 0, 0])
            })
    }

    proptest! {
        #[test]
        fn agrees_with_oracle(x in exponent(192)) {
            let truth = reference::pow2(x).unwrap();
            prop_assert!(relative_error(pow2(x).unwrap(), truth) < 1e-10);
        }

        #[test]
        fn inverse_agrees_with_oracle(x in exponent(30)) {
            let truth = reference::inv_pow2(x).unwrap();
            prop_assert!(relative_error(inv_pow2(x).unwrap(), truth) < 1e-6);
        }

        #[test]
        fn inverts_log2(whole in 1u64.., frac in any::<u64>()) {
            let a = FixedPoint64::from_limbs([frac, whole, 0, 0]);
            let round_trip = pow2(log2(a).unwrap()).unwrap();

            prop_assert!(relative_error(round_trip, a) < 1e-10);
        }
    }
}
