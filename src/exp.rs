//! The natural exponential.

use primitive_types::U256;

use crate::arith::{exp_tail, inv_exp_tail, mul, residual};
use crate::error::MathError;
use crate::fixed::{FixedPoint64, FRAC_BITS};
use crate::tables::{
    EXP_MAX_INPUT, EXP_NEG_TABLE, EXP_POS_TABLE, INV_EXP_NEG_TABLE,
    INV_EXP_POS_TABLE,
};

/// Integer bits of the exponent resolved by [`INV_EXP_POS_TABLE`]. The next
/// bit, `2^5 = 32`, is the largest exponent [`inv_exp`] accepts.
const INV_EXP_WHOLE_BITS: usize = 5;

/// Computes `e^a`.
///
/// Fails with [`MathError::Overflow`] if the result does not fit in 256 bits.
pub fn exp(a: FixedPoint64) -> Result<FixedPoint64, MathError> {
    if a > EXP_MAX_INPUT {
        log::debug!("exp: e^{a} overflows");
        return Err(MathError::Overflow);
    }

    let mut acc = FixedPoint64::ONE;

    for (i, &factor) in EXP_NEG_TABLE.iter().enumerate() {
        if a.raw().bit(FRAC_BITS - 1 - i) {
            acc = mul(acc, factor)?;
        }
    }

    acc = mul(acc, exp_tail(residual(a))?)?;

    for (i, &factor) in EXP_POS_TABLE.iter().enumerate() {
        if a.raw().bit(FRAC_BITS + i) {
            acc = mul(acc, factor)?;
        }
    }

    Ok(acc)
}

/// Computes `e^-a` for `a ≤ 32`.
///
/// Larger arguments fail with [`MathError::Domain`].
pub fn inv_exp(a: FixedPoint64) -> Result<FixedPoint64, MathError> {
    let limit = U256::one() << (FRAC_BITS + INV_EXP_WHOLE_BITS);

    if a.raw() > limit {
        log::debug!("inv_exp: argument {a} is too large");
        return Err(MathError::Domain);
    }

    let mut acc = FixedPoint64::ONE;

    for (i, &factor) in INV_EXP_NEG_TABLE.iter().enumerate() {
        if a.raw().bit(FRAC_BITS - 1 - i) {
            acc = mul(acc, factor)?;
        }
    }

    acc = mul(acc, inv_exp_tail(residual(a))?)?;

    let whole = &INV_EXP_POS_TABLE[..INV_EXP_WHOLE_BITS];

    for (i, &factor) in whole.iter().enumerate() {
        if a.raw().bit(FRAC_BITS + i) {
            acc = mul(acc, factor)?;
        }
    }

    // e^-32 has too few significant bits to use directly; square e^-16.
    if a.raw() == limit {
        let factor = whole[INV_EXP_WHOLE_BITS - 1];
        acc = mul(mul(acc, factor)?, factor)?;
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::reference::{self, relative_error};

    #[test]
    fn zero() {
        assert_eq!(exp(FixedPoint64::ZERO), Ok(FixedPoint64::ONE));
        assert_eq!(inv_exp(FixedPoint64::ZERO), Ok(FixedPoint64::ONE));
    }

    #[test]
    fn table_entries() {
        for (i, &factor) in EXP_POS_TABLE.iter().enumerate() {
            let x = FixedPoint64::from_integer(1 << i);
            assert_eq!(exp(x), Ok(factor), "e^{}", 1 << i);
        }

        let whole_factors = &INV_EXP_POS_TABLE[..INV_EXP_WHOLE_BITS];

        for (i, &factor) in whole_factors.iter().enumerate() {
            let x = FixedPoint64::from_integer(1 << i);
            assert_eq!(inv_exp(x), Ok(factor), "e^-{}", 1 << i);
        }
    }

    #[test]
    fn upper_limit() {
        assert!(exp(EXP_MAX_INPUT).is_ok());

        let whole = FixedPoint64::from_integer(133);
        let truth = reference::exp(whole).unwrap();
        assert!(relative_error(exp(whole).unwrap(), truth) < 1e-10);

        let beyond = FixedPoint64::from_raw(EXP_MAX_INPUT.raw() + 1);
        assert_eq!(exp(beyond), Err(MathError::Overflow));
        assert_eq!(
            exp(FixedPoint64::from_integer(134)),
            Err(MathError::Overflow)
        );
        assert_eq!(exp(FixedPoint64::MAX), Err(MathError::Overflow));

        // floor(e^-32 · 2^64) = 233612.
        let limit = FixedPoint64::from_integer(32);
        assert_eq!(
            inv_exp(limit),
            Ok(FixedPoint64::from_raw(U256::from(233612)))
        );

        let beyond = FixedPoint64::from_raw(limit.raw() + 1);
        assert_eq!(inv_exp(beyond), Err(MathError::Domain));
    }

    #[test]
    fn known_values() {
        let one = FixedPoint64::ONE;
        let ten = FixedPoint64::from_integer(10);

        for x in [one, ten] {
            let truth = reference::exp(x).unwrap();
            assert!(relative_error(exp(x).unwrap(), truth) < 1e-10);

            let truth = reference::inv_exp(x).unwrap();
            assert!(relative_error(inv_exp(x).unwrap(), truth) < 1e-6);
        }
    }

    proptest! {
        #[test]
        fn agrees_with_oracle(whole in 0u64..133, frac in any::<u64>()) {
            let a = FixedPoint64::from_limbs([frac, whole, 0, 0]);
            let truth = reference::exp(a).unwrap();
            prop_assert!(relative_error(exp(a).unwrap(), truth) < 1e-10);
        }

        #[test]
        fn inverse_agrees_with_oracle(whole in 0u64..20, frac in any::<u64>()) {
            let a = FixedPoint64::from_limbs([frac, whole, 0, 0]);
            let truth = reference::inv_exp(a).unwrap();

            prop_assert!(relative_error(inv_exp(a).unwrap(), truth) < 1e-6);
        }
    }
}
