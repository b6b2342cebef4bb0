//! Arbitrary-precision reference implementations.
//!
//! Each function returns the exact result floored to 64 fractional bits, or
//! `None` when the corresponding fixed-point operation is expected to fail.
//! The feasibility rules mirror the documented limits of the fixed-point
//! operations rather than mathematical definedness.

pub mod eval;
pub mod generator;
pub mod real;

use primitive_types::U256;

use crate::error::OperationError;
use crate::fixed::{FixedPoint64, FRAC_BITS};
use crate::ops::Operation;
use real::{fixed, natural, Real};

pub use eval::Evaluation;

pub fn mul(a: FixedPoint64, b: FixedPoint64) -> Option<FixedPoint64> {
    fixed((natural(a) * natural(b)) >> FRAC_BITS as u64)
}

pub fn div(a: FixedPoint64, b: FixedPoint64) -> Option<FixedPoint64> {
    if b.is_zero() || a.raw().bits() > 256 - FRAC_BITS {
        return None;
    }

    fixed((natural(a) << FRAC_BITS as u64) / natural(b))
}

pub fn log2(a: FixedPoint64) -> Option<FixedPoint64> {
    Real::from_fixed(a).log2()?.floor_fixed()
}

pub fn ln(a: FixedPoint64) -> Option<FixedPoint64> {
    Real::from_fixed(a).ln()?.floor_fixed()
}

pub fn pow2(x: FixedPoint64) -> Option<FixedPoint64> {
    if x.integer_part() >= U256::from(192) {
        return None;
    }

    (&Real::from_fixed(x) * &Real::ln2()).exp().floor_fixed()
}

pub fn inv_pow2(x: FixedPoint64) -> Option<FixedPoint64> {
    if x.integer_part() >= U256::from(41) {
        return None;
    }

    (&Real::from_fixed(x) * &Real::ln2()).exp().recip().floor_fixed()
}

pub fn exp(a: FixedPoint64) -> Option<FixedPoint64> {
    if a.integer_part() >= U256::from(134) {
        return None;
    }

    Real::from_fixed(a).exp().floor_fixed()
}

pub fn inv_exp(a: FixedPoint64) -> Option<FixedPoint64> {
    if a.raw() > U256::one() << (FRAC_BITS + 5) {
        return None;
    }

    Real::from_fixed(a).exp().recip().floor_fixed()
}

/// The exponent `log2(a) · p` floored to 64 fractional bits, or `None` if it
/// does not fit.
fn power_exponent(a: FixedPoint64, p: FixedPoint64) -> Option<FixedPoint64> {
    (&Real::from_fixed(a).log2()? * &Real::from_fixed(p)).floor_fixed()
}

/// `a^p` as a real, if `a ≥ 1`.
fn real_power(a: FixedPoint64, p: FixedPoint64) -> Option<Real> {
    Some((&Real::from_fixed(a).ln()? * &Real::from_fixed(p)).exp())
}

pub fn pow(a: FixedPoint64, p: FixedPoint64) -> Option<FixedPoint64> {
    if power_exponent(a, p)?.integer_part() >= U256::from(192) {
        return None;
    }

    real_power(a, p)?.floor_fixed()
}

pub fn inv_pow(a: FixedPoint64, p: FixedPoint64) -> Option<FixedPoint64> {
    if power_exponent(a, p)?.integer_part() >= U256::from(41) {
        return None;
    }

    real_power(a, p)?.recip().floor_fixed()
}

/// Applies the reference implementation of `op` to `args`.
///
/// Fails with [`OperationError::Arity`] if `args.len()` differs from
/// [`Operation::arity`].
pub fn evaluate(
    op: Operation,
    args: &[FixedPoint64],
) -> Result<Option<FixedPoint64>, OperationError> {
    let target = match (op, args) {
        (Operation::Mul, &[a, b]) => mul(a, b),
        (Operation::Div, &[a, b]) => div(a, b),
        (Operation::Log2, &[a]) => log2(a),
        (Operation::Ln, &[a]) => ln(a),
        (Operation::Pow2, &[x]) => pow2(x),
        (Operation::InvPow2, &[x]) => inv_pow2(x),
        (Operation::Exp, &[a]) => exp(a),
        (Operation::InvExp, &[a]) => inv_exp(a),
        (Operation::Pow, &[a, p]) => pow(a, p),
        (Operation::InvPow, &[a, p]) => inv_pow(a, p),
        _ => return Err(op.arity_error(args)),
    };

    Ok(target)
}

/// Computes `|1 - value / target|`.
///
/// A zero target yields zero for a zero value and infinity otherwise.
pub fn relative_error(value: FixedPoint64, target: FixedPoint64) -> f64 {
    if target.is_zero() {
        return if value.is_zero() { 0.0 } else { f64::INFINITY };
    }

    let difference = if value > target {
        value.raw() - target.raw()
    } else {
        target.raw() - value.raw()
    };

    FixedPoint64::from_raw(difference).to_f64() / target.to_f64()
}
