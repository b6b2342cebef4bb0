//! Non-negative reals at high binary precision.

use std::ops::{Add, Div, Mul, Sub};
use std::sync::OnceLock;

use malachite::num::arithmetic::traits::PowerOf2;
use malachite::num::basic::traits::Zero;
use malachite::num::conversion::traits::ExactFrom;
use malachite::num::logic::traits::SignificantBits;
use malachite::Natural;

use crate::fixed::{FixedPoint64, FRAC_BITS};

/// Number of fractional bits carried by every [`Real`].
pub const PRECISION: u64 = 384;

const FIXED_SHIFT: u64 = PRECISION - FRAC_BITS as u64;

/// A non-negative real number `n / 2^PRECISION`.
///
/// Every operation truncates, so results are accurate to a few units in the
/// last place, far below the resolution of [`FixedPoint64`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Real(Natural);

impl Real {
    pub fn zero() -> Real {
        Real(Natural::ZERO)
    }

    pub fn one() -> Real {
        Real(Natural::power_of_2(PRECISION))
    }

    pub fn from_integer(n: u64) -> Real {
        Real(Natural::from(n) << PRECISION)
    }

    pub fn from_fixed(x: FixedPoint64) -> Real {
        Real(natural(x) << FIXED_SHIFT)
    }

    /// Computes `x / 2^k`.
    pub fn scaled_down(&self, k: u64) -> Real {
        Real(&self.0 >> k)
    }

    /// Computes `x · 2^k`.
    pub fn scaled_up(&self, k: u64) -> Real {
        Real(&self.0 << k)
    }

    /// `floor(x · 2^64) / 2^64`, or `None` if it exceeds
    /// [`FixedPoint64::MAX`].
    pub fn floor_fixed(&self) -> Option<FixedPoint64> {
        fixed(&self.0 >> FIXED_SHIFT)
    }

    /// `x` rounded to the nearest multiple of `2^-64`, or `None` if that
    /// exceeds [`FixedPoint64::MAX`].
    pub fn round_fixed(&self) -> Option<FixedPoint64> {
        let half = Natural::power_of_2(FIXED_SHIFT - 1);
        fixed((&self.0 + half) >> FIXED_SHIFT)
    }

    pub fn ln2() -> Real {
        static LN2: OnceLock<Real> = OnceLock::new();

        LN2.get_or_init(|| {
            // ln(2) = 2 atanh(1/3) = 2 Σ 1 / ((2k + 1) 3^(2k + 1))
            let nine = Natural::from(9u32);
            let mut term = Real::one().0 / Natural::from(3u32);
            let mut sum = Natural::ZERO;
            let mut k = 0u64;

            while term != Natural::ZERO {
                sum += &term / Natural::from(2 * k + 1);
                term /= &nine;
                k += 1;
            }

            Real(sum << 1)
        })
        .clone()
    }

    /// Computes `ln(x)` for `x ≥ 1`.
    pub fn ln(&self) -> Option<Real> {
        let bits = self.0.significant_bits();

        if bits <= PRECISION {
            return None;
        }

        // x = m · 2^k with m in [1, 2), ln(m) = 2 atanh((m - 1) / (m + 1)).
        let k = bits - 1 - PRECISION;
        let m = self.scaled_down(k);
        let one = Real::one();

        let z = &(&m - &one) / &(&m + &one);
        let z2 = &z * &z;

        let mut term = z;
        let mut sum = Natural::ZERO;
        let mut j = 0u64;

        while term.0 != Natural::ZERO {
            sum += &term.0 / Natural::from(2 * j + 1);
            term = &term * &z2;
            j += 1;
        }

        let whole = Natural::from(k) * Real::ln2().0;

        Some(Real(whole + (sum << 1)))
    }

    /// Computes `log2(x)` for `x ≥ 1`.
    pub fn log2(&self) -> Option<Real> {
        Some(&self.ln()? / &Real::ln2())
    }

    /// Computes `e^x`.
    ///
    /// # Panics
    ///
    /// Panics if `x / ln(2)` does not fit in a `u64`.
    pub fn exp(&self) -> Real {
        let ln2 = Real::ln2();

        // x = n ln(2) + r with 0 ≤ r < ln(2).
        let n = &self.0 / &ln2.0;
        let r = Real(&self.0 - &(&n * &ln2.0));

        let mut term = Real::one();
        let mut sum = Natural::ZERO;
        let mut k = 1u64;

        while term.0 != Natural::ZERO {
            sum += &term.0;
            term = Real((&term * &r).0 / Natural::from(k));
            k += 1;
        }

        Real(sum << u64::exact_from(&n))
    }

    /// Computes `1 / x` for `x > 0`.
    pub fn recip(&self) -> Real {
        &Real::one() / self
    }
}

impl<'a> Add for &'a Real {
    type Output = Real;

    fn add(self, rhs: &'a Real) -> Real {
        Real(&self.0 + &rhs.0)
    }
}

impl<'a> Sub for &'a Real {
    type Output = Real;

    /// # Panics
    ///
    /// Panics if `rhs > self`.
    fn sub(self, rhs: &'a Real) -> Real {
        Real(&self.0 - &rhs.0)
    }
}

impl<'a> Mul for &'a Real {
    type Output = Real;

    fn mul(self, rhs: &'a Real) -> Real {
        Real((&self.0 * &rhs.0) >> PRECISION)
    }
}

impl<'a> Div for &'a Real {
    type Output = Real;

    fn div(self, rhs: &'a Real) -> Real {
        Real((&self.0 << PRECISION) / &rhs.0)
    }
}

/// The raw integer of `x`.
pub fn natural(x: FixedPoint64) -> Natural {
    Natural::from_limbs_asc(&x.limbs())
}

/// Reinterprets `n` as a raw fixed-point integer, if it fits in 256 bits.
pub fn fixed(n: Natural) -> Option<FixedPoint64> {
    if n.significant_bits() > 256 {
        return None;
    }

    let mut limbs = [0u64; 4];

    for (limb, value) in limbs.iter_mut().zip(n.to_limbs_asc()) {
        *limb = value;
    }

    Some(FixedPoint64::from_limbs(limbs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(Real::ln2().round_fixed(), Some(FixedPoint64::LN2));
        assert_eq!(Real::one().floor_fixed(), Some(FixedPoint64::ONE));
        assert_eq!(Real::zero().exp(), Real::one());
        assert_eq!(Real::one().ln(), Some(Real::zero()));
    }

    #[test]
    fn logarithms() {
        let below_one = FixedPoint64::from_limbs([u64::MAX, 0, 0, 0]);
        assert_eq!(Real::from_fixed(below_one).ln(), None);

        for k in [1, 7, 64, 191] {
            let x = Real::from_integer(1).scaled_up(k);
            let expected = FixedPoint64::from_integer(k);

            assert_eq!(x.log2().and_then(|l| l.round_fixed()), Some(expected));
        }
    }

    #[test]
    fn exponentials() {
        let e = Real::one().exp();

        // e = 2.718281828459045235360287471352...
        assert_eq!(
            e.floor_fixed(),
            Some(FixedPoint64::from_limbs([13249961062380153450, 2, 0, 0]))
        );
        assert_eq!(
            e.ln().and_then(|l| l.round_fixed()),
            Some(FixedPoint64::ONE)
        );
        assert_eq!(
            e.recip().round_fixed(),
            Some(FixedPoint64::from_limbs([6786177901268885275, 0, 0, 0]))
        );
    }

    #[test]
    fn conversions() {
        let max = Real::from_fixed(FixedPoint64::MAX);

        assert_eq!(max.floor_fixed(), Some(FixedPoint64::MAX));
        assert_eq!(max.round_fixed(), Some(FixedPoint64::MAX));

        let beyond = Real::from_integer(1).scaled_up(192);
        assert_eq!(beyond.floor_fixed(), None);
        assert_eq!(fixed(natural(FixedPoint64::LN2)), Some(FixedPoint64::LN2));
    }
}
