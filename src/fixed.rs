//! The Q64.64 fixed-point representation.

use std::fmt;
use std::str::FromStr;

use primitive_types::{U256, U512};

use crate::error::ParseFixedPointError;

/// Number of fractional bits.
pub const FRAC_BITS: usize = 64;

/// Widest fraction accepted when parsing. Every Q64.64 value has an exact
/// decimal expansion of at most this many digits.
const MAX_FRAC_DIGITS: usize = 64;

/// An unsigned 256-bit integer `raw` representing the real number
/// `raw / 2^64`.
///
/// Values are never negative; operations whose exact result would be negative
/// fail instead of producing a value.
///
/// # Examples
///
/// ```
/// use q64_math::FixedPoint64;
///
/// let x: FixedPoint64 = "3.25".parse().unwrap();
///
/// assert_eq!(x, FixedPoint64::from_limbs([1 << 62, 3, 0, 0]));
/// assert_eq!(x.to_string(), "3.25");
/// assert_eq!(format!("{x:.1}"), "3.2");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint64(U256);

impl FixedPoint64 {
    pub const ZERO: FixedPoint64 = FixedPoint64(U256([0, 0, 0, 0]));
    pub const ONE: FixedPoint64 = FixedPoint64(U256([0, 1, 0, 0]));
    pub const TWO: FixedPoint64 = FixedPoint64(U256([0, 2, 0, 0]));

    /// `ln(2)`, rounded to nearest.
    pub const LN2: FixedPoint64 =
        FixedPoint64(U256([12786308645202655660, 0, 0, 0]));

    pub const MAX: FixedPoint64 = FixedPoint64(U256([u64::MAX; 4]));

    #[inline]
    pub const fn from_raw(raw: U256) -> FixedPoint64 {
        FixedPoint64(raw)
    }

    /// Creates a fixed-point value from its little-endian 64-bit limbs.
    #[inline]
    pub const fn from_limbs(limbs: [u64; 4]) -> FixedPoint64 {
        FixedPoint64(U256(limbs))
    }

    #[inline]
    pub const fn from_integer(n: u64) -> FixedPoint64 {
        FixedPoint64(U256([0, n, 0, 0]))
    }

    #[inline]
    pub const fn raw(self) -> U256 {
        self.0
    }

    #[inline]
    pub const fn limbs(self) -> [u64; 4] {
        self.0 .0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// The integer part, `floor(self)`, as a plain integer.
    #[inline]
    pub fn integer_part(self) -> U256 {
        self.0 >> FRAC_BITS
    }

    /// The fractional bits, `self - floor(self)`, as a fixed-point value.
    #[inline]
    pub const fn fraction(self) -> FixedPoint64 {
        FixedPoint64(U256([self.0 .0[0], 0, 0, 0]))
    }

    /// Approximates `self` as a double. Intended for diagnostics only.
    pub fn to_f64(self) -> f64 {
        self.limbs()
            .iter()
            .enumerate()
            .map(|(i, &limb)| limb as f64 * 2f64.powi(64 * i as i32 - 64))
            .sum()
    }
}

impl fmt::Display for FixedPoint64 {
    /// Formats the exact decimal expansion of `self`. A precision, if given,
    /// truncates the fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.integer_part())?;

        let mut frac = u128::from(self.limbs()[0]);
        let mask = u128::from(u64::MAX);

        let digits = match f.precision() {
            Some(precision) => precision,
            None if frac == 0 => return Ok(()),
            None => MAX_FRAC_DIGITS,
        };

        if digits == 0 {
            return Ok(());
        }

        f.write_str(".")?;

        for _ in 0..digits {
            if frac == 0 && f.precision().is_none() {
                break;
            }

            frac *= 10;
            write!(f, "{}", frac >> FRAC_BITS)?;
            frac &= mask;
        }

        Ok(())
    }
}

impl FromStr for FixedPoint64 {
    type Err = ParseFixedPointError;

    /// Parses a non-negative decimal literal `<int>[.<frac>]`, truncating the
    /// fraction to 64 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use q64_math::{FixedPoint64, ParseFixedPointError};
    ///
    /// let tenth: FixedPoint64 = "0.1".parse().unwrap();
    /// assert_eq!(format!("{tenth:.4}"), "0.0999");
    ///
    /// let err = "1e5".parse::<FixedPoint64>().unwrap_err();
    /// assert_eq!(err, ParseFixedPointError::InvalidDigit);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (integer, fraction) = s.split_once('.').unwrap_or((s, ""));

        if integer.is_empty() && fraction.is_empty() {
            return Err(ParseFixedPointError::Empty);
        }

        let integer = parse_digits(integer)?;

        if integer.bits() > 256 - FRAC_BITS {
            return Err(ParseFixedPointError::Overflow);
        }

        if !fraction.bytes().all(|c| c.is_ascii_digit()) {
            return Err(ParseFixedPointError::InvalidDigit);
        }

        let fraction = fraction.get(..MAX_FRAC_DIGITS).unwrap_or(fraction);
        let scale = U512::from(10u8).pow(U512::from(fraction.len()));
        let fraction = (parse_digits(fraction)? << FRAC_BITS) / scale;

        let integer = U256::try_from(integer)
            .map_err(|_| ParseFixedPointError::Overflow)?;
        let fraction = U256::try_from(fraction)
            .map_err(|_| ParseFixedPointError::Overflow)?;

        Ok(FixedPoint64((integer << FRAC_BITS) | fraction))
    }
}

fn parse_digits(s: &str) -> Result<U512, ParseFixedPointError> {
    let ten = U512::from(10u8);

    s.bytes().try_fold(U512::zero(), |acc, c| {
        if !c.is_ascii_digit() {
            return Err(ParseFixedPointError::InvalidDigit);
        }

        acc.checked_mul(ten)
            .and_then(|acc| acc.checked_add(U512::from(c - b'0')))
            .ok_or(ParseFixedPointError::Overflow)
    })
}
