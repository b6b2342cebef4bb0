//! Unsigned Q64.64 fixed-point arithmetic over 256-bit integers, with
//! logarithms, exponentials and powers.
//!
//! Every operation is a pure function returning either a value or a
//! [`MathError`]; none of them panic.
//!
//! ```
//! use q64_math::{exp, ln, FixedPoint64};
//!
//! let x: FixedPoint64 = "2.5".parse().unwrap();
//! let y = ln(exp(x).unwrap()).unwrap();
//!
//! assert!((y.to_f64() - 2.5).abs() < 1e-9);
//! ```

pub mod arith;
pub mod error;
pub mod exp;
pub mod fixed;
pub mod logarithm;
pub mod ops;
pub mod pow2;
pub mod power;
pub mod tables;

#[cfg(feature = "reference")]
pub mod opts;
#[cfg(any(test, feature = "reference"))]
pub mod reference;

pub use arith::{div, mul};
pub use error::{MathError, OperationError, ParseFixedPointError};
pub use exp::{exp, inv_exp};
pub use fixed::FixedPoint64;
pub use logarithm::{ln, log2};
pub use ops::Operation;
pub use pow2::{inv_pow2, pow2};
pub use power::{inv_pow, pow, safe_pow};
