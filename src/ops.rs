//! Uniform access to the public operations.

use strum::VariantArray;
use strum_macros::{Display, EnumString, VariantArray};

use crate::arith::{div, mul};
use crate::error::OperationError;
use crate::exp::{exp, inv_exp};
use crate::fixed::FixedPoint64;
use crate::logarithm::{ln, log2};
use crate::pow2::{inv_pow2, pow2};
use crate::power::{inv_pow, pow};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, VariantArray)]
pub enum Operation {
    #[strum(to_string = "mul")]
    Mul,
    #[strum(to_string = "div")]
    Div,
    #[strum(to_string = "log2")]
    Log2,
    #[strum(to_string = "ln")]
    Ln,
    #[strum(to_string = "pow2")]
    Pow2,
    #[strum(to_string = "inv_pow2")]
    InvPow2,
    #[strum(to_string = "exp")]
    Exp,
    #[strum(to_string = "inv_exp")]
    InvExp,
    #[strum(to_string = "pow")]
    Pow,
    #[strum(to_string = "inv_pow")]
    InvPow,
}

impl Operation {
    pub const ALL: &[Operation] = <Self as VariantArray>::VARIANTS;

    pub fn arity(&self) -> usize {
        match self {
            Operation::Mul => 2,
            Operation::Div => 2,
            Operation::Log2 => 1,
            Operation::Ln => 1,
            Operation::Pow2 => 1,
            Operation::InvPow2 => 1,
            Operation::Exp => 1,
            Operation::InvExp => 1,
            Operation::Pow => 2,
            Operation::InvPow => 2,
        }
    }

    /// Largest relative error the operation is allowed relative to the
    /// floored exact result.
    pub fn tolerance(&self) -> f64 {
        match self {
            Operation::Mul | Operation::Div => 0.0,
            Operation::Log2 | Operation::Ln => 1e-10,
            Operation::InvExp => 1e-6,
            Operation::Pow2
            | Operation::InvPow2
            | Operation::Exp
            | Operation::Pow
            | Operation::InvPow => 1e-5,
        }
    }

    /// Applies the operation to `args`.
    ///
    /// Fails with [`OperationError::Arity`] if `args.len()` differs from
    /// [`Operation::arity`].
    ///
    /// # Examples
    ///
    /// ```
    /// use q64_math::{FixedPoint64, Operation, OperationError};
    ///
    /// let op: Operation = "log2".parse().unwrap();
    /// let four = FixedPoint64::from_integer(4);
    ///
    /// assert_eq!(op.evaluate(&[four]), Ok(FixedPoint64::TWO));
    /// assert_eq!(
    ///     op.evaluate(&[four, four]),
    ///     Err(OperationError::Arity { expected: 1, found: 2 })
    /// );
    /// ```
    pub fn evaluate(
        &self,
        args: &[FixedPoint64],
    ) -> Result<FixedPoint64, OperationError> {
        let result = match (self, args) {
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
            _ => return Err(self.arity_error(args)),
        };

        Ok(result?)
    }

    pub(crate) fn arity_error(&self, args: &[FixedPoint64]) -> OperationError {
        OperationError::Arity {
            expected: self.arity(),
            found: args.len(),
        }
    }
}
