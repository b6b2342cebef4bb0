//! Error types.

use std::error::Error;
use std::fmt;

/// An error resulting from a fixed-point operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathError {
    /// An argument lies outside the operation's valid input range.
    Domain,
    /// A result or required intermediate value exceeds 256 bits.
    Overflow,
    DivisionByZero,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match self {
            MathError::Domain => "argument out of domain",
            MathError::Overflow => "result overflows 256 bits",
            MathError::DivisionByZero => "division by zero",
        };

        write!(f, "{description}")
    }
}

impl Error for MathError {}

/// An error resulting from applying an [`Operation`](crate::Operation) to a
/// list of operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationError {
    /// The number of operands differs from the operation's arity.
    Arity { expected: usize, found: usize },
    Math(MathError),
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OperationError::Arity { expected, found } => {
                write!(f, "expected {expected} operands, got {found}")
            }
            OperationError::Math(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OperationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OperationError::Arity { .. } => None,
            OperationError::Math(err) => Some(err),
        }
    }
}

impl From<MathError> for OperationError {
    fn from(err: MathError) -> Self {
        OperationError::Math(err)
    }
}

/// An error resulting from parsing a fixed-point literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseFixedPointError {
    Empty,
    InvalidDigit,
    Overflow,
}

impl fmt::Display for ParseFixedPointError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseFixedPointError::Empty => write!(f, "empty literal"),
            ParseFixedPointError::InvalidDigit => {
                write!(f, "invalid digit in literal")
            }
            ParseFixedPointError::Overflow => {
                write!(f, "literal does not fit in Q192.64")
            }
        }
    }
}

impl Error for ParseFixedPointError {}
