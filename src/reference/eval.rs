//! Comparison of the fixed-point operations against the reference.

use std::fmt;

use itertools::Itertools;
use primitive_types::U256;

use super::{evaluate, relative_error};
use crate::error::OperationError;
use crate::fixed::FixedPoint64;
use crate::ops::Operation;

/// Summary of an operation's agreement with the reference over a set of
/// operands.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub operation: Operation,
    pub samples: usize,
    /// Samples for which the reference reports failure.
    pub expected_failures: usize,
    pub max_error: f64,
    /// Mean relative error over samples where both sides succeed.
    pub mean_error: f64,
    /// Samples where the operation succeeds but the reference fails.
    pub spurious_successes: usize,
    /// Samples where the operation fails but the reference succeeds.
    pub spurious_failures: usize,
}

impl Evaluation {
    /// Evaluates `operation` and its reference on every operand list.
    ///
    /// Fails on the first operand list of the wrong length.
    pub fn run<I>(
        operation: Operation,
        operands: I,
    ) -> Result<Evaluation, OperationError>
    where
        I: IntoIterator<Item = Vec<FixedPoint64>>,
    {
        let mut evaluation = Evaluation {
            operation,
            samples: 0,
            expected_failures: 0,
            max_error: 0.0,
            mean_error: 0.0,
            spurious_successes: 0,
            spurious_failures: 0,
        };

        let mut successes = 0usize;
        let mut total_error = 0.0;

        for args in operands {
            let target = evaluate(operation, &args)?;
            let value = operation.evaluate(&args).ok();

            evaluation.samples += 1;

            if target.is_none() {
                evaluation.expected_failures += 1;
            }

            match (value, target) {
                (Some(value), Some(target)) => {
                    let error = relative_error(value, target);

                    if error > operation.tolerance() {
                        log::info!(
                            "{operation}({}) = {value}, expected {target}",
                            args.iter().join(", ")
                        );
                    }

                    evaluation.max_error = evaluation.max_error.max(error);
                    total_error += error;
                    successes += 1;
                }
                (Some(value), None) => {
                    log::info!(
                        "{operation}({}) = {value}, expected failure",
                        args.iter().join(", ")
                    );
                    evaluation.spurious_successes += 1;
                }
                (None, Some(target)) => {
                    log::info!(
                        "{operation}({}) failed, expected {target}",
                        args.iter().join(", ")
                    );
                    evaluation.spurious_failures += 1;
                }
                (None, None) => {}
            }
        }

        if successes > 0 {
            evaluation.mean_error = total_error / successes as f64;
        }

        Ok(evaluation)
    }

    /// Whether the operation agreed with the reference on feasibility and
    /// stayed within its tolerance everywhere.
    pub fn passed(&self) -> bool {
        self.spurious_successes == 0
            && self.spurious_failures == 0
            && self.max_error <= self.operation.tolerance()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}: {} samples ({} expected to fail)",
            self.operation, self.samples, self.expected_failures
        )?;
        writeln!(f, "  max relative error  : {:.4e}", self.max_error)?;
        writeln!(f, "  mean relative error : {:.4e}", self.mean_error)?;
        writeln!(
            f,
            "  tolerance           : {:.0e}",
            self.operation.tolerance()
        )?;
        writeln!(f, "  spurious successes  : {}", self.spurious_successes)?;
        write!(f, "  spurious failures   : {}", self.spurious_failures)
    }
}

/// Zero, the largest value, and every power of two and power of two minus
/// one representable in Q64.64, in increasing order.
pub fn points_of_interest() -> Vec<FixedPoint64> {
    let powers = (0..256).map(|k| U256::one() << k);
    let predecessors = powers.clone().map(|x| x - 1);

    powers
        .chain(predecessors)
        .chain([U256::MAX])
        .map(FixedPoint64::from_raw)
        .sorted()
        .dedup()
        .collect()
}

/// Every combination of `points` as operands to `operation`.
pub fn operands(
    operation: Operation,
    points: &[FixedPoint64],
) -> Vec<Vec<FixedPoint64>> {
    (0..operation.arity())
        .map(|_| points.iter().copied())
        .multi_cartesian_product()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points() {
        let points = points_of_interest();

        assert_eq!(points.len(), 512);
        assert_eq!(points.first(), Some(&FixedPoint64::ZERO));
        assert_eq!(points.last(), Some(&FixedPoint64::MAX));
        assert!(points.contains(&FixedPoint64::ONE));
        assert!(points.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn operand_shapes() {
        let points = [FixedPoint64::ZERO, FixedPoint64::ONE, FixedPoint64::TWO];

        assert_eq!(operands(Operation::Exp, &points).len(), 3);
        assert_eq!(operands(Operation::Pow, &points).len(), 9);
        assert!(operands(Operation::Mul, &points)
            .iter()
            .all(|args| args.len() == 2));
    }

    #[test]
    fn unary_points_of_interest() {
        let points = points_of_interest();

        for &operation in Operation::ALL {
            if operation.arity() != 1 {
                continue;
            }

            let args = operands(operation, &points);
            let evaluation = Evaluation::run(operation, args).unwrap();

            assert!(evaluation.passed(), "{evaluation}");
        }
    }

    #[test]
    fn binary_points_of_interest() {
        let points = points_of_interest().into_iter().step_by(9).collect_vec();

        for &operation in Operation::ALL {
            if operation.arity() != 2 {
                continue;
            }

            let args = operands(operation, &points);
            let evaluation = Evaluation::run(operation, args).unwrap();

            assert!(evaluation.passed(), "{evaluation}");
        }
    }

    #[test]
    fn report() {
        let points = [FixedPoint64::ZERO, FixedPoint64::ONE];
        let args = operands(Operation::Log2, &points);
        let evaluation = Evaluation::run(Operation::Log2, args).unwrap();

        assert_eq!(evaluation.samples, 2);
        assert_eq!(evaluation.expected_failures, 1);
        assert_eq!(evaluation.max_error, 0.0);
        assert!(evaluation.passed());
        assert!(evaluation
            .to_string()
            .starts_with("log2: 2 samples (1 expected to fail)"));
    }

    #[test]
    fn mismatched_operands() {
        let args = vec![vec![FixedPoint64::ONE], vec![]];
        let evaluation = Evaluation::run(Operation::Exp, args);

        assert_eq!(
            evaluation.unwrap_err(),
            OperationError::Arity {
                expected: 1,
                found: 0
            }
        );
    }
}
