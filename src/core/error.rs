//! Error types for the evaluation core
//!
//! This module provides `EvalError`, the single error enum surfaced by
//! the public API. The taxonomy distinguishes mathematically undefined
//! inputs (domain errors), evaluations that ran but could not reach the
//! target precision, and overflow of the final scaled result.

use std::fmt;

/// Errors that can occur while evaluating the confluent hypergeometric
/// function.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EvalError {
    // Input validation
    /// The input is mathematically undefined: `b` is a non-positive
    /// integer and the polynomial-termination condition on `a` fails.
    Domain {
        /// Description of the offending parameter combination.
        msg: String,
    },

    // Evaluation failures
    /// The iteration budget was exhausted before the series converged.
    DidNotConverge {
        /// Iterations performed before giving up.
        iterations: u32,
    },
    /// Cancellation is so severe that no bits in the result are correct.
    CancellationLoss {
        /// Ratio of the largest partial sum to the final sum.
        loss_ratio: f64,
    },
    /// A recurrence shift count exceeds the iteration budget, leaving
    /// the arguments in a range with no evaluation method.
    OutOfRange {
        /// Description of the oversized shift.
        msg: String,
    },
    /// The dispatcher exhausted all candidate methods.
    NoMethodAvailable,

    // Terminal conversion
    /// The final value exceeds the representable range of the scalar
    /// type and the policy asked for overflow to be raised.
    Overflow,
}

impl EvalError {
    /// Create a `Domain` error from any displayable message.
    pub fn domain(msg: impl Into<String>) -> Self {
        EvalError::Domain { msg: msg.into() }
    }

    /// Create an `OutOfRange` error from any displayable message.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        EvalError::OutOfRange { msg: msg.into() }
    }

    /// True for failures the dispatcher may treat as soft: the
    /// evaluator was a legitimate candidate but could not deliver the
    /// precision, and another method may still succeed.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            EvalError::DidNotConverge { .. } | EvalError::CancellationLoss { .. }
        )
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Domain { msg } => {
                write!(f, "Function is indeterminate: {msg}")
            }
            EvalError::DidNotConverge { iterations } => {
                write!(f, "Series did not converge after {iterations} iterations")
            }
            EvalError::CancellationLoss { loss_ratio } => {
                write!(
                    f,
                    "Cancellation is so severe that no bits in the result are \
                     correct (largest partial sum exceeded the result by a \
                     factor of {loss_ratio:e})"
                )
            }
            EvalError::OutOfRange { msg } => {
                write!(f, "Arguments sit in a range with no evaluation method: {msg}")
            }
            EvalError::NoMethodAvailable => {
                write!(f, "No evaluation method is available for these arguments")
            }
            EvalError::Overflow => {
                write!(f, "Result is too large to represent in the scalar type")
            }
        }
    }
}

impl std::error::Error for EvalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = EvalError::domain("negative integer b = -3");
        assert_eq!(
            e.to_string(),
            "Function is indeterminate: negative integer b = -3"
        );
        let e = EvalError::DidNotConverge { iterations: 100 };
        assert!(e.to_string().contains("100 iterations"));
    }

    #[test]
    fn softness() {
        assert!(EvalError::DidNotConverge { iterations: 1 }.is_soft());
        assert!(EvalError::CancellationLoss { loss_ratio: 1e300 }.is_soft());
        assert!(!EvalError::Overflow.is_soft());
        assert!(!EvalError::domain("b = 0").is_soft());
    }
}
