//! Small helpers shared by the structural checks.

use crate::complex_error::ComplexError;
use std::fmt::Debug;

/// `true` iff `xs` is strictly increasing (no duplicates).
#[inline]
pub(crate) fn is_strictly_increasing<T: PartialOrd>(xs: &[T]) -> bool {
    xs.windows(2).all(|w| w[0] < w[1])
}

/// Reject a vertex list that a pre-sorted API cannot accept.
#[inline]
pub(crate) fn ensure_strictly_increasing<T: PartialOrd + Debug>(
    xs: &[T],
) -> Result<(), ComplexError> {
    if is_strictly_increasing(xs) {
        Ok(())
    } else {
        Err(ComplexError::UnsortedVertices(format!("{xs:?}")))
    }
}

/// Build an [`ComplexError::InvariantViolation`] unless `cond` holds.
#[inline]
pub(crate) fn check(cond: bool, msg: impl FnOnce() -> String) -> Result<(), ComplexError> {
    if cond {
        Ok(())
    } else {
        Err(ComplexError::InvariantViolation(msg()))
    }
}
