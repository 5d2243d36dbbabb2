//! Structural self-checks for the complex.

use crate::complex_error::ComplexError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation encountered.
    fn validate_invariants(&self) -> Result<(), ComplexError>;

    /// Panic on the first violation.
    fn debug_assert_invariants(&self) {
        if let Err(e) = self.validate_invariants() {
            panic!("[invariants] {e}");
        }
    }
}

/// Validate `$tree` after the mutation named by `$op` and panic on error when
/// invariant checking is enabled (debug builds, `strict-invariants`,
/// `check-invariants`). Compiles to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($tree:expr, $op:literal) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        {
            use $crate::debug_invariants::DebugInvariants as _;
            if let Err(e) = ($tree).validate_invariants() {
                panic!(concat!("[invariants] after ", $op, ": {}"), e);
            }
        }
    };
}

/// Like [`debug_invariants!`], for operations a stream applies once per event
/// (`flag_add_edge`, batch removal). Only the `strict-invariants` and
/// `check-invariants` features turn it on.
#[macro_export]
macro_rules! step_invariants {
    ($tree:expr, $op:literal) => {
        #[cfg(any(feature = "strict-invariants", feature = "check-invariants"))]
        {
            use $crate::debug_invariants::DebugInvariants as _;
            if let Err(e) = ($tree).validate_invariants() {
                panic!(concat!("[invariants] after ", $op, ": {}"), e);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl DebugInvariants for Broken {
        fn validate_invariants(&self) -> Result<(), ComplexError> {
            Err(ComplexError::InvariantViolation("always".into()))
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "[invariants] after bulk")]
    fn bulk_checks_run_in_debug_builds() {
        crate::debug_invariants!(Broken, "bulk");
    }

    #[test]
    #[cfg(not(any(feature = "strict-invariants", feature = "check-invariants")))]
    fn step_checks_stay_off_without_features() {
        crate::step_invariants!(Broken, "step");
    }

    #[test]
    #[cfg(any(feature = "strict-invariants", feature = "check-invariants"))]
    #[should_panic(expected = "[invariants] after step")]
    fn step_checks_run_with_features() {
        crate::step_invariants!(Broken, "step");
    }
}
