//! Structural self-checks run after mutations in debug builds.

use crate::container_error::ContainerError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Name reported when a check fails.
    const CONTEXT: &'static str;

    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), Self::CONTEXT);
    }
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), ContainerError>;
}

/// Run a fallible check and panic on error when invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $ctx:expr) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!("[invariants] {}: {}", $ctx, e);
        }
    };
}
