//! Boundary errors of the delta algebra.

use thiserror::Error;

/// Error returned by the fallible delta operations.
///
/// Everything else in the crate is total: malformed shapes are rejected by
/// the smart constructors before any algebra runs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeltaError {
    /// A change addresses indices past the end of the document it is being
    /// applied to.
    #[error("change length exceeds document length")]
    LengthMismatch,
    /// A function requiring a document delta received one containing a
    /// retain or delete, directly or inside a nested delta attribute.
    #[error("operation requires a document delta")]
    BadDocument,
}
