//! Applying a change to a document.

use crate::delta::Delta;
use crate::error::DeltaError;

impl Delta {
    /// Apply the change `change` to the document `self`.
    ///
    /// Validates that the change does not address indices past the end of
    /// the document, then composes. On success the result is exactly
    /// `self.compose(change)`.
    ///
    /// # Errors
    ///
    /// [`DeltaError::LengthMismatch`] when the change's base length (its
    /// retains plus deletes) exceeds the document's length.
    pub fn try_apply(&self, change: &Delta) -> Result<Delta, DeltaError> {
        if change.base_length() > self.length() {
            return Err(DeltaError::LengthMismatch);
        }
        Ok(self.compose(change))
    }

    /// Like [`try_apply`](Self::try_apply), for callers that have externally
    /// ensured the change fits the document.
    ///
    /// # Panics
    ///
    /// Panics if the change addresses past the end of the document.
    pub fn apply(&self, change: &Delta) -> Delta {
        match self.try_apply(change) {
            Ok(delta) => delta,
            Err(err) => panic!("apply: {err}"),
        }
    }
}
