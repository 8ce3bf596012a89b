//! quill-delta — rich-text deltas and their operational transformation
//! algebra.
//!
//! A [`Delta`] is a sequence of `insert`, `retain`, and `delete` operations
//! describing either a rich-text document (inserts only) or a change to
//! one, wire-compatible with the [Quill](https://quilljs.com/docs/delta/)
//! delta format. Operations carry optional attribute maps (formatting such
//! as `bold` or `color`); inserts may be text or embeds, and attribute
//! values may themselves be nested deltas, through which every operation of
//! the algebra recurses.
//!
//! The engine is a pure value-level library: every function takes values
//! and returns new values, deterministically. The core operations are
//! [`compose`](Delta::compose), [`transform`](Delta::transform) (the OT
//! primitive, with a [`Priority`] tie-break), [`try_diff`](Delta::try_diff)
//! (LCS-backed document diff), [`try_apply`](Delta::try_apply), and
//! [`try_lines`](Delta::try_lines) (block-line projection).
//!
//! ```
//! use quill_delta::{Delta, Priority};
//!
//! let doc = Delta::new().insert("Hello World", None);
//!
//! let alice = Delta::new().retain(5, None).insert(",", None);
//! let bob = Delta::new().retain(11, None).insert("!", None);
//!
//! // Both edit orders converge once the later change is transformed.
//! assert_eq!(
//!     doc.compose(&alice).compose(&alice.transform(&bob, Priority::Left)),
//!     doc.compose(&bob).compose(&bob.transform(&alice, Priority::Right)),
//! );
//! ```

pub mod attributes;
pub mod codec;
pub mod text_diff;

mod apply;
mod compose;
mod delta;
mod diff;
mod error;
mod iter;
mod lines;
mod op;
mod transform;

pub use codec::DecodeError;
pub use delta::Delta;
pub use error::DeltaError;
pub use iter::OpIterator;
pub use lines::DocumentLine;
pub use op::{AttributeMap, InsertValue, Op, OpKind, Priority};
