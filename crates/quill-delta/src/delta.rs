//! The delta container.
//!
//! A [`Delta`] is an ordered sequence of operations describing either a
//! rich-text document (inserts only) or a change to one. All construction is
//! routed through [`Delta::push`], which maintains the canonical form:
//!
//! - no zero-length operation,
//! - adjacent operations that could merge are merged,
//! - a delete is never immediately followed by an insert (the pair is stored
//!   insert-first; the two orders are equivalent).
//!
//! Canonical form is a constructor invariant. It is never validated after
//! the fact, and every public operation of the crate preserves it.

use std::ops::{Bound, RangeBounds};

use crate::attributes;
use crate::iter::OpIterator;
use crate::op::{merged, AttributeMap, InsertValue, Op, OpKind, Priority};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delta {
    ops: Vec<Op>,
}

impl Delta {
    pub fn new() -> Self {
        Delta { ops: Vec::new() }
    }

    /// Build a canonical delta from raw operations.
    pub fn from_ops(ops: impl IntoIterator<Item = Op>) -> Self {
        let mut delta = Delta::new();
        for op in ops {
            delta.push(op);
        }
        delta
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    /// True when the delta contains no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Total length of the delta in Unicode scalar values.
    pub fn length(&self) -> usize {
        self.ops.iter().map(Op::len).sum()
    }

    /// Length of the document the delta applies to: the sum of its retains
    /// and deletes. Zero for a pure-insert delta.
    pub fn base_length(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                Op::Insert { .. } => 0,
                Op::Retain { len, .. } | Op::Delete { len } => *len,
            })
            .sum()
    }

    // ── Builders ──────────────────────────────────────────────────────────

    /// Append a text insert.
    pub fn insert(mut self, text: impl Into<String>, attributes: Option<AttributeMap>) -> Self {
        self.push(Op::Insert {
            value: InsertValue::Text(text.into()),
            attributes: attributes.unwrap_or_default(),
        });
        self
    }

    /// Append an embed insert. `value` is any non-string JSON value.
    pub fn insert_embed(
        mut self,
        value: serde_json::Value,
        attributes: Option<AttributeMap>,
    ) -> Self {
        self.push(Op::Insert {
            value: InsertValue::Embed(value),
            attributes: attributes.unwrap_or_default(),
        });
        self
    }

    /// Append a retain.
    pub fn retain(mut self, len: usize, attributes: Option<AttributeMap>) -> Self {
        self.push(Op::Retain {
            len,
            attributes: attributes.unwrap_or_default(),
        });
        self
    }

    /// Append a delete.
    pub fn delete(mut self, len: usize) -> Self {
        self.push(Op::Delete { len });
        self
    }

    /// Place an operation onto the tail, maintaining canonical form.
    ///
    /// Zero-length operations are dropped. An insert arriving after a delete
    /// is placed in front of it, then merged with whatever precedes the
    /// delete if possible.
    pub fn push(&mut self, new_op: Op) -> &mut Self {
        if new_op.is_empty() {
            return self;
        }
        let mut index = self.ops.len();
        if index > 0 {
            if matches!(
                (&self.ops[index - 1], &new_op),
                (Op::Delete { .. }, Op::Insert { .. })
            ) {
                index -= 1;
            }
            if index > 0 {
                if let Some(op) = merged(&self.ops[index - 1], &new_op) {
                    self.ops[index - 1] = op;
                    return self;
                }
            }
        }
        self.ops.insert(index, new_op);
        self
    }

    /// Drop trailing retains that carry no attributes; they are no-ops.
    pub fn trim(&mut self) -> &mut Self {
        while matches!(
            self.ops.last(),
            Some(Op::Retain { attributes, .. }) if attributes.is_empty()
        ) {
            self.ops.pop();
        }
        self
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// True when every operation is an insert, recursively through nested
    /// deltas carried in attribute values.
    pub fn is_document(&self) -> bool {
        self.ops.iter().all(|op| match op {
            Op::Insert { attributes, .. } => attributes
                .values()
                .all(|v| match attributes::nested_delta(v) {
                    Some(nested) => nested.is_document(),
                    None => true,
                }),
            _ => false,
        })
    }

    /// The sub-delta covering the given length window, splitting operations
    /// at the window boundaries.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Delta {
        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&n) => n + 1,
            Bound::Excluded(&n) => n,
            Bound::Unbounded => usize::MAX,
        };
        let mut iter = OpIterator::new(&self.ops);
        let mut delta = Delta::new();
        let mut index = 0;
        while index < end && iter.has_next() {
            if index < start {
                index += iter.take(start - index).len();
            } else {
                let op = iter.take(end - index);
                index += op.len();
                delta.push(op);
            }
        }
        delta
    }

    /// Concatenate two deltas, re-compacting at the seam.
    pub fn concat(&self, other: &Delta) -> Delta {
        let mut delta = self.clone();
        let mut rest = other.ops.iter();
        if let Some(first) = rest.next() {
            delta.push(first.clone());
            delta.ops.extend(rest.cloned());
        }
        delta
    }

    /// The change that undoes this delta against the document `base` it was
    /// applied to: `base.compose(self).compose(&self.invert(base)) == base`.
    pub fn invert(&self, base: &Delta) -> Delta {
        let mut inverted = Delta::new();
        let mut base_index = 0usize;
        let empty = AttributeMap::new();
        for op in &self.ops {
            match op {
                Op::Insert { .. } => {
                    inverted.push(Op::delete(op.len()));
                }
                Op::Retain { len, attributes } if attributes.is_empty() => {
                    inverted.push(Op::retain(*len));
                    base_index += len;
                }
                Op::Retain { len, attributes } => {
                    for base_op in base.slice(base_index..base_index + len).into_ops() {
                        let base_attrs = base_op.attributes().unwrap_or(&empty);
                        inverted.push(Op::Retain {
                            len: base_op.len(),
                            attributes: attributes::invert(attributes, base_attrs),
                        });
                    }
                    base_index += len;
                }
                Op::Delete { len } => {
                    for base_op in base.slice(base_index..base_index + len).into_ops() {
                        inverted.push(base_op);
                    }
                    base_index += len;
                }
            }
        }
        inverted.trim();
        inverted
    }

    /// Transform a cursor position against this delta.
    ///
    /// `Priority::Left` means this delta happened first, so an insert landing
    /// exactly on the cursor does not push it.
    pub fn transform_position(&self, index: usize, priority: Priority) -> usize {
        let mut iter = OpIterator::new(&self.ops);
        let mut index = index;
        let mut offset = 0usize;
        while iter.has_next() && offset <= index {
            let len = iter.peek_len();
            let kind = iter.peek_kind();
            iter.take_op();
            match kind {
                OpKind::Delete => {
                    index -= len.min(index - offset);
                    continue;
                }
                OpKind::Insert if offset < index || priority == Priority::Right => {
                    index += len;
                }
                _ => {}
            }
            offset += len;
        }
        index
    }
}

impl From<Vec<Op>> for Delta {
    fn from(ops: Vec<Op>) -> Self {
        Delta::from_ops(ops)
    }
}

impl FromIterator<Op> for Delta {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Delta::from_ops(iter)
    }
}

impl<'a> IntoIterator for &'a Delta {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
