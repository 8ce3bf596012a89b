//! Sequential composition of two deltas.

use crate::attributes;
use crate::delta::Delta;
use crate::iter::OpIterator;
use crate::op::{Op, OpKind};

impl Delta {
    /// The delta equivalent to applying `self` and then `other`.
    ///
    /// Both deltas are walked in lockstep, at each step consuming the shorter
    /// head length from both sides. `other`'s inserts always pass through;
    /// `self`'s deletes always pass through; a retain from `other` composes
    /// attributes onto whatever `self` produced underneath it, and a delete
    /// from `other` cancels `self`'s inserts or turns `self`'s retains into
    /// deletes. Retains reaching past the end of `self` are dropped.
    ///
    /// Attribute removal sentinels survive composition onto a retain (the
    /// combined change must still remove them later) but are applied and
    /// stripped when composed onto an insert.
    pub fn compose(&self, other: &Delta) -> Delta {
        let mut a = OpIterator::new(self.ops());
        let mut b = OpIterator::new(other.ops());
        let mut delta = Delta::new();

        while a.has_next() || b.has_next() {
            if b.peek_kind() == OpKind::Insert {
                delta.push(b.take_op());
                continue;
            }
            if a.peek_kind() == OpKind::Delete {
                delta.push(a.take_op());
                continue;
            }
            let len = a.peek_len().min(b.peek_len());
            match (a.take(len), b.take(len)) {
                (
                    Op::Insert { value, attributes },
                    Op::Retain {
                        attributes: applied,
                        ..
                    },
                ) => {
                    delta.push(Op::Insert {
                        value,
                        attributes: attributes::compose(&attributes, &applied, false),
                    });
                }
                (
                    Op::Retain { len, attributes },
                    Op::Retain {
                        attributes: applied,
                        ..
                    },
                ) => {
                    delta.push(Op::Retain {
                        len,
                        attributes: attributes::compose(&attributes, &applied, true),
                    });
                }
                (Op::Retain { .. }, Op::Delete { len }) => {
                    delta.push(Op::Delete { len });
                }
                // Insert + delete cancel out.
                _ => {}
            }
        }

        delta.trim();
        delta
    }
}
