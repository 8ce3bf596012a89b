//! Operational transformation of concurrent deltas.

use crate::attributes;
use crate::delta::Delta;
use crate::iter::OpIterator;
use crate::op::{Op, OpKind, Priority};

impl Delta {
    /// Rebase the concurrent `other` over `self`.
    ///
    /// Returns `other'` such that applying `self` then `other'` converges
    /// with applying `other` then `self` rebased the opposite way:
    ///
    /// `a.compose(&a.transform(b, Right)) == b.compose(&b.transform(a, Left))`
    ///
    /// `priority` breaks the tie when both sides insert at the same
    /// position: `Priority::Left` means `self` happened first and `other`'s
    /// insert is pushed past it; `Priority::Right` means the sides are
    /// simultaneous and `other`'s insert goes in front.
    pub fn transform(&self, other: &Delta, priority: Priority) -> Delta {
        let mut a = OpIterator::new(self.ops());
        let mut b = OpIterator::new(other.ops());
        let mut delta = Delta::new();

        while a.has_next() || b.has_next() {
            if a.peek_kind() == OpKind::Insert
                && (priority == Priority::Left || b.peek_kind() != OpKind::Insert)
            {
                delta.push(Op::retain(a.take_op().len()));
                continue;
            }
            if b.peek_kind() == OpKind::Insert {
                delta.push(b.take_op());
                continue;
            }
            let len = a.peek_len().min(b.peek_len());
            match (a.take(len), b.take(len)) {
                // Our delete removed the region; their op has nothing left
                // to act on.
                (Op::Delete { .. }, _) => {}
                (_, Op::Delete { len }) => {
                    delta.push(Op::Delete { len });
                }
                // Inserts were drained above; only retains meet here.
                (
                    Op::Retain {
                        attributes: left, ..
                    },
                    Op::Retain {
                        attributes: right, ..
                    },
                ) => {
                    delta.push(Op::Retain {
                        len,
                        attributes: attributes::transform(&left, &right, priority),
                    });
                }
                _ => {}
            }
        }

        delta.trim();
        delta
    }
}
