//! Cursor over a delta's operations.
//!
//! [`OpIterator`] walks an operation sequence emitting head slices of bounded
//! length, splitting operations as needed. Past the end of the sequence it
//! stands in for the implicit remainder of the document: `peek_kind` reports
//! `Retain`, `peek_len` reports `usize::MAX`, and `take` produces bare
//! retains. This is what lets compose and transform walk two deltas of
//! different lengths in lockstep.

use crate::op::{AttributeMap, InsertValue, Op, OpKind};

#[derive(Debug, Clone)]
pub struct OpIterator<'a> {
    ops: &'a [Op],
    index: usize,
    /// Scalars already consumed from the head operation.
    offset: usize,
}

impl<'a> OpIterator<'a> {
    pub fn new(ops: &'a [Op]) -> Self {
        OpIterator {
            ops,
            index: 0,
            offset: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.ops.len()
    }

    /// The head operation, ignoring the consumed offset.
    pub fn peek(&self) -> Option<&'a Op> {
        self.ops.get(self.index)
    }

    /// Remaining length of the head operation, `usize::MAX` when exhausted.
    pub fn peek_len(&self) -> usize {
        match self.ops.get(self.index) {
            Some(op) => op.len() - self.offset,
            None => usize::MAX,
        }
    }

    /// Kind of the head operation; `Retain` when exhausted (implicit
    /// end-of-document padding).
    pub fn peek_kind(&self) -> OpKind {
        match self.ops.get(self.index) {
            Some(op) => op.kind(),
            None => OpKind::Retain,
        }
    }

    /// Remove and return a prefix slice of at most `length` scalars from the
    /// head operation.
    ///
    /// Text is split at scalar boundaries with the parent's attributes;
    /// retains and deletes split their length. An embed cannot be split:
    /// `take(1)` (or more) returns the whole embed. Past the end of the
    /// sequence this returns a bare retain of `length`.
    pub fn take(&mut self, length: usize) -> Op {
        let Some(op) = self.ops.get(self.index) else {
            return Op::Retain {
                len: length,
                attributes: AttributeMap::new(),
            };
        };
        let offset = self.offset;
        let taken = length.min(op.len() - offset);
        if taken == op.len() - offset {
            self.index += 1;
            self.offset = 0;
        } else {
            self.offset += taken;
        }
        match op {
            Op::Delete { .. } => Op::Delete { len: taken },
            Op::Retain { attributes, .. } => Op::Retain {
                len: taken,
                attributes: attributes.clone(),
            },
            Op::Insert {
                value: InsertValue::Embed(value),
                attributes,
            } => Op::Insert {
                value: InsertValue::Embed(value.clone()),
                attributes: attributes.clone(),
            },
            Op::Insert {
                value: InsertValue::Text(text),
                attributes,
            } => Op::Insert {
                value: InsertValue::Text(text.chars().skip(offset).take(taken).collect()),
                attributes: attributes.clone(),
            },
        }
    }

    /// Remove and return the remainder of the head operation.
    pub fn take_op(&mut self) -> Op {
        let len = self.peek_len();
        self.take(len)
    }

    /// The residual operation sequence, starting at the current position.
    pub fn rest(&mut self) -> Vec<Op> {
        let mut ops = Vec::new();
        if self.offset > 0 {
            ops.push(self.take_op());
        }
        ops.extend(self.ops[self.index..].iter().cloned());
        self.index = self.ops.len();
        self.offset = 0;
        ops
    }
}
