//! Delta operations.
//!
//! An [`Op`] is one of three variants: `Insert` adds content, `Retain` skips
//! over (and optionally reformats) existing content, `Delete` removes it.
//! Lengths are counted in Unicode scalar values for text; an embed always
//! counts as 1.

use serde_json::{Map, Value};

/// Attributes attached to an insert or retain.
///
/// Values are opaque JSON scalars, `Value::Null` as the removal sentinel, or
/// nested deltas (objects carrying an `"ops"` array). The empty map means
/// "no attributes".
pub type AttributeMap = Map<String, Value>;

/// The payload of an insert: a text run or a single indivisible embed.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertValue {
    /// A run of text. Never empty in a canonical delta.
    Text(String),
    /// A non-string JSON value (image descriptor, id, ...). Length 1.
    Embed(Value),
}

impl InsertValue {
    /// Length in Unicode scalar values; embeds count as 1.
    pub fn len(&self) -> usize {
        match self {
            InsertValue::Text(s) => s.chars().count(),
            InsertValue::Embed(_) => 1,
        }
    }

    /// True for an empty text run.
    pub fn is_empty(&self) -> bool {
        matches!(self, InsertValue::Text(s) if s.is_empty())
    }
}

/// A single delta operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Insert {
        value: InsertValue,
        attributes: AttributeMap,
    },
    Retain {
        len: usize,
        attributes: AttributeMap,
    },
    Delete {
        len: usize,
    },
}

/// Discriminant of an [`Op`], used by the iterator walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Insert,
    Retain,
    Delete,
}

/// Tie-break side for [`transform`](crate::Delta::transform).
///
/// `Left` means the first argument happened first, so its insertions stay in
/// front of concurrent insertions at the same position; `Right` means the
/// operations are siblings and the second argument's insertions win the spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Left,
    Right,
}

impl Op {
    /// Plain text insert without attributes.
    pub fn insert(text: impl Into<String>) -> Op {
        Op::Insert {
            value: InsertValue::Text(text.into()),
            attributes: AttributeMap::new(),
        }
    }

    /// Embed insert without attributes.
    pub fn embed(value: Value) -> Op {
        Op::Insert {
            value: InsertValue::Embed(value),
            attributes: AttributeMap::new(),
        }
    }

    /// Retain without attributes.
    pub fn retain(len: usize) -> Op {
        Op::Retain {
            len,
            attributes: AttributeMap::new(),
        }
    }

    pub fn delete(len: usize) -> Op {
        Op::Delete { len }
    }

    pub fn kind(&self) -> OpKind {
        match self {
            Op::Insert { .. } => OpKind::Insert,
            Op::Retain { .. } => OpKind::Retain,
            Op::Delete { .. } => OpKind::Delete,
        }
    }

    /// Length of the operation in Unicode scalar values.
    pub fn len(&self) -> usize {
        match self {
            Op::Insert { value, .. } => value.len(),
            Op::Retain { len, .. } | Op::Delete { len } => *len,
        }
    }

    /// True when the operation has zero length and may be dropped.
    pub fn is_empty(&self) -> bool {
        match self {
            Op::Insert { value, .. } => value.is_empty(),
            Op::Retain { len, .. } | Op::Delete { len } => *len == 0,
        }
    }

    /// Attribute map of an insert or retain; `None` for a delete.
    pub fn attributes(&self) -> Option<&AttributeMap> {
        match self {
            Op::Insert { attributes, .. } | Op::Retain { attributes, .. } => Some(attributes),
            Op::Delete { .. } => None,
        }
    }
}

/// Merge two adjacent operations into one when canonical form requires it.
///
/// Same-kind neighbors with equal attributes merge: text concatenates,
/// retain/delete lengths add. Embeds never merge, with anything.
pub(crate) fn merged(a: &Op, b: &Op) -> Option<Op> {
    match (a, b) {
        (Op::Delete { len: a }, Op::Delete { len: b }) => Some(Op::Delete { len: a + b }),
        (
            Op::Retain {
                len: a,
                attributes: x,
            },
            Op::Retain {
                len: b,
                attributes: y,
            },
        ) if x == y => Some(Op::Retain {
            len: a + b,
            attributes: x.clone(),
        }),
        (
            Op::Insert {
                value: InsertValue::Text(a),
                attributes: x,
            },
            Op::Insert {
                value: InsertValue::Text(b),
                attributes: y,
            },
        ) if x == y => Some(Op::Insert {
            value: InsertValue::Text(format!("{a}{b}")),
            attributes: x.clone(),
        }),
        _ => None,
    }
}
