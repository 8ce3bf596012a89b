//! Projection of a document delta into its logical lines.
//!
//! Quill encodes block-level formatting (`header`, `list`, ...) on the
//! newline character closing each line, so splitting at `\n` yields pairs of
//! line content and block attributes.

use crate::delta::Delta;
use crate::error::DeltaError;
use crate::iter::OpIterator;
use crate::op::{AttributeMap, InsertValue, Op};

/// One line of a document: the content without its trailing newline, and
/// the attributes the newline carried.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLine {
    pub delta: Delta,
    pub attributes: AttributeMap,
}

impl Delta {
    /// Split a document delta at every `\n` in its text inserts.
    ///
    /// Embeds belong to the line they appear in. A trailing newline closes
    /// its line without opening an empty one; content after the last newline
    /// forms a final line with empty block attributes. An empty document has
    /// no lines.
    ///
    /// # Errors
    ///
    /// [`DeltaError::BadDocument`] when the delta contains a retain or
    /// delete, directly or inside a nested delta attribute.
    pub fn try_lines(&self) -> Result<Vec<DocumentLine>, DeltaError> {
        if !self.is_document() {
            return Err(DeltaError::BadDocument);
        }
        let mut iter = OpIterator::new(self.ops());
        let mut lines = Vec::new();
        let mut line = Delta::new();
        while iter.has_next() {
            let newline_at = match iter.peek() {
                Some(op @ Op::Insert {
                    value: InsertValue::Text(text),
                    ..
                }) => {
                    // Scalars of the head already consumed by earlier takes.
                    let start = op.len() - iter.peek_len();
                    text.chars().skip(start).position(|c| c == '\n')
                }
                _ => None,
            };
            match newline_at {
                None => {
                    line.push(iter.take_op());
                }
                Some(0) => {
                    let attributes = match iter.take(1) {
                        Op::Insert { attributes, .. } => attributes,
                        _ => AttributeMap::new(),
                    };
                    lines.push(DocumentLine {
                        delta: line,
                        attributes,
                    });
                    line = Delta::new();
                }
                Some(n) => {
                    line.push(iter.take(n));
                }
            }
        }
        if !line.is_empty() {
            lines.push(DocumentLine {
                delta: line,
                attributes: AttributeMap::new(),
            });
        }
        Ok(lines)
    }

    /// Like [`try_lines`](Self::try_lines), for callers that know the delta
    /// is a document.
    ///
    /// # Panics
    ///
    /// Panics if the delta is not a document.
    pub fn lines(&self) -> Vec<DocumentLine> {
        match self.try_lines() {
            Ok(lines) => lines,
            Err(err) => panic!("lines: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(v: serde_json::Value) -> AttributeMap {
        v.as_object().cloned().unwrap()
    }

    fn line(delta: Delta, attributes: AttributeMap) -> DocumentLine {
        DocumentLine { delta, attributes }
    }

    #[test]
    fn splits_on_newlines_with_block_attributes() {
        let doc = Delta::new()
            .insert("ab", Some(attrs(json!({"bold": true}))))
            .insert("\n", Some(attrs(json!({"header": 1}))))
            .insert("cd", None);
        assert_eq!(
            doc.try_lines(),
            Ok(vec![
                line(
                    Delta::new().insert("ab", Some(attrs(json!({"bold": true})))),
                    attrs(json!({"header": 1})),
                ),
                line(Delta::new().insert("cd", None), AttributeMap::new()),
            ])
        );
    }

    #[test]
    fn trailing_newline_opens_no_empty_line() {
        let doc = Delta::new().insert("ab\n", None);
        assert_eq!(
            doc.try_lines(),
            Ok(vec![line(Delta::new().insert("ab", None), AttributeMap::new())])
        );
    }

    #[test]
    fn consecutive_newlines_make_empty_lines() {
        let doc = Delta::new().insert("a\n\nb\n", None);
        assert_eq!(
            doc.try_lines(),
            Ok(vec![
                line(Delta::new().insert("a", None), AttributeMap::new()),
                line(Delta::new(), AttributeMap::new()),
                line(Delta::new().insert("b", None), AttributeMap::new()),
            ])
        );
    }

    #[test]
    fn embeds_stay_on_their_line() {
        let doc = Delta::new()
            .insert("a", None)
            .insert_embed(json!({"image": "x.png"}), None)
            .insert("b\nc", None);
        let lines = doc.try_lines().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].delta,
            Delta::new()
                .insert("a", None)
                .insert_embed(json!({"image": "x.png"}), None)
                .insert("b", None)
        );
        assert_eq!(lines[1].delta, Delta::new().insert("c", None));
    }

    #[test]
    fn empty_document_has_no_lines() {
        assert_eq!(Delta::new().try_lines(), Ok(vec![]));
    }

    #[test]
    fn change_delta_is_rejected() {
        let change = Delta::new().retain(1, None);
        assert_eq!(change.try_lines(), Err(DeltaError::BadDocument));
    }
}
