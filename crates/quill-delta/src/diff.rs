//! Document-to-document diff.

use crate::attributes;
use crate::delta::Delta;
use crate::error::DeltaError;
use crate::iter::OpIterator;
use crate::op::{InsertValue, Op};
use crate::text_diff::{self, EditKind};

/// Embeds flatten to this placeholder scalar in the LCS input. Equal runs
/// re-check the real payloads during replay, so two different embeds (or an
/// embed against a literal NUL) still produce a delete + insert pair.
const EMBED_CHAR: char = '\0';

fn content_text(delta: &Delta) -> String {
    let mut text = String::new();
    for op in delta.ops() {
        if let Op::Insert { value, .. } = op {
            match value {
                InsertValue::Text(s) => text.push_str(s),
                InsertValue::Embed(_) => text.push(EMBED_CHAR),
            }
        }
    }
    text
}

impl Delta {
    /// The change delta turning the document `self` into the document
    /// `other`: `self.compose(&self.try_diff(other)?) == other`.
    ///
    /// Runs a longest-common-subsequence diff over the flattened content of
    /// both documents and replays the edit script against their operations,
    /// so retained regions pick up attribute diffs and embeds compare by
    /// deep equality of their payloads.
    ///
    /// # Errors
    ///
    /// [`DeltaError::BadDocument`] when either delta contains a retain or
    /// delete, directly or inside a nested delta attribute.
    pub fn try_diff(&self, other: &Delta) -> Result<Delta, DeltaError> {
        if !self.is_document() || !other.is_document() {
            return Err(DeltaError::BadDocument);
        }
        if self == other {
            return Ok(Delta::new());
        }

        let script = text_diff::diff(&content_text(self), &content_text(other));
        let mut a = OpIterator::new(self.ops());
        let mut b = OpIterator::new(other.ops());
        let mut delta = Delta::new();

        for (kind, text) in &script {
            let mut length = text.chars().count();
            while length > 0 {
                match kind {
                    EditKind::Insert => {
                        let n = length.min(b.peek_len());
                        delta.push(b.take(n));
                        length -= n;
                    }
                    EditKind::Delete => {
                        let n = length.min(a.peek_len());
                        a.take(n);
                        delta.push(Op::delete(n));
                        length -= n;
                    }
                    EditKind::Equal => {
                        let n = length.min(a.peek_len()).min(b.peek_len());
                        match (a.take(n), b.take(n)) {
                            (
                                Op::Insert {
                                    value: a_val,
                                    attributes: a_attrs,
                                },
                                Op::Insert {
                                    value: b_val,
                                    attributes: b_attrs,
                                },
                            ) => {
                                if a_val == b_val {
                                    delta.push(Op::Retain {
                                        len: n,
                                        attributes: attributes::diff(&a_attrs, &b_attrs),
                                    });
                                } else {
                                    // Same placeholder, different payload.
                                    delta.push(Op::Insert {
                                        value: b_val,
                                        attributes: b_attrs,
                                    });
                                    delta.push(Op::delete(n));
                                }
                            }
                            (_, b_op) => {
                                delta.push(b_op);
                                delta.push(Op::delete(n));
                            }
                        }
                        length -= n;
                    }
                }
            }
        }

        delta.trim();
        Ok(delta)
    }

    /// Like [`try_diff`](Self::try_diff), for callers that know both deltas
    /// are documents.
    ///
    /// # Panics
    ///
    /// Panics if either delta is not a document.
    pub fn diff(&self, other: &Delta) -> Delta {
        match self.try_diff(other) {
            Ok(delta) => delta,
            Err(err) => panic!("diff: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::AttributeMap;
    use serde_json::json;

    fn attrs(v: serde_json::Value) -> AttributeMap {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn diff_of_equal_documents_is_empty() {
        let d = Delta::new().insert("ab", None).insert_embed(json!(1), None);
        assert_eq!(d.try_diff(&d.clone()), Ok(Delta::new()));
    }

    #[test]
    fn plain_text_edit() {
        let a = Delta::new().insert("hello", None);
        let b = Delta::new().insert("hallo", None);
        // The trailing equality is trimmed away as a bare retain.
        assert_eq!(
            a.try_diff(&b),
            Ok(Delta::new().retain(1, None).insert("a", None).delete(1))
        );
        assert_eq!(a.compose(&a.try_diff(&b).unwrap()), b);
    }

    #[test]
    fn attribute_only_change_becomes_retain() {
        let a = Delta::new().insert("ab", None);
        let b = Delta::new().insert("ab", Some(attrs(json!({"bold": true}))));
        assert_eq!(
            a.try_diff(&b),
            Ok(Delta::new().retain(2, Some(attrs(json!({"bold": true})))))
        );
    }

    #[test]
    fn embed_payload_change_is_replace() {
        let a = Delta::new().insert_embed(json!({"image": "a.png"}), None);
        let b = Delta::new().insert_embed(json!({"image": "b.png"}), None);
        assert_eq!(
            a.try_diff(&b),
            Ok(Delta::new()
                .insert_embed(json!({"image": "b.png"}), None)
                .delete(1))
        );
    }

    #[test]
    fn equal_embeds_retain() {
        let a = Delta::new().insert("x", None).insert_embed(json!(5), None);
        let b = Delta::new()
            .insert("x", None)
            .insert_embed(json!(5), Some(attrs(json!({"alt": "five"}))));
        assert_eq!(
            a.try_diff(&b),
            Ok(Delta::new()
                .retain(1, None)
                .retain(1, Some(attrs(json!({"alt": "five"})))))
        );
    }

    #[test]
    fn insert_in_the_middle() {
        let a = Delta::new().insert("hello world", None);
        let b = Delta::new().insert("hello cruel world", None);
        let change = a.try_diff(&b).unwrap();
        assert_eq!(a.compose(&change), b);
    }

    #[test]
    fn non_document_inputs_are_rejected() {
        let doc = Delta::new().insert("a", None);
        let change = Delta::new().retain(1, None);
        assert_eq!(doc.try_diff(&change), Err(DeltaError::BadDocument));
        assert_eq!(change.try_diff(&doc), Err(DeltaError::BadDocument));

        let nested = Delta::new().insert(
            "a",
            Some(attrs(json!({"body": {"ops": [{"delete": 1}]}}))),
        );
        assert_eq!(doc.try_diff(&nested), Err(DeltaError::BadDocument));
    }

    #[test]
    #[should_panic(expected = "diff:")]
    fn panicking_variant_aborts_on_change_delta() {
        let doc = Delta::new().insert("a", None);
        let change = Delta::new().delete(1);
        let _ = doc.diff(&change);
    }
}
