//! Attribute-map algebra.
//!
//! Attribute values are opaque to the engine except in two cases: the
//! `Value::Null` sentinel marks an attribute for removal, and a value whose
//! JSON object carries an `"ops"` array is a nested delta, through which the
//! three operations recurse. Nested deltas carry embed sub-documents (for
//! example the body of a table cell), so composing, transforming, or diffing
//! the outer document must do the same to them.

use serde_json::{json, Value};

use crate::codec;
use crate::delta::Delta;
use crate::op::{AttributeMap, Priority};

/// Parse an attribute value as a nested delta.
///
/// Returns `None` for anything that is not an object with an `"ops"` array
/// decoding cleanly; such values stay opaque scalars and the algebra remains
/// total.
pub(crate) fn nested_delta(value: &Value) -> Option<Delta> {
    let ops = value.as_object()?.get("ops")?;
    if !ops.is_array() {
        return None;
    }
    codec::decode_delta(ops).ok()
}

fn nested_value(delta: &Delta) -> Value {
    json!({ "ops": codec::encode_delta(delta) })
}

/// Compose two attribute maps applied in sequence.
///
/// `b` wins key conflicts, except that a key carried by both sides as nested
/// deltas composes recursively. With `keep_nils = false` the removal
/// sentinels are applied and stripped (composing into a document); with
/// `keep_nils = true` they survive so a later application can still see them
/// (composing two changes).
pub fn compose(a: &AttributeMap, b: &AttributeMap, keep_nils: bool) -> AttributeMap {
    let mut out = AttributeMap::new();
    for (key, a_val) in a {
        match b.get(key) {
            None => {
                out.insert(key.clone(), a_val.clone());
            }
            Some(b_val) => match (nested_delta(a_val), nested_delta(b_val)) {
                (Some(a_nested), Some(b_nested)) => {
                    out.insert(key.clone(), nested_value(&a_nested.compose(&b_nested)));
                }
                _ => {
                    out.insert(key.clone(), b_val.clone());
                }
            },
        }
    }
    for (key, b_val) in b {
        if !a.contains_key(key) {
            out.insert(key.clone(), b_val.clone());
        }
    }
    if !keep_nils {
        out.retain(|_, v| !v.is_null());
    }
    out
}

/// Transform `right`'s attributes against concurrent `left` attributes.
///
/// With `Priority::Right` the sides are simultaneous and `right` wins
/// outright; with `Priority::Left` only `right`'s additions survive. A key
/// carried by both sides as nested deltas recurses regardless of priority.
pub fn transform(left: &AttributeMap, right: &AttributeMap, priority: Priority) -> AttributeMap {
    let mut out = AttributeMap::new();
    for (key, right_val) in right {
        match left.get(key) {
            None => {
                out.insert(key.clone(), right_val.clone());
            }
            Some(left_val) => match (nested_delta(left_val), nested_delta(right_val)) {
                (Some(left_nested), Some(right_nested)) => {
                    out.insert(
                        key.clone(),
                        nested_value(&left_nested.transform(&right_nested, priority)),
                    );
                }
                _ if priority == Priority::Right => {
                    out.insert(key.clone(), right_val.clone());
                }
                _ => {}
            },
        }
    }
    out
}

/// The attribute change turning `before` into `after`.
///
/// Removed keys map to the `null` sentinel; changed and added keys map to
/// their `after` value. A key carried by both sides as nested documents
/// diffs recursively and is omitted when the nested diff is empty.
pub fn diff(before: &AttributeMap, after: &AttributeMap) -> AttributeMap {
    let mut out = AttributeMap::new();
    for (key, after_val) in after {
        match before.get(key) {
            None => {
                out.insert(key.clone(), after_val.clone());
            }
            Some(before_val) if before_val == after_val => {}
            Some(before_val) => match nested_diff(before_val, after_val) {
                Some(nested) => {
                    if !nested.is_empty() {
                        out.insert(key.clone(), nested_value(&nested));
                    }
                }
                None => {
                    out.insert(key.clone(), after_val.clone());
                }
            },
        }
    }
    for key in before.keys() {
        if !after.contains_key(key) {
            out.insert(key.clone(), Value::Null);
        }
    }
    out
}

fn nested_diff(before: &Value, after: &Value) -> Option<Delta> {
    let before = nested_delta(before)?;
    let after = nested_delta(after)?;
    before.try_diff(&after).ok()
}

/// The attribute map that undoes `attrs` against the attributes `base` the
/// target carried before the change.
pub fn invert(attrs: &AttributeMap, base: &AttributeMap) -> AttributeMap {
    let mut out = AttributeMap::new();
    for (key, base_val) in base {
        if attrs.contains_key(key) && attrs.get(key) != Some(base_val) {
            out.insert(key.clone(), base_val.clone());
        }
    }
    for key in attrs.keys() {
        if !base.contains_key(key) {
            out.insert(key.clone(), Value::Null);
        }
    }
    out
}
