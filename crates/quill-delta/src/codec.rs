//! Quill-compatible JSON wire codec.
//!
//! A delta is a JSON array of operation objects, each carrying exactly one
//! of `insert`, `retain`, `delete` plus an optional `attributes` object.
//! Decoding routes every operation through [`Delta::push`], so whatever
//! canonicalization the wire payload lacks (zero-length ops, mergeable
//! neighbors, delete-before-insert pairs) is applied on entry.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::delta::Delta;
use crate::op::{AttributeMap, InsertValue, Op};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("delta must be a JSON array")]
    NotAnArray,
    #[error("operation must be a JSON object")]
    NotAnObject,
    #[error("invalid operation: {0}")]
    InvalidOp(String),
}

// ── Encoding ──────────────────────────────────────────────────────────────

/// Serialize an operation to its wire object.
pub fn encode_op(op: &Op) -> Value {
    let mut obj = Map::new();
    match op {
        Op::Insert { value, attributes } => {
            let payload = match value {
                InsertValue::Text(s) => Value::String(s.clone()),
                InsertValue::Embed(v) => v.clone(),
            };
            obj.insert("insert".to_string(), payload);
            if !attributes.is_empty() {
                obj.insert("attributes".to_string(), Value::Object(attributes.clone()));
            }
        }
        Op::Retain { len, attributes } => {
            obj.insert("retain".to_string(), Value::from(*len as u64));
            if !attributes.is_empty() {
                obj.insert("attributes".to_string(), Value::Object(attributes.clone()));
            }
        }
        Op::Delete { len } => {
            obj.insert("delete".to_string(), Value::from(*len as u64));
        }
    }
    Value::Object(obj)
}

/// Serialize a delta to its wire array.
pub fn encode_delta(delta: &Delta) -> Value {
    Value::Array(delta.ops().iter().map(encode_op).collect())
}

// ── Decoding ──────────────────────────────────────────────────────────────

fn decode_len(v: &Value, field: &str) -> Result<usize, DecodeError> {
    v.as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| DecodeError::InvalidOp(format!("{field} must be a non-negative integer")))
}

/// Parse a wire operation object.
pub fn decode_op(v: &Value) -> Result<Op, DecodeError> {
    let obj = v.as_object().ok_or(DecodeError::NotAnObject)?;
    let keys = ["insert", "retain", "delete"]
        .iter()
        .filter(|k| obj.contains_key(**k))
        .count();
    if keys != 1 {
        return Err(DecodeError::InvalidOp(
            "operation must carry exactly one of insert, retain, delete".to_string(),
        ));
    }
    let attributes = match obj.get("attributes") {
        None | Some(Value::Null) => AttributeMap::new(),
        Some(Value::Object(m)) => m.clone(),
        Some(_) => {
            return Err(DecodeError::InvalidOp(
                "attributes must be an object".to_string(),
            ))
        }
    };

    if let Some(insert) = obj.get("insert") {
        let value = match insert {
            Value::String(s) => InsertValue::Text(s.clone()),
            Value::Null => {
                return Err(DecodeError::InvalidOp("insert must not be null".to_string()))
            }
            other => InsertValue::Embed(other.clone()),
        };
        return Ok(Op::Insert { value, attributes });
    }
    if let Some(retain) = obj.get("retain") {
        return Ok(Op::Retain {
            len: decode_len(retain, "retain")?,
            attributes,
        });
    }
    // The key count above guarantees `delete` is present here.
    let len = match obj.get("delete") {
        Some(delete) => decode_len(delete, "delete")?,
        None => 0,
    };
    Ok(Op::Delete { len })
}

/// Parse a wire delta array into a canonical delta.
pub fn decode_delta(v: &Value) -> Result<Delta, DecodeError> {
    let arr = v.as_array().ok_or(DecodeError::NotAnArray)?;
    let mut delta = Delta::new();
    for item in arr {
        delta.push(decode_op(item)?);
    }
    Ok(delta)
}

// ── serde integration ─────────────────────────────────────────────────────

impl Serialize for Op {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_op(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Op {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_op(&value).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Delta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_delta(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Delta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_delta(&value).map_err(serde::de::Error::custom)
    }
}
