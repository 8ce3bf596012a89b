//! Shared test support: a seeded delta fuzzer.
//!
//! Uses the xoshiro256** PRNG so every generated document and change is
//! reproducible from its seed.

use quill_delta::{AttributeMap, Delta, InsertValue, Op};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use serde_json::{json, Value};

pub struct DeltaFuzzer {
    rng: Xoshiro256StarStar,
}

impl DeltaFuzzer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    pub fn int(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..=max)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    pub fn text(&mut self, len: usize) -> String {
        const CHARS: &[char] = &['a', 'b', 'c', 'd', ' ', '\n', 'é', '\u{1F600}'];
        (0..len)
            .map(|_| CHARS[self.rng.gen_range(0..CHARS.len())])
            .collect()
    }

    /// Random attribute map; `with_nulls` admits removal sentinels.
    pub fn attributes(&mut self, with_nulls: bool) -> Option<AttributeMap> {
        if self.chance(0.5) {
            return None;
        }
        let mut map = AttributeMap::new();
        if self.chance(0.6) {
            let value = if with_nulls && self.chance(0.25) {
                Value::Null
            } else {
                json!(true)
            };
            map.insert("bold".to_string(), value);
        }
        if self.chance(0.4) {
            let value = if with_nulls && self.chance(0.25) {
                Value::Null
            } else {
                json!(["red", "blue", "green"][self.int(0, 2)])
            };
            map.insert("color".to_string(), value);
        }
        if map.is_empty() {
            None
        } else {
            Some(map)
        }
    }

    /// Random document delta of exactly `len` scalars.
    pub fn document(&mut self, len: usize) -> Delta {
        let mut delta = Delta::new();
        let mut remaining = len;
        while remaining > 0 {
            if self.chance(0.15) {
                let embed = json!({"image": format!("{}.png", self.int(0, 9))});
                delta = delta.insert_embed(embed, self.attributes(false));
                remaining -= 1;
            } else {
                let n = self.int(1, remaining.min(4));
                let attrs = self.attributes(false);
                delta = delta.insert(self.text(n), attrs);
                remaining -= n;
            }
        }
        delta
    }

    /// Random delete-free change addressing a document of length
    /// `base_len`: retains (with or without formatting) and inserts only.
    pub fn delete_free_change(&mut self, base_len: usize) -> Delta {
        let mut delta = Delta::new();
        let mut remaining = base_len;
        while remaining > 0 {
            if self.chance(0.35) {
                let n = self.int(1, 3);
                let attrs = self.attributes(false);
                delta = delta.insert(self.text(n), attrs);
            } else {
                let n = self.int(1, remaining.min(3));
                let attrs = self.attributes(true);
                delta = delta.retain(n, attrs);
            }
        }
        if self.chance(0.4) {
            let n = self.int(1, 2);
            let attrs = self.attributes(false);
            delta = delta.insert(self.text(n), attrs);
        }
        delta
    }

    /// Random change addressing a document of length `base_len`.
    pub fn change(&mut self, base_len: usize) -> Delta {
        let mut delta = Delta::new();
        let mut remaining = base_len;
        while remaining > 0 {
            match self.int(0, 2) {
                0 => {
                    let n = self.int(1, remaining.min(3));
                    let attrs = self.attributes(true);
                    delta = delta.retain(n, attrs);
                    remaining -= n;
                }
                1 => {
                    let n = self.int(1, remaining.min(3));
                    delta = delta.delete(n);
                    remaining -= n;
                }
                _ => {
                    let n = self.int(1, 3);
                    let attrs = self.attributes(false);
                    delta = delta.insert(self.text(n), attrs);
                }
            }
        }
        if self.chance(0.3) {
            let n = self.int(1, 2);
            let attrs = self.attributes(false);
            delta = delta.insert(self.text(n), attrs);
        }
        delta
    }
}

fn mergeable(a: &Op, b: &Op) -> bool {
    match (a, b) {
        (Op::Delete { .. }, Op::Delete { .. }) => true,
        (
            Op::Retain { attributes: x, .. },
            Op::Retain { attributes: y, .. },
        ) => x == y,
        (
            Op::Insert {
                value: InsertValue::Text(_),
                attributes: x,
            },
            Op::Insert {
                value: InsertValue::Text(_),
                attributes: y,
            },
        ) => x == y,
        _ => false,
    }
}

/// Assert the canonical-form invariants: no zero-length op, no mergeable
/// neighbors, no delete immediately followed by an insert.
pub fn assert_canonical(delta: &Delta, context: &str) {
    for op in delta.ops() {
        assert!(!op.is_empty(), "{context}: zero-length op in {delta:?}");
    }
    for pair in delta.ops().windows(2) {
        assert!(
            !mergeable(&pair[0], &pair[1]),
            "{context}: mergeable neighbors in {delta:?}"
        );
        assert!(
            !matches!((&pair[0], &pair[1]), (Op::Delete { .. }, Op::Insert { .. })),
            "{context}: delete before insert in {delta:?}"
        );
    }
}
