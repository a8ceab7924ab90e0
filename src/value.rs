/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * plutus_cbor decoded value tree
 **************************************************************************************************/
use num_bigint::{BigInt, BigUint};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width a floating-point value was originally encoded in, retained so a canonical-mode
/// re-encode or re-validate can check minimality without re-deriving it from the bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FloatWidth {
    Binary16,
    Binary32,
    Binary64,
}

/// A floating-point value paired with the width it was decoded from (or is to be encoded as).
///
/// `f64` alone cannot distinguish `-0.0` from `0.0` under `PartialEq`, so comparisons that care
/// about the distinction (§3 invariant) must use [`Value::is_negative_zero`] rather than `==`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Float {
    pub value: f64,
    pub width: FloatWidth,
}

/// One key/value pair of a decoded [`Value::Map`], in the order they were parsed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
}

/// A decoded CBOR item, owning all of its substructure.
///
/// This is the crate's single dynamic-value union (§9): every recursive parser and the encoder
/// dispatch on it. Byte/text strings and collections always own their contents; nothing here
/// borrows from the original input buffer, so a `Value` outlives the decode call that produced
/// it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Major type 0, promoted to [`BigUint`] once the magnitude exceeds `u64`.
    Unsigned(u64),
    /// Major type 0 decoded from tag 2 (positive bignum) or an unsigned value too large for `u64`.
    UnsignedBig(BigUint),
    /// Major type 1, the actual signed value (`-1 - argument`), or tag 3 (negative bignum).
    Negative(i64),
    /// Arbitrary-precision signed integer, used once the magnitude exceeds `i64`.
    NegativeBig(BigInt),
    /// Major type 2. `chunks` is `Some` only when the value was decoded from indefinite-length
    /// framing, recording the original chunk boundaries for round-trip fidelity.
    Bytes {
        value: Vec<u8>,
        chunks: Option<Vec<Vec<u8>>>,
    },
    /// Major type 3.
    Text {
        value: String,
        chunks: Option<Vec<String>>,
    },
    /// Major type 4.
    Array { items: Vec<Value>, indefinite: bool },
    /// Major type 5. Entries preserve parse order; canonical-order validation is a property of
    /// the parser/encoder, not of this type.
    Map {
        entries: Vec<MapEntry>,
        indefinite: bool,
    },
    /// Major type 6, for any tag not given a dedicated variant by this crate.
    Tagged { tag: u64, inner: Box<Value> },
    /// Major type 7, `ai < 20` or `ai == 24` with a value outside `20..=23`.
    Simple(u8),
    Bool(bool),
    Null,
    Undefined,
    Float(Float),
    /// A Cardano Plutus Data constructor (tag 102, 121-127, or 1280-1400).
    ///
    /// `tag` retains the exact wire tag so the value can be re-encoded byte-identically;
    /// `index` is the constructor index recovered from it (§3 Open Question resolution).
    PlutusConstr {
        tag: u64,
        index: u64,
        fields: Vec<Value>,
    },
}

impl Value {
    /// `true` if `self` is the IEEE-754 negative zero float, distinct from ordinary `+0.0` per
    /// the §3 invariant.
    pub fn is_negative_zero(&self) -> bool {
        matches!(self, Value::Float(f) if f.value == 0.0 && f.value.is_sign_negative())
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(self, Value::Unsigned(_) | Value::UnsignedBig(_))
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Value::Negative(_) | Value::NegativeBig(_))
    }

    /// A short, human-readable type label matching the vocabulary used in source-map entries
    /// and diagnostics (e.g. `"unsigned"`, `"array"`, `"plutus-constr"`).
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Unsigned(_) | Value::UnsignedBig(_) => "unsigned",
            Value::Negative(_) | Value::NegativeBig(_) => "negative",
            Value::Bytes { .. } => "bytes",
            Value::Text { .. } => "text",
            Value::Array { .. } => "array",
            Value::Map { .. } => "map",
            Value::Tagged { .. } => "tagged",
            Value::Simple(_) => "simple",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Float(_) => "float",
            Value::PlutusConstr { .. } => "plutus-constr",
        }
    }

    /// Major type byte (top 3 bits of the initial byte) this value encodes as.
    pub fn major_type(&self) -> u8 {
        match self {
            Value::Unsigned(_) | Value::UnsignedBig(_) => 0,
            Value::Negative(_) | Value::NegativeBig(_) => 1,
            Value::Bytes { .. } => 2,
            Value::Text { .. } => 3,
            Value::Array { .. } => 4,
            Value::Map { .. } => 5,
            Value::Tagged { .. } | Value::PlutusConstr { .. } => 6,
            Value::Simple(_) | Value::Bool(_) | Value::Null | Value::Undefined | Value::Float(_) => 7,
        }
    }

    /// Bounded, single-line representation used by source-map entries (`value_repr`); long
    /// strings and collections are summarized rather than rendered in full.
    pub fn bounded_repr(&self, max_len: usize) -> String {
        let s = match self {
            Value::Unsigned(n) => n.to_string(),
            Value::UnsignedBig(n) => n.to_string(),
            Value::Negative(n) => n.to_string(),
            Value::NegativeBig(n) => n.to_string(),
            Value::Bytes { value, .. } => format!("h'{}' ({} bytes)", crate::hex::bytes_to_hex(&value[..value.len().min(8)]), value.len()),
            Value::Text { value, .. } => format!("{:?}", value),
            Value::Array { items, .. } => format!("[array; {} items]", items.len()),
            Value::Map { entries, .. } => format!("{{map; {} entries}}", entries.len()),
            Value::Tagged { tag, .. } => format!("{}(...)", tag),
            Value::Simple(v) => format!("simple({})", v),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Undefined => "undefined".to_string(),
            Value::Float(f) => f.value.to_string(),
            Value::PlutusConstr { index, fields, .. } => {
                format!("Constr{}(... {} fields)", index, fields.len())
            }
        };
        if s.len() > max_len {
            let mut cut = max_len;
            while cut > 0 && !s.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}...", &s[..cut])
        } else {
            s
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Unsigned(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        if v >= 0 {
            Value::Unsigned(v as u64)
        } else {
            Value::Negative(v)
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes { value: v, chunks: None }
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text { value: v, chunks: None }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}
