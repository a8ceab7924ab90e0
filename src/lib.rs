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
//! `plutus_cbor` is a CBOR (RFC 8949) encoder and decoder built around an owned, fully-materialized
//! [`Value`] tree rather than a borrowed AST. On top of ordinary CBOR it understands two things a
//! general-purpose codec usually leaves to the caller:
//!
//! - **A byte-accurate source map.** [`decode_with_source_map`] returns, alongside the decoded
//!   value, a flattened list of [`SourceMapEntry`] records giving the exact byte span and a stable
//!   path for every subtree, so a caller can point at "the third array element of the value at
//!   offset 40" without re-parsing.
//! - **Cardano Plutus Data.** The constructor tag family (general tag 102, compact tags 121-127,
//!   extended tags 1280-1400) decodes directly into [`Value::PlutusConstr`] instead of being left
//!   as an opaque [`Value::Tagged`].
//!
//! Every decode is governed by a [`DecodeOptions`] record of resource ceilings (depth, collection
//! size, string length, bignum size, output size, wall-clock timeout) and strictness flags
//! (indefinite-length framing, UTF-8, unknown tags, RFC 8949 §4.2.1 canonical/deterministic
//! encoding). There are no hidden defaults: [`DecodeOptions::default`] documents every ceiling, and
//! [`DecodeOptions::canonical`] is the strict preset used for round-trip-safe decoding.
//!
//! ```
//! use plutus_cbor::{decode, DecodeOptions};
//!
//! let result = decode("83010203", &DecodeOptions::default()).unwrap();
//! assert_eq!(result.bytes_read, 4);
//! ```
//!
//! Encoding mirrors this: [`encode`] and [`encode_sequence`] take an [`EncodeOptions`] that
//! defaults to canonical output (shortest-form integers and floats, sorted map keys, no
//! indefinite-length framing).
//!
//! ```
//! use plutus_cbor::{encode, EncodeOptions, Value};
//!
//! let bytes = encode(&Value::Unsigned(100), &EncodeOptions::default()).unwrap();
//! assert_eq!(bytes, vec![0x18, 0x64]);
//! ```
//!
//! The `chrono` feature adds RFC 3339 validation to tag 0 (date-time); `serde`/`serde_json` add
//! `Serialize`/`Deserialize` to [`Value`] and [`SourceMapEntry`] for exchanging a source map as
//! JSON; `trace` instruments the hot recursive parse/encode functions with `func_trace` entry/exit
//! logging.

mod constants;
mod decode;
mod diag;
mod encode;
mod error;
mod float;
mod hex;
mod limits;
mod reader;
mod source_map;
mod tag;
mod value;

pub use decode::{decode, decode_with_source_map, DecodeResult, Input, SourceMapResult};
pub use diag::to_diagnostic;
pub use encode::{encode_sequence, encode_value as encode};
pub use error::{CborError, CborErrorKind, Result};
pub use limits::{DecodeOptions, EncodeOptions};
pub use source_map::SourceMapEntry;
pub use value::{Float, FloatWidth, MapEntry, Value};
