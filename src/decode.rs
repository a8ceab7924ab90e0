/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * plutus_cbor decoder
 *
 * The recursive descent parser used by both `decode` and `decode_with_source_map`. Both entry
 * points call the same `parse_item`, parameterized by whether it should also build a source-map
 * node; this is what makes the "both paths enforce limits identically" contract structural rather
 * than aspirational.
 **************************************************************************************************/
use crate::constants::tag::*;
use crate::constants::*;
use crate::error::{CborError, CborErrorKind, Result};
use crate::float;
use crate::hex;
use crate::limits::{DecodeOptions, LimitsAccountant};
use crate::reader::ByteReader;
use crate::source_map::{self, RawNode, SourceMapEntry};
use crate::value::{Float, FloatWidth, MapEntry, Value};
use num_bigint::BigInt;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Input accepted by [`decode`]/[`decode_with_source_map`]: either raw bytes or hex text, decoded
/// via [`crate::hex::hex_to_bytes`] first.
pub enum Input<'a> {
    Bytes(&'a [u8]),
    Hex(&'a str),
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(b: &'a [u8]) -> Self {
        Input::Bytes(b)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Hex(s)
    }
}

impl<'a> Input<'a> {
    fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Input::Bytes(b) => Ok(b.to_vec()),
            Input::Hex(s) => hex::hex_to_bytes(s),
        }
    }
}

/// Result of [`decode`]: the decoded value plus the number of input bytes it consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeResult {
    pub value: Value,
    pub bytes_read: usize,
}

/// Result of [`decode_with_source_map`]: the decoded value, bytes consumed, and the flattened
/// pre-order source map (§4.7). `source_map[0]` is always the root entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMapResult {
    pub value: Value,
    pub bytes_read: usize,
    pub source_map: Vec<SourceMapEntry>,
}

/// Decode a single top-level CBOR item from `input` under `opts`. Trailing bytes beyond the item
/// are not an error; `bytes_read` tells the caller exactly how much was consumed (§6.1).
#[cfg_attr(feature = "trace", trace)]
pub fn decode<'a>(input: impl Into<Input<'a>>, opts: &DecodeOptions) -> Result<DecodeResult> {
    let bytes = input.into().into_bytes()?;
    let mut reader = ByteReader::new(&bytes);
    let mut accountant = LimitsAccountant::new(*opts);
    let (value, _) = parse_item(&mut reader, opts, &mut accountant, "", false)?;
    Ok(DecodeResult {
        value,
        bytes_read: reader.offset(),
    })
}

/// Decode a single top-level CBOR item from `input`, additionally producing the byte-accurate
/// source map described in §4.7. Enforces every limit in [`DecodeOptions`] identically to
/// [`decode`] (§4.7 "Critical contract"): both functions call the same [`parse_item`].
#[cfg_attr(feature = "trace", trace)]
pub fn decode_with_source_map<'a>(
    input: impl Into<Input<'a>>,
    opts: &DecodeOptions,
) -> Result<SourceMapResult> {
    let bytes = input.into().into_bytes()?;
    let mut reader = ByteReader::new(&bytes);
    let mut accountant = LimitsAccountant::new(*opts);
    let (value, node) = parse_item(&mut reader, opts, &mut accountant, "", true)?;
    let node = node.expect("with_map=true always returns a node");
    Ok(SourceMapResult {
        value,
        bytes_read: reader.offset(),
        source_map: source_map::flatten(node),
    })
}

/// Minimal `ai` (24/25/26/27, or a direct 0..=23 value) that could have encoded `arg`. Used to
/// reject non-minimal header arguments in canonical mode (§9 Open Question: enforced uniformly,
/// not just for the `Unsigned`/`Negative` variants).
fn canonical_ai_for(arg: u64) -> u8 {
    if arg <= u64::from(PAYLOAD_AI_BITS) {
        arg as u8
    } else if arg <= 0xff {
        PAYLOAD_ONE_BYTE
    } else if arg <= 0xffff {
        PAYLOAD_TWO_BYTES
    } else if arg <= 0xffff_ffff {
        PAYLOAD_FOUR_BYTES
    } else {
        PAYLOAD_EIGHT_BYTES
    }
}

fn check_minimal_argument(ai: u8, arg: u64, offset: usize, opts: &DecodeOptions) -> Result<()> {
    // ai=31 (indefinite-length framing, or a standalone break) carries no integer argument to
    // minimize; it is validated separately (`allow_indefinite`, break placement).
    if !opts.validate_canonical || ai <= PAYLOAD_AI_BITS || ai == PAYLOAD_INDEFINITE {
        return Ok(());
    }
    if ai != canonical_ai_for(arg) {
        return Err(CborError::at(CborErrorKind::NonCanonicalInteger, offset));
    }
    Ok(())
}

fn is_known_tag(tag: u64) -> bool {
    matches!(
        tag,
        DATE_TIME | EPOCH | POS_BIGNUM | NEG_BIGNUM | DECIMAL_FRACTION | BIGFLOAT | URI
            | BASE64URL | BASE64 | REGEX | MIME | SET
    ) || is_plutus_constr(tag)
}

/// Peek the next byte, translating EOF into [`CborErrorKind::MissingBreak`] rather than
/// [`CborErrorKind::UnexpectedEof`] — used only where we are specifically checking "is the next
/// byte the break that closes this indefinite-length item".
fn peek_or_missing_break(reader: &ByteReader, offset: usize) -> Result<u8> {
    reader
        .peek_u8()
        .map_err(|_| CborError::at(CborErrorKind::MissingBreak, offset))
}

/// The core recursive parser shared by [`decode`] and [`decode_with_source_map`]. `with_map`
/// selects whether a [`RawNode`] is also built; every resource-limit check runs unconditionally
/// either way, which is what makes §4.7's "Critical contract" true by construction rather than by
/// careful duplication.
fn parse_item(
    reader: &mut ByteReader,
    opts: &DecodeOptions,
    accountant: &mut LimitsAccountant,
    path: &str,
    with_map: bool,
) -> Result<(Value, Option<RawNode>)> {
    let start = reader.offset();
    let (header, arg) = reader.read_header_and_argument()?;
    // Major type 7's argument bytes are not a length/count/tag-number argument to minimize --
    // for ai=25/26/27 they are the float's raw IEEE bits, which `canonical_ai_for` would
    // otherwise misjudge against (e.g. ai=25 bits=0x0000 for +0.0 looks like a non-minimal
    // one-byte integer argument). Floats have their own minimality rules in
    // `parse_simple_or_float` (`NonMinimalFloat`/`NonCanonicalNaN`).
    if header.major_type != 7 {
        check_minimal_argument(header.additional_info, arg, start, opts)?;
    }

    let value = match header.major_type {
        0 => Value::Unsigned(arg),
        1 => negative_from_arg(arg),
        2 => parse_string_bytes(reader, opts, accountant, header.additional_info, start)?,
        3 => parse_string_text(reader, opts, accountant, header.additional_info, start)?,
        4 => {
            return parse_array(reader, opts, accountant, header.additional_info, start, path, with_map)
                .map_err(|e| e.with_path(path.to_string()));
        }
        5 => {
            return parse_map(reader, opts, accountant, header.additional_info, start, path, with_map)
                .map_err(|e| e.with_path(path.to_string()));
        }
        6 => {
            return parse_tag(reader, opts, accountant, arg, start, path, with_map)
                .map_err(|e| e.with_path(path.to_string()));
        }
        7 => parse_simple_or_float(reader, opts, header.additional_info, start)?,
        _ => unreachable!("major_type is masked to 3 bits"),
    };

    let node = with_map.then(|| RawNode {
        path: path.to_string(),
        start,
        end: reader.offset(),
        major_type: value.major_type(),
        type_label: value.type_label(),
        value_repr: value.bounded_repr(80),
        children: Vec::new(),
    });
    Ok((value, node))
}

fn negative_from_arg(arg: u64) -> Value {
    let neg = -1i128 - i128::from(arg);
    if neg >= i64::MIN as i128 {
        Value::Negative(neg as i64)
    } else {
        Value::NegativeBig(BigInt::from(-1) - BigInt::from(arg))
    }
}

fn parse_string_bytes(
    reader: &mut ByteReader,
    opts: &DecodeOptions,
    accountant: &mut LimitsAccountant,
    ai: u8,
    start: usize,
) -> Result<Value> {
    if ai == PAYLOAD_INDEFINITE {
        let (value, chunks) = parse_indefinite_string(reader, opts, accountant, MT_BSTR, start, |b| b.to_vec())?;
        return Ok(Value::Bytes {
            value,
            chunks: Some(chunks),
        });
    }
    let len = ai_length(reader, ai)?;
    accountant.check_byte_string_length(start, len)?;
    let bytes = reader.read_bytes(len)?;
    accountant.add_output(start, len)?;
    Ok(Value::Bytes {
        value: bytes.to_vec(),
        chunks: None,
    })
}

fn parse_string_text(
    reader: &mut ByteReader,
    opts: &DecodeOptions,
    accountant: &mut LimitsAccountant,
    ai: u8,
    start: usize,
) -> Result<Value> {
    if ai == PAYLOAD_INDEFINITE {
        let (raw, raw_chunks) = parse_indefinite_string(reader, opts, accountant, MT_TSTR, start, |b| b.to_vec())?;
        let value = decode_utf8(raw, opts, start)?;
        let mut chunks = Vec::with_capacity(raw_chunks.len());
        for c in raw_chunks {
            chunks.push(decode_utf8(c, opts, start)?);
        }
        return Ok(Value::Text {
            value,
            chunks: Some(chunks),
        });
    }
    let len = ai_length(reader, ai)?;
    accountant.check_text_string_length(start, len)?;
    let bytes = reader.read_bytes(len)?;
    accountant.add_output(start, len)?;
    let value = decode_utf8(bytes.to_vec(), opts, start)?;
    Ok(Value::Text {
        value,
        chunks: None,
    })
}

fn decode_utf8(bytes: Vec<u8>, opts: &DecodeOptions, offset: usize) -> Result<String> {
    if opts.strict_utf8 {
        String::from_utf8(bytes).map_err(|_| CborError::at(CborErrorKind::InvalidUtf8, offset))
    } else {
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn ai_length(reader: &mut ByteReader, ai: u8) -> Result<usize> {
    match ai {
        0..=PAYLOAD_AI_BITS => Ok(ai as usize),
        PAYLOAD_ONE_BYTE => Ok(reader.read_be_uint(1)? as usize),
        PAYLOAD_TWO_BYTES => Ok(reader.read_be_uint(2)? as usize),
        PAYLOAD_FOUR_BYTES => Ok(reader.read_be_uint(4)? as usize),
        PAYLOAD_EIGHT_BYTES => Ok(reader.read_be_uint(8)? as usize),
        _ => unreachable!("header parsing already validated ai"),
    }
}

/// Consume zero or more definite-length chunks of `major_type` until a break, concatenating their
/// payloads. Returns the concatenation plus each individual chunk (for round-trip fidelity,
/// §3 `chunks` field).
///
/// The per-string length ceiling and the running output-size ceiling are both checked after
/// every chunk, not just once on the fully concatenated result, so an over-limit indefinite
/// string fails as soon as the violating chunk lands rather than after allocating the whole
/// oversized buffer (§4.3, §8 property 7).
fn parse_indefinite_string(
    reader: &mut ByteReader,
    opts: &DecodeOptions,
    accountant: &mut LimitsAccountant,
    major_type: u8,
    start: usize,
    to_vec: impl Fn(&[u8]) -> Vec<u8>,
) -> Result<(Vec<u8>, Vec<Vec<u8>>)> {
    let _ = opts;
    accountant.require_indefinite_allowed(start)?;
    let mut concatenated = Vec::new();
    let mut chunks = Vec::new();
    loop {
        accountant.check_timeout(start)?;
        let b = peek_or_missing_break(reader, start)?;
        if b == BREAK_BYTE {
            reader.read_u8()?;
            break;
        }
        let chunk_start = reader.offset();
        let (chunk_header, chunk_arg) = reader.read_header_and_argument()?;
        if chunk_header.additional_info == PAYLOAD_INDEFINITE {
            return Err(CborError::at(CborErrorKind::NestedIndefinite, chunk_start));
        }
        if (chunk_header.major_type << 5) != major_type {
            return Err(CborError::at(CborErrorKind::NestedIndefinite, chunk_start));
        }
        let chunk = reader.read_bytes(chunk_arg as usize)?;
        concatenated.extend_from_slice(chunk);
        if major_type == MT_BSTR {
            accountant.check_byte_string_length(start, concatenated.len())?;
        } else {
            accountant.check_text_string_length(start, concatenated.len())?;
        }
        accountant.add_output(start, chunk.len())?;
        chunks.push(to_vec(chunk));
    }
    Ok((concatenated, chunks))
}

fn parse_array(
    reader: &mut ByteReader,
    opts: &DecodeOptions,
    accountant: &mut LimitsAccountant,
    ai: u8,
    start: usize,
    path: &str,
    with_map: bool,
) -> Result<(Value, Option<RawNode>)> {
    accountant.enter(start)?;
    let indefinite = ai == PAYLOAD_INDEFINITE;
    let mut items = Vec::new();
    let mut children = Vec::new();

    if indefinite {
        accountant.require_indefinite_allowed(start)?;
        let mut i = 0usize;
        loop {
            accountant.check_timeout(start)?;
            let b = peek_or_missing_break(reader, start)?;
            if b == BREAK_BYTE {
                reader.read_u8()?;
                break;
            }
            accountant.check_array_length(start, i + 1)?;
            let child_path = source_map::array_child_path(path, i);
            let (item, node) = parse_item(reader, opts, accountant, &child_path, with_map)
                .map_err(|e| e.with_path(child_path.clone()))?;
            items.push(item);
            if let Some(n) = node {
                children.push(n);
            }
            i += 1;
        }
    } else {
        let count = ai_length(reader, ai)?;
        accountant.check_array_length(start, count)?;
        items.reserve(count);
        children.reserve(if with_map { count } else { 0 });
        for i in 0..count {
            accountant.check_timeout(start)?;
            let child_path = source_map::array_child_path(path, i);
            let (item, node) = parse_item(reader, opts, accountant, &child_path, with_map)
                .map_err(|e| e.with_path(child_path.clone()))?;
            items.push(item);
            if let Some(n) = node {
                children.push(n);
            }
        }
    }
    accountant.leave();

    let value = Value::Array { items, indefinite };
    let node = with_map.then(|| RawNode {
        path: path.to_string(),
        start,
        end: reader.offset(),
        major_type: value.major_type(),
        type_label: value.type_label(),
        value_repr: value.bounded_repr(80),
        children,
    });
    Ok((value, node))
}

fn parse_map(
    reader: &mut ByteReader,
    opts: &DecodeOptions,
    accountant: &mut LimitsAccountant,
    ai: u8,
    start: usize,
    path: &str,
    with_map: bool,
) -> Result<(Value, Option<RawNode>)> {
    accountant.enter(start)?;
    let indefinite = ai == PAYLOAD_INDEFINITE;
    let mut entries = Vec::new();
    let mut children = Vec::new();
    // (raw encoded key bytes, offset of the key) captured in parse order, used for both
    // canonical-order validation and duplicate-key detection (§4.5: "raw encoded byte sequence").
    let mut raw_keys: Vec<(Vec<u8>, usize)> = Vec::new();

    let push_pair = |reader: &mut ByteReader,
                          accountant: &mut LimitsAccountant,
                          i: usize,
                          entries: &mut Vec<MapEntry>,
                          children: &mut Vec<RawNode>,
                          raw_keys: &mut Vec<(Vec<u8>, usize)>|
     -> Result<()> {
        let key_path = source_map::array_child_path(path, i);
        let key_start = reader.offset();
        let (key, key_node) = parse_item(reader, opts, accountant, &key_path, with_map)
            .map_err(|e| e.with_path(key_path.clone()))?;
        let key_bytes = reader.consumed_since(key_start).to_vec();

        if let Ok(b) = reader.peek_u8() {
            if b == BREAK_BYTE {
                return Err(CborError::new(CborErrorKind::BreakInsideMapPair, reader.offset(), key_path.clone()));
            }
        }

        let value_path = source_map::map_child_path(path, &key);
        let (val, val_node) = parse_item(reader, opts, accountant, &value_path, with_map)
            .map_err(|e| e.with_path(value_path.clone()))?;

        raw_keys.push((key_bytes, key_start));
        entries.push(MapEntry { key, value: val });
        if with_map {
            children.push(key_node.unwrap());
            children.push(val_node.unwrap());
        }
        Ok(())
    };

    if indefinite {
        accountant.require_indefinite_allowed(start)?;
        let mut i = 0usize;
        loop {
            accountant.check_timeout(start)?;
            let b = peek_or_missing_break(reader, start)?;
            if b == BREAK_BYTE {
                reader.read_u8()?;
                break;
            }
            accountant.check_map_size(start, i + 1)?;
            push_pair(reader, accountant, i, &mut entries, &mut children, &mut raw_keys)?;
            i += 1;
        }
    } else {
        let count = ai_length(reader, ai)?;
        accountant.check_map_size(start, count)?;
        entries.reserve(count);
        for i in 0..count {
            accountant.check_timeout(start)?;
            push_pair(reader, accountant, i, &mut entries, &mut children, &mut raw_keys)?;
        }
    }
    accountant.leave();

    check_duplicate_keys(&raw_keys)?;
    if opts.validate_canonical {
        check_canonical_key_order(&raw_keys)?;
    }

    let value = Value::Map { entries, indefinite };
    let node = with_map.then(|| RawNode {
        path: path.to_string(),
        start,
        end: reader.offset(),
        major_type: value.major_type(),
        type_label: value.type_label(),
        value_repr: value.bounded_repr(80),
        children,
    });
    Ok((value, node))
}

fn check_duplicate_keys(raw_keys: &[(Vec<u8>, usize)]) -> Result<()> {
    for i in 0..raw_keys.len() {
        for j in 0..i {
            if raw_keys[i].0 == raw_keys[j].0 {
                return Err(CborError::at(CborErrorKind::DuplicateKey, raw_keys[i].1));
            }
        }
    }
    Ok(())
}

fn length_lex_cmp(a: &[u8], b: &[u8]) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn check_canonical_key_order(raw_keys: &[(Vec<u8>, usize)]) -> Result<()> {
    for w in raw_keys.windows(2) {
        if length_lex_cmp(&w[0].0, &w[1].0) != std::cmp::Ordering::Less {
            return Err(CborError::at(CborErrorKind::NonCanonicalKeyOrder, w[1].1));
        }
    }
    Ok(())
}

fn parse_tag(
    reader: &mut ByteReader,
    opts: &DecodeOptions,
    accountant: &mut LimitsAccountant,
    tag: u64,
    start: usize,
    path: &str,
    with_map: bool,
) -> Result<(Value, Option<RawNode>)> {
    accountant.enter(start)?;
    accountant.check_timeout(start)?;

    if !is_known_tag(tag) {
        if opts.strict_tags {
            accountant.leave();
            return Err(CborError::at(CborErrorKind::UnknownTag(tag), start));
        }
        log::warn!("passing through unrecognized CBOR tag {tag} at offset {start}");
    }

    let inner_path = format!("{path}.tag");
    let (inner, inner_node) = parse_item(reader, opts, accountant, &inner_path, with_map)
        .map_err(|e| e.with_path(inner_path.clone()))?;
    accountant.leave();

    let value = crate::tag::dispatch(tag, inner, start, accountant)?;

    let node = with_map.then(|| RawNode {
        path: path.to_string(),
        start,
        end: reader.offset(),
        major_type: value.major_type(),
        type_label: value.type_label(),
        value_repr: value.bounded_repr(80),
        children: vec![inner_node.unwrap()],
    });
    Ok((value, node))
}

fn parse_simple_or_float(
    reader: &mut ByteReader,
    opts: &DecodeOptions,
    ai: u8,
    start: usize,
) -> Result<Value> {
    match ai {
        0..=19 => Ok(Value::Simple(ai)),
        SIMPLE_FALSE => Ok(Value::Bool(false)),
        SIMPLE_TRUE => Ok(Value::Bool(true)),
        SIMPLE_NULL => Ok(Value::Null),
        SIMPLE_UNDEFINED => Ok(Value::Undefined),
        PAYLOAD_ONE_BYTE => {
            let v = reader.read_u8()?;
            if v < 32 {
                Err(CborError::at(CborErrorKind::OverlongSimple, start))
            } else {
                Ok(Value::Simple(v))
            }
        }
        PAYLOAD_TWO_BYTES => {
            let bits = reader.read_be_uint(2)? as u16;
            if opts.validate_canonical && float::is_noncanonical_f16_nan(bits) {
                return Err(CborError::at(CborErrorKind::NonCanonicalNaN, start));
            }
            Ok(Value::Float(Float {
                value: float::f16_bits_to_f64(bits),
                width: FloatWidth::Binary16,
            }))
        }
        PAYLOAD_FOUR_BYTES => {
            let bits = reader.read_be_uint(4)? as u32;
            let value = float::f32_bits_to_f64(bits);
            if opts.validate_canonical {
                if value.is_nan() {
                    return Err(CborError::at(CborErrorKind::NonCanonicalNaN, start));
                }
                if value.is_finite() && float::fits_in_f16(value) {
                    return Err(CborError::at(CborErrorKind::NonMinimalFloat, start));
                }
            }
            Ok(Value::Float(Float {
                value,
                width: FloatWidth::Binary32,
            }))
        }
        PAYLOAD_EIGHT_BYTES => {
            let bits = reader.read_be_uint(8)?;
            let value = f64::from_bits(bits);
            if opts.validate_canonical {
                if value.is_nan() {
                    return Err(CborError::at(CborErrorKind::NonCanonicalNaN, start));
                }
                if value.is_finite() && float::fits_in_f32(value) {
                    return Err(CborError::at(CborErrorKind::NonMinimalFloat, start));
                }
            }
            Ok(Value::Float(Float {
                value,
                width: FloatWidth::Binary64,
            }))
        }
        PAYLOAD_INDEFINITE => Err(CborError::at(CborErrorKind::UnexpectedBreak, start)),
        _ => unreachable!("additional_info is masked to 5 bits and 28..30 already rejected"),
    }
}
