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
 * plutus_cbor encoder
 **************************************************************************************************/
use crate::constants::*;
use crate::error::{CborError, CborErrorKind, Result};
use crate::float::{self, ShortestFloat};
use crate::limits::EncodeOptions;
use crate::value::{FloatWidth, MapEntry, Value};
use num_bigint::{BigInt, BigUint, Sign};

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Encode a single [`Value`] to its CBOR wire representation.
#[cfg_attr(feature = "trace", trace)]
pub fn encode_value(value: &Value, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_value(value, opts, &mut out)?;
    Ok(out)
}

/// Encode a sequence of top-level [`Value`]s back-to-back, as RFC 8949 §4.1 CBOR sequences.
pub fn encode_sequence(values: &[Value], opts: &EncodeOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for v in values {
        write_value(v, opts, &mut out)?;
    }
    Ok(out)
}

fn write_header(major_type: u8, arg: u64, out: &mut Vec<u8>) {
    let mt_bits = major_type << 5;
    if arg <= u64::from(PAYLOAD_AI_BITS) {
        out.push(mt_bits | arg as u8);
    } else if arg <= 0xff {
        out.push(mt_bits | PAYLOAD_ONE_BYTE);
        out.push(arg as u8);
    } else if arg <= 0xffff {
        out.push(mt_bits | PAYLOAD_TWO_BYTES);
        out.extend_from_slice(&(arg as u16).to_be_bytes());
    } else if arg <= 0xffff_ffff {
        out.push(mt_bits | PAYLOAD_FOUR_BYTES);
        out.extend_from_slice(&(arg as u32).to_be_bytes());
    } else {
        out.push(mt_bits | PAYLOAD_EIGHT_BYTES);
        out.extend_from_slice(&arg.to_be_bytes());
    }
}

fn write_value(value: &Value, opts: &EncodeOptions, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Value::Unsigned(n) => write_header(0, *n, out),
        Value::UnsignedBig(n) => write_bignum(POS_BIGNUM, n.to_bytes_be(), opts, out)?,
        Value::Negative(n) => write_header(1, (-1 - n) as u64, out),
        Value::NegativeBig(n) => write_negative_big(n, opts, out)?,
        Value::Bytes { value, chunks } => write_string(2, value, chunks.as_deref(), opts, out),
        Value::Text { value, chunks } => write_text(value, chunks.as_deref(), opts, out)?,
        Value::Array { items, indefinite } => write_array(items, *indefinite, opts, out)?,
        Value::Map { entries, indefinite } => write_map(entries, *indefinite, opts, out)?,
        Value::Tagged { tag, inner } => {
            write_header(6, *tag, out);
            write_value(inner, opts, out)?;
        }
        Value::Simple(v) => write_simple(*v, out),
        Value::Bool(false) => out.push(MT_SIMPLE | SIMPLE_FALSE),
        Value::Bool(true) => out.push(MT_SIMPLE | SIMPLE_TRUE),
        Value::Null => out.push(MT_SIMPLE | SIMPLE_NULL),
        Value::Undefined => {
            if !opts.allow_undefined {
                return Err(CborError::at(CborErrorKind::EncodingUnsupportedValue, out.len()));
            }
            out.push(MT_SIMPLE | SIMPLE_UNDEFINED);
        }
        Value::Float(f) => write_float(f.value, f.width, opts, out),
        Value::PlutusConstr { tag, index, fields } => {
            write_plutus_constr(*tag, *index, fields, opts, out)?;
        }
    }
    Ok(())
}

fn write_simple(v: u8, out: &mut Vec<u8>) {
    if v < 32 {
        out.push(MT_SIMPLE | v);
    } else {
        out.push(MT_SIMPLE | PAYLOAD_ONE_BYTE);
        out.push(v);
    }
}

fn write_bignum(tag: u64, mut bytes: Vec<u8>, opts: &EncodeOptions, out: &mut Vec<u8>) -> Result<()> {
    if bytes.is_empty() {
        bytes.push(0);
    }
    write_header(6, tag, out);
    write_string(2, &bytes, None, opts, out);
    Ok(())
}

/// `Value::NegativeBig(n)` with `n < 0`, stored as `-1 - magnitude`; re-encode as tag 3 over the
/// big-endian magnitude bytes, promoting to tag 2 if the caller constructed a non-negative
/// `NegativeBig` (never produced by the decoder, but the encoder stays total over the type).
fn write_negative_big(n: &BigInt, opts: &EncodeOptions, out: &mut Vec<u8>) -> Result<()> {
    if n.sign() != Sign::Minus {
        let (_, bytes) = n.to_bytes_be();
        return write_bignum(POS_BIGNUM, bytes, opts, out);
    }
    let magnitude = BigInt::from(-1) - n;
    let (_, bytes) = magnitude.to_bytes_be();
    write_bignum(NEG_BIGNUM, bytes, opts, out)
}

fn write_string(major_type: u8, value: &[u8], chunks: Option<&[Vec<u8>]>, opts: &EncodeOptions, out: &mut Vec<u8>) {
    if !opts.canonical {
        if let Some(chunks) = chunks {
            out.push((major_type << 5) | PAYLOAD_INDEFINITE);
            for chunk in chunks {
                write_header(major_type, chunk.len() as u64, out);
                out.extend_from_slice(chunk);
            }
            out.push(BREAK_BYTE);
            return;
        }
    }
    write_header(major_type, value.len() as u64, out);
    out.extend_from_slice(value);
}

fn write_text(value: &str, chunks: Option<&[String]>, opts: &EncodeOptions, out: &mut Vec<u8>) -> Result<()> {
    let byte_chunks = chunks.map(|cs| cs.iter().map(|c| c.as_bytes().to_vec()).collect::<Vec<_>>());
    write_string(3, value.as_bytes(), byte_chunks.as_deref(), opts, out);
    Ok(())
}

fn write_array(items: &[Value], indefinite: bool, opts: &EncodeOptions, out: &mut Vec<u8>) -> Result<()> {
    if indefinite && !opts.canonical {
        out.push((4 << 5) | PAYLOAD_INDEFINITE);
        for item in items {
            write_value(item, opts, out)?;
        }
        out.push(BREAK_BYTE);
    } else {
        write_header(4, items.len() as u64, out);
        for item in items {
            write_value(item, opts, out)?;
        }
    }
    Ok(())
}

fn write_map(entries: &[MapEntry], indefinite: bool, opts: &EncodeOptions, out: &mut Vec<u8>) -> Result<()> {
    let mut encoded: Vec<(Vec<u8>, Vec<u8>)> = Vec::with_capacity(entries.len());
    for entry in entries {
        let key_bytes = encode_value(&entry.key, opts)?;
        let value_bytes = encode_value(&entry.value, opts)?;
        encoded.push((key_bytes, value_bytes));
    }
    check_no_duplicate_encoded_keys(&encoded, out.len())?;

    if opts.canonical {
        encoded.sort_by(|a, b| length_lex_cmp(&a.0, &b.0));
        write_header(5, encoded.len() as u64, out);
        for (k, v) in encoded {
            out.extend_from_slice(&k);
            out.extend_from_slice(&v);
        }
        return Ok(());
    }

    if indefinite {
        out.push((5 << 5) | PAYLOAD_INDEFINITE);
        for (k, v) in encoded {
            out.extend_from_slice(&k);
            out.extend_from_slice(&v);
        }
        out.push(BREAK_BYTE);
    } else {
        write_header(5, encoded.len() as u64, out);
        for (k, v) in encoded {
            out.extend_from_slice(&k);
            out.extend_from_slice(&v);
        }
    }
    Ok(())
}

/// §4.8: "Duplicate encoded keys fail with `DuplicateKey` even in non-canonical mode" — compared
/// by encoded byte sequence, the same identity the parser's duplicate-key check uses (§4.5).
fn check_no_duplicate_encoded_keys(encoded: &[(Vec<u8>, Vec<u8>)], offset: usize) -> Result<()> {
    for i in 0..encoded.len() {
        for j in 0..i {
            if encoded[i].0 == encoded[j].0 {
                return Err(CborError::at(CborErrorKind::DuplicateKey, offset));
            }
        }
    }
    Ok(())
}

fn length_lex_cmp(a: &[u8], b: &[u8]) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn write_float(value: f64, width: FloatWidth, opts: &EncodeOptions, out: &mut Vec<u8>) {
    if opts.prefer_shortest_float {
        match float::shortest_encoding(value) {
            ShortestFloat::Binary16(bits) => write_f16(bits, out),
            ShortestFloat::Binary32(bits) => write_f32(bits, out),
            ShortestFloat::Binary64(bits) => write_f64(bits, out),
        }
        return;
    }
    match width {
        FloatWidth::Binary16 => write_f16(half::f16::from_f64(value).to_bits(), out),
        FloatWidth::Binary32 => write_f32((value as f32).to_bits(), out),
        FloatWidth::Binary64 => write_f64(value.to_bits(), out),
    }
}

fn write_f16(bits: u16, out: &mut Vec<u8>) {
    out.push(MT_FLOAT | PAYLOAD_TWO_BYTES);
    out.extend_from_slice(&bits.to_be_bytes());
}

fn write_f32(bits: u32, out: &mut Vec<u8>) {
    out.push(MT_FLOAT | PAYLOAD_FOUR_BYTES);
    out.extend_from_slice(&bits.to_be_bytes());
}

fn write_f64(bits: u64, out: &mut Vec<u8>) {
    out.push(MT_FLOAT | PAYLOAD_EIGHT_BYTES);
    out.extend_from_slice(&bits.to_be_bytes());
}

fn write_plutus_constr(tag: u64, index: u64, fields: &[Value], opts: &EncodeOptions, out: &mut Vec<u8>) -> Result<()> {
    let (wire_tag, wire_value) = crate::tag::plutus_constr_wire_shape(tag, index, fields.to_vec());
    write_header(6, wire_tag, out);
    write_value(&wire_value, opts, out)
}
