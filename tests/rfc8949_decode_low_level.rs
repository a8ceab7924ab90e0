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
 * Test cases for plutus_cbor: low-level header/argument decoding (RFC 8949 §3)
 **************************************************************************************************/
use plutus_cbor::{decode, CborErrorKind, DecodeOptions, Value};

fn opts() -> DecodeOptions {
    DecodeOptions::default()
}

#[test]
fn decodes_direct_additional_info_values() {
    for n in 0u8..=23 {
        let hex = format!("{:02x}", n);
        let r = decode(hex.as_str(), &opts()).unwrap();
        assert_eq!(r.value, Value::Unsigned(n as u64));
        assert_eq!(r.bytes_read, 1);
    }
}

#[test]
fn decodes_one_two_four_eight_byte_arguments() {
    assert_eq!(decode("1818", &opts()).unwrap().value, Value::Unsigned(24));
    assert_eq!(decode("190100", &opts()).unwrap().value, Value::Unsigned(256));
    assert_eq!(decode("1a00010000", &opts()).unwrap().value, Value::Unsigned(65536));
    assert_eq!(
        decode("1b0000000100000000", &opts()).unwrap().value,
        Value::Unsigned(1u64 << 32)
    );
}

#[test]
fn rejects_reserved_additional_info_28_to_30() {
    for b in ["1c", "1d", "1e"] {
        let err = decode(b, &opts()).unwrap_err();
        assert_eq!(err.kind, CborErrorKind::Reserved);
    }
}

#[test]
fn fails_on_truncated_one_byte_argument() {
    let err = decode("18", &opts()).unwrap_err();
    assert_eq!(err.kind, CborErrorKind::UnexpectedEof);
}

#[test]
fn fails_on_truncated_eight_byte_argument() {
    let err = decode("1b0000000100", &opts()).unwrap_err();
    assert_eq!(err.kind, CborErrorKind::UnexpectedEof);
}

#[test]
fn fails_on_empty_input() {
    let err = decode("", &opts()).unwrap_err();
    assert_eq!(err.kind, CborErrorKind::UnexpectedEof);
}

#[test]
fn negative_integers_decode_as_minus_one_minus_argument() {
    assert_eq!(decode("20", &opts()).unwrap().value, Value::Negative(-1));
    assert_eq!(decode("29", &opts()).unwrap().value, Value::Negative(-10));
    assert_eq!(decode("3863", &opts()).unwrap().value, Value::Negative(-100));
}

#[test]
fn negative_integer_beyond_i64_promotes_to_bignum() {
    // -1 - 2^64 does not fit in i64; must promote to NegativeBig.
    let r = decode("3bffffffffffffffff", &opts()).unwrap();
    assert!(matches!(r.value, Value::NegativeBig(_)));
}

#[test]
fn reads_definite_byte_string() {
    let r = decode("4401020304", &opts()).unwrap();
    match r.value {
        Value::Bytes { value, chunks } => {
            assert_eq!(value, vec![1, 2, 3, 4]);
            assert!(chunks.is_none());
        }
        _ => panic!("expected byte string"),
    }
}

#[test]
fn reads_empty_definite_byte_string() {
    let r = decode("40", &opts()).unwrap();
    match r.value {
        Value::Bytes { value, .. } => assert!(value.is_empty()),
        _ => panic!("expected byte string"),
    }
}

#[test]
fn simple_values_20_to_23_decode_to_dedicated_variants() {
    assert_eq!(decode("f4", &opts()).unwrap().value, Value::Bool(false));
    assert_eq!(decode("f5", &opts()).unwrap().value, Value::Bool(true));
    assert_eq!(decode("f6", &opts()).unwrap().value, Value::Null);
    assert_eq!(decode("f7", &opts()).unwrap().value, Value::Undefined);
}

#[test]
fn simple_value_18_decodes_as_simple() {
    assert_eq!(decode("f2", &opts()).unwrap().value, Value::Simple(18));
}

#[test]
fn one_byte_simple_value_below_32_is_overlong() {
    let err = decode("f81f", &opts()).unwrap_err();
    assert_eq!(err.kind, CborErrorKind::OverlongSimple);
}

#[test]
fn one_byte_simple_value_at_or_above_32_is_accepted() {
    assert_eq!(decode("f820", &opts()).unwrap().value, Value::Simple(32));
    assert_eq!(decode("f8ff", &opts()).unwrap().value, Value::Simple(255));
}

#[test]
fn bytes_read_reports_exact_consumption_with_trailing_data() {
    // A single `1` followed by trailing garbage; decode should stop after the first item.
    let r = decode("0100", &opts()).unwrap();
    assert_eq!(r.value, Value::Unsigned(1));
    assert_eq!(r.bytes_read, 1);
}
