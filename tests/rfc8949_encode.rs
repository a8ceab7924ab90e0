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
 * Test cases from RFC 8949, Table 6 (Appendix A), exercising the encoder.
 **************************************************************************************************/
use plutus_cbor::{encode, encode_sequence, EncodeOptions, Float, FloatWidth, MapEntry, Value};

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex(v: &Value) -> String {
    to_hex(&encode(v, &EncodeOptions::default()).unwrap())
}

fn hex_with(v: &Value, opts: &EncodeOptions) -> String {
    to_hex(&encode(v, opts).unwrap())
}

#[test]
fn rfc8949_encode_unsigned_int() {
    assert_eq!(hex(&Value::Unsigned(0)), "00");
    assert_eq!(hex(&Value::Unsigned(1)), "01");
    assert_eq!(hex(&Value::Unsigned(10)), "0a");
    assert_eq!(hex(&Value::Unsigned(23)), "17");
    assert_eq!(hex(&Value::Unsigned(24)), "1818");
    assert_eq!(hex(&Value::Unsigned(25)), "1819");
    assert_eq!(hex(&Value::Unsigned(100)), "1864");
    assert_eq!(hex(&Value::Unsigned(1000)), "1903e8");
    assert_eq!(hex(&Value::Unsigned(1000000)), "1a000f4240");
    assert_eq!(hex(&Value::Unsigned(1000000000000)), "1b000000e8d4a51000");
    assert_eq!(
        hex(&Value::Unsigned(18446744073709551615)),
        "1bffffffffffffffff"
    );
}

#[test]
fn rfc8949_encode_negative_int() {
    assert_eq!(hex(&Value::Negative(-1)), "20");
    assert_eq!(hex(&Value::Negative(-10)), "29");
    assert_eq!(hex(&Value::Negative(-100)), "3863");
    assert_eq!(hex(&Value::Negative(-1000)), "3903e7");
}

#[test]
fn rfc8949_encode_negative_bignum_below_i64_min_uses_tag_3() {
    // -18446744073709551616 == -1 - u64::MAX, too negative for i64; the encoder re-expresses
    // NegativeBig through tag 3 over the big-endian magnitude rather than major type 1.
    use num_bigint::BigInt;
    let n = BigInt::from(-1i64) - BigInt::from(u64::MAX);
    assert_eq!(hex(&Value::NegativeBig(n)), "c348ffffffffffffffff");
}

#[test]
fn rfc8949_encode_tstr() {
    assert_eq!(hex(&Value::from(String::new())), "60");
    assert_eq!(hex(&Value::from("a".to_string())), "6161");
    assert_eq!(hex(&Value::from("IETF".to_string())), "6449455446");
    assert_eq!(hex(&Value::from("\"\\".to_string())), "62225c");
    assert_eq!(hex(&Value::from("\u{00fc}".to_string())), "62c3bc");
    assert_eq!(hex(&Value::from("\u{6c34}".to_string())), "63e6b0b4");
}

#[test]
fn rfc8949_encode_bstr() {
    assert_eq!(hex(&Value::from(Vec::<u8>::new())), "40");
    assert_eq!(hex(&Value::from(vec![1u8, 2, 3, 4])), "4401020304");
}

#[test]
fn rfc8949_encode_simple() {
    assert_eq!(hex(&Value::Bool(false)), "f4");
    assert_eq!(hex(&Value::Bool(true)), "f5");
    assert_eq!(hex(&Value::Null), "f6");
    assert_eq!(hex(&Value::Undefined), "f7");
    assert_eq!(hex(&Value::Simple(16)), "f0");
    assert_eq!(hex(&Value::Simple(255)), "f8ff");
}

fn float_val(value: f64, width: FloatWidth) -> Value {
    Value::Float(Float { value, width })
}

#[test]
fn rfc8949_encode_float_shortest_canonical() {
    // With prefer_shortest_float (the canonical default), every value below is encoded at the
    // narrowest width that round-trips exactly, matching RFC 8949 Appendix A's test vectors.
    assert_eq!(hex(&float_val(0.0, FloatWidth::Binary64)), "f90000");
    assert_eq!(hex(&float_val(-0.0, FloatWidth::Binary64)), "f98000");
    assert_eq!(hex(&float_val(1.0, FloatWidth::Binary64)), "f93c00");
    assert_eq!(hex(&float_val(1.1, FloatWidth::Binary64)), "fb3ff199999999999a");
    assert_eq!(hex(&float_val(1.5, FloatWidth::Binary64)), "f93e00");
    assert_eq!(hex(&float_val(65504.0, FloatWidth::Binary64)), "f97bff");
    assert_eq!(hex(&float_val(100000.0, FloatWidth::Binary64)), "fa47c35000");
    assert_eq!(
        hex(&float_val(3.4028234663852886e+38, FloatWidth::Binary64)),
        "fa7f7fffff"
    );
    assert_eq!(hex(&float_val(1.0e+300, FloatWidth::Binary64)), "fb7e37e43c8800759c");
    assert_eq!(
        hex(&float_val(5.960464477539063e-8, FloatWidth::Binary64)),
        "f90001"
    );
    assert_eq!(
        hex(&float_val(0.00006103515625, FloatWidth::Binary64)),
        "f90400"
    );
    assert_eq!(hex(&float_val(-4.0, FloatWidth::Binary64)), "f9c400");
    assert_eq!(hex(&float_val(-4.1, FloatWidth::Binary64)), "fbc010666666666666");
    assert_eq!(hex(&float_val(f64::INFINITY, FloatWidth::Binary64)), "f97c00");
    assert_eq!(hex(&float_val(f64::NAN, FloatWidth::Binary64)), "f97e00");
    assert_eq!(hex(&float_val(f64::NEG_INFINITY, FloatWidth::Binary64)), "f9fc00");
}

#[test]
fn rfc8949_encode_float_at_requested_width_when_shortest_disabled() {
    let opts = EncodeOptions {
        prefer_shortest_float: false,
        ..EncodeOptions::default()
    };
    // 1.0 requested at full binary64 width, bypassing the shortest-float search.
    assert_eq!(
        hex_with(&float_val(1.0, FloatWidth::Binary64), &opts),
        "fb3ff0000000000000"
    );
}

#[test]
fn rfc8949_encode_tag_epoch_int() {
    let v = Value::Tagged {
        tag: 1,
        inner: Box::new(Value::Unsigned(1363896240)),
    };
    assert_eq!(hex(&v), "c11a514b67b0");
}

#[test]
fn rfc8949_encode_tag_epoch_float() {
    let v = Value::Tagged {
        tag: 1,
        inner: Box::new(float_val(1.5, FloatWidth::Binary64)),
    };
    assert_eq!(hex(&v), "c1f93e00");
}

#[test]
fn rfc8949_encode_tag_base64url_bstr() {
    let v = Value::Tagged {
        tag: 23,
        inner: Box::new(Value::from(vec![1u8, 2, 3, 4])),
    };
    assert_eq!(hex(&v), "d74401020304");
}

#[test]
fn rfc8949_encode_empty_array() {
    let v = Value::Array {
        items: Vec::new(),
        indefinite: false,
    };
    assert_eq!(hex(&v), "80");
}

#[test]
fn rfc8949_encode_array() {
    let v = Value::Array {
        items: vec![Value::Unsigned(1), Value::Unsigned(2), Value::Unsigned(3)],
        indefinite: false,
    };
    assert_eq!(hex(&v), "83010203");
}

#[test]
fn rfc8949_encode_nested_array() {
    let v = Value::Array {
        items: vec![
            Value::Unsigned(1),
            Value::Array {
                items: vec![Value::Unsigned(2), Value::Unsigned(3)],
                indefinite: false,
            },
            Value::Array {
                items: vec![Value::Unsigned(4), Value::Unsigned(5)],
                indefinite: false,
            },
        ],
        indefinite: false,
    };
    assert_eq!(hex(&v), "8301820203820405");
}

#[test]
fn rfc8949_encode_array_long() {
    let items: Vec<Value> = (1..=25).map(Value::Unsigned).collect();
    let v = Value::Array {
        items,
        indefinite: false,
    };
    assert_eq!(
        hex(&v),
        "98190102030405060708090a0b0c0d0e0f101112131415161718181819"
    );
}

#[test]
fn rfc8949_encode_array_with_map() {
    let v = Value::Array {
        items: vec![
            Value::Unsigned(1),
            Value::Map {
                entries: vec![MapEntry {
                    key: Value::Unsigned(2),
                    value: Value::Unsigned(3),
                }],
                indefinite: false,
            },
        ],
        indefinite: false,
    };
    assert_eq!(hex(&v), "8201a10203");
}

#[test]
fn rfc8949_encode_empty_map() {
    let v = Value::Map {
        entries: Vec::new(),
        indefinite: false,
    };
    assert_eq!(hex(&v), "a0");
}

#[test]
fn rfc8949_encode_map() {
    let v = Value::Map {
        entries: vec![
            MapEntry {
                key: Value::Unsigned(1),
                value: Value::Unsigned(2),
            },
            MapEntry {
                key: Value::Unsigned(3),
                value: Value::Unsigned(4),
            },
        ],
        indefinite: false,
    };
    assert_eq!(hex(&v), "a201020304");
}

#[test]
fn rfc8949_encode_map_with_str_keys() {
    let v = Value::Map {
        entries: vec![
            MapEntry {
                key: Value::from("a".to_string()),
                value: Value::Unsigned(1),
            },
            MapEntry {
                key: Value::from("b".to_string()),
                value: Value::Array {
                    items: vec![Value::Unsigned(2), Value::Unsigned(3)],
                    indefinite: false,
                },
            },
        ],
        indefinite: false,
    };
    assert_eq!(hex(&v), "a26161016162820203");
}

#[test]
fn rfc8949_encode_sequence_concatenates_top_level_items() {
    let items = vec![Value::Unsigned(1), Value::from("a".to_string())];
    let bytes = encode_sequence(&items, &EncodeOptions::default()).unwrap();
    assert_eq!(to_hex(&bytes), "016161");
}
