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
 * Encode/decode round-trip examples, including a realistic attestation-token payload.
 **************************************************************************************************/
use plutus_cbor::{decode, encode, DecodeOptions, EncodeOptions, Input, MapEntry, Value};

/// Decode a back-to-back CBOR sequence fully, returning every top-level item in order.
fn decode_sequence(mut bytes: &[u8], opts: &DecodeOptions) -> Vec<Value> {
    let mut out = Vec::new();
    while !bytes.is_empty() {
        let r = decode(Input::Bytes(bytes), opts).unwrap();
        out.push(r.value);
        bytes = &bytes[r.bytes_read..];
    }
    out
}

#[test]
fn encode_decode_round_trip_over_mixed_value_tree() {
    let nonce: Vec<u8> = vec![1, 2, 3, 4];

    let values = vec![
        Value::Unsigned(32),
        Value::Negative(-0xa5a5a5),
        Value::from("新年快乐".to_string()),
        Value::from(nonce.clone()),
        Value::Simple(17),
        Value::Simple(234),
        Value::Bool(false),
        Value::Tagged {
            tag: 37,
            inner: Box::new(Value::Unsigned(0x5a5a5a5a5a5a)),
        },
        Value::Array {
            items: vec![
                Value::from("usine à gaz".to_string()),
                Value::Unsigned(42),
                Value::Undefined,
            ],
            indefinite: false,
        },
        Value::Map {
            entries: vec![
                MapEntry {
                    key: Value::Unsigned(1),
                    value: Value::Unsigned(1023),
                },
                MapEntry {
                    key: Value::Unsigned(2),
                    value: Value::Unsigned(1025),
                },
                MapEntry {
                    key: Value::Negative(-1),
                    value: Value::Negative(-1024),
                },
            ],
            indefinite: false,
        },
    ];

    let opts = EncodeOptions {
        canonical: false,
        ..EncodeOptions::default()
    };
    let mut encoded = Vec::new();
    for v in &values {
        encoded.extend(encode(v, &opts).unwrap());
    }

    let decoded = decode_sequence(&encoded, &DecodeOptions::default());
    assert_eq!(decoded, values);
}

// An example of a token produced by a hardware attestation block. Only the nonce claim changes
// from one attestation to the next; everything else comes from fuse-programmed device identity.
//
// {
//   10:  h'948f8860d13a463e',                              / nonce /
//   256: h'0198f50a4ff6c05861c8860d13a638ea',               / UEID /
//   258: 64242,                                             / OEMID, Private Enterprise Number /
//   261: 3,                                                  / security-level: hardware /
//   262: true,                                               / secure-boot /
//   263: 3,                                                  / debug-status: disabled-permanently /
//   260: [ "3.1", 1 ]                                         / HW version, multipart numeric /
// }
const TEE_EAT_BYTES: &[u8] = &[
    167, 10, 72, 148, 143, 136, 96, 209, 58, 70, 62, 25, 1, 0, 80, 1, 152, 245, 10, 79, 246, 192,
    88, 97, 200, 134, 13, 19, 166, 56, 234, 25, 1, 2, 25, 250, 242, 25, 1, 5, 3, 25, 1, 6, 245, 25,
    1, 7, 3, 25, 1, 4, 130, 99, 51, 46, 49, 1,
];

fn tee_eat_nonce() -> Vec<u8> {
    vec![0x94, 0x8f, 0x88, 0x60, 0xd1, 0x3a, 0x46, 0x3e]
}

fn tee_eat_ueid() -> Vec<u8> {
    vec![
        0x01, 0x98, 0xf5, 0x0a, 0x4f, 0xf6, 0xc0, 0x58, 0x61, 0xc8, 0x86, 0x0d, 0x13, 0xa6, 0x38,
        0xea,
    ]
}

#[test]
fn encode_tee_eat() {
    let v = Value::Map {
        entries: vec![
            MapEntry {
                key: Value::Unsigned(10),
                value: Value::from(tee_eat_nonce()),
            },
            MapEntry {
                key: Value::Unsigned(256),
                value: Value::from(tee_eat_ueid()),
            },
            MapEntry {
                key: Value::Unsigned(258),
                value: Value::Unsigned(64242),
            },
            MapEntry {
                key: Value::Unsigned(261),
                value: Value::Unsigned(3),
            },
            MapEntry {
                key: Value::Unsigned(262),
                value: Value::Bool(true),
            },
            MapEntry {
                key: Value::Unsigned(263),
                value: Value::Unsigned(3),
            },
            MapEntry {
                key: Value::Unsigned(260),
                value: Value::Array {
                    items: vec![Value::from("3.1".to_string()), Value::Unsigned(1)],
                    indefinite: false,
                },
            },
        ],
        indefinite: false,
    };

    let opts = EncodeOptions {
        canonical: false,
        ..EncodeOptions::default()
    };
    assert_eq!(encode(&v, &opts).unwrap(), TEE_EAT_BYTES);
}

#[test]
fn decode_tee_eat() {
    let r = decode(Input::Bytes(TEE_EAT_BYTES), &DecodeOptions::default()).unwrap();
    let entries = match r.value {
        Value::Map { entries, .. } => entries,
        other => panic!("expected a map, got {:?}", other),
    };

    let lookup = |key: u64| -> &Value {
        entries
            .iter()
            .find(|e| e.key == Value::Unsigned(key))
            .map(|e| &e.value)
            .unwrap_or_else(|| panic!("missing key {key}"))
    };

    assert_eq!(lookup(10), &Value::from(tee_eat_nonce()));
    assert_eq!(lookup(256), &Value::from(tee_eat_ueid()));
    assert_eq!(lookup(258), &Value::Unsigned(64242));
    assert_eq!(lookup(261), &Value::Unsigned(3));
    assert_eq!(lookup(262), &Value::Bool(true));
    assert_eq!(lookup(263), &Value::Unsigned(3));
    match lookup(260) {
        Value::Array { items, .. } => {
            assert_eq!(items[0], Value::from("3.1".to_string()));
            assert_eq!(items[1], Value::Unsigned(1));
        }
        other => panic!("expected an array, got {:?}", other),
    }
}
