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
 * plutus_cbor tag dispatch: standard tags (RFC 8949 §3.4) and Cardano Plutus Data constructors
 **************************************************************************************************/
use crate::constants::tag::*;
use crate::error::{CborError, CborErrorKind, Result};
use crate::limits::LimitsAccountant;
use crate::value::Value;
use num_bigint::{BigInt, BigUint, Sign};

/// Interpret the `tag`-wrapped `inner` value, applying the tag-specific shape rules of §4.6 and
/// returning either a dedicated `Value` variant (bignum, Plutus constructor) or an opaque
/// `Value::Tagged` passthrough.
///
/// Arrays and maps found inside `inner` have already gone through the ordinary limit-aware
/// collection parser by the time they reach here; this function only validates *shape*, never
/// re-parses bytes.
pub fn dispatch(
    tag: u64,
    inner: Value,
    offset: usize,
    accountant: &LimitsAccountant,
) -> Result<Value> {
    match tag {
        DATE_TIME => {
            require_text(&inner, tag, offset)?;
            #[cfg(feature = "chrono")]
            validate_rfc3339(&inner, tag, offset)?;
            Ok(Value::Tagged {
                tag,
                inner: Box::new(inner),
            })
        }
        EPOCH => {
            if !matches!(inner, Value::Unsigned(_) | Value::Negative(_) | Value::Float(_)) {
                return Err(CborError::at(CborErrorKind::TagShapeMismatch(tag), offset));
            }
            Ok(Value::Tagged {
                tag,
                inner: Box::new(inner),
            })
        }
        POS_BIGNUM | NEG_BIGNUM => decode_bignum(tag, inner, offset, accountant),
        DECIMAL_FRACTION | BIGFLOAT => {
            require_fraction_shape(&inner, tag, offset)?;
            Ok(Value::Tagged {
                tag,
                inner: Box::new(inner),
            })
        }
        URI | BASE64URL | BASE64 | REGEX | MIME => {
            require_text(&inner, tag, offset)?;
            Ok(Value::Tagged {
                tag,
                inner: Box::new(inner),
            })
        }
        SET => {
            require_set_shape(&inner, tag, offset)?;
            Ok(Value::Tagged {
                tag,
                inner: Box::new(inner),
            })
        }
        PLUTUS_CONSTR_GENERAL => decode_plutus_general(inner, offset),
        t if is_plutus_constr(t) => decode_plutus_compact(t, inner, offset),
        _ => Ok(Value::Tagged {
            tag,
            inner: Box::new(inner),
        }),
    }
}

/// Tag 0 (RFC 8949 §3.4.1): the inner text must parse as an RFC 3339 date-time. Gated behind the
/// `chrono` feature, mirroring the teacher's own `encode_date_time`/`decode_date_time` gating.
#[cfg(feature = "chrono")]
fn validate_rfc3339(v: &Value, tag: u64, offset: usize) -> Result<()> {
    let text = match v {
        Value::Text { value, .. } => value,
        _ => return Err(CborError::at(CborErrorKind::TagShapeMismatch(tag), offset)),
    };
    chrono::DateTime::parse_from_rfc3339(text)
        .map(|_| ())
        .map_err(|_| CborError::at(CborErrorKind::TagShapeMismatch(tag), offset))
}

fn require_text(v: &Value, tag: u64, offset: usize) -> Result<()> {
    if matches!(v, Value::Text { .. }) {
        Ok(())
    } else {
        Err(CborError::at(CborErrorKind::TagShapeMismatch(tag), offset))
    }
}

fn require_fraction_shape(v: &Value, tag: u64, offset: usize) -> Result<()> {
    match v {
        Value::Array { items, .. } if items.len() == 2 => {
            let exponent_ok = items[0].is_unsigned() || items[0].is_negative();
            let mantissa_ok = items[1].is_unsigned() || items[1].is_negative();
            if exponent_ok && mantissa_ok {
                Ok(())
            } else {
                Err(CborError::at(CborErrorKind::TagShapeMismatch(tag), offset))
            }
        }
        _ => Err(CborError::at(CborErrorKind::TagShapeMismatch(tag), offset)),
    }
}

fn require_set_shape(v: &Value, tag: u64, offset: usize) -> Result<()> {
    let items = match v {
        Value::Array { items, .. } => items,
        _ => return Err(CborError::at(CborErrorKind::TagShapeMismatch(tag), offset)),
    };
    let mut seen: Vec<Vec<u8>> = Vec::with_capacity(items.len());
    for item in items {
        let encoded = crate::encode::encode_value(item, &crate::limits::EncodeOptions::default())?;
        if seen.iter().any(|s| s == &encoded) {
            return Err(CborError::at(CborErrorKind::DuplicateKey, offset));
        }
        seen.push(encoded);
    }
    Ok(())
}

fn decode_bignum(
    tag: u64,
    inner: Value,
    offset: usize,
    accountant: &LimitsAccountant,
) -> Result<Value> {
    let bytes = match inner {
        Value::Bytes { value, .. } => value,
        _ => return Err(CborError::at(CborErrorKind::TagShapeMismatch(tag), offset)),
    };
    accountant.check_bignum_bytes(offset, bytes.len())?;
    if tag == POS_BIGNUM {
        let magnitude = BigUint::from_bytes_be(&bytes);
        Ok(Value::UnsignedBig(magnitude))
    } else {
        let magnitude = BigInt::from_bytes_be(Sign::Plus, &bytes);
        Ok(Value::NegativeBig(-BigInt::from(1) - magnitude))
    }
}

/// Tag 102: `[constr_index:int, fields:array]`.
fn decode_plutus_general(inner: Value, offset: usize) -> Result<Value> {
    let items = match inner {
        Value::Array { items, .. } if items.len() == 2 => items,
        _ => return Err(CborError::at(CborErrorKind::PlutusShapeMismatch, offset)),
    };
    let mut iter = items.into_iter();
    let index_value = iter.next().unwrap();
    let fields_value = iter.next().unwrap();
    let index = match index_value {
        Value::Unsigned(n) => n,
        _ => return Err(CborError::at(CborErrorKind::PlutusShapeMismatch, offset)),
    };
    let fields = match fields_value {
        Value::Array { items, .. } => items,
        _ => return Err(CborError::at(CborErrorKind::PlutusShapeMismatch, offset)),
    };
    Ok(Value::PlutusConstr {
        tag: PLUTUS_CONSTR_GENERAL,
        index,
        fields,
    })
}

/// Tags 121-127 and 1280-1400: inner must be an array; the constructor index is carried by the
/// tag number itself rather than the payload.
fn decode_plutus_compact(tag: u64, inner: Value, offset: usize) -> Result<Value> {
    let index = plutus_constr_index(tag)
        .ok_or_else(|| CborError::at(CborErrorKind::PlutusShapeMismatch, offset))?;
    let fields = match inner {
        Value::Array { items, .. } => items,
        _ => return Err(CborError::at(CborErrorKind::PlutusShapeMismatch, offset)),
    };
    Ok(Value::PlutusConstr { tag, index, fields })
}

/// Re-encode a [`Value::PlutusConstr`] back to the `[index, fields]`/bare-array shape it was
/// dispatched from, for use by the encoder.
pub fn plutus_constr_wire_shape(tag: u64, index: u64, fields: Vec<Value>) -> (u64, Value) {
    if tag == PLUTUS_CONSTR_GENERAL {
        (
            tag,
            Value::Array {
                items: vec![
                    Value::Unsigned(index),
                    Value::Array {
                        items: fields,
                        indefinite: false,
                    },
                ],
                indefinite: false,
            },
        )
    } else {
        (
            tag,
            Value::Array {
                items: fields,
                indefinite: false,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::DecodeOptions;

    fn accountant() -> LimitsAccountant {
        LimitsAccountant::new(DecodeOptions::default())
    }

    #[test]
    fn dispatches_compact_plutus_constr() {
        let inner = Value::Array {
            items: vec![Value::Unsigned(1)],
            indefinite: false,
        };
        let v = dispatch(121, inner, 0, &accountant()).unwrap();
        match v {
            Value::PlutusConstr { tag, index, fields } => {
                assert_eq!(tag, 121);
                assert_eq!(index, 0);
                assert_eq!(fields.len(), 1);
            }
            _ => panic!("expected PlutusConstr"),
        }
    }

    #[test]
    fn dispatches_extended_plutus_constr() {
        let inner = Value::Array {
            items: vec![],
            indefinite: false,
        };
        let v = dispatch(1280, inner, 0, &accountant()).unwrap();
        match v {
            Value::PlutusConstr { index, .. } => assert_eq!(index, 7),
            _ => panic!("expected PlutusConstr"),
        }
    }

    #[test]
    fn general_constr_requires_two_element_array() {
        let inner = Value::Array {
            items: vec![Value::Unsigned(0)],
            indefinite: false,
        };
        let err = dispatch(102, inner, 0, &accountant()).unwrap_err();
        assert_eq!(err.kind, CborErrorKind::PlutusShapeMismatch);
    }

    #[test]
    fn positive_bignum_decodes_big_uint() {
        let inner = Value::Bytes {
            value: vec![0x01, 0x00],
            chunks: None,
        };
        let v = dispatch(POS_BIGNUM, inner, 0, &accountant()).unwrap();
        assert_eq!(v, Value::UnsignedBig(BigUint::from(256u32)));
    }

    #[test]
    fn negative_bignum_decodes_as_minus_one_minus_magnitude() {
        let inner = Value::Bytes {
            value: vec![0x01, 0x00],
            chunks: None,
        };
        let v = dispatch(NEG_BIGNUM, inner, 0, &accountant()).unwrap();
        assert_eq!(v, Value::NegativeBig(BigInt::from(-257)));
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn date_time_tag_rejects_non_rfc3339_text() {
        let inner = Value::from("not a date".to_string());
        let err = dispatch(DATE_TIME, inner, 0, &accountant()).unwrap_err();
        assert_eq!(err.kind, CborErrorKind::TagShapeMismatch(DATE_TIME));
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn date_time_tag_accepts_rfc3339_text() {
        let inner = Value::from("2013-03-21T20:04:00Z".to_string());
        let v = dispatch(DATE_TIME, inner, 0, &accountant()).unwrap();
        assert!(matches!(v, Value::Tagged { tag: 0, .. }));
    }

    #[test]
    fn unknown_tag_passes_through() {
        let v = dispatch(999, Value::Null, 0, &accountant()).unwrap();
        assert!(matches!(v, Value::Tagged { tag: 999, .. }));
    }
}
