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
/// # diag - CBOR diagnostic notation (RFC 8949 §8)
///
/// Renders a decoded [`Value`] the way `cbor.me` and similar tools do: `tag(data)` for tagged
/// items, natural-language numbers and floats (`Infinity`/`-Infinity`/`NaN` for the non-finite
/// cases), `"double-quoted"` text strings, `h'hex'` byte strings, `[...]`/`{...}` for arrays and
/// maps, and `_` suffixed on an indefinite-length collection's opening bracket.
use crate::value::Value;
use std::fmt::Write as _;

/// Render `value` as a single line of CBOR diagnostic notation.
pub fn to_diagnostic(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Unsigned(n) => {
            let _ = write!(out, "{n}");
        }
        Value::UnsignedBig(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Negative(n) => {
            let _ = write!(out, "{n}");
        }
        Value::NegativeBig(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Bytes { value, .. } => write_bytes(value, out),
        Value::Text { value, .. } => write_text(value, out),
        Value::Array { items, indefinite } => write_array(items, *indefinite, out),
        Value::Map { entries, indefinite } => write_map(entries, *indefinite, out),
        Value::Tagged { tag, inner } => {
            let _ = write!(out, "{tag}(");
            write_value(inner, out);
            out.push(')');
        }
        Value::Simple(v) => {
            let _ = write!(out, "simple({v})");
        }
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => out.push_str("null"),
        Value::Undefined => out.push_str("undefined"),
        Value::Float(f) => write_float(f.value, out),
        Value::PlutusConstr { index, fields, .. } => {
            let _ = write!(out, "_{index}(");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(field, out);
            }
            out.push(')');
        }
    }
}

fn write_float(v: f64, out: &mut String) {
    if v.is_nan() {
        out.push_str("NaN");
    } else if v == f64::INFINITY {
        out.push_str("Infinity");
    } else if v == f64::NEG_INFINITY {
        out.push_str("-Infinity");
    } else if v == 0.0 && v.is_sign_negative() {
        out.push_str("-0.0");
    } else {
        let start = out.len();
        let _ = write!(out, "{v}");
        if !out[start..].contains('.') {
            out.push_str(".0");
        }
    }
}

fn write_bytes(bytes: &[u8], out: &mut String) {
    out.push_str("h'");
    out.push_str(&crate::hex::bytes_to_hex(bytes));
    out.push('\'');
}

fn write_text(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn write_array(items: &[Value], indefinite: bool, out: &mut String) {
    out.push_str(if indefinite { "[_ " } else { "[" });
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_value(item, out);
    }
    out.push(']');
}

fn write_map(entries: &[crate::value::MapEntry], indefinite: bool, out: &mut String) {
    out.push_str(if indefinite { "{_ " } else { "{" });
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_value(&entry.key, out);
        out.push_str(": ");
        write_value(&entry.value, out);
    }
    out.push('}');
}
