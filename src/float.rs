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
 * plutus_cbor float conversion and canonical-width checks
 **************************************************************************************************/
use crate::constants::CANONICAL_NAN_F16_BITS;
use half::f16;

/// `true` iff `a` and `b` are the same float under `Object.is`-style equality: ordinary `==`
/// except that NaN equals NaN and `-0.0` does not equal `+0.0`.
pub fn same_value(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a.to_bits() == b.to_bits()
    }
}

pub fn is_negative_zero(v: f64) -> bool {
    v == 0.0 && v.is_sign_negative()
}

/// Decode a binary16 bit pattern into `f64`, preserving `+0/-0`, subnormals, infinities and NaN.
pub fn f16_bits_to_f64(bits: u16) -> f64 {
    f64::from(f16::from_bits(bits))
}

/// Decode a binary32 bit pattern into `f64`.
pub fn f32_bits_to_f64(bits: u32) -> f64 {
    f64::from(f32::from_bits(bits))
}

/// `true` iff `bits` is a binary16 NaN pattern other than the canonical one (RFC 8949 §4.2.2).
pub fn is_noncanonical_f16_nan(bits: u16) -> bool {
    f16::from_bits(bits).is_nan() && bits != CANONICAL_NAN_F16_BITS
}

/// `true` iff `v` is finite and round-trips losslessly through binary32, i.e. re-widening the
/// narrower encoding reproduces `v` exactly.
pub fn fits_in_f32(v: f64) -> bool {
    if !v.is_finite() {
        return false;
    }
    let narrowed = v as f32;
    same_value(narrowed as f64, v)
}

/// `true` iff `v` is finite and round-trips losslessly through binary16.
pub fn fits_in_f16(v: f64) -> bool {
    if !v.is_finite() {
        return false;
    }
    let narrowed = f16::from_f64(v);
    same_value(f64::from(narrowed), v)
}

/// Encode `v` as the shortest binary16/32/64 bit pattern that preserves `Object.is` equality,
/// always choosing the canonical NaN pattern for any NaN input.
pub fn shortest_encoding(v: f64) -> ShortestFloat {
    if v.is_nan() {
        return ShortestFloat::Binary16(CANONICAL_NAN_F16_BITS);
    }
    if fits_in_f16(v) {
        ShortestFloat::Binary16(f16::from_f64(v).to_bits())
    } else if fits_in_f32(v) {
        ShortestFloat::Binary32((v as f32).to_bits())
    } else {
        ShortestFloat::Binary64(v.to_bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortestFloat {
    Binary16(u16),
    Binary32(u32),
    Binary64(u64),
}
