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
 * plutus_cbor wire-format constants
 **************************************************************************************************/

/// Additional Information bitmask
pub const AI_MASK: u8 = 0b000_11111;
/// Major Type bitmask
pub const MT_MASK: u8 = 0b111_00000;

/// Major Type 0 (Positive integers)
pub const MT_UINT: u8 = 0b000_00000;
/// Major Type 1 (Negative integers)
pub const MT_NINT: u8 = 0b001_00000;
/// Major Type 2 (Byte Strings)
pub const MT_BSTR: u8 = 0b010_00000;
/// Major Type 3 (Text Strings)
pub const MT_TSTR: u8 = 0b011_00000;
/// Major Type 4 (Array)
pub const MT_ARRAY: u8 = 0b100_00000;
/// Major Type 5 (Map)
pub const MT_MAP: u8 = 0b101_00000;
/// Major Type 6 (Tag)
pub const MT_TAG: u8 = 0b110_00000;
/// Major Type 7 (Floats, simple types etc.)
pub const MT_SIMPLE: u8 = 0b111_00000;
pub const MT_FLOAT: u8 = 0b111_00000;

/// Maximum value of a "simple" payload mapped on AI bits
pub const PAYLOAD_AI_BITS: u8 = 23;
/// Indicates one byte of length/value information follows the MT/AI byte
pub const PAYLOAD_ONE_BYTE: u8 = 24;
/// Indicates two bytes of length/value information follow the MT/AI byte
pub const PAYLOAD_TWO_BYTES: u8 = 25;
/// Indicates four bytes of length/value information follow the MT/AI byte
pub const PAYLOAD_FOUR_BYTES: u8 = 26;
/// Indicates eight bytes of length/value information follow the MT/AI byte
pub const PAYLOAD_EIGHT_BYTES: u8 = 27;
/// Indicates indefinite-length framing (array/map/bstr/tstr) or, on a standalone MT 7 byte, the
/// "break" marker that closes an indefinite-length item.
pub const PAYLOAD_INDEFINITE: u8 = 31;
/// The byte that closes an indefinite-length item: MT 7, ai 31.
pub const BREAK_BYTE: u8 = MT_SIMPLE | PAYLOAD_INDEFINITE;

/// Simple-value codes carried directly on MT 7 / ai 20..23.
pub const SIMPLE_FALSE: u8 = 20;
pub const SIMPLE_TRUE: u8 = 21;
pub const SIMPLE_NULL: u8 = 22;
pub const SIMPLE_UNDEFINED: u8 = 23;

/// Standard tags recognized with domain-specific semantics (RFC 8949 §3.4).
pub mod tag {
    pub const DATE_TIME: u64 = 0;
    pub const EPOCH: u64 = 1;
    pub const POS_BIGNUM: u64 = 2;
    pub const NEG_BIGNUM: u64 = 3;
    pub const DECIMAL_FRACTION: u64 = 4;
    pub const BIGFLOAT: u64 = 5;
    pub const URI: u64 = 32;
    pub const BASE64URL: u64 = 33;
    pub const BASE64: u64 = 34;
    pub const REGEX: u64 = 35;
    pub const MIME: u64 = 36;
    pub const SET: u64 = 258;

    /// Plutus Data general constructor: `[constr_index, fields]`.
    pub const PLUTUS_CONSTR_GENERAL: u64 = 102;
    /// Inclusive range of tags directly encoding Plutus constructors 0..=6.
    pub const PLUTUS_CONSTR_COMPACT_LO: u64 = 121;
    pub const PLUTUS_CONSTR_COMPACT_HI: u64 = 127;
    /// Inclusive range of tags directly encoding Plutus constructors 7..=127.
    pub const PLUTUS_CONSTR_EXTENDED_LO: u64 = 1280;
    pub const PLUTUS_CONSTR_EXTENDED_HI: u64 = 1400;

    /// `true` if `t` is one of the Plutus Data constructor tags (102, 121-127, 1280-1400).
    pub fn is_plutus_constr(t: u64) -> bool {
        t == PLUTUS_CONSTR_GENERAL
            || (PLUTUS_CONSTR_COMPACT_LO..=PLUTUS_CONSTR_COMPACT_HI).contains(&t)
            || (PLUTUS_CONSTR_EXTENDED_LO..=PLUTUS_CONSTR_EXTENDED_HI).contains(&t)
    }

    /// Recover the Plutus constructor index encoded by a compact/extended constructor tag.
    /// Returns `None` for [`PLUTUS_CONSTR_GENERAL`], whose index is carried in the payload
    /// instead of the tag number.
    pub fn plutus_constr_index(t: u64) -> Option<u64> {
        if (PLUTUS_CONSTR_COMPACT_LO..=PLUTUS_CONSTR_COMPACT_HI).contains(&t) {
            Some(t - PLUTUS_CONSTR_COMPACT_LO)
        } else if (PLUTUS_CONSTR_EXTENDED_LO..=PLUTUS_CONSTR_EXTENDED_HI).contains(&t) {
            Some(t - PLUTUS_CONSTR_EXTENDED_LO + 7)
        } else {
            None
        }
    }
}

/// Canonical bit pattern for NaN encoded as binary16 (RFC 8949 §4.2.2).
pub const CANONICAL_NAN_F16_BITS: u16 = 0x7e00;

/// Default resource limits, named after the fields of [`crate::limits::DecodeLimits`] they seed.
pub mod default_limits {
    pub const MAX_DEPTH: usize = 128;
    pub const MAX_ARRAY_LENGTH: usize = 1 << 20;
    pub const MAX_MAP_SIZE: usize = 1 << 20;
    pub const MAX_BYTE_STRING_LENGTH: usize = 1 << 24;
    pub const MAX_TEXT_STRING_LENGTH: usize = 1 << 24;
    pub const MAX_BIGNUM_BYTES: usize = 1 << 16;
    pub const MAX_OUTPUT_SIZE: usize = 1 << 26;
    pub const TIMEOUT_MS: u64 = 5_000;
}
