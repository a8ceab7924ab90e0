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
 * plutus_cbor byte reader & header codec
 **************************************************************************************************/
use crate::constants::*;
use crate::error::{CborError, CborErrorKind, Result};

#[cfg(feature = "trace")]
use func_trace::trace;

/// The initial-byte header of a CBOR item: major type (top 3 bits) and additional information
/// (bottom 5 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub major_type: u8,
    pub additional_info: u8,
}

impl Header {
    fn from_byte(b: u8) -> Self {
        Header {
            major_type: (b & MT_MASK) >> 5,
            additional_info: b & AI_MASK,
        }
    }
}

/// A cursor over an immutable byte slice, bounds-checking every read.
///
/// One `ByteReader` is created per top-level [`crate::decode`] call and threaded through every
/// recursive parse step; it is the sole owner of the current offset.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteReader { buf, pos: 0 }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Peek the next byte without consuming it. Used to detect a break byte at the top of an
    /// indefinite-length item without committing to a full header parse.
    pub fn peek_u8(&self) -> Result<u8> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or_else(|| CborError::at(CborErrorKind::UnexpectedEof, self.pos))
    }

    #[cfg_attr(feature = "trace", trace)]
    pub fn read_u8(&mut self) -> Result<u8> {
        let b = self.peek_u8()?;
        self.pos += 1;
        Ok(b)
    }

    /// Read `n` raw bytes, returning a slice into the original input. Used for byte/text string
    /// payloads and to capture a map key's raw encoding for duplicate-key comparison.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(CborError::at(CborErrorKind::UnexpectedEof, self.pos));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Big-endian unsigned integer of `width` bytes (1, 2, 4, or 8).
    #[cfg_attr(feature = "trace", trace)]
    pub fn read_be_uint(&mut self, width: usize) -> Result<u64> {
        let bytes = self.read_bytes(width)?;
        let mut v: u64 = 0;
        for &b in bytes {
            v = (v << 8) | b as u64;
        }
        Ok(v)
    }

    /// Slice of the input already consumed, from `start` to the current position. Used to
    /// capture the exact encoded bytes of a just-parsed item (map-key identity, source-map
    /// `value_repr`).
    pub fn consumed_since(&self, start: usize) -> &'a [u8] {
        &self.buf[start..self.pos]
    }

    /// `extract_header(b) = (b >> 5, b & 0x1F)`, plus consumption of the argument bytes named by
    /// `ai` (24/25/26/27 -> 1/2/4/8-byte follow). Returns the header and the resolved argument
    /// value (meaningless for `ai == 31`, the indefinite/break marker).
    #[cfg_attr(feature = "trace", trace)]
    pub fn read_header_and_argument(&mut self) -> Result<(Header, u64)> {
        let start = self.pos;
        let b = self.read_u8()?;
        let header = Header::from_byte(b);
        let arg = match header.additional_info {
            0..=PAYLOAD_AI_BITS => header.additional_info as u64,
            PAYLOAD_ONE_BYTE => self.read_be_uint(1)?,
            PAYLOAD_TWO_BYTES => self.read_be_uint(2)?,
            PAYLOAD_FOUR_BYTES => self.read_be_uint(4)?,
            PAYLOAD_EIGHT_BYTES => self.read_be_uint(8)?,
            28..=30 => return Err(CborError::at(CborErrorKind::Reserved, start)),
            PAYLOAD_INDEFINITE => 0,
            _ => unreachable!("additional_info is masked to 5 bits"),
        };
        Ok((header, arg))
    }
}
