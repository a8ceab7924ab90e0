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
 * plutus_cbor resource limits & decode/encode options
 **************************************************************************************************/
use crate::constants::default_limits as defaults;
use crate::error::{CborError, CborErrorKind, Result};
use std::time::{Duration, Instant};

/// Decoder configuration: resource ceilings plus the strictness flags that select canonical-mode
/// validation.
///
/// Every field here has a matching row in the accountant's bookkeeping; none of them are
/// advisory. `Default` matches the defaults a caller gets with no configuration at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_depth: usize,
    pub max_array_length: usize,
    pub max_map_size: usize,
    pub max_byte_string_length: usize,
    pub max_text_string_length: usize,
    pub max_bignum_bytes: usize,
    pub max_output_size: usize,
    pub timeout_ms: u64,
    pub allow_indefinite: bool,
    /// Reject text strings that are not valid UTF-8 instead of best-effort decoding them.
    pub strict_utf8: bool,
    /// Reject tags outside the recognized table instead of passing them through as `Tagged`.
    pub strict_tags: bool,
    /// Enforce RFC 8949 §4.2.1 deterministic-encoding rules during decode.
    pub validate_canonical: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: defaults::MAX_DEPTH,
            max_array_length: defaults::MAX_ARRAY_LENGTH,
            max_map_size: defaults::MAX_MAP_SIZE,
            max_byte_string_length: defaults::MAX_BYTE_STRING_LENGTH,
            max_text_string_length: defaults::MAX_TEXT_STRING_LENGTH,
            max_bignum_bytes: defaults::MAX_BIGNUM_BYTES,
            max_output_size: defaults::MAX_OUTPUT_SIZE,
            timeout_ms: defaults::TIMEOUT_MS,
            allow_indefinite: true,
            strict_utf8: true,
            strict_tags: false,
            validate_canonical: false,
        }
    }
}

impl DecodeOptions {
    /// Options matching RFC 8949 §4.2.1 deterministic (canonical) decoding: indefinite-length
    /// framing is rejected and every minimal-encoding/ordering rule is enforced.
    pub fn canonical() -> Self {
        DecodeOptions {
            allow_indefinite: false,
            validate_canonical: true,
            ..DecodeOptions::default()
        }
    }
}

/// Encoder configuration (§6.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub canonical: bool,
    pub prefer_shortest_float: bool,
    pub strict_utf8: bool,
    pub allow_undefined: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            canonical: true,
            prefer_shortest_float: true,
            strict_utf8: true,
            allow_undefined: true,
        }
    }
}

/// Per-call bookkeeping for the limits named in [`DecodeOptions`].
///
/// One instance is created per top-level [`crate::decode`]/[`crate::decode_with_source_map`]
/// call and threaded through every recursive parse step; it holds only a depth counter, a running
/// output-size accumulator, and a start timestamp, exactly as the surrounding design calls for.
#[derive(Debug)]
pub struct LimitsAccountant {
    opts: DecodeOptions,
    depth: usize,
    output_size: usize,
    start: Instant,
}

impl LimitsAccountant {
    pub fn new(opts: DecodeOptions) -> Self {
        LimitsAccountant {
            opts,
            depth: 0,
            output_size: 0,
            start: Instant::now(),
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.opts
    }

    /// Enter one level of recursion (array, map, or tag). Must be paired with [`Self::leave`].
    pub fn enter(&mut self, offset: usize) -> Result<()> {
        if self.depth >= self.opts.max_depth {
            return Err(CborError::at(CborErrorKind::DepthExceeded, offset));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth -= 1;
    }

    pub fn check_array_length(&self, offset: usize, n: usize) -> Result<()> {
        if n > self.opts.max_array_length {
            return Err(CborError::at(CborErrorKind::ArrayTooLarge, offset));
        }
        Ok(())
    }

    pub fn check_map_size(&self, offset: usize, n: usize) -> Result<()> {
        if n > self.opts.max_map_size {
            return Err(CborError::at(CborErrorKind::MapTooLarge, offset));
        }
        Ok(())
    }

    pub fn check_byte_string_length(&self, offset: usize, n: usize) -> Result<()> {
        if n > self.opts.max_byte_string_length {
            return Err(CborError::at(CborErrorKind::StringTooLong, offset));
        }
        Ok(())
    }

    pub fn check_text_string_length(&self, offset: usize, n: usize) -> Result<()> {
        if n > self.opts.max_text_string_length {
            return Err(CborError::at(CborErrorKind::StringTooLong, offset));
        }
        Ok(())
    }

    pub fn check_bignum_bytes(&self, offset: usize, n: usize) -> Result<()> {
        if n > self.opts.max_bignum_bytes {
            return Err(CborError::at(CborErrorKind::BignumTooLarge, offset));
        }
        Ok(())
    }

    /// Account for `n` additional bytes represented in the decoded tree, failing fast before any
    /// allocation proportional to the violating quantity is made.
    pub fn add_output(&mut self, offset: usize, n: usize) -> Result<()> {
        self.output_size = self.output_size.saturating_add(n);
        if self.output_size > self.opts.max_output_size {
            return Err(CborError::at(CborErrorKind::OutputTooLarge, offset));
        }
        Ok(())
    }

    /// Checked at the start of each collection item and each tag dispatch, per the cooperative
    /// cancellation model: there are no internal suspension points, only this poll.
    pub fn check_timeout(&self, offset: usize) -> Result<()> {
        if self.opts.timeout_ms == 0 {
            return Ok(());
        }
        if self.start.elapsed() > Duration::from_millis(self.opts.timeout_ms) {
            return Err(CborError::at(CborErrorKind::Timeout, offset));
        }
        Ok(())
    }

    pub fn require_indefinite_allowed(&self, offset: usize) -> Result<()> {
        if !self.opts.allow_indefinite {
            return Err(CborError::at(CborErrorKind::IndefiniteDisallowed, offset));
        }
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}
