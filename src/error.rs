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
 * plutus_cbor error API
 **************************************************************************************************/
use std::fmt;
use std::result;
use thiserror::Error;

/// An alias for `Result<T, CborError>` used throughout this crate.
pub type Result<T> = result::Result<T, CborError>;

/// The abstract kind of failure, independent of where in the input it occurred.
///
/// Every variant maps onto a single row of the wire-format or resource-limit contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CborErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid hex text")]
    InvalidHex,
    #[error("reserved additional-info value")]
    Reserved,
    #[error("unexpected break byte")]
    UnexpectedBreak,
    #[error("indefinite-length item is missing its break byte")]
    MissingBreak,
    #[error("indefinite-length chunk nested inside another indefinite-length chunk")]
    NestedIndefinite,
    #[error("indefinite-length framing is not allowed by the current options")]
    IndefiniteDisallowed,
    #[error("recursion depth exceeded the configured limit")]
    DepthExceeded,
    #[error("array length exceeded the configured limit")]
    ArrayTooLarge,
    #[error("map size exceeded the configured limit")]
    MapTooLarge,
    #[error("decoded output size exceeded the configured limit")]
    OutputTooLarge,
    #[error("bignum payload exceeded the configured byte limit")]
    BignumTooLarge,
    #[error("byte or text string exceeded the configured length limit")]
    StringTooLong,
    #[error("decode exceeded the configured wall-clock timeout")]
    Timeout,
    #[error("text string is not valid UTF-8")]
    InvalidUtf8,
    #[error("simple value encoded with ai=24 but value is less than 32")]
    OverlongSimple,
    #[error("map keys are not in canonical length-lexicographic order")]
    NonCanonicalKeyOrder,
    #[error("duplicate map key")]
    DuplicateKey,
    #[error("integer was not encoded using the minimal-length form")]
    NonCanonicalInteger,
    #[error("float was not encoded using the minimal-width form")]
    NonMinimalFloat,
    #[error("NaN was not encoded using the canonical binary16 bit pattern")]
    NonCanonicalNaN,
    #[error("break byte encountered between a map key and its value")]
    BreakInsideMapPair,
    #[error("tag {0} is not recognized and strict_tags is enabled")]
    UnknownTag(u64),
    #[error("tag {0} inner value did not match the required shape")]
    TagShapeMismatch(u64),
    #[error("Plutus Data constructor did not match the required shape")]
    PlutusShapeMismatch,
    #[error("value cannot be represented in CBOR by the encoder")]
    EncodingUnsupportedValue,
}

impl CborErrorKind {
    fn name(&self) -> &'static str {
        use CborErrorKind::*;
        match self {
            UnexpectedEof => "UnexpectedEof",
            InvalidHex => "InvalidHex",
            Reserved => "Reserved",
            UnexpectedBreak => "UnexpectedBreak",
            MissingBreak => "MissingBreak",
            NestedIndefinite => "NestedIndefinite",
            IndefiniteDisallowed => "IndefiniteDisallowed",
            DepthExceeded => "DepthExceeded",
            ArrayTooLarge => "ArrayTooLarge",
            MapTooLarge => "MapTooLarge",
            OutputTooLarge => "OutputTooLarge",
            BignumTooLarge => "BignumTooLarge",
            StringTooLong => "StringTooLong",
            Timeout => "Timeout",
            InvalidUtf8 => "InvalidUtf8",
            OverlongSimple => "OverlongSimple",
            NonCanonicalKeyOrder => "NonCanonicalKeyOrder",
            DuplicateKey => "DuplicateKey",
            NonCanonicalInteger => "NonCanonicalInteger",
            NonMinimalFloat => "NonMinimalFloat",
            NonCanonicalNaN => "NonCanonicalNaN",
            BreakInsideMapPair => "BreakInsideMapPair",
            UnknownTag(_) => "UnknownTag",
            TagShapeMismatch(_) => "TagShapeMismatch",
            PlutusShapeMismatch => "PlutusShapeMismatch",
            EncodingUnsupportedValue => "EncodingUnsupportedValue",
        }
    }
}

/// An error produced by the decoder or encoder, carrying enough context to pin it to an exact
/// location in the input.
///
/// `path` uses the same notation as a [`crate::source_map::SourceMapEntry`] path: `""` for the
/// root value, `[i]` for array children, `.k` for text-string map keys, `[<diag>]` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CborError {
    pub kind: CborErrorKind,
    pub offset: usize,
    pub path: String,
}

impl CborError {
    pub fn new(kind: CborErrorKind, offset: usize, path: impl Into<String>) -> Self {
        CborError {
            kind,
            offset,
            path: path.into(),
        }
    }

    /// Construct an error with an empty (root) path. Convenience for call sites that have not
    /// yet entered a collection.
    pub fn at(kind: CborErrorKind, offset: usize) -> Self {
        CborError::new(kind, offset, "")
    }

    /// Re-point an error at a path built by an enclosing collection or tag, leaving the
    /// originally-recorded offset and kind untouched.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        if self.path.is_empty() {
            self.path = path.into();
        }
        self
    }
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at offset {} (path {:?}): {}",
            self.kind.name(),
            self.offset,
            self.path,
            self.kind
        )
    }
}

impl std::error::Error for CborError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
