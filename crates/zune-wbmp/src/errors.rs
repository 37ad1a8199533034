/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;

/// Errors that can occur when decoding or reading a WBMP image
#[non_exhaustive]
pub enum WbmpDecoderErrors {
    /// The stream ended before a header field was completely read
    ///
    /// The argument names the field that was being read
    UnexpectedEof(&'static str),
    /// A multi-byte integer does not fit into the integer type
    /// used to store it
    OverflowingInteger(&'static str),
    /// Dimensions exceed configured limits
    ///
    /// # Arguments
    /// - dimension name
    /// - the configured limit
    /// - the value found in the header
    TooLargeDimensions(&'static str, usize, usize),
    /// The type field is not `0`, only raised in strict mode
    UnsupportedType(u64),
    /// Pixel data is shorter than the image requires
    ///
    /// # Arguments
    /// - number of bytes needed
    /// - number of bytes present
    InsufficientData(usize, usize),
    /// A pixel was requested outside the image
    OutOfBounds {
        x:      usize,
        y:      usize,
        width:  usize,
        height: usize
    },
    /// Unused bits at the end of a row are not zero, only raised in strict mode
    ///
    /// The argument is the offending row
    NonZeroPadding(usize),
    /// The output buffer is too small, expected at least
    /// a size but got another size
    TooSmallOutput(usize, usize),
    /// A size calculation overflowed
    OverFlowOccurred,
    IoErrors(ZByteIoError)
}

impl Debug for WbmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnexpectedEof(field) => {
                writeln!(f, "Unexpected end of input while reading {field}")
            }
            Self::OverflowingInteger(field) => {
                writeln!(f, "Multi-byte integer for {field} overflows")
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::UnsupportedType(type_field) => {
                writeln!(f, "Unsupported WBMP type {type_field}, only type 0 is known")
            }
            Self::InsufficientData(expected, found) => {
                writeln!(
                    f,
                    "Insufficient pixel data, required {expected} bytes but found {found}"
                )
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height
            } => {
                writeln!(
                    f,
                    "Pixel ({x},{y}) is outside of image with dimensions {width}x{height}"
                )
            }
            Self::NonZeroPadding(row) => {
                writeln!(f, "Padding bits of row {row} are not zero")
            }
            Self::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small output size, expected {expected}, but found {found}"
                )
            }
            Self::OverFlowOccurred => {
                writeln!(f, "Overflow occurred")
            }
            Self::IoErrors(err) => {
                writeln!(f, "I/O error {:?}", err)
            }
        }
    }
}

impl Display for WbmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WbmpDecoderErrors {}

impl From<ZByteIoError> for WbmpDecoderErrors {
    fn from(value: ZByteIoError) -> Self {
        WbmpDecoderErrors::IoErrors(value)
    }
}

/// Errors returned by a [`FormatRegistry`](crate::FormatRegistry)
#[non_exhaustive]
pub enum RegistryErrors {
    /// No decoder is registered under this name
    UnknownFormat(String),
    /// The WBMP decoder failed
    Wbmp(WbmpDecoderErrors)
}

impl Debug for RegistryErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownFormat(name) => {
                writeln!(f, "No decoder registered for format `{name}`")
            }
            Self::Wbmp(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for RegistryErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegistryErrors {}

impl From<WbmpDecoderErrors> for RegistryErrors {
    fn from(value: WbmpDecoderErrors) -> Self {
        RegistryErrors::Wbmp(value)
    }
}
