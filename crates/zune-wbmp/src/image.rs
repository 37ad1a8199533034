/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::traits::ImageView;
use crate::utils::expand_row_to_luma;
use crate::{WbmpDecoderErrors, WbmpHeader};

/// Colour of a single WBMP pixel
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WbmpColor {
    Black,
    White
}

impl WbmpColor {
    /// 8-bit luma value of the colour
    pub const fn to_luma(self) -> u8 {
        match self {
            WbmpColor::Black => 0x00,
            WbmpColor::White => 0xFF
        }
    }
}

/// A decoded WBMP image
///
/// Pixels stay packed exactly as stored in the file, one bit per pixel,
/// rows starting on a byte boundary. Colours are computed when requested.
///
/// The pixel buffer may be shorter than the header implies (the decoder
/// is lenient by default), accessing pixels past the buffer returns
/// [`WbmpDecoderErrors::InsufficientData`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WbmpImage {
    header: WbmpHeader,
    data:   Vec<u8>
}

impl WbmpImage {
    /// Create an image from a header and the bytes that followed it
    pub fn new(header: WbmpHeader, data: Vec<u8>) -> WbmpImage {
        WbmpImage { header, data }
    }
    pub const fn header(&self) -> &WbmpHeader {
        &self.header
    }
    /// Raw packed pixel bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    pub const fn width(&self) -> usize {
        self.header.width
    }
    pub const fn height(&self) -> usize {
        self.header.height
    }
    pub const fn row_stride(&self) -> usize {
        self.header.row_stride()
    }

    /// Destroy the image returning the header and packed pixels
    pub fn into_parts(self) -> (WbmpHeader, Vec<u8>) {
        (self.header, self.data)
    }

    /// Return the colour of the pixel at `(x,y)`
    ///
    /// # Errors
    /// - [`OutOfBounds`](WbmpDecoderErrors::OutOfBounds): `x >= width` or `y >= height`
    /// - [`InsufficientData`](WbmpDecoderErrors::InsufficientData): the pixel
    ///   lies beyond the end of the pixel buffer
    pub fn color_at(&self, x: usize, y: usize) -> Result<WbmpColor, WbmpDecoderErrors> {
        if x >= self.width() || y >= self.height() {
            return Err(WbmpDecoderErrors::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height()
            });
        }
        let index = y
            .checked_mul(self.row_stride())
            .and_then(|row| row.checked_add(x / 8))
            .ok_or(WbmpDecoderErrors::OverFlowOccurred)?;

        let byte = match self.data.get(index) {
            Some(byte) => *byte,
            None => {
                let required = self
                    .header
                    .expected_data_size()
                    .ok_or(WbmpDecoderErrors::OverFlowOccurred)?;
                return Err(WbmpDecoderErrors::InsufficientData(
                    required,
                    self.data.len()
                ));
            }
        };

        if (byte >> (7 - x % 8)) & 1 == 1 {
            Ok(WbmpColor::White)
        } else {
            Ok(WbmpColor::Black)
        }
    }

    /// Size of the buffer needed by [`expand_into`](Self::expand_into)
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.width().checked_mul(self.height())
    }

    /// Unpack all pixels to one byte per pixel, `0xFF` for white
    /// and `0x00` for black
    pub fn expand_to_luma(&self) -> Result<Vec<u8>, WbmpDecoderErrors> {
        let size = self
            .output_buffer_size()
            .ok_or(WbmpDecoderErrors::OverFlowOccurred)?;
        self.check_data_size()?;

        let mut output = vec![0; size];

        self.expand_into(&mut output)?;

        Ok(output)
    }

    /// Unpack all pixels into `pixels`
    ///
    /// Only the first `width*height` bytes of `pixels` are written
    pub fn expand_into(&self, pixels: &mut [u8]) -> Result<(), WbmpDecoderErrors> {
        let size = self
            .output_buffer_size()
            .ok_or(WbmpDecoderErrors::OverFlowOccurred)?;

        if pixels.len() < size {
            return Err(WbmpDecoderErrors::TooSmallOutput(size, pixels.len()));
        }
        self.check_data_size()?;

        if size == 0 {
            return Ok(());
        }
        for (in_row, out_row) in self
            .data
            .chunks_exact(self.row_stride())
            .zip(pixels[..size].chunks_exact_mut(self.width()))
        {
            expand_row_to_luma(in_row, out_row);
        }
        Ok(())
    }

    /// Error if the packed buffer doesn't cover every row
    fn check_data_size(&self) -> Result<(), WbmpDecoderErrors> {
        let required = self
            .header
            .expected_data_size()
            .ok_or(WbmpDecoderErrors::OverFlowOccurred)?;

        if self.data.len() < required {
            return Err(WbmpDecoderErrors::InsufficientData(
                required,
                self.data.len()
            ));
        }
        Ok(())
    }

    /// Expand into a byte per pixel image
    pub fn to_luma_image(&self) -> Result<LumaImage, WbmpDecoderErrors> {
        Ok(LumaImage {
            width:  self.width(),
            height: self.height(),
            pixels: self.expand_to_luma()?
        })
    }
}

impl ImageView for WbmpImage {
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn colorspace(&self) -> ColorSpace {
        ColorSpace::Luma
    }

    fn depth(&self) -> BitDepth {
        BitDepth::Eight
    }

    fn luma_at(&self, x: usize, y: usize) -> Option<u8> {
        self.color_at(x, y).ok().map(WbmpColor::to_luma)
    }

    fn name(&self) -> &'static str {
        "WBMP packed"
    }
}

/// An 8-bit grayscale image with one byte per pixel
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LumaImage {
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

impl LumaImage {
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

impl ImageView for LumaImage {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn colorspace(&self) -> ColorSpace {
        ColorSpace::Luma
    }

    fn depth(&self) -> BitDepth {
        BitDepth::Eight
    }

    fn luma_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    fn name(&self) -> &'static str {
        "Luma bytes"
    }
}
