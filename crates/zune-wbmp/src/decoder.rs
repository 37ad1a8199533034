/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use zune_core::bit_depth::BitDepth;
use zune_core::bytestream::{ZByteReaderTrait, ZCursor, ZReader};
use zune_core::colorspace::ColorSpace;
use zune_core::log::{trace, warn};
use zune_core::options::DecoderOptions;

use crate::header::parse_header;
use crate::utils::padding_mask;
use crate::{WbmpDecoderErrors, WbmpHeader, WbmpImage};

/// Probe some bytes to see if they look like a WBMP image
///
/// WBMP has no magic bytes, so this is a heuristic. It accepts
/// type 0 images with a zero fixed header, non-zero dimensions
/// and enough pixel bytes to cover the whole image.
pub fn probe_wbmp(bytes: &[u8]) -> bool {
    let mut stream = ZReader::new(ZCursor::new(bytes));

    let Ok(header) = parse_header(&mut stream) else {
        return false;
    };
    if header.type_field != 0 || header.fixed_header != 0 {
        return false;
    }
    if header.width == 0 || header.height == 0 {
        return false;
    }
    match header.expected_data_size() {
        Some(size) => bytes.len() - header.header_size >= size,
        None => false
    }
}

/// A WBMP decoder
///
/// # Usage
/// ## Reading dimensions only
/// ```
/// use zune_core::bytestream::ZCursor;
/// use zune_wbmp::WbmpDecoder;
///
/// fn main() -> Result<(), zune_wbmp::WbmpDecoderErrors> {
///     // type 0, fixed header 0, width 10, height 20
///     let source = ZCursor::new([0x00, 0x00, 0x0A, 0x14]);
///     let mut decoder = WbmpDecoder::new(source);
///     decoder.decode_headers()?;
///     // headers were decoded, unwrap won't panic
///     assert_eq!(decoder.dimensions().unwrap(), (10, 20));
///     Ok(())
/// }
/// ```
///
/// ## Decoding the image
/// ```
/// use zune_core::bytestream::ZCursor;
/// use zune_wbmp::{WbmpColor, WbmpDecoder};
///
/// fn main() -> Result<(), zune_wbmp::WbmpDecoderErrors> {
///     // a 1x1 white image
///     let source = ZCursor::new([0x00, 0x00, 0x01, 0x01, 0x80]);
///     let image = WbmpDecoder::new(source).decode()?;
///     assert_eq!(image.color_at(0, 0)?, WbmpColor::White);
///     Ok(())
/// }
/// ```
pub struct WbmpDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:  ZReader<T>,
    options: DecoderOptions,
    header:  Option<WbmpHeader>
}

impl<T> WbmpDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new decoder with default limits and strict mode off
    ///
    /// [`DecoderOptions::default`] turns strict mode on, use
    /// [`new_with_options`](Self::new_with_options) to validate pixel data.
    pub fn new(data: T) -> WbmpDecoder<T> {
        WbmpDecoder::new_with_options(data, lenient_options())
    }

    /// Create a new decoder that obeys the limits and strictness
    /// set in `options`
    ///
    /// # Example
    /// ```
    /// use zune_core::bytestream::ZCursor;
    /// use zune_core::options::DecoderOptions;
    /// use zune_wbmp::WbmpDecoder;
    /// // only decode images less than 100 in both width and height
    /// let options = DecoderOptions::default()
    ///     .set_max_width(100)
    ///     .set_max_height(100);
    /// let decoder = WbmpDecoder::new_with_options(ZCursor::new([]), options);
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> WbmpDecoder<T> {
        WbmpDecoder {
            stream: ZReader::new(data),
            options,
            header: None
        }
    }

    /// Decode the header, storing it in the decoder
    ///
    /// Only the header bytes are consumed from the stream. Calling this
    /// again after a successful decode does nothing.
    pub fn decode_headers(&mut self) -> Result<(), WbmpDecoderErrors> {
        if self.header.is_some() {
            return Ok(());
        }
        let header = parse_header(&mut self.stream)?;

        if header.width > self.options.max_width() {
            return Err(WbmpDecoderErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                header.width
            ));
        }
        if header.height > self.options.max_height() {
            return Err(WbmpDecoderErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                header.height
            ));
        }
        if header.type_field != 0 {
            if self.options.strict_mode() {
                return Err(WbmpDecoderErrors::UnsupportedType(header.type_field));
            }
            warn!(
                "Unknown WBMP type {}, decoding as type 0",
                header.type_field
            );
        }
        self.header = Some(header);

        Ok(())
    }

    /// Decode the image
    ///
    /// The header is parsed if it wasn't already, then every byte left in the
    /// stream is taken as pixel data.
    ///
    /// In strict mode the pixel data must cover the whole image and padding
    /// bits must be zero. Otherwise short data is accepted and reported when
    /// a missing pixel is accessed.
    pub fn decode(&mut self) -> Result<WbmpImage, WbmpDecoderErrors> {
        self.decode_headers()?;
        let header = self.header.ok_or(WbmpDecoderErrors::UnexpectedEof("header"))?;

        let mut data = Vec::new();
        self.stream.read_all(&mut data)?;

        trace!("Pixel data: {} bytes", data.len());

        let required = header
            .expected_data_size()
            .ok_or(WbmpDecoderErrors::OverFlowOccurred)?;

        if data.len() < required {
            if self.options.strict_mode() {
                return Err(WbmpDecoderErrors::InsufficientData(required, data.len()));
            }
            warn!(
                "Pixel data too short, expected {} bytes but found {}",
                required,
                data.len()
            );
        } else if data.len() > required {
            trace!("Ignoring {} trailing bytes", data.len() - required);
        }

        if self.options.strict_mode() {
            check_padding(&header, &data)?;
        }
        trace!("Finished decoding image");

        Ok(WbmpImage::new(header, data))
    }

    /// Return the width and height of the image
    ///
    /// Returns `None` if the header hasn't been decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        match &self.header {
            Some(header) => Some((header.width, header.height)),
            None => None
        }
    }

    /// Return the decoded header or `None` if it hasn't been decoded
    pub const fn header(&self) -> Option<&WbmpHeader> {
        self.header.as_ref()
    }

    /// Number of bytes needed to hold the image expanded to one byte per pixel
    pub fn output_buffer_size(&self) -> Option<usize> {
        let (width, height) = self.dimensions()?;
        width.checked_mul(height)
    }

    /// Colorspace of expanded pixels, always [`ColorSpace::Luma`]
    pub const fn colorspace(&self) -> ColorSpace {
        ColorSpace::Luma
    }

    /// Bit depth of expanded pixels, always [`BitDepth::Eight`]
    pub const fn depth(&self) -> BitDepth {
        BitDepth::Eight
    }

    pub const fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Destroy the decoder returning the source it was reading from
    ///
    /// After [`decode_headers`](Self::decode_headers) the source is positioned
    /// right after the header.
    pub fn into_inner(self) -> T {
        self.stream.consume()
    }
}

/// Default limits with strict mode turned off
pub(crate) fn lenient_options() -> DecoderOptions {
    DecoderOptions::default().set_strict_mode(false)
}

fn check_padding(header: &WbmpHeader, data: &[u8]) -> Result<(), WbmpDecoderErrors> {
    let mask = padding_mask(header.width);

    if mask == 0 {
        return Ok(());
    }
    let stride = header.row_stride();

    for (row, bytes) in data.chunks_exact(stride).take(header.height).enumerate() {
        if bytes[stride - 1] & mask != 0 {
            return Err(WbmpDecoderErrors::NonZeroPadding(row));
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
mod std_io {
    use std::io::{BufReader, Read, Seek, SeekFrom};

    use zune_core::bytestream::ZByteIoError;
    use zune_core::options::DecoderOptions;

    use crate::decoder::lenient_options;
    use crate::{WbmpDecoder, WbmpDecoderErrors, WbmpImage};

    /// Decode a WBMP image from a reader
    ///
    /// The reader is wrapped in a [`BufReader`] and read to the end.
    /// Strict mode is off, pixel data is not validated.
    ///
    /// zune-core only reads from a `BufReader` over a seekable source. Pipes
    /// and sockets must be read into memory first and decoded through
    /// [`ZCursor`](zune_core::bytestream::ZCursor) with [`WbmpDecoder`].
    pub fn decode<R: Read + Seek>(reader: R) -> Result<WbmpImage, WbmpDecoderErrors> {
        decode_with_options(reader, lenient_options())
    }

    pub fn decode_with_options<R: Read + Seek>(
        reader: R, options: DecoderOptions
    ) -> Result<WbmpImage, WbmpDecoderErrors> {
        WbmpDecoder::new_with_options(BufReader::new(reader), options).decode()
    }

    /// Read only the width and height of a WBMP image
    ///
    /// On success `reader` is left positioned on the first byte after the
    /// header, no pixel data is consumed. On failure it is left after the
    /// bytes the header parser read.
    ///
    /// Like [`decode`], this needs a seekable reader.
    pub fn decode_dimensions<R: Read + Seek>(
        reader: &mut R
    ) -> Result<(usize, usize), WbmpDecoderErrors> {
        decode_dimensions_with_options(reader, lenient_options())
    }

    pub fn decode_dimensions_with_options<R: Read + Seek>(
        reader: &mut R, options: DecoderOptions
    ) -> Result<(usize, usize), WbmpDecoderErrors> {
        let mut decoder = WbmpDecoder::new_with_options(BufReader::new(reader), options);
        let result = decoder.decode_headers();
        let dimensions = decoder.dimensions();

        // give back what the buffer read ahead, even if the header was rejected
        let mut buffered = decoder.into_inner();
        buffered
            .seek(SeekFrom::Current(0))
            .map_err(ZByteIoError::from)?;

        result?;
        dimensions.ok_or(WbmpDecoderErrors::UnexpectedEof("header"))
    }
}

#[cfg(feature = "std")]
pub use std_io::*;
