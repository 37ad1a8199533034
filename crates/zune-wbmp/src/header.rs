/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::log::trace;

use crate::utils::{read_multi_byte_int, row_stride};
use crate::WbmpDecoderErrors;

/// Fields preceding the pixel data of a WBMP image
///
/// ```text
/// ╔═══════╤═══════════════════════════════════════════╗
/// ║ Bytes │ Description                               ║
/// ╠═══════╪═══════════════════════════════════════════╣
/// ║ 1+    │ Type, multi-byte integer                  ║
/// ╟───────┼───────────────────────────────────────────╢
/// ║ 1     │ Fixed header field                        ║
/// ╟───────┼───────────────────────────────────────────╢
/// ║ 1+    │ Width, multi-byte integer                 ║
/// ╟───────┼───────────────────────────────────────────╢
/// ║ 1+    │ Height, multi-byte integer                ║
/// ╚═══════╧═══════════════════════════════════════════╝
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WbmpHeader {
    pub(crate) type_field:   u64,
    pub(crate) fixed_header: u8,
    pub(crate) width:        usize,
    pub(crate) height:       usize,
    pub(crate) header_size:  usize
}

impl WbmpHeader {
    /// Image type, `0` is the only type defined for uncompressed
    /// monochrome images
    pub const fn type_field(&self) -> u64 {
        self.type_field
    }
    /// The fixed header byte, stored as read
    pub const fn fixed_header(&self) -> u8 {
        self.fixed_header
    }
    pub const fn width(&self) -> usize {
        self.width
    }
    pub const fn height(&self) -> usize {
        self.height
    }
    /// Number of bytes the header occupied in the stream
    pub const fn header_size(&self) -> usize {
        self.header_size
    }
    /// Bytes per row including padding
    pub const fn row_stride(&self) -> usize {
        row_stride(self.width)
    }
    /// Number of pixel bytes a well formed image carries after the header
    ///
    /// Returns `None` if the calculation overflows
    pub const fn expected_data_size(&self) -> Option<usize> {
        self.row_stride().checked_mul(self.height)
    }
}

/// Parse a header from the current position of `stream`
///
/// Exactly the header bytes are consumed. If the stream ends
/// before all four fields are read the whole parse fails.
pub(crate) fn parse_header<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>
) -> Result<WbmpHeader, WbmpDecoderErrors> {
    let (type_field, type_size) = read_multi_byte_int(stream, "type field")?;

    if stream.eof()? {
        return Err(WbmpDecoderErrors::UnexpectedEof("fixed header field"));
    }
    let fixed_header = stream.read_u8_err()?;

    let (width, width_size) = read_multi_byte_int(stream, "width")?;
    let (height, height_size) = read_multi_byte_int(stream, "height")?;

    let width =
        usize::try_from(width).map_err(|_| WbmpDecoderErrors::OverflowingInteger("width"))?;
    let height =
        usize::try_from(height).map_err(|_| WbmpDecoderErrors::OverflowingInteger("height"))?;

    let header = WbmpHeader {
        type_field,
        fixed_header,
        width,
        height,
        header_size: type_size + 1 + width_size + height_size
    };

    trace!("Image type: {}", header.type_field);
    trace!("Fixed header: {:#04x}", header.fixed_header);
    trace!("Image width: {}", header.width);
    trace!("Image height: {}", header.height);

    Ok(header)
}

#[cfg(test)]
mod tests {
    use zune_core::bytestream::{ZCursor, ZReader};

    use super::*;

    fn parse(bytes: &[u8]) -> Result<WbmpHeader, WbmpDecoderErrors> {
        parse_header(&mut ZReader::new(ZCursor::new(bytes)))
    }

    #[test]
    fn parses_single_byte_fields() {
        let header = parse(&[0x00, 0x00, 0x0A, 0x14, 0xFF]).unwrap();

        assert_eq!(header.type_field(), 0);
        assert_eq!(header.fixed_header(), 0);
        assert_eq!(header.width(), 10);
        assert_eq!(header.height(), 20);
        assert_eq!(header.header_size(), 4);
        assert_eq!(header.row_stride(), 2);
        assert_eq!(header.expected_data_size(), Some(40));
    }

    #[test]
    fn parses_multi_byte_fields() {
        // type 1, fixed 0x42, width 300 (0x82 0x2C), height 128 (0x81 0x00)
        let header = parse(&[0x01, 0x42, 0x82, 0x2C, 0x81, 0x00]).unwrap();

        assert_eq!(header.type_field(), 1);
        assert_eq!(header.fixed_header(), 0x42);
        assert_eq!(header.width(), 300);
        assert_eq!(header.height(), 128);
        assert_eq!(header.header_size(), 6);
    }

    #[test]
    fn every_truncation_point_fails() {
        let full = [0x00, 0x00, 0x82, 0x2C, 0x81, 0x00];

        let expected = [
            "type field",
            "fixed header field",
            "width",
            "width",
            "height",
            "height"
        ];
        for (len, field) in expected.iter().enumerate() {
            match parse(&full[..len]) {
                Err(WbmpDecoderErrors::UnexpectedEof(found)) => assert_eq!(found, *field),
                Err(e) => panic!("unexpected error {e:?} at length {len}"),
                Ok(h) => panic!("truncated header parsed as {h:?}")
            }
        }
        assert!(parse(&full).is_ok());
    }
}
