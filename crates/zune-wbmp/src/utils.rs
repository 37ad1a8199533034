/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZByteReaderTrait, ZReader};

use crate::WbmpDecoderErrors;

/// Number of bytes one row of `width` pixels occupies,
/// including padding bits at the end of the row
#[inline]
pub const fn row_stride(width: usize) -> usize {
    width.div_ceil(8)
}

/// Read a WBMP multi-byte integer.
///
/// Each byte carries 7 bits of the value, most significant group first,
/// the top bit of a byte is set when another byte follows.
///
/// This is not LEB128, groups come in big endian order.
///
/// Returns the value and the number of bytes it occupied.
pub(crate) fn read_multi_byte_int<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, field: &'static str
) -> Result<(u64, usize), WbmpDecoderErrors> {
    let mut value: u64 = 0;
    let mut consumed = 0;

    loop {
        if stream.eof()? {
            return Err(WbmpDecoderErrors::UnexpectedEof(field));
        }
        let byte = stream.read_u8_err()?;
        consumed += 1;

        if value > (u64::MAX >> 7) {
            return Err(WbmpDecoderErrors::OverflowingInteger(field));
        }
        value = (value << 7) | u64::from(byte & 0x7F);

        if byte & 0x80 == 0 {
            return Ok((value, consumed));
        }
    }
}

/// Expand one packed row into one byte per pixel.
///
/// `out` holds exactly one row, any bits of `input` past `out.len()`
/// are padding and are ignored.
pub(crate) fn expand_row_to_luma(input: &[u8], out: &mut [u8]) {
    let mut in_iter = input.iter();
    let mut out_iter = out.chunks_exact_mut(8);

    // `out_iter` must come before `in_iter` so that `in_iter` is not advanced
    // when `out_iter` is less than 8 bytes long
    (&mut out_iter)
        .zip(&mut in_iter)
        .for_each(|(out_vals, in_val)| {
            for (pos, out_val) in out_vals.iter_mut().enumerate() {
                *out_val = 0xFF * ((in_val >> (7 - pos)) & 0x01);
            }
        });

    // partial byte at the end of a row whose width is not a multiple of 8
    if let Some(in_val) = in_iter.next() {
        let remainder_iter = out_iter.into_remainder().iter_mut();
        remainder_iter.enumerate().for_each(|(pos, out_val)| {
            *out_val = 0xFF * ((in_val >> (7 - pos)) & 0x01);
        });
    }
}

/// Mask selecting the unused low bits of the last byte in a row,
/// zero when the width is a multiple of 8
#[inline]
pub(crate) const fn padding_mask(width: usize) -> u8 {
    let used = width % 8;
    if used == 0 {
        0
    } else {
        0xFF >> used
    }
}
