/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::{read, write};
use std::io::{Cursor, Read, Seek, SeekFrom};

use zune_core::bytestream::ZCursor;
use zune_core::options::DecoderOptions;
use zune_wbmp::{
    decode, decode_dimensions, decode_dimensions_with_options, decode_with_options, ImageView,
    WbmpColor, WbmpDecoder, WbmpDecoderErrors
};

/// Build a type 0 image from rows of pixels, `true` is white
fn encode_rows(rows: &[Vec<bool>]) -> Vec<u8> {
    let width = rows.first().map_or(0, |r| r.len());
    let mut out = vec![0x00, 0x00];
    out.extend(encode_int(width as u64));
    out.extend(encode_int(rows.len() as u64));

    for row in rows {
        for chunk in row.chunks(8) {
            let mut byte = 0_u8;
            for (pos, white) in chunk.iter().enumerate() {
                if *white {
                    byte |= 0x80 >> pos;
                }
            }
            out.push(byte);
        }
    }
    out
}

fn encode_int(mut value: u64) -> Vec<u8> {
    let mut groups = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value != 0 {
        groups.push(((value & 0x7F) as u8) | 0x80);
        value >>= 7;
    }
    groups.reverse();
    groups
}

#[test]
fn decode_checkerboard() {
    let even: Vec<bool> = (0..11).map(|x| x % 2 == 0).collect();
    let odd: Vec<bool> = (0..11).map(|x| x % 2 == 1).collect();
    let bytes = encode_rows(&[even.clone(), odd, even]);

    let image = decode(Cursor::new(bytes)).unwrap();

    assert_eq!(image.width(), 11);
    assert_eq!(image.height(), 3);
    assert_eq!(image.row_stride(), 2);

    for y in 0..3 {
        for x in 0..11 {
            let expected = if (x + y) % 2 == 0 {
                WbmpColor::White
            } else {
                WbmpColor::Black
            };
            assert_eq!(image.color_at(x, y).unwrap(), expected, "pixel ({x},{y})");
        }
    }
}

#[test]
fn decode_large_dimensions() {
    // 200 wide needs a two byte width
    let row: Vec<bool> = (0..200).map(|x| x >= 192).collect();
    let bytes = encode_rows(&[row.clone(), row]);
    assert_eq!(&bytes[..5], &[0x00, 0x00, 0x81, 0x48, 0x02]);

    let image = decode(Cursor::new(bytes)).unwrap();

    assert_eq!(image.header().header_size(), 5);
    assert_eq!(image.data().len(), 50);
    assert_eq!(image.color_at(191, 1).unwrap(), WbmpColor::Black);
    assert_eq!(image.color_at(192, 1).unwrap(), WbmpColor::White);
    assert_eq!(image.luma_at(199, 0), Some(255));
}

#[test]
fn dimensions_do_not_consume_pixel_data() {
    let mut bytes = vec![0x00, 0x00, 0x0A, 0x14];
    bytes.extend(vec![0xAB; 40]);

    let mut cursor = Cursor::new(bytes);
    assert_eq!(decode_dimensions(&mut cursor).unwrap(), (10, 20));
    assert_eq!(cursor.position(), 4);

    let mut rest = Vec::new();
    cursor.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, vec![0xAB; 40]);
}

#[test]
fn dimensions_from_middle_of_stream() {
    let mut bytes = b"junk".to_vec();
    bytes.extend([0x00, 0x00, 0x83, 0x00, 0x05]);
    bytes.extend([0; 16]);

    let mut cursor = Cursor::new(bytes);
    cursor.seek(SeekFrom::Start(4)).unwrap();

    assert_eq!(decode_dimensions(&mut cursor).unwrap(), (384, 5));
    assert_eq!(cursor.position(), 9);
}

#[test]
fn truncated_header_fails_both_entrypoints() {
    // type and fixed header only
    let bytes = vec![0x00, 0x00];

    assert!(matches!(
        decode(Cursor::new(bytes.clone())),
        Err(WbmpDecoderErrors::UnexpectedEof("width"))
    ));
    assert!(matches!(
        decode_dimensions(&mut Cursor::new(bytes)),
        Err(WbmpDecoderErrors::UnexpectedEof("width"))
    ));
    // width present, height continues past the end
    assert!(matches!(
        decode(Cursor::new(vec![0x00, 0x00, 0x01, 0x81])),
        Err(WbmpDecoderErrors::UnexpectedEof("height"))
    ));
    assert!(matches!(
        decode(Cursor::new(Vec::new())),
        Err(WbmpDecoderErrors::UnexpectedEof("type field"))
    ));
}

#[test]
fn short_pixel_data() {
    // 16x2 needs 4 bytes
    let bytes = vec![0x00, 0x00, 0x10, 0x02, 0xFF, 0xFF, 0x00];

    let image = decode(Cursor::new(bytes.clone())).unwrap();
    assert_eq!(image.color_at(15, 0).unwrap(), WbmpColor::White);
    assert_eq!(image.color_at(7, 1).unwrap(), WbmpColor::Black);
    assert!(matches!(
        image.color_at(8, 1),
        Err(WbmpDecoderErrors::InsufficientData(4, 3))
    ));

    let strict = DecoderOptions::default().set_strict_mode(true);
    assert!(matches!(
        decode_with_options(Cursor::new(bytes), strict),
        Err(WbmpDecoderErrors::InsufficientData(4, 3))
    ));
}

#[test]
fn options_limit_dimensions() {
    let bytes = vec![0x00, 0x00, 0x81, 0x00, 0x01];
    let options = DecoderOptions::default().set_max_width(127);

    assert!(matches!(
        decode_dimensions_with_options(&mut Cursor::new(bytes), options),
        Err(WbmpDecoderErrors::TooLargeDimensions("width", 127, 128))
    ));
}

#[test]
fn rejected_dimensions_do_not_consume_pixel_data() {
    let mut bytes = vec![0x00, 0x00, 0x81, 0x00, 0x01];
    bytes.extend(vec![0; 20000]);
    let options = DecoderOptions::default().set_max_width(127);

    let mut cursor = Cursor::new(bytes);
    assert!(matches!(
        decode_dimensions_with_options(&mut cursor, options),
        Err(WbmpDecoderErrors::TooLargeDimensions("width", 127, 128))
    ));
    assert_eq!(cursor.position(), 5);
}

#[test]
fn zcursor_and_reader_agree() {
    let row: Vec<bool> = (0..13).map(|x| x % 3 == 0).collect();
    let bytes = encode_rows(&vec![row; 4]);

    let from_reader = decode(Cursor::new(bytes.clone())).unwrap();
    let from_memory = WbmpDecoder::new(ZCursor::new(bytes)).decode().unwrap();

    assert_eq!(from_reader, from_memory);
    assert_eq!(
        from_reader.expand_to_luma().unwrap(),
        from_memory.expand_to_luma().unwrap()
    );
}

/// Serves `data`, then fails every read after it
struct FailingReader {
    data:     Vec<u8>,
    position: usize
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.position >= self.data.len() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "device went away"
            ));
        }
        let count = buf.len().min(self.data.len() - self.position);
        buf[..count].copy_from_slice(&self.data[self.position..self.position + count]);
        self.position += count;
        Ok(count)
    }
}

impl Seek for FailingReader {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        let new = match pos {
            SeekFrom::Start(p) => p as i64,
            SeekFrom::Current(p) => self.position as i64 + p,
            SeekFrom::End(p) => self.data.len() as i64 + p
        };
        self.position = new as usize;
        Ok(new as u64)
    }
}

#[test]
fn io_failure_while_reading_pixels() {
    let reader = FailingReader {
        data:     vec![0x00, 0x00, 0x08, 0x04, 0xFF],
        position: 0
    };
    assert!(matches!(decode(reader), Err(WbmpDecoderErrors::IoErrors(_))));
}

#[test]
fn decode_from_file() {
    let path = std::env::temp_dir().join(format!("zune-wbmp-{}.wbmp", std::process::id()));
    let bytes = encode_rows(&[vec![true, false, true], vec![false, true, false]]);
    write(&path, &bytes).unwrap();

    let image = decode(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(read(&path).unwrap(), bytes);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(image.expand_to_luma().unwrap(), [255, 0, 255, 0, 255, 0]);
}
