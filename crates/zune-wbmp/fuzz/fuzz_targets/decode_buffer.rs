/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![no_main]

use libfuzzer_sys::fuzz_target;
use zune_core::bytestream::ZCursor;

fuzz_target!(|data: &[u8]| {
    let mut decoder = zune_wbmp::WbmpDecoder::new(ZCursor::new(data));
    if let Ok(image) = decoder.decode() {
        // sampling must never panic even when the data is short
        let _ = image.color_at(image.width().saturating_sub(1), image.height().saturating_sub(1));
        if image.width().saturating_mul(image.height()) < (1 << 20) {
            let _ = image.expand_to_luma();
        }
    }
});
