/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A Wireless Bitmap (WBMP) decoder
//!
//! WBMP is a monochrome format from WAP, every pixel is a single bit.
//! It has the following layout
//! ```text
//! ╔════════╤══════════════════════════════════════════════════════════╗
//! ║ Bytes  │ Description                                              ║
//! ╠════════╪══════════════════════════════════════════════════════════╣
//! ║ 1+     │ Type, multi-byte integer, always 0                       ║
//! ╟────────┼──────────────────────────────────────────────────────────╢
//! ║ 1      │ Fixed header field                                       ║
//! ╟────────┼──────────────────────────────────────────────────────────╢
//! ║ 1+     │ Width, multi-byte integer                                ║
//! ╟────────┼──────────────────────────────────────────────────────────╢
//! ║ 1+     │ Height, multi-byte integer                               ║
//! ╟────────┼──────────────────────────────────────────────────────────╢
//! ║ [1]    │ 1 bit per pixel, rows padded to whole bytes, MSB first   ║
//! ╚════════╧══════════════════════════════════════════════════════════╝
//!```
//! A multi-byte integer stores 7 bits per byte, most significant group first,
//! the top bit of each byte is set when more bytes follow.
//!
//! A set bit is a white pixel, a clear bit is black.
//!
//! # Features
//! - `std`: Reading from [`std::io::Read`] sources via [`decode`] and [`decode_dimensions`]
//! - `log`: Forward decoder logs to the `log` crate
//! - `serde`: Serialize headers
//!
//! Without `std` the crate is `no_std` with `alloc`.
//!
//! # Strictness
//! Like most WBMP readers the decoder accepts images whose pixel data is short
//! and whose padding bits are set. Pixels that are not covered by the data
//! return an error when accessed.
//! Enabling strict mode in [`DecoderOptions`](zune_core::options::DecoderOptions) rejects such
//! images while decoding, as well as images whose type is not `0`.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use zune_core;

pub use crate::decoder::{probe_wbmp, WbmpDecoder};
#[cfg(feature = "std")]
pub use crate::decoder::{
    decode, decode_dimensions, decode_dimensions_with_options, decode_with_options
};
pub use crate::errors::{RegistryErrors, WbmpDecoderErrors};
pub use crate::header::WbmpHeader;
pub use crate::image::{LumaImage, WbmpColor, WbmpImage};
pub use crate::registry::{FormatEntry, FormatRegistry, WBMP_FORMAT};
pub use crate::traits::{ImageView, Rectangle};
pub use crate::utils::row_stride;

mod decoder;
mod errors;
mod header;
mod image;
pub mod registry;
mod serde;
pub mod traits;
mod utils;
