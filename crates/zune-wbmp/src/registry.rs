/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A table of named image decoders
//!
//! Applications create a [`FormatRegistry`] once at startup and pass it
//! to whatever needs to decode images by name or by sniffing content.

use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use zune_core::bytestream::ZCursor;
use zune_core::log::trace;
use zune_core::options::DecoderOptions;

use crate::errors::RegistryErrors;
use crate::traits::ImageView;
use crate::{probe_wbmp, WbmpDecoder, WbmpDecoderErrors};

/// Returns true if the bytes look like this format
pub type ProbeFn = fn(&[u8]) -> bool;
/// Decode a whole image
pub type DecodeFn = fn(&[u8], DecoderOptions) -> Result<Box<dyn ImageView>, RegistryErrors>;
/// Decode only width and height
pub type DimensionsFn = fn(&[u8], DecoderOptions) -> Result<(usize, usize), RegistryErrors>;

/// A single registered format
#[derive(Copy, Clone)]
pub struct FormatEntry {
    pub name:              &'static str,
    pub probe:             ProbeFn,
    pub decode:            DecodeFn,
    pub decode_dimensions: DimensionsFn
}

impl core::fmt::Debug for FormatEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FormatEntry")
            .field("name", &self.name)
            .finish()
    }
}

fn wbmp_decode(bytes: &[u8], options: DecoderOptions) -> Result<Box<dyn ImageView>, RegistryErrors> {
    let image = WbmpDecoder::new_with_options(ZCursor::new(bytes), options).decode()?;
    Ok(Box::new(image))
}

fn wbmp_dimensions(bytes: &[u8], options: DecoderOptions) -> Result<(usize, usize), RegistryErrors> {
    let mut decoder = WbmpDecoder::new_with_options(ZCursor::new(bytes), options);
    decoder.decode_headers()?;

    let dimensions = decoder
        .dimensions()
        .ok_or(WbmpDecoderErrors::UnexpectedEof("header"))?;
    Ok(dimensions)
}

/// The WBMP entry, registered under `"wbmp"`
pub const WBMP_FORMAT: FormatEntry = FormatEntry {
    name:              "wbmp",
    probe:             probe_wbmp,
    decode:            wbmp_decode,
    decode_dimensions: wbmp_dimensions
};

/// Decoders keyed by format name
///
/// Lookups are case sensitive. Probing during [`guess_format`](Self::guess_format)
/// happens in registration order.
#[derive(Clone, Debug)]
pub struct FormatRegistry {
    entries: Vec<FormatEntry>
}

impl FormatRegistry {
    /// An empty registry
    pub const fn new() -> FormatRegistry {
        FormatRegistry {
            entries: Vec::new()
        }
    }

    /// A registry containing every format this crate can decode
    pub fn with_builtin() -> FormatRegistry {
        let mut registry = FormatRegistry::new();
        registry.register(WBMP_FORMAT);
        registry
    }

    /// Add a format, replacing and returning any entry with the same name
    pub fn register(&mut self, entry: FormatEntry) -> Option<FormatEntry> {
        trace!("Registering format {}", entry.name);

        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => Some(core::mem::replace(existing, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FormatEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Names of registered formats in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the first format whose probe accepts `bytes`
    pub fn guess_format(&self, bytes: &[u8]) -> Option<&FormatEntry> {
        self.entries.iter().find(|e| (e.probe)(bytes))
    }

    /// Decode `bytes` with the decoder registered under `name`
    pub fn decode(
        &self, name: &str, bytes: &[u8], options: DecoderOptions
    ) -> Result<Box<dyn ImageView>, RegistryErrors> {
        let entry = self.lookup(name)?;
        let image = (entry.decode)(bytes, options)?;

        trace!("Decoded {} image into {} view", entry.name, image.name());
        Ok(image)
    }

    /// Read dimensions of `bytes` with the decoder registered under `name`
    pub fn decode_dimensions(
        &self, name: &str, bytes: &[u8], options: DecoderOptions
    ) -> Result<(usize, usize), RegistryErrors> {
        let entry = self.lookup(name)?;
        (entry.decode_dimensions)(bytes, options)
    }

    fn lookup(&self, name: &str) -> Result<&FormatEntry, RegistryErrors> {
        self.get(name)
            .ok_or_else(|| RegistryErrors::UnknownFormat(name.to_string()))
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        FormatRegistry::with_builtin()
    }
}
