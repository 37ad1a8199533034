/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde")]

use serde::ser::*;

use crate::{WbmpColor, WbmpHeader};

impl Serialize for WbmpHeader {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("WbmpHeader", 5)?;
        state.serialize_field("type_field", &self.type_field)?;
        state.serialize_field("fixed_header", &self.fixed_header)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("header_size", &self.header_size)?;
        state.end()
    }
}

impl Serialize for WbmpColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        match self {
            WbmpColor::Black => serializer.serialize_str("Black"),
            WbmpColor::White => serializer.serialize_str("White")
        }
    }
}
