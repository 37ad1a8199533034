/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Format independent read access to decoded images

use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

/// An axis aligned rectangle, `x1` and `y1` are exclusive
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rectangle {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize
}

impl Rectangle {
    pub const fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Rectangle {
        Rectangle { x0, y0, x1, y1 }
    }
    pub const fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }
    pub const fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }
    /// Whether `(x,y)` lies inside the rectangle
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Read only view over a decoded image
///
/// Implementers decide how pixels are stored, a view only
/// needs to be able to report a luma value for a coordinate.
pub trait ImageView {
    /// Width and height of the image
    fn dimensions(&self) -> (usize, usize);

    /// The rectangle `(0,0)..(width,height)`
    fn bounds(&self) -> Rectangle {
        let (width, height) = self.dimensions();
        Rectangle::new(0, 0, width, height)
    }

    fn colorspace(&self) -> ColorSpace;

    fn depth(&self) -> BitDepth;

    /// Luma value of the pixel at `(x,y)`
    ///
    /// Returns `None` when the coordinate is outside the image
    /// or the backing storage does not cover it.
    fn luma_at(&self, x: usize, y: usize) -> Option<u8>;

    /// A short name of the storage strategy, used in logs
    fn name(&self) -> &'static str;
}
