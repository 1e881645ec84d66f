/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Rectangular pixel windows.

/// A rectangular window into an image, in pixels.
///
/// `x` and `y` name the top left corner, `width` and `height` the
/// extent. Whether a region fits inside a particular image is checked
/// by whoever consumes it, the type itself carries no bounds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Region {
    x:      usize,
    y:      usize,
    width:  usize,
    height: usize
}

impl Region {
    /// Create a new region from its top left corner and extent
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Region {
        Region {
            x,
            y,
            width,
            height
        }
    }

    /// The leftmost pixel column of the window
    pub const fn x(&self) -> usize {
        self.x
    }

    /// The topmost pixel row of the window
    pub const fn y(&self) -> usize {
        self.y
    }

    /// Width of the window in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height of the window in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return true if the window covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels the window covers
    pub const fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}
