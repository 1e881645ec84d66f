/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Color classification and band ordering information.

/// The color interpretation of an image, fixed by its channel count.
///
/// The conversion engine handles exactly one channel of gray or three
/// channels of color, other counts cannot be represented.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorClass {
    /// Single channel grayscale
    Gray,
    /// Three channel color
    Rgb
}

/// All color classes the conversion engine understands
pub static ALL_COLOR_CLASSES: [ColorClass; 2] = [ColorClass::Gray, ColorClass::Rgb];

impl ColorClass {
    /// Number of channels present for this color class
    ///
    /// E.g. Rgb returns 3 since it contains R, G and B channels
    /// making up a pixel
    pub const fn num_components(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3
        }
    }

    /// Classify a channel count into a color class
    ///
    /// Returns `None` for every count other than 1 and 3.
    ///
    /// # Example
    /// ```
    /// use rastermat_core::color::ColorClass;
    /// assert_eq!(ColorClass::from_channel_count(3), Some(ColorClass::Rgb));
    /// assert_eq!(ColorClass::from_channel_count(4), None);
    /// ```
    pub const fn from_channel_count(count: usize) -> Option<ColorClass> {
        match count {
            1 => Some(ColorClass::Gray),
            3 => Some(ColorClass::Rgb),
            _ => None
        }
    }
}

/// Placement of bands inside an interleaved pixel stride.
///
/// The order is decided once, when a raster is inspected, and carried
/// along as data. Conversion loops branch on the carried value instead
/// of re-deriving it from raw offsets at every use site.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BandOrder {
    /// Band i sits at offset i, `[0, 1, 2]` for three channels
    Forward,
    /// Bands sit reversed inside the pixel, `[2, 1, 0]`, the
    /// conventional order of dense color matrices
    Reverse,
    /// Any other permutation of three band offsets
    Custom([usize; 3])
}

impl BandOrder {
    /// Classify explicit band offsets into an order.
    ///
    /// Only three entry offset slices carry ordering information,
    /// anything else is sequential. Banded layouts without explicit
    /// offsets and single band rasters therefore classify as
    /// [`BandOrder::Forward`].
    ///
    /// # Example
    /// ```
    /// use rastermat_core::color::BandOrder;
    /// assert_eq!(BandOrder::from_offsets(&[2, 1, 0]), BandOrder::Reverse);
    /// assert_eq!(BandOrder::from_offsets(&[0]), BandOrder::Forward);
    /// ```
    pub fn from_offsets(offsets: &[usize]) -> BandOrder {
        match offsets {
            [0, 1, 2] => BandOrder::Forward,
            [2, 1, 0] => BandOrder::Reverse,
            [a, b, c] => BandOrder::Custom([*a, *b, *c]),
            _ => BandOrder::Forward
        }
    }

    /// Return the offset of `channel` inside a three channel pixel
    /// stride
    pub const fn offset_of(&self, channel: usize) -> usize {
        match self {
            BandOrder::Forward => channel,
            BandOrder::Reverse => 2 - channel,
            BandOrder::Custom(offsets) => offsets[channel]
        }
    }

    /// Return true if bands are in ascending storage order
    pub const fn is_forward(&self) -> bool {
        matches!(self, BandOrder::Forward)
    }
}
