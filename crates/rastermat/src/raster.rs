/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raster descriptors and layout classification.
//!
//! A raster is the windowed, per band view of an image: each band may
//! live in its own plane, share one interleaved buffer with the other
//! bands, or pack one bit per pixel into wider storage elements. The
//! constructors here validate a descriptor once, after which the
//! conversion passes can trust its geometry and never re-check buffer
//! sizes.
use rastermat_core::color::{BandOrder, ColorClass};
use rastermat_core::sample::SampleType;

use crate::buffer::PixelBuffer;
use crate::errors::{ArgumentErrors, ConvertErrors, FormatErrors};
use crate::mat::Mat;

/// Descriptor for single band, one bit per pixel storage.
///
/// Pixels pack MSB first into integral storage elements. `elem_offset`
/// names the element where the window's first row begins, `bit_offset`
/// the bit of the window's leftmost pixel counted from that element's
/// start, and `scanline_stride` how many elements one row step covers.
///
/// The element width comes from the buffer's sample type and must be
/// 8, 16 or 32 bits.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackedBits {
    data:            PixelBuffer,
    bit_offset:      usize,
    elem_offset:     usize,
    scanline_stride: usize
}

impl PackedBits {
    /// Describe packed storage
    ///
    /// # Arguments
    /// - data: The storage elements holding the packed bits
    /// - bit_offset: Bit of the leftmost pixel inside the first row's
    ///   element
    /// - elem_offset: Element index where the first row begins
    /// - scanline_stride: Elements advanced per row
    pub fn new(
        data: PixelBuffer, bit_offset: usize, elem_offset: usize, scanline_stride: usize
    ) -> PackedBits {
        PackedBits {
            data,
            bit_offset,
            elem_offset,
            scanline_stride
        }
    }

    /// The storage elements holding the packed bits
    pub const fn data(&self) -> &PixelBuffer {
        &self.data
    }

    /// Bit of the leftmost pixel inside the first row's element
    pub const fn bit_offset(&self) -> usize {
        self.bit_offset
    }

    /// Element index where the first row begins
    pub const fn elem_offset(&self) -> usize {
        self.elem_offset
    }

    /// Elements advanced per row
    pub const fn scanline_stride(&self) -> usize {
        self.scanline_stride
    }

    /// Width of one storage element in bits
    pub const fn elem_bits(&self) -> usize {
        self.data.sample_type().bit_size()
    }
}

/// How the samples of a raster are laid out in memory
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SampleLayout {
    /// All bands share one buffer. Samples of one pixel sit next to
    /// each other, the pixel stride equals the channel count and
    /// `band_offsets[i]` names where band i sits inside the stride
    Interleaved {
        data:         PixelBuffer,
        band_offsets: Vec<usize>
    },
    /// Every band owns a plane of width times height samples
    Banded { planes: Vec<PixelBuffer> },
    /// A single band packing one bit per pixel into wider elements
    BitPacked(PackedBits)
}

/// A windowed, per band image.
///
/// Rasters are built through the checked constructors, which classify
/// the layout and validate the descriptor against the backing buffers.
/// Conversion to a dense matrix happens through
/// [`Mat::from_raster`](crate::mat::Mat::from_raster).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Raster {
    width:  usize,
    height: usize,
    color:  ColorClass,
    layout: SampleLayout
}

impl Raster {
    /// Create a raster whose bands share one interleaved buffer
    ///
    /// `band_offsets` must hold one offset per channel, each inside
    /// the pixel stride and no two alike. `data` must hold exactly
    /// width times height times channels samples.
    ///
    /// # Example
    /// ```
    /// use rastermat::buffer::PixelBuffer;
    /// use rastermat::raster::Raster;
    /// use rastermat_core::color::ColorClass;
    ///
    /// let data = PixelBuffer::from_samples(&[10_u8, 20, 30, 40, 50, 60]).unwrap();
    /// let raster =
    ///     Raster::interleaved(2, 1, ColorClass::Rgb, data, vec![0, 1, 2]).unwrap();
    /// assert_eq!(raster.channels(), 3);
    /// ```
    pub fn interleaved(
        width: usize, height: usize, color: ColorClass, data: PixelBuffer,
        band_offsets: Vec<usize>
    ) -> Result<Raster, ConvertErrors> {
        let channels = color.num_components();

        if width == 0 || height == 0 {
            return Err(ArgumentErrors::ZeroDimension.into());
        }
        let samples = checked_samples(width, height, channels)?;

        if data.num_samples() != samples {
            return Err(ArgumentErrors::WrongBufferLength(samples, data.num_samples()).into());
        }
        if band_offsets.len() != channels {
            return Err(ArgumentErrors::WrongOffsetCount(channels, band_offsets.len()).into());
        }
        for (i, offset) in band_offsets.iter().enumerate() {
            if *offset >= channels {
                return Err(ArgumentErrors::OffsetOutOfRange(*offset, channels).into());
            }
            if band_offsets[..i].contains(offset) {
                return Err(ArgumentErrors::DuplicateOffset(*offset).into());
            }
        }

        Ok(Raster {
            width,
            height,
            color,
            layout: SampleLayout::Interleaved {
                data,
                band_offsets
            }
        })
    }

    /// Create a raster whose bands live in separate planes
    ///
    /// Band i is plane i, planes are sequential. Every plane must
    /// share one sample type and hold width times height samples.
    pub fn banded(
        width: usize, height: usize, color: ColorClass, planes: Vec<PixelBuffer>
    ) -> Result<Raster, ConvertErrors> {
        let channels = color.num_components();

        if width == 0 || height == 0 {
            return Err(ArgumentErrors::ZeroDimension.into());
        }
        let samples = checked_samples(width, height, 1)?;

        if planes.len() != channels {
            return Err(ArgumentErrors::WrongPlaneCount(channels, planes.len()).into());
        }
        let first_type = planes[0].sample_type();

        for plane in &planes {
            if plane.sample_type() != first_type {
                return Err(
                    ArgumentErrors::MixedPlaneTypes(first_type, plane.sample_type()).into()
                );
            }
            if plane.num_samples() != samples {
                return Err(
                    ArgumentErrors::WrongBufferLength(samples, plane.num_samples()).into()
                );
            }
        }

        Ok(Raster {
            width,
            height,
            color,
            layout: SampleLayout::Banded { planes }
        })
    }

    /// Create a single band raster over bit packed storage
    ///
    /// The storage element must be 8, 16 or 32 bits wide and the
    /// buffer must cover the window described by the packed
    /// descriptor. Bit packed rasters are always grayscale.
    pub fn bit_packed(
        width: usize, height: usize, packed: PackedBits
    ) -> Result<Raster, ConvertErrors> {
        if width == 0 || height == 0 {
            return Err(ArgumentErrors::ZeroDimension.into());
        }
        let elem_bits = match packed.data().sample_type() {
            SampleType::U8 | SampleType::U16 | SampleType::I32 => packed.elem_bits(),
            other => return Err(FormatErrors::UnsupportedPackedElement(other).into())
        };

        // elements the last row reaches into, counted from its start
        // element
        let row_span = packed
            .bit_offset()
            .checked_add(width)
            .map(|bits| bits.div_ceil(elem_bits))
            .ok_or(ConvertErrors::InvalidArgument(ArgumentErrors::DimensionOverflow))?;

        let needed = (height - 1)
            .checked_mul(packed.scanline_stride())
            .and_then(|rows| rows.checked_add(packed.elem_offset()))
            .and_then(|start| start.checked_add(row_span))
            .ok_or(ConvertErrors::InvalidArgument(ArgumentErrors::DimensionOverflow))?;

        if packed.data().num_samples() < needed {
            return Err(
                ArgumentErrors::WrongBufferLength(needed, packed.data().num_samples()).into()
            );
        }

        Ok(Raster {
            width,
            height,
            color: ColorClass::Gray,
            layout: SampleLayout::BitPacked(packed)
        })
    }

    /// Build a raster from a dense matrix
    ///
    /// The raster owns a fresh copy of the samples. Three channel
    /// matrices keep their reversed element order in memory, the
    /// descriptor declares it through pre reversed band offsets.
    pub fn from_mat(mat: &Mat) -> Result<Raster, ConvertErrors> {
        crate::to_raster::mat_to_raster(mat)
    }

    /// Classify a foreign storage description into a supported sample
    /// type.
    ///
    /// Bridges descriptors that name their storage by bit width and
    /// flags rather than by Rust type. Unsupported storage, notably
    /// 16 bit floats, is rejected here before any raster is built.
    ///
    /// # Example
    /// ```
    /// use rastermat::raster::Raster;
    ///
    /// assert!(Raster::classify_storage(16, true, false).is_err());
    /// ```
    pub fn classify_storage(
        bit_size: usize, float: bool, signed: bool
    ) -> Result<SampleType, ConvertErrors> {
        match SampleType::from_bit_size(bit_size, float, signed) {
            Some(sample_type) => Ok(sample_type),
            None => Err(FormatErrors::UnsupportedSampleType(bit_size, float).into())
        }
    }

    /// Width of the raster in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height of the raster in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the image dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The color class of the raster
    pub const fn color(&self) -> ColorClass {
        self.color
    }

    /// Number of bands, 1 for gray and 3 for color
    pub const fn channels(&self) -> usize {
        self.color.num_components()
    }

    /// The storage type backing the raster
    ///
    /// For bit packed rasters this is the element the bits pack into,
    /// not the logical one bit depth.
    pub fn sample_type(&self) -> SampleType {
        match &self.layout {
            SampleLayout::Interleaved { data, .. } => data.sample_type(),
            SampleLayout::Banded { planes } => planes[0].sample_type(),
            SampleLayout::BitPacked(packed) => packed.data().sample_type()
        }
    }

    /// Number of bits one band of one pixel occupies
    ///
    /// 1 for bit packed rasters, the sample bit width otherwise
    pub fn bits_per_channel(&self) -> usize {
        match &self.layout {
            SampleLayout::BitPacked(_) => 1,
            _ => self.sample_type().bit_size()
        }
    }

    /// Return true if this raster packs one bit per pixel
    pub fn is_bit_packed(&self) -> bool {
        matches!(self.layout, SampleLayout::BitPacked(_))
    }

    /// Classify the band order of this raster
    ///
    /// Interleaved rasters classify their explicit offsets, banded
    /// and bit packed rasters are sequential.
    pub fn band_order(&self) -> BandOrder {
        match &self.layout {
            SampleLayout::Interleaved { band_offsets, .. } => {
                BandOrder::from_offsets(band_offsets)
            }
            _ => BandOrder::Forward
        }
    }

    /// The classified sample layout
    pub const fn layout(&self) -> &SampleLayout {
        &self.layout
    }
}

/// Multiply out an image geometry, failing instead of wrapping
fn checked_samples(width: usize, height: usize, channels: usize) -> Result<usize, ConvertErrors> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or(ConvertErrors::InvalidArgument(ArgumentErrors::DimensionOverflow))
}

#[cfg(test)]
mod tests {
    use rastermat_core::color::{BandOrder, ColorClass};
    use rastermat_core::sample::SampleType;

    use crate::buffer::PixelBuffer;
    use crate::errors::ConvertErrors;
    use crate::raster::{PackedBits, Raster};

    #[test]
    fn interleaved_rejects_zero_dimensions() {
        let data = PixelBuffer::new_zeroed(SampleType::U8, 0).unwrap();
        let raster = Raster::interleaved(0, 4, ColorClass::Gray, data, vec![0]);

        assert!(matches!(raster, Err(ConvertErrors::InvalidArgument(_))));
    }

    #[test]
    fn interleaved_rejects_short_buffers() {
        let data = PixelBuffer::new_zeroed(SampleType::U8, 11).unwrap();
        let raster = Raster::interleaved(2, 2, ColorClass::Rgb, data, vec![0, 1, 2]);

        assert!(matches!(raster, Err(ConvertErrors::InvalidArgument(_))));
    }

    #[test]
    fn interleaved_rejects_bad_offsets() {
        let out_of_range = PixelBuffer::new_zeroed(SampleType::U8, 12).unwrap();
        let raster = Raster::interleaved(2, 2, ColorClass::Rgb, out_of_range, vec![0, 1, 3]);
        assert!(raster.is_err());

        let duplicated = PixelBuffer::new_zeroed(SampleType::U8, 12).unwrap();
        let raster = Raster::interleaved(2, 2, ColorClass::Rgb, duplicated, vec![0, 1, 1]);
        assert!(raster.is_err());
    }

    #[test]
    fn interleaved_classifies_order() {
        let data = PixelBuffer::new_zeroed(SampleType::U8, 12).unwrap();
        let raster = Raster::interleaved(2, 2, ColorClass::Rgb, data, vec![2, 1, 0]).unwrap();

        assert_eq!(raster.band_order(), BandOrder::Reverse);
        assert_eq!(raster.bits_per_channel(), 8);
    }

    #[test]
    fn banded_rejects_mixed_planes() {
        let planes = vec![
            PixelBuffer::new_zeroed(SampleType::U16, 4).unwrap(),
            PixelBuffer::new_zeroed(SampleType::U16, 4).unwrap(),
            PixelBuffer::new_zeroed(SampleType::I16, 4).unwrap(),
        ];
        let raster = Raster::banded(2, 2, ColorClass::Rgb, planes);

        assert!(matches!(raster, Err(ConvertErrors::InvalidArgument(_))));
    }

    #[test]
    fn banded_is_sequential() {
        let planes = vec![
            PixelBuffer::new_zeroed(SampleType::F32, 4).unwrap(),
            PixelBuffer::new_zeroed(SampleType::F32, 4).unwrap(),
            PixelBuffer::new_zeroed(SampleType::F32, 4).unwrap(),
        ];
        let raster = Raster::banded(2, 2, ColorClass::Rgb, planes).unwrap();

        assert_eq!(raster.band_order(), BandOrder::Forward);
        assert_eq!(raster.sample_type(), SampleType::F32);
    }

    #[test]
    fn bit_packed_rejects_float_elements() {
        let data = PixelBuffer::new_zeroed(SampleType::F32, 4).unwrap();
        let raster = Raster::bit_packed(8, 2, PackedBits::new(data, 0, 0, 1));

        assert!(matches!(raster, Err(ConvertErrors::UnsupportedFormat(_))));
    }

    #[test]
    fn bit_packed_needs_a_covering_buffer() {
        // 8 pixels per row at one u8 per row, two rows, but only one
        // element of storage
        let data = PixelBuffer::new_zeroed(SampleType::U8, 1).unwrap();
        let raster = Raster::bit_packed(8, 2, PackedBits::new(data, 0, 0, 1));

        assert!(matches!(raster, Err(ConvertErrors::InvalidArgument(_))));
    }

    #[test]
    fn bit_packed_reports_one_bit() {
        let data = PixelBuffer::new_zeroed(SampleType::U16, 4).unwrap();
        let raster = Raster::bit_packed(10, 2, PackedBits::new(data, 0, 0, 1)).unwrap();

        assert!(raster.is_bit_packed());
        assert_eq!(raster.bits_per_channel(), 1);
        assert_eq!(raster.channels(), 1);
        assert_eq!(raster.sample_type(), SampleType::U16);
    }

    #[test]
    fn storage_classification() {
        assert_eq!(
            Raster::classify_storage(32, false, true).unwrap(),
            SampleType::I32
        );
        assert!(Raster::classify_storage(16, true, false).is_err());
        assert!(Raster::classify_storage(32, false, false).is_err());
    }
}
