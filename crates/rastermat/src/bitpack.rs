/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Expand one bit per pixel storage into bytes.
//!
//! Packed rasters address pixels by absolute bit position, MSB first
//! inside each storage element. One generic routine walks the bits for
//! every element width, the element type only decides how wide the
//! strides are and which shift pulls a bit out.
use rastermat_core::region::Region;
use rastermat_core::sample::SampleType;

use crate::errors::{ConvertErrors, FormatErrors};
use crate::raster::PackedBits;

/// An integral element bits pack into, MSB first
trait PackedElem: Copy {
    /// Width of the element in bits
    const BITS: usize;

    /// The bit `pos` positions down from the most significant bit,
    /// as 0 or 1
    fn bit(self, pos: usize) -> u8;
}

impl PackedElem for u8 {
    const BITS: usize = 8;

    fn bit(self, pos: usize) -> u8 {
        (self >> (7 - pos)) & 1
    }
}

impl PackedElem for u16 {
    const BITS: usize = 16;

    fn bit(self, pos: usize) -> u8 {
        ((self >> (15 - pos)) & 1) as u8
    }
}

impl PackedElem for u32 {
    const BITS: usize = 32;

    fn bit(self, pos: usize) -> u8 {
        ((self >> (31 - pos)) & 1) as u8
    }
}

/// Expand the bits of `region` into one byte per pixel.
///
/// `out` must hold exactly the region's pixel count and receives 0 or
/// 1 per pixel, row major. The region is relative to the window the
/// descriptor addresses, its fit inside that window is the caller's
/// to check.
pub(crate) fn unpack_region(
    packed: &PackedBits, region: Region, out: &mut [u8]
) -> Result<(), ConvertErrors> {
    debug_assert_eq!(out.len(), region.num_pixels());

    match packed.data().sample_type() {
        SampleType::U8 => {
            unpack_elems(packed.data().reinterpret_as::<u8>()?, packed, region, out);
        }
        SampleType::U16 => {
            unpack_elems(packed.data().reinterpret_as::<u16>()?, packed, region, out);
        }
        SampleType::I32 => {
            // same bits, shifts want the unsigned view
            let elems: &[u32] = bytemuck::cast_slice(packed.data().reinterpret_as::<i32>()?);
            unpack_elems(elems, packed, region, out);
        }
        other => return Err(FormatErrors::UnsupportedPackedElement(other).into())
    }
    Ok(())
}

/// Walk the packed bits of one region.
///
/// Each row starts at the absolute bit the descriptor derives from its
/// element offset and scanline stride, pixels then advance bit by bit
/// with no regard for element boundaries.
fn unpack_elems<E: PackedElem>(elems: &[E], packed: &PackedBits, region: Region, out: &mut [u8]) {
    for (y, out_row) in out.chunks_exact_mut(region.width()).enumerate() {
        let row_elem = packed.elem_offset() + (region.y() + y) * packed.scanline_stride();
        let mut bit = (row_elem * E::BITS) + packed.bit_offset() + region.x();

        for out_val in out_row.iter_mut() {
            *out_val = elems[bit / E::BITS].bit(bit % E::BITS);
            bit += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use rastermat_core::region::Region;

    use crate::bitpack::unpack_region;
    use crate::buffer::PixelBuffer;
    use crate::raster::PackedBits;

    fn unpack(packed: &PackedBits, region: Region) -> Vec<u8> {
        let mut out = vec![0_u8; region.num_pixels()];

        unpack_region(packed, region, &mut out).unwrap();
        out
    }

    #[test]
    fn bits_come_out_msb_first() {
        let data = PixelBuffer::from_samples(&[0b1010_0000_u8]).unwrap();
        let packed = PackedBits::new(data, 0, 0, 1);

        assert_eq!(
            unpack(&packed, Region::new(0, 0, 8, 1)),
            [1, 0, 1, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn rows_follow_the_scanline_stride() {
        // rows start at elements 1 and 3
        let data =
            PixelBuffer::from_samples(&[0xFF_u8, 0b1000_0000, 0xFF, 0b0100_0000]).unwrap();
        let packed = PackedBits::new(data, 0, 1, 2);

        assert_eq!(unpack(&packed, Region::new(0, 0, 2, 2)), [1, 0, 0, 1]);
    }

    #[test]
    fn bit_offset_can_cross_an_element() {
        // last bit of the first element, first bit of the second
        let data = PixelBuffer::from_samples(&[0b0000_0001_u8, 0b1000_0000]).unwrap();
        let packed = PackedBits::new(data, 7, 0, 2);

        assert_eq!(unpack(&packed, Region::new(0, 0, 2, 1)), [1, 1]);
    }

    #[test]
    fn short_elements_cross_at_the_last_bit() {
        let data = PixelBuffer::from_samples(&[0x0001_u16, 0x8000]).unwrap();
        let packed = PackedBits::new(data, 15, 0, 2);

        assert_eq!(unpack(&packed, Region::new(0, 0, 2, 1)), [1, 1]);
    }

    #[test]
    fn int_elements_cross_at_the_last_bit() {
        let data = PixelBuffer::from_samples(&[0x0000_0001_i32, 0x8000_0000_u32 as i32]).unwrap();
        let packed = PackedBits::new(data, 31, 0, 2);

        assert_eq!(unpack(&packed, Region::new(0, 0, 2, 1)), [1, 1]);
    }

    #[test]
    fn regions_translate_inside_the_window() {
        let data = PixelBuffer::from_samples(&[0b0110_0000_u8, 0b0000_0000]).unwrap();
        let packed = PackedBits::new(data, 0, 0, 1);

        // columns 1 and 2 of the top row only
        assert_eq!(unpack(&packed, Region::new(1, 0, 2, 1)), [1, 1]);
    }

    #[test]
    fn element_width_changes_nothing() {
        // the same 16 bit pattern stored as two bytes, one short and
        // the top half of one int
        let bytes = PixelBuffer::from_samples(&[0xA5_u8, 0x3C]).unwrap();
        let shorts = PixelBuffer::from_samples(&[0xA53C_u16]).unwrap();
        let ints = PixelBuffer::from_samples(&[0xA53C_0000_u32 as i32]).unwrap();

        let region = Region::new(0, 0, 16, 1);

        let from_bytes = unpack(&PackedBits::new(bytes, 0, 0, 2), region);
        let from_shorts = unpack(&PackedBits::new(shorts, 0, 0, 1), region);
        let from_ints = unpack(&PackedBits::new(ints, 0, 0, 1), region);

        assert_eq!(from_bytes, from_shorts);
        assert_eq!(from_bytes, from_ints);
        assert_eq!(
            from_bytes,
            [1, 0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0]
        );
    }
}

#[cfg(feature = "benchmarks")]
#[cfg(test)]
mod benchmarks {
    extern crate test;

    use rastermat_core::region::Region;

    use crate::bitpack::unpack_region;
    use crate::buffer::PixelBuffer;
    use crate::raster::PackedBits;

    #[bench]
    fn unpack_byte_elements(b: &mut test::Bencher) {
        let width = 800;
        let height = 800;
        let stride = width / 8;

        let data = PixelBuffer::from_elm(stride * height, 0b0101_0101_u8).unwrap();
        let packed = PackedBits::new(data, 0, 0, stride);
        let region = Region::new(0, 0, width, height);

        let mut out = vec![0_u8; width * height];

        b.iter(|| {
            unpack_region(&packed, region, &mut out).unwrap();
        });
    }
}
