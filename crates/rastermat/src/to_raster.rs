/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Dense matrix to raster conversion.
//!
//! Matrices are already interleaved, so the raster side is a copy plus
//! a descriptor. The copy never reorders, a color matrix keeps its
//! reversed element order in memory and the descriptor says so through
//! pre reversed band offsets.
use rastermat_core::color::ColorClass;
use rastermat_core::log::trace;

use crate::buffer::PixelBuffer;
use crate::errors::{ConvertErrors, FormatErrors};
use crate::mat::Mat;
use crate::raster::Raster;

/// Describe a dense matrix as an interleaved raster over a fresh copy
/// of its samples
pub(crate) fn mat_to_raster(mat: &Mat) -> Result<Raster, ConvertErrors> {
    let (width, height) = mat.dimensions();

    let (color, band_offsets) = match ColorClass::from_channel_count(mat.channels()) {
        Some(ColorClass::Gray) => (ColorClass::Gray, vec![0]),
        Some(ColorClass::Rgb) => (ColorClass::Rgb, vec![2, 1, 0]),
        None => return Err(FormatErrors::UnsupportedChannelCount(mat.channels()).into())
    };

    trace!(
        "Describing a {}x{} {:?} matrix as an interleaved raster",
        width,
        height,
        mat.depth()
    );

    let source = mat.buffer();
    let mut data = PixelBuffer::new_zeroed(source.sample_type(), source.num_samples())?;

    // safety: lengths match and both sides are owned allocations
    unsafe {
        data.alias_mut().copy_from_slice(source.alias());
    }

    Raster::interleaved(width, height, color, data, band_offsets)
}

#[cfg(test)]
mod tests {
    use rastermat_core::color::{BandOrder, ColorClass};
    use rastermat_core::sample::SampleType;

    use crate::mat::Mat;
    use crate::raster::{Raster, SampleLayout};

    #[test]
    fn gray_matrices_describe_one_band() {
        let mat = Mat::from_samples(2, 2, 1, &[1_u16, 2, 3, 4]).unwrap();
        let raster = Raster::from_mat(&mat).unwrap();

        assert_eq!(raster.color(), ColorClass::Gray);
        assert_eq!(raster.band_order(), BandOrder::Forward);
        assert_eq!(raster.sample_type(), SampleType::U16);
    }

    #[test]
    fn color_matrices_declare_reversed_offsets() {
        let mat = Mat::from_samples(1, 1, 3, &[30_u8, 20, 10]).unwrap();
        let raster = Raster::from_mat(&mat).unwrap();

        assert_eq!(raster.band_order(), BandOrder::Reverse);

        // the copy itself never reorders
        match raster.layout() {
            SampleLayout::Interleaved { data, .. } => {
                assert_eq!(data.reinterpret_as::<u8>().unwrap(), &[30, 20, 10]);
            }
            layout => panic!("expected an interleaved raster, got {:?}", layout)
        }
    }
}
