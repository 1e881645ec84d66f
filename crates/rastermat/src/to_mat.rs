/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raster to dense matrix conversion.
//!
//! One entry point dispatches on the classified sample layout, each
//! layout has its own pass. Every pass writes a fresh output buffer
//! sized for the requested region and the passes preserve bit
//! patterns, the only per sample transforms are placement ones.
use rastermat_core::color::BandOrder;
use rastermat_core::log::{trace, warn};
use rastermat_core::options::ConvertOptions;
use rastermat_core::region::Region;
use rastermat_core::sample::SampleType;

use crate::buffer::{PixelBuffer, Sample};
use crate::errors::{ArgumentErrors, ConvertErrors};
use crate::mat::Mat;
use crate::raster::{PackedBits, Raster, SampleLayout};

/// Convert a raster into a dense matrix, honoring the region and
/// ordering options
pub(crate) fn raster_to_mat(
    raster: &Raster, options: &ConvertOptions
) -> Result<Mat, ConvertErrors> {
    let region = resolve_region(raster, options)?;

    trace!(
        "Converting {:?} raster to a {}x{} matrix",
        raster.color(),
        region.width(),
        region.height()
    );

    match raster.layout() {
        SampleLayout::BitPacked(packed) => bit_packed_to_mat(packed, region),
        SampleLayout::Interleaved {
            data,
            band_offsets
        } => interleaved_to_mat(raster, data, band_offsets, region, options),
        SampleLayout::Banded { planes } => banded_to_mat(raster, planes, region, options)
    }
}

/// Resolve the requested region against the raster bounds.
///
/// No region means the full frame. An explicit region must be non
/// empty and fit inside the raster.
fn resolve_region(raster: &Raster, options: &ConvertOptions) -> Result<Region, ConvertErrors> {
    let (width, height) = raster.dimensions();

    match options.get_region() {
        None => Ok(Region::new(0, 0, width, height)),
        Some(region) => {
            if region.is_empty() {
                return Err(ArgumentErrors::ZeroDimension.into());
            }
            let fits_x = region
                .x()
                .checked_add(region.width())
                .is_some_and(|end| end <= width);
            let fits_y = region
                .y()
                .checked_add(region.height())
                .is_some_and(|end| end <= height);

            if !fits_x || !fits_y {
                return Err(ArgumentErrors::RegionOutOfBounds(region, width, height).into());
            }
            Ok(region)
        }
    }
}

/// The band order dense matrices should come out in
const fn target_order(options: &ConvertOptions) -> BandOrder {
    if options.get_reverse_channels() {
        BandOrder::Reverse
    } else {
        BandOrder::Forward
    }
}

/// Expand packed bits into a single channel byte matrix.
///
/// Output elements are always bytes holding 0 or 1, whatever element
/// width the bits packed into. Ordering and narrowing options have
/// nothing to act on here.
fn bit_packed_to_mat(packed: &PackedBits, region: Region) -> Result<Mat, ConvertErrors> {
    let mut out = PixelBuffer::new_zeroed(SampleType::U8, region.num_pixels())?;

    crate::bitpack::unpack_region(packed, region, out.reinterpret_as_mut::<u8>()?)?;

    Ok(Mat::from_parts(
        region.width(),
        region.height(),
        1,
        SampleType::U8.mat_depth(false),
        out
    ))
}

/// Copy an interleaved raster into a dense matrix.
///
/// The pixels already sit in matrix shape, so rows copy as raw byte
/// ranges. Only one case reorders, three channels of byte wide
/// samples whose stored order differs from the requested one, that
/// case permutes while copying. Wider samples keep their storage
/// order, reordering them is not supported.
fn interleaved_to_mat(
    raster: &Raster, data: &PixelBuffer, band_offsets: &[usize], region: Region,
    options: &ConvertOptions
) -> Result<Mat, ConvertErrors> {
    let channels = raster.channels();
    let sample_type = raster.sample_type();

    let mut out = PixelBuffer::new_zeroed(sample_type, region.num_pixels() * channels)?;

    let src_order = BandOrder::from_offsets(band_offsets);
    let dst_order = target_order(options);
    let reorder = channels == 3 && src_order != dst_order;

    // one byte per sample in every branch that views raw bytes
    let src = unsafe { data.alias() };
    let dst = unsafe { out.alias_mut() };

    if reorder && sample_type.size_of() == 1 {
        let mut lanes = [0_usize; 3];

        for band in 0..3 {
            lanes[dst_order.offset_of(band)] = src_order.offset_of(band);
        }
        permute_pixels(src, raster.width(), region, lanes, dst);
    } else {
        if reorder {
            warn!(
                "Channel reordering covers 8 bit samples only, keeping {:?} samples in storage order",
                sample_type
            );
        }
        copy_rows(
            src,
            raster.width(),
            channels * sample_type.size_of(),
            region,
            dst
        );
    }

    let depth = sample_type.mat_depth(options.get_narrow_u16());

    out.retag(depth.sample_type());
    Ok(Mat::from_parts(
        region.width(),
        region.height(),
        channels,
        depth,
        out
    ))
}

/// Interleave banded planes into a dense matrix.
///
/// Single bands copy like interleaved data. Three planes merge sample
/// by sample. For byte samples the plane feeding each output position
/// follows the requested order, plane 2 supplies position 0 when
/// reversing. Wider planes merge in band order, reordering them is not
/// supported.
fn banded_to_mat(
    raster: &Raster, planes: &[PixelBuffer], region: Region, options: &ConvertOptions
) -> Result<Mat, ConvertErrors> {
    let channels = raster.channels();
    let sample_type = raster.sample_type();

    let mut out = PixelBuffer::new_zeroed(sample_type, region.num_pixels() * channels)?;

    if channels == 1 {
        copy_rows(
            unsafe { planes[0].alias() },
            raster.width(),
            sample_type.size_of(),
            region,
            unsafe { out.alias_mut() }
        );
    } else {
        let mut order = target_order(options);

        if order != BandOrder::Forward && sample_type.size_of() != 1 {
            warn!(
                "Channel reordering covers 8 bit samples only, merging {:?} planes in band order",
                sample_type
            );
            order = BandOrder::Forward;
        }
        // plane feeding each position inside an output pixel
        let mut lanes = [0_usize; 3];

        for band in 0..3 {
            lanes[order.offset_of(band)] = band;
        }

        let width = raster.width();

        match sample_type {
            SampleType::U8 => merge_planes::<u8>(planes, width, region, lanes, &mut out)?,
            SampleType::I8 => merge_planes::<i8>(planes, width, region, lanes, &mut out)?,
            SampleType::U16 => merge_planes::<u16>(planes, width, region, lanes, &mut out)?,
            SampleType::I16 => merge_planes::<i16>(planes, width, region, lanes, &mut out)?,
            SampleType::I32 => merge_planes::<i32>(planes, width, region, lanes, &mut out)?,
            SampleType::F32 => merge_planes::<f32>(planes, width, region, lanes, &mut out)?,
            SampleType::F64 => merge_planes::<f64>(planes, width, region, lanes, &mut out)?
        }
    }

    let depth = sample_type.mat_depth(options.get_narrow_u16());

    out.retag(depth.sample_type());
    Ok(Mat::from_parts(
        region.width(),
        region.height(),
        channels,
        depth,
        out
    ))
}

/// Copy the rows of a region between byte buffers.
///
/// `pixel_bytes` is how many bytes one pixel occupies in both buffers.
/// A region spanning the full source width collapses into one straight
/// copy.
fn copy_rows(src: &[u8], src_width: usize, pixel_bytes: usize, region: Region, out: &mut [u8]) {
    let src_stride = src_width * pixel_bytes;
    let row_bytes = region.width() * pixel_bytes;

    if region.width() == src_width {
        let start = region.y() * src_stride;

        out.copy_from_slice(&src[start..start + row_bytes * region.height()]);
        return;
    }

    for (y, out_row) in out.chunks_exact_mut(row_bytes).enumerate() {
        let start = (region.y() + y) * src_stride + region.x() * pixel_bytes;

        out_row.copy_from_slice(&src[start..start + row_bytes]);
    }
}

/// Copy three channel byte pixels while permuting each pixel.
///
/// `lanes[i]` names the source position inside a pixel that feeds
/// output position i.
fn permute_pixels(src: &[u8], src_width: usize, region: Region, lanes: [usize; 3], out: &mut [u8]) {
    let src_stride = src_width * 3;

    for (y, out_row) in out.chunks_exact_mut(region.width() * 3).enumerate() {
        let start = (region.y() + y) * src_stride + region.x() * 3;
        let src_row = &src[start..start + region.width() * 3];

        for (out_pix, src_pix) in out_row.chunks_exact_mut(3).zip(src_row.chunks_exact(3)) {
            out_pix[0] = src_pix[lanes[0]];
            out_pix[1] = src_pix[lanes[1]];
            out_pix[2] = src_pix[lanes[2]];
        }
    }
}

/// Merge three equally typed planes into interleaved pixels.
///
/// `lanes[i]` names the plane that feeds position i of every output
/// pixel.
fn merge_planes<T: Sample>(
    planes: &[PixelBuffer], src_width: usize, region: Region, lanes: [usize; 3],
    out: &mut PixelBuffer
) -> Result<(), ConvertErrors> {
    let first = planes[lanes[0]].reinterpret_as::<T>()?;
    let second = planes[lanes[1]].reinterpret_as::<T>()?;
    let third = planes[lanes[2]].reinterpret_as::<T>()?;
    let out = out.reinterpret_as_mut::<T>()?;

    for (y, out_row) in out.chunks_exact_mut(region.width() * 3).enumerate() {
        let start = (region.y() + y) * src_width + region.x();
        let end = start + region.width();

        let first_row = &first[start..end];
        let second_row = &second[start..end];
        let third_row = &third[start..end];

        for (((pix, a), b), c) in out_row
            .chunks_exact_mut(3)
            .zip(first_row.iter())
            .zip(second_row.iter())
            .zip(third_row.iter())
        {
            pix[0] = *a;
            pix[1] = *b;
            pix[2] = *c;
        }
    }
    Ok(())
}
