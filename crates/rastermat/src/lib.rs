/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bridge between windowed per band rasters and dense matrices
//!
//! This crate converts images between two in memory families. On the
//! raster side each band may live in its own plane, share one
//! interleaved buffer with the other bands or pack one bit per pixel
//! into wider storage elements. On the matrix side there is exactly
//! one row major, channel interleaved buffer with a fixed element
//! type, the dense shape numeric code and file writers want.
//!
//! Every conversion preserves sample bit patterns, writes a freshly
//! allocated output and either finishes whole or fails with an error,
//! there are no partial results.
//!
//! # Example
//! - Convert a two pixel color raster into the conventional reversed
//!   channel order and back
//! ```
//! use rastermat::buffer::PixelBuffer;
//! use rastermat::mat::Mat;
//! use rastermat::raster::Raster;
//! use rastermat_core::color::ColorClass;
//! use rastermat_core::options::ConvertOptions;
//!
//! let data = PixelBuffer::from_samples(&[10_u8, 20, 30, 40, 50, 60]).unwrap();
//! let raster = Raster::interleaved(2, 1, ColorClass::Rgb, data, vec![0, 1, 2]).unwrap();
//!
//! let options = ConvertOptions::new().set_reverse_channels(true);
//! let mat = Mat::from_raster(&raster, &options).unwrap();
//! assert_eq!(mat.samples::<u8>().unwrap(), &[30, 20, 10, 60, 50, 40]);
//!
//! // the way back keeps the stored order and declares it
//! let back = Raster::from_mat(&mat).unwrap();
//! assert_eq!(Mat::from_raster(&back, &options).unwrap(), mat);
//! ```

#![cfg_attr(feature = "benchmarks", feature(test))]
#![warn(clippy::correctness, clippy::perf, clippy::pedantic, clippy::panic)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub extern crate rastermat_core;

mod bitpack;
pub mod buffer;
pub mod errors;
pub mod mat;
pub mod raster;
mod serde;
mod to_mat;
mod to_raster;
