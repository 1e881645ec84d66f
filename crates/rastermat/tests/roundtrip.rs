/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Dense to raster and back again, bit for bit.

use core::fmt::Debug;

use nanorand::{Rng, WyRand};
use rastermat::mat::{Mat, MatElem};
use rastermat::raster::Raster;
use rastermat_core::options::ConvertOptions;

/// Push a matrix through a raster and back, expecting every bit to
/// survive.
///
/// The way back asks for the conventional reversed order, which is the
/// order the raster already stores, so the copy is order preserving
/// for every element type.
fn assert_roundtrip<T: MatElem + PartialEq + Debug>(
    samples: &[T], width: usize, height: usize, channels: usize
) {
    let mat = Mat::from_samples(width, height, channels, samples).unwrap();
    let raster = Raster::from_mat(&mat).unwrap();

    let options = ConvertOptions::new().set_reverse_channels(true);
    let back = Mat::from_raster(&raster, &options).unwrap();

    assert_eq!(mat, back);
    assert_eq!(back.samples::<T>().unwrap(), samples);
}

fn random_samples<T, F: FnMut() -> T>(count: usize, mut sample: F) -> Vec<T> {
    (0..count).map(|_| sample()).collect()
}

#[test]
fn bytes_roundtrip() {
    let mut rand = WyRand::new();

    for channels in [1, 3] {
        let samples = random_samples(31 * 17 * channels, || rand.generate::<u8>());

        assert_roundtrip(&samples, 31, 17, channels);
    }
}

#[test]
fn unsigned_shorts_roundtrip() {
    let mut rand = WyRand::new();

    for channels in [1, 3] {
        let samples = random_samples(31 * 17 * channels, || rand.generate::<u16>());

        assert_roundtrip(&samples, 31, 17, channels);
    }
}

#[test]
fn signed_shorts_roundtrip() {
    let mut rand = WyRand::new();

    for channels in [1, 3] {
        let samples = random_samples(31 * 17 * channels, || rand.generate::<i16>());

        assert_roundtrip(&samples, 31, 17, channels);
    }
}

#[test]
fn ints_roundtrip() {
    let mut rand = WyRand::new();

    for channels in [1, 3] {
        let samples = random_samples(31 * 17 * channels, || rand.generate::<i32>());

        assert_roundtrip(&samples, 31, 17, channels);
    }
}

#[test]
fn floats_roundtrip() {
    let mut rand = WyRand::new();

    for channels in [1, 3] {
        let samples = random_samples(31 * 17 * channels, || rand.generate::<f32>());

        assert_roundtrip(&samples, 31, 17, channels);
    }
}

#[test]
fn doubles_roundtrip() {
    let mut rand = WyRand::new();

    for channels in [1, 3] {
        let samples = random_samples(31 * 17 * channels, || rand.generate::<f64>());

        assert_roundtrip(&samples, 31, 17, channels);
    }
}

#[test]
fn roundtrip_keeps_the_raster_intact() {
    let mut rand = WyRand::new();

    let samples = random_samples(8 * 8 * 3, || rand.generate::<u8>());
    let mat = Mat::from_samples(8, 8, 3, &samples).unwrap();

    let raster = Raster::from_mat(&mat).unwrap();
    let pristine = raster.clone();

    let options = ConvertOptions::new().set_reverse_channels(true);
    let _ = Mat::from_raster(&raster, &options).unwrap();

    assert_eq!(raster, pristine);
}

#[test]
fn default_order_flips_color_bytes() {
    // without asking for the conventional order the way back permutes
    // the stored reversed bytes into forward order
    let mat = Mat::from_samples(1, 1, 3, &[30_u8, 20, 10]).unwrap();
    let raster = Raster::from_mat(&mat).unwrap();

    let forward = Mat::from_raster(&raster, &ConvertOptions::new()).unwrap();

    assert_eq!(forward.samples::<u8>().unwrap(), &[10, 20, 30]);
}
