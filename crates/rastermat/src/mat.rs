//! Dense matrix storage.
//!
//! A matrix is the dense, row major, channel interleaved counterpart
//! of a raster: one buffer, one element type, all channels of a pixel
//! next to each other. Color matrices conventionally store their
//! channels reversed, the conversion entry points handle getting them
//! into and out of that order.
use rastermat_core::color::ColorClass;
use rastermat_core::options::ConvertOptions;
use rastermat_core::sample::MatDepth;

use crate::buffer::{PixelBuffer, Sample};
use crate::errors::{ArgumentErrors, ConvertErrors, FormatErrors};
use crate::raster::Raster;

/// Marker for Rust types that can be a dense matrix element
///
/// A subset of [`Sample`], signed bytes for example can live in a
/// raster but never in a matrix.
pub trait MatElem: Sample {
    /// The element type a matrix storing this type carries
    const DEPTH: MatDepth;
}

impl MatElem for u8 {
    const DEPTH: MatDepth = MatDepth::U8;
}

impl MatElem for u16 {
    const DEPTH: MatDepth = MatDepth::U16;
}

impl MatElem for i16 {
    const DEPTH: MatDepth = MatDepth::I16;
}

impl MatElem for i32 {
    const DEPTH: MatDepth = MatDepth::I32;
}

impl MatElem for f32 {
    const DEPTH: MatDepth = MatDepth::F32;
}

impl MatElem for f64 {
    const DEPTH: MatDepth = MatDepth::F64;
}

/// A dense, row major, channel interleaved matrix.
///
/// The buffer always holds exactly width times height times channels
/// elements of the matrix depth, there is no padding and no row
/// stride beyond the width.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mat {
    width:    usize,
    height:   usize,
    channels: usize,
    depth:    MatDepth,
    data:     PixelBuffer
}

impl Mat {
    /// Assemble a matrix from parts the conversion passes validated
    pub(crate) fn from_parts(
        width: usize, height: usize, channels: usize, depth: MatDepth, data: PixelBuffer
    ) -> Mat {
        debug_assert_eq!(data.sample_type(), depth.sample_type());
        debug_assert_eq!(data.num_samples(), width * height * channels);

        Mat {
            width,
            height,
            channels,
            depth,
            data
        }
    }

    /// Create a matrix from a slice of elements
    ///
    /// `data` must hold exactly width times height times channels
    /// elements in row major, channel interleaved order. Channel
    /// counts other than 1 and 3 are rejected.
    ///
    /// # Example
    /// ```
    /// use rastermat::mat::Mat;
    ///
    /// let mat = Mat::from_samples(2, 2, 1, &[1_u16, 2, 3, 4]).unwrap();
    /// assert_eq!(mat.samples::<u16>().unwrap(), &[1, 2, 3, 4]);
    /// ```
    pub fn from_samples<T: MatElem>(
        width: usize, height: usize, channels: usize, data: &[T]
    ) -> Result<Mat, ConvertErrors> {
        let samples = Self::checked_geometry(width, height, channels)?;

        if data.len() != samples {
            return Err(ArgumentErrors::WrongBufferLength(samples, data.len()).into());
        }
        let buffer = PixelBuffer::from_samples(data)?;

        Ok(Mat::from_parts(width, height, channels, T::DEPTH, buffer))
    }

    /// Create a matrix with every element set to `value`
    ///
    /// # Example
    /// ```
    /// use rastermat::mat::Mat;
    ///
    /// let mat = Mat::fill(7_f32, 4, 4, 3).unwrap();
    /// assert_eq!(mat.samples::<f32>().unwrap(), &[7.0; 48]);
    /// ```
    pub fn fill<T: MatElem>(
        value: T, width: usize, height: usize, channels: usize
    ) -> Result<Mat, ConvertErrors> {
        let samples = Self::checked_geometry(width, height, channels)?;

        let buffer = PixelBuffer::from_elm(samples, value)?;

        Ok(Mat::from_parts(width, height, channels, T::DEPTH, buffer))
    }

    /// Convert a raster into a dense matrix.
    ///
    /// The matrix owns a fresh buffer, the raster is never aliased or
    /// mutated. The element type follows the raster's sample type
    /// through the bit preserving mapping, see
    /// [`SampleType::mat_depth`](rastermat_core::sample::SampleType::mat_depth).
    ///
    /// # Example
    /// ```
    /// use rastermat::buffer::PixelBuffer;
    /// use rastermat::mat::Mat;
    /// use rastermat::raster::Raster;
    /// use rastermat_core::color::ColorClass;
    /// use rastermat_core::options::ConvertOptions;
    ///
    /// let data = PixelBuffer::from_samples(&[10_u8, 20, 30]).unwrap();
    /// let raster = Raster::interleaved(1, 1, ColorClass::Rgb, data, vec![0, 1, 2]).unwrap();
    ///
    /// let options = ConvertOptions::new().set_reverse_channels(true);
    /// let mat = Mat::from_raster(&raster, &options).unwrap();
    ///
    /// assert_eq!(mat.samples::<u8>().unwrap(), &[30, 20, 10]);
    /// ```
    pub fn from_raster(raster: &Raster, options: &ConvertOptions) -> Result<Mat, ConvertErrors> {
        crate::to_mat::raster_to_mat(raster, options)
    }

    /// Width of the matrix in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height of the matrix in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the matrix dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of channels interleaved per pixel, 1 or 3
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// The element type of the matrix
    pub const fn depth(&self) -> MatDepth {
        self.depth
    }

    /// The backing element buffer
    pub const fn buffer(&self) -> &PixelBuffer {
        &self.data
    }

    /// Typed view of the matrix elements
    ///
    /// Fails when `T` does not match the matrix depth
    pub fn samples<T: MatElem>(&self) -> Result<&[T], ConvertErrors> {
        Ok(self.data.reinterpret_as::<T>()?)
    }

    /// Validate a matrix geometry, returning the element count
    fn checked_geometry(
        width: usize, height: usize, channels: usize
    ) -> Result<usize, ConvertErrors> {
        if width == 0 || height == 0 {
            return Err(ArgumentErrors::ZeroDimension.into());
        }
        if ColorClass::from_channel_count(channels).is_none() {
            return Err(FormatErrors::UnsupportedChannelCount(channels).into());
        }
        width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(channels))
            .ok_or(ConvertErrors::InvalidArgument(ArgumentErrors::DimensionOverflow))
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ConvertErrors;
    use crate::mat::Mat;

    #[test]
    fn four_channels_are_rejected() {
        let mat = Mat::from_samples(2, 2, 4, &[0_u8; 16]);

        assert!(matches!(mat, Err(ConvertErrors::UnsupportedFormat(_))));
    }

    #[test]
    fn two_channels_are_rejected() {
        let mat = Mat::fill(0_u8, 2, 2, 2);

        assert!(matches!(mat, Err(ConvertErrors::UnsupportedFormat(_))));
    }

    #[test]
    fn element_count_must_match() {
        let mat = Mat::from_samples(2, 2, 3, &[0_i32; 11]);

        assert!(matches!(mat, Err(ConvertErrors::InvalidArgument(_))));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let mat = Mat::from_samples(0, 2, 1, &[0_u8; 0]);

        assert!(matches!(mat, Err(ConvertErrors::InvalidArgument(_))));
    }

    #[test]
    fn typed_views_check_the_depth() {
        let mat = Mat::from_samples(2, 1, 1, &[1_u16, 2]).unwrap();

        assert!(mat.samples::<u16>().is_ok());
        assert!(mat.samples::<i16>().is_err());
    }
}
