//! Errors produced by the conversion engine.
//!
//! Conversions are synchronous and all or nothing, an error means no
//! output was produced. The top level [`ConvertErrors`] splits into
//! unsupported formats, malformed arguments and exhausted resources,
//! with detail enums carrying the specifics.
use std::fmt::{Debug, Display, Formatter};

use rastermat_core::region::Region;
use rastermat_core::sample::SampleType;

use crate::buffer::BufferErrors;

/// Format combinations the engine does not convert
pub enum FormatErrors {
    /// The channel count is not supported
    ///
    /// The only supported counts are `1` and `3`
    UnsupportedChannelCount(usize),
    /// No supported sample type matches the described storage
    ///
    /// # Arguments
    /// - 1st argument is the bit width of the storage
    /// - 2nd argument is whether the storage is floating point
    UnsupportedSampleType(usize, bool),
    /// Bit packed storage uses an element width the unpacker does not
    /// handle
    UnsupportedPackedElement(SampleType)
}

impl Debug for FormatErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatErrors::UnsupportedChannelCount(count) => {
                writeln!(f, "Unsupported channel count {count}, expected either 1 or 3")
            }
            FormatErrors::UnsupportedSampleType(bits, float) => {
                let kind = if *float { "float" } else { "integral" };
                writeln!(f, "No supported sample type for {bits} bit {kind} storage")
            }
            FormatErrors::UnsupportedPackedElement(sample_type) => {
                writeln!(
                    f,
                    "Bit packed storage must use 8, 16 or 32 bit integral elements, found {sample_type:?}"
                )
            }
        }
    }
}

/// Malformed descriptors, buffers and windows
pub enum ArgumentErrors {
    /// A width or height of zero was passed
    ZeroDimension,
    /// The requested window does not fit inside the source image
    ///
    /// # Arguments
    /// - 1st argument is the offending window
    /// - 2nd and 3rd arguments are the source width and height
    RegionOutOfBounds(Region, usize, usize),
    /// A buffer holds a different number of samples than the image
    /// geometry requires
    WrongBufferLength(usize, usize),
    /// The number of band offsets does not match the channel count
    WrongOffsetCount(usize, usize),
    /// A band offset points outside the pixel stride
    OffsetOutOfRange(usize, usize),
    /// Two bands share the same offset inside the pixel
    DuplicateOffset(usize),
    /// The number of planes does not match the channel count
    WrongPlaneCount(usize, usize),
    /// Planes carry more than one sample type
    MixedPlaneTypes(SampleType, SampleType),
    /// The image geometry overflows addressable memory
    DimensionOverflow
}

impl Debug for ArgumentErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentErrors::ZeroDimension => {
                writeln!(f, "Image dimensions must be greater than zero")
            }
            ArgumentErrors::RegionOutOfBounds(region, width, height) => {
                writeln!(
                    f,
                    "Region {region:?} does not fit in a {width}x{height} image"
                )
            }
            ArgumentErrors::WrongBufferLength(expected, found) => {
                writeln!(
                    f,
                    "Expected a buffer of {expected} samples but found {found}"
                )
            }
            ArgumentErrors::WrongOffsetCount(expected, found) => {
                writeln!(f, "Expected {expected} band offsets but found {found}")
            }
            ArgumentErrors::OffsetOutOfRange(offset, channels) => {
                writeln!(
                    f,
                    "Band offset {offset} does not fit in a pixel stride of {channels}"
                )
            }
            ArgumentErrors::DuplicateOffset(offset) => {
                writeln!(f, "Band offset {offset} is used by more than one band")
            }
            ArgumentErrors::WrongPlaneCount(expected, found) => {
                writeln!(f, "Expected {expected} planes but found {found}")
            }
            ArgumentErrors::MixedPlaneTypes(first, found) => {
                writeln!(f, "Plane sample types differ, found {found:?} after {first:?}")
            }
            ArgumentErrors::DimensionOverflow => {
                writeln!(f, "Image geometry overflows usize")
            }
        }
    }
}

/// All errors the conversion engine can produce
pub enum ConvertErrors {
    /// The source or destination format is outside the supported set
    UnsupportedFormat(FormatErrors),
    /// A descriptor, buffer or window argument is malformed
    InvalidArgument(ArgumentErrors),
    /// Destination storage could not be allocated
    ///
    /// The argument is the byte count that was requested
    ResourceExhausted(usize),
    /// A buffer fault surfaced while converting
    BufferErrors(BufferErrors)
}

impl Debug for ConvertErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertErrors::UnsupportedFormat(error) => {
                writeln!(f, "Unsupported format: {:?}", error)
            }
            ConvertErrors::InvalidArgument(error) => {
                writeln!(f, "Invalid argument: {:?}", error)
            }
            ConvertErrors::ResourceExhausted(bytes) => {
                writeln!(f, "Could not allocate {bytes} bytes for the destination")
            }
            ConvertErrors::BufferErrors(error) => {
                writeln!(f, "Buffer error: {:?}", error)
            }
        }
    }
}

impl Display for FormatErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl Display for ArgumentErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl Display for ConvertErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for FormatErrors {}

impl std::error::Error for ArgumentErrors {}

impl std::error::Error for ConvertErrors {}

impl From<FormatErrors> for ConvertErrors {
    fn from(error: FormatErrors) -> Self {
        ConvertErrors::UnsupportedFormat(error)
    }
}

impl From<ArgumentErrors> for ConvertErrors {
    fn from(error: ArgumentErrors) -> Self {
        ConvertErrors::InvalidArgument(error)
    }
}

impl From<BufferErrors> for ConvertErrors {
    fn from(error: BufferErrors) -> Self {
        match error {
            // a failed destination allocation is a resource problem,
            // not a buffer fault
            BufferErrors::AllocationFailed(bytes) => ConvertErrors::ResourceExhausted(bytes),
            other => ConvertErrors::BufferErrors(other)
        }
    }
}
