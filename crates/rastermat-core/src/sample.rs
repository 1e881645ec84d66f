//! Sample and matrix element types plus the mapping between them.
//!
//! Rasters describe their storage per band, dense matrices describe it
//! per element, and the two vocabularies do not line up one to one.
//! Signed and unsigned bytes both land in byte matrices, while unsigned
//! 16 bit samples may optionally be narrowed to signed 16 bit elements.
//! The conversions here only ever retag storage, stored bits are never
//! rewritten.

/// The storage type of a single raster sample.
///
/// Every band of a raster shares one storage type. The variants cover
/// the storage the conversion engine supports, anything else has to be
/// rejected before a raster is built, see [`SampleType::from_bit_size`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SampleType {
    /// Unsigned 8 bit samples stored in a [`u8`]
    U8,
    /// Signed 8 bit samples stored in an [`i8`]
    I8,
    /// Unsigned 16 bit samples stored in a [`u16`]
    U16,
    /// Signed 16 bit samples stored in an [`i16`]
    I16,
    /// Signed 32 bit samples stored in an [`i32`]
    I32,
    /// 32 bit IEEE-754 samples stored in an [`f32`]
    F32,
    /// 64 bit IEEE-754 samples stored in an [`f64`]
    F64
}

/// The element type of a dense matrix.
///
/// A matrix stores all of its channels interleaved in one buffer and
/// every element shares this type.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MatDepth {
    /// Unsigned 8 bit elements
    U8,
    /// Unsigned 16 bit elements
    U16,
    /// Signed 16 bit elements
    I16,
    /// Signed 32 bit elements
    I32,
    /// 32 bit float elements
    F32,
    /// 64 bit float elements
    F64
}

/// All sample types supported by the conversion engine
pub static ALL_SAMPLE_TYPES: [SampleType; 7] = [
    SampleType::U8,
    SampleType::I8,
    SampleType::U16,
    SampleType::I16,
    SampleType::I32,
    SampleType::F32,
    SampleType::F64
];

/// All matrix element types supported by the conversion engine
pub static ALL_MAT_DEPTHS: [MatDepth; 6] = [
    MatDepth::U8,
    MatDepth::U16,
    MatDepth::I16,
    MatDepth::I32,
    MatDepth::F32,
    MatDepth::F64
];

impl SampleType {
    /// Return the number of bytes one sample of this type occupies
    ///
    /// # Example
    /// ```
    /// use rastermat_core::sample::SampleType;
    /// assert_eq!(SampleType::U16.size_of(), 2);
    /// ```
    pub const fn size_of(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::I32 | Self::F32 => 4,
            Self::F64 => 8
        }
    }

    /// Return the number of bits one sample of this type occupies
    pub const fn bit_size(self) -> usize {
        self.size_of() * 8
    }

    /// Return true if samples of this type are IEEE floats
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Return true if samples of this type carry a sign,
    /// floats included
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::F32 | Self::F64)
    }

    /// Classify a storage description into a sample type.
    ///
    /// `bit_size` is the width of one sample, `float` whether the
    /// storage is an IEEE float and `signed` whether integral storage
    /// carries a sign. `signed` is ignored for floats.
    ///
    /// Returns `None` when no supported storage matches, notably for
    /// 16 bit floats, unsigned 32 bit integers and anything wider than
    /// 64 bits.
    ///
    /// # Example
    /// ```
    /// use rastermat_core::sample::SampleType;
    /// assert_eq!(SampleType::from_bit_size(16, false, true), Some(SampleType::I16));
    /// assert_eq!(SampleType::from_bit_size(16, true, false), None);
    /// ```
    pub const fn from_bit_size(bit_size: usize, float: bool, signed: bool) -> Option<SampleType> {
        match (bit_size, float, signed) {
            (8, false, false) => Some(SampleType::U8),
            (8, false, true) => Some(SampleType::I8),
            (16, false, false) => Some(SampleType::U16),
            (16, false, true) => Some(SampleType::I16),
            (32, false, true) => Some(SampleType::I32),
            (32, true, _) => Some(SampleType::F32),
            (64, true, _) => Some(SampleType::F64),
            _ => None
        }
    }

    /// Return the matrix element type samples of this type convert to.
    ///
    /// Signed bytes land in unsigned byte matrices with their bit
    /// patterns intact, everything else keeps its width and signedness.
    /// When `narrow_u16` is true unsigned 16 bit samples are tagged as
    /// signed 16 bit elements, again without touching stored bits.
    ///
    /// # Example
    /// ```
    /// use rastermat_core::sample::{MatDepth, SampleType};
    /// assert_eq!(SampleType::I8.mat_depth(false), MatDepth::U8);
    /// assert_eq!(SampleType::U16.mat_depth(true), MatDepth::I16);
    /// ```
    pub const fn mat_depth(self, narrow_u16: bool) -> MatDepth {
        match self {
            Self::U8 | Self::I8 => MatDepth::U8,
            Self::U16 => {
                if narrow_u16 {
                    MatDepth::I16
                } else {
                    MatDepth::U16
                }
            }
            Self::I16 => MatDepth::I16,
            Self::I32 => MatDepth::I32,
            Self::F32 => MatDepth::F32,
            Self::F64 => MatDepth::F64
        }
    }
}

impl MatDepth {
    /// Return the number of bytes one element of this type occupies
    pub const fn size_of(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::I32 | Self::F32 => 4,
            Self::F64 => 8
        }
    }

    /// Return the number of bits one element of this type occupies
    pub const fn bit_size(self) -> usize {
        self.size_of() * 8
    }

    /// Return the sample type matrix elements of this type convert
    /// back to.
    ///
    /// This is the exact inverse of [`SampleType::mat_depth`] over the
    /// canonical, non narrowed column: each element type maps to the
    /// storage of the same width and signedness.
    pub const fn sample_type(self) -> SampleType {
        match self {
            Self::U8 => SampleType::U8,
            Self::U16 => SampleType::U16,
            Self::I16 => SampleType::I16,
            Self::I32 => SampleType::I32,
            Self::F32 => SampleType::F32,
            Self::F64 => SampleType::F64
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sample::{MatDepth, SampleType, ALL_MAT_DEPTHS, ALL_SAMPLE_TYPES};

    #[test]
    fn mapping_round_trips_canonical_types() {
        for depth in ALL_MAT_DEPTHS {
            assert_eq!(depth.sample_type().mat_depth(false), depth);
        }
    }

    #[test]
    fn every_sample_type_has_a_depth() {
        for sample in ALL_SAMPLE_TYPES {
            let depth = sample.mat_depth(false);
            // widths always survive the mapping
            assert_eq!(sample.size_of(), depth.size_of());
        }
    }

    #[test]
    fn signed_bytes_collapse_to_unsigned() {
        assert_eq!(SampleType::I8.mat_depth(false), MatDepth::U8);
        assert_eq!(SampleType::U8.mat_depth(false), MatDepth::U8);
    }

    #[test]
    fn narrowing_only_affects_u16() {
        for sample in ALL_SAMPLE_TYPES {
            if sample == SampleType::U16 {
                assert_eq!(sample.mat_depth(true), MatDepth::I16);
            } else {
                assert_eq!(sample.mat_depth(true), sample.mat_depth(false));
            }
        }
    }

    #[test]
    fn half_floats_are_rejected() {
        assert_eq!(SampleType::from_bit_size(16, true, false), None);
        assert_eq!(SampleType::from_bit_size(16, true, true), None);
    }

    #[test]
    fn unsupported_widths_are_rejected() {
        assert_eq!(SampleType::from_bit_size(32, false, false), None);
        assert_eq!(SampleType::from_bit_size(64, false, true), None);
        assert_eq!(SampleType::from_bit_size(1, false, false), None);
    }

    #[test]
    fn classification_matches_properties() {
        for sample in ALL_SAMPLE_TYPES {
            let classified =
                SampleType::from_bit_size(sample.bit_size(), sample.is_float(), sample.is_signed());
            assert_eq!(classified, Some(sample));
        }
    }
}
