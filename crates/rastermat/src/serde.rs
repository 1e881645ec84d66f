#![cfg(feature = "serde-support")]

//! Serialization support for image descriptions.
//!
//! Geometry and format metadata serialize, sample data does not.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::mat::Mat;
use crate::raster::{Raster, SampleLayout};

impl Serialize for Raster {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        const STRUCT_FIELDS: usize = 7;
        let mut state = serializer.serialize_struct("Raster", STRUCT_FIELDS)?;

        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("color", &self.color())?;
        state.serialize_field("sample_type", &self.sample_type())?;
        state.serialize_field("bits_per_channel", &self.bits_per_channel())?;
        state.serialize_field("band_order", &self.band_order())?;

        let layout = match self.layout() {
            SampleLayout::Interleaved { .. } => "interleaved",
            SampleLayout::Banded { .. } => "banded",
            SampleLayout::BitPacked(_) => "bit_packed"
        };
        state.serialize_field("layout", layout)?;

        state.end()
    }
}

impl Serialize for Mat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        const STRUCT_FIELDS: usize = 4;
        let mut state = serializer.serialize_struct("Mat", STRUCT_FIELDS)?;

        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("channels", &self.channels())?;
        state.serialize_field("depth", &self.depth())?;

        state.end()
    }
}
