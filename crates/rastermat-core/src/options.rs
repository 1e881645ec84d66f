//! Conversion options.

use crate::region::Region;

/// Options steering a raster to matrix conversion.
///
/// The options are a consuming builder, each setter takes the options
/// by value and hands them back
///
/// ```
/// use rastermat_core::options::ConvertOptions;
/// use rastermat_core::region::Region;
///
/// let options = ConvertOptions::new()
///     .set_region(Region::new(0, 0, 16, 16))
///     .set_reverse_channels(true);
///
/// assert!(options.get_reverse_channels());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ConvertOptions {
    region:           Option<Region>,
    reverse_channels: bool,
    narrow_u16:       bool
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            region:           None,
            reverse_channels: false,
            narrow_u16:       false
        }
    }
}

impl ConvertOptions {
    /// Create options with the conservative defaults, the full frame
    /// converted in storage channel order with no integral narrowing
    pub fn new() -> ConvertOptions {
        ConvertOptions::default()
    }

    /// Return the window to convert
    ///
    /// `None` means the full frame
    pub const fn get_region(&self) -> Option<Region> {
        self.region
    }

    /// Set the window to convert
    ///
    /// The window must lie fully inside the source image, conversion
    /// fails otherwise
    ///
    /// # Arguments
    /// - region: The window, in source pixel coordinates
    pub fn set_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Return whether output channels should be stored in the
    /// conventional reversed order
    pub const fn get_reverse_channels(&self) -> bool {
        self.reverse_channels
    }

    /// Request the conventional reversed channel order for the output
    ///
    /// Only three channel 8 bit data is reordered, every other
    /// combination passes through in storage order
    ///
    /// # Arguments
    /// - yes: Whether to reorder
    pub fn set_reverse_channels(mut self, yes: bool) -> Self {
        self.reverse_channels = yes;
        self
    }

    /// Return whether unsigned 16 bit input is narrowed
    pub const fn get_narrow_u16(&self) -> bool {
        self.narrow_u16
    }

    /// Tag unsigned 16 bit input as signed 16 bit output
    ///
    /// The stored bits are carried over unchanged, only the element
    /// type of the produced matrix differs
    ///
    /// # Arguments
    /// - yes: Whether to narrow
    pub fn set_narrow_u16(mut self, yes: bool) -> Self {
        self.narrow_u16 = yes;
        self
    }
}
