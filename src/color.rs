//! Pixel color and its wire encoding.

use core::num::NonZeroU8;

use crate::registers::BYTES_PER_PIXEL;

/// 24-bit color with one byte per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` color (as produced by a color picker).
    ///
    /// Bits above 23 are ignored.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    pub const fn to_packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Bytes sent to the strip for this color.
    ///
    /// The strip expects green, red, blue order. Each channel is divided by
    /// `brightness` and truncated.
    pub const fn wire_bytes(self, brightness: NonZeroU8) -> [u8; BYTES_PER_PIXEL] {
        let d = brightness.get();
        [self.g / d, self.r / d, self.b / d]
    }
}

impl From<u32> for Rgb {
    fn from(packed: u32) -> Self {
        Rgb::from_packed(packed)
    }
}
