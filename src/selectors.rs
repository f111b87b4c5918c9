//! Closed selector types for addressing modules, channels and registers.
//!
//! Each selector wraps a small ordinal. Enum variants make the valid range
//! unrepresentable to violate; `TryFrom<u8>` is provided for callers that
//! receive raw numbers (e.g. from a host protocol or a config file).

use core::fmt;

use crate::registers::{BYTES_PER_PIXEL, MODULE_COUNT, PIXEL_COUNT, REG_TOUCH_CIRCLE, REG_TOUCH_TRIANGLE};

/// Raw value rejected by a selector conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidSelector(pub u8);

impl fmt::Display for InvalidSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Selector value {} out of range", self.0)
    }
}

/// Position of a module in a chain of identical boards.
///
/// The index is added to the peripheral's base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ModuleIndex {
    Module1 = 0,
    Module2 = 1,
    Module3 = 2,
    Module4 = 3,
}

impl ModuleIndex {
    /// Every module position, in address order.
    pub const ALL: [ModuleIndex; MODULE_COUNT as usize] = [
        ModuleIndex::Module1,
        ModuleIndex::Module2,
        ModuleIndex::Module3,
        ModuleIndex::Module4,
    ];

    /// Offset added to the base address.
    pub const fn offset(self) -> u8 {
        self as u8
    }

    /// Effective 7-bit address of this module for a given base.
    ///
    /// Wraps past `0xFF`; only bases accepted by
    /// [`ModuleConfig::validate`](crate::ModuleConfig::validate) give a
    /// meaningful address.
    pub const fn address(self, base: u8) -> u8 {
        base.wrapping_add(self.offset())
    }
}

impl TryFrom<u8> for ModuleIndex {
    type Error = InvalidSelector;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ModuleIndex::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidSelector(value))
    }
}

/// Output channel on a multi-channel module (servo port 1-4).
///
/// The ordinal doubles as the channel's register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SubModule {
    Port1 = 1,
    Port2 = 2,
    Port3 = 3,
    Port4 = 4,
}

impl SubModule {
    pub const fn register(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SubModule {
    type Error = InvalidSelector;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SubModule::Port1),
            2 => Ok(SubModule::Port2),
            3 => Ok(SubModule::Port3),
            4 => Ok(SubModule::Port4),
            other => Err(InvalidSelector(other)),
        }
    }
}

/// Pixel position on the RGB strip (0-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedIndex(u8);

impl LedIndex {
    /// Returns `None` if `index >= 8`.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < PIXEL_COUNT {
            Some(LedIndex(index))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Register of the pixel's first color byte.
    ///
    /// Pixel data starts right after the control register, three bytes per
    /// pixel: `3 * index + 1`.
    pub const fn register(self) -> u8 {
        BYTES_PER_PIXEL as u8 * self.0 + 1
    }
}

impl TryFrom<u8> for LedIndex {
    type Error = InvalidSelector;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        LedIndex::new(value).ok_or(InvalidSelector(value))
    }
}

/// Touch key on the RGB strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TouchPoint {
    /// The "◁" key.
    Triangle = 0,
    /// The "◯" key.
    Circle = 1,
}

impl TouchPoint {
    pub const fn register(self) -> u8 {
        touch_register(self as u8)
    }
}

impl TryFrom<u8> for TouchPoint {
    type Error = InvalidSelector;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TouchPoint::Triangle),
            1 => Ok(TouchPoint::Circle),
            other => Err(InvalidSelector(other)),
        }
    }
}

/// State register for a raw touch selector: 0 reads the triangle key, any
/// other value the circle key.
pub const fn touch_register(selector: u8) -> u8 {
    if selector == 0 {
        REG_TOUCH_TRIANGLE
    } else {
        REG_TOUCH_CIRCLE
    }
}

/// Quantity read from the segment board's climate sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Measurement {
    Temperature = 0,
    Humidity = 1,
}

impl TryFrom<u8> for Measurement {
    type Error = InvalidSelector;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Measurement::Temperature),
            1 => Ok(Measurement::Humidity),
            other => Err(InvalidSelector(other)),
        }
    }
}

/// Number base used by the 7-segment display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scale {
    Decimal,
    Hexadecimal,
}

/// Peripheral kind, selecting which configured base address applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    Sonar,
    Servo,
    Segment,
    RgbTouch,
    Potentiometer,
    Soil,
}

impl Peripheral {
    pub const ALL: [Peripheral; 6] = [
        Peripheral::Sonar,
        Peripheral::Servo,
        Peripheral::Segment,
        Peripheral::RgbTouch,
        Peripheral::Potentiometer,
        Peripheral::Soil,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_index_offsets_base_address() {
        assert_eq!(ModuleIndex::Module1.address(0x58), 0x58);
        assert_eq!(ModuleIndex::Module4.address(0x58), 0x5B);
        assert_eq!(ModuleIndex::Module3.address(0x74), 0x76);
    }

    #[test]
    fn module_address_wraps_past_byte_range() {
        assert_eq!(ModuleIndex::Module4.address(0xFE), 0x01);
        assert_eq!(ModuleIndex::Module2.address(0xFF), 0x00);
    }

    #[test]
    fn module_index_from_raw() {
        assert_eq!(ModuleIndex::try_from(2), Ok(ModuleIndex::Module3));
        assert_eq!(ModuleIndex::try_from(4), Err(InvalidSelector(4)));
    }

    #[test]
    fn sub_module_is_one_based() {
        assert_eq!(SubModule::Port1.register(), 1);
        assert_eq!(SubModule::Port4.register(), 4);
        assert_eq!(SubModule::try_from(0), Err(InvalidSelector(0)));
        assert_eq!(SubModule::try_from(3), Ok(SubModule::Port3));
        assert_eq!(SubModule::try_from(5), Err(InvalidSelector(5)));
    }

    #[test]
    fn led_index_bounds_and_register() {
        assert!(LedIndex::new(8).is_none());
        assert_eq!(LedIndex::new(0).map(LedIndex::register), Some(1));
        assert_eq!(LedIndex::new(7).map(LedIndex::register), Some(22));
        assert_eq!(LedIndex::try_from(9), Err(InvalidSelector(9)));
    }

    #[test]
    fn touch_selector_zero_reads_triangle_register() {
        assert_eq!(touch_register(0), 0x1A);
        assert_eq!(touch_register(1), 0x19);
        assert_eq!(touch_register(200), 0x19);
        assert_eq!(TouchPoint::Triangle.register(), 0x1A);
        assert_eq!(TouchPoint::Circle.register(), 0x19);
    }

    #[test]
    fn measurement_from_raw() {
        assert_eq!(Measurement::try_from(0), Ok(Measurement::Temperature));
        assert_eq!(Measurement::try_from(1), Ok(Measurement::Humidity));
        assert_eq!(Measurement::try_from(2), Err(InvalidSelector(2)));
    }
}
