//! Bus configuration for [`XtronModules`](crate::XtronModules).

use core::num::NonZeroU8;

use crate::error::ModuleError;
use crate::registers::{
    DEFAULT_LED_BRIGHTNESS, MAX_ADDRESS, MODULE_COUNT, POTENTIOMETER_ADDRESS, RGB_TOUCH_ADDRESS,
    SEGMENT_ADDRESS, SERVO_ADDRESS, SOIL_ADDRESS, SONAR_ADDRESS,
};
use crate::selectors::{ModuleIndex, Peripheral};

/// Base addresses and output tuning.
///
/// [`ModuleConfig::default()`] reproduces the factory addresses of every
/// board and the stock LED attenuation. Override fields when boards have
/// been re-strapped, or to point the driver at a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleConfig {
    /// Ultrasonic + loudness sensor. Default: 0x58.
    pub sonar_address: u8,
    /// Servo controller. Default: 0x74.
    pub servo_address: u8,
    /// 7-segment display / climate sensor. Default: 0x6C.
    pub segment_address: u8,
    /// RGB strip / touch keys. Default: 0x4C.
    pub rgb_touch_address: u8,
    /// Potentiometer. Default: 0x60.
    pub potentiometer_address: u8,
    /// Soil moisture probe. Default: 0x48.
    pub soil_address: u8,
    /// Divisor applied to every color channel. Default: 8.
    pub led_brightness: NonZeroU8,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            sonar_address: SONAR_ADDRESS,
            servo_address: SERVO_ADDRESS,
            segment_address: SEGMENT_ADDRESS,
            rgb_touch_address: RGB_TOUCH_ADDRESS,
            potentiometer_address: POTENTIOMETER_ADDRESS,
            soil_address: SOIL_ADDRESS,
            led_brightness: match NonZeroU8::new(DEFAULT_LED_BRIGHTNESS) {
                Some(v) => v,
                None => NonZeroU8::MIN,
            },
        }
    }
}

impl ModuleConfig {
    /// Configured base address for a peripheral kind.
    pub fn base_address(&self, peripheral: Peripheral) -> u8 {
        match peripheral {
            Peripheral::Sonar => self.sonar_address,
            Peripheral::Servo => self.servo_address,
            Peripheral::Segment => self.segment_address,
            Peripheral::RgbTouch => self.rgb_touch_address,
            Peripheral::Potentiometer => self.potentiometer_address,
            Peripheral::Soil => self.soil_address,
        }
    }

    /// Effective address of one module.
    pub fn address(&self, peripheral: Peripheral, module: ModuleIndex) -> u8 {
        module.address(self.base_address(peripheral))
    }

    /// Check that every module of every kind lands in the 7-bit space.
    ///
    /// # Errors
    /// [`ModuleError::AddressOutOfRange`] if `base + 3 > 0x7F` for any kind.
    pub fn validate<E>(&self) -> Result<(), ModuleError<E>> {
        let highest = MODULE_COUNT - 1;
        for peripheral in Peripheral::ALL {
            let base = self.base_address(peripheral);
            if base > MAX_ADDRESS - highest {
                return Err(ModuleError::AddressOutOfRange);
            }
        }
        Ok(())
    }
}
