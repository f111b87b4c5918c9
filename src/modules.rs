//! High-level interface for the Xtron module catalog.
//!
//! [`XtronModules`] owns the I2C bus and exposes one method per module
//! operation. Each method resolves the module's address, performs one or
//! two register transactions and returns the decoded value.

use embedded_hal_async::i2c::I2c;
use heapless::Vec;

use crate::codec;
use crate::color::Rgb;
use crate::config::ModuleConfig;
use crate::driver::RegisterDriver;
use crate::error::ModuleError;
use crate::registers::{
    FRAME_HEADER, REG_CLIMATE_START, REG_POTENTIOMETER, REG_SOIL, REG_SONAR_LOUDNESS,
    REG_SONAR_RANGE, RGB_FRAME_LEN,
};
use crate::segment::{self, SegmentFrame};
use crate::selectors::{
    touch_register, LedIndex, Measurement, ModuleIndex, Peripheral, Scale, SubModule, TouchPoint,
};

/// Every Xtron module reachable over one I2C bus.
///
/// Sensors must be given time to settle between the trigger and the read;
/// the firmware answers with the previous sample otherwise. This driver
/// does not wait: schedule reads at the module's sample rate.
///
/// # Example
///
/// ```no_run
/// use xtron_modules::{ModuleIndex, Rgb, Scale, XtronModules};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut modules = XtronModules::new(i2c);
///
/// let cm = modules.read_distance(ModuleIndex::Module1).await.unwrap();
/// modules
///     .display_number(ModuleIndex::Module1, cm as f32, Scale::Decimal)
///     .await
///     .unwrap();
/// modules
///     .set_all_pixels(ModuleIndex::Module1, Rgb::from_packed(0x00FF00))
///     .await
///     .unwrap();
/// # }
/// ```
pub struct XtronModules<I2C> {
    driver: RegisterDriver<I2C>,
    config: ModuleConfig,
}

impl<I2C> XtronModules<I2C>
where
    I2C: I2c,
{
    /// Create a driver using the factory addresses.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access)
    pub fn new(i2c: I2C) -> Self {
        Self {
            driver: RegisterDriver::new(i2c),
            config: ModuleConfig::default(),
        }
    }

    /// Create a driver with custom addresses or LED brightness.
    ///
    /// # Errors
    /// [`ModuleError::AddressOutOfRange`] if any configured base address
    /// would put module 4 outside the 7-bit address space.
    pub fn with_config(i2c: I2C, config: ModuleConfig) -> Result<Self, ModuleError<I2C::Error>> {
        config.validate::<I2C::Error>()?;
        Ok(Self {
            driver: RegisterDriver::new(i2c),
            config,
        })
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Resolve the bus address of a module.
    pub fn address(&self, peripheral: Peripheral, module: ModuleIndex) -> u8 {
        self.config.address(peripheral, module)
    }

    /// Destroy the driver and return the I2C bus.
    pub fn release(self) -> I2C {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Ultrasonic / sound sensor
    // -----------------------------------------------------------------------

    /// Distance to the nearest obstacle in centimetres.
    ///
    /// Triggers a ranging cycle and reads the signed raw range, 58 units per
    /// centimetre.
    ///
    /// # Errors
    /// [`ModuleError::I2c`] on communication failure.
    pub async fn read_distance(
        &mut self,
        module: ModuleIndex,
    ) -> Result<i16, ModuleError<I2C::Error>> {
        let address = self.address(Peripheral::Sonar, module);
        self.driver.trigger(address).await?;
        let raw = self.driver.read_i16_le(address, REG_SONAR_RANGE).await?;
        Ok(codec::distance_cm(raw))
    }

    /// Ambient loudness, unscaled (0-255).
    pub async fn read_loudness(
        &mut self,
        module: ModuleIndex,
    ) -> Result<u8, ModuleError<I2C::Error>> {
        let address = self.address(Peripheral::Sonar, module);
        self.driver.trigger(address).await?;
        self.driver.read_u8(address, REG_SONAR_LOUDNESS).await
    }

    // -----------------------------------------------------------------------
    // Servo controller
    // -----------------------------------------------------------------------

    /// Turn the servo on `port` to `angle` degrees.
    ///
    /// The angle is expected in -90..=90 and is not clamped; see
    /// [`codec::servo_pulse`] for the mapping.
    pub async fn set_servo_angle(
        &mut self,
        module: ModuleIndex,
        port: SubModule,
        angle: f32,
    ) -> Result<(), ModuleError<I2C::Error>> {
        let address = self.address(Peripheral::Servo, module);
        let value = codec::servo_register_value(angle);
        self.driver
            .write_register(address, port.register(), value)
            .await
    }

    // -----------------------------------------------------------------------
    // RGB strip / touch keys
    // -----------------------------------------------------------------------

    /// Set all eight pixels to one color in a single frame.
    pub async fn set_all_pixels(
        &mut self,
        module: ModuleIndex,
        color: Rgb,
    ) -> Result<(), ModuleError<I2C::Error>> {
        let address = self.address(Peripheral::RgbTouch, module);
        let pixel = color.wire_bytes(self.config.led_brightness);

        let mut frame = [0u8; RGB_FRAME_LEN];
        frame[..FRAME_HEADER.len()].copy_from_slice(&FRAME_HEADER);
        for chunk in frame[FRAME_HEADER.len()..].chunks_exact_mut(pixel.len()) {
            chunk.copy_from_slice(&pixel);
        }

        self.driver.write_buffer(address, &frame).await
    }

    /// Set one pixel.
    ///
    /// Commits the strip, then writes the pixel's three color registers.
    pub async fn set_pixel(
        &mut self,
        module: ModuleIndex,
        index: LedIndex,
        color: Rgb,
    ) -> Result<(), ModuleError<I2C::Error>> {
        let address = self.address(Peripheral::RgbTouch, module);
        let [g, r, b] = color.wire_bytes(self.config.led_brightness);

        self.driver.trigger(address).await?;
        self.driver
            .write_buffer(address, &[index.register(), g, r, b])
            .await
    }

    /// Send a caller-built pixel payload behind the standard frame header.
    ///
    /// `payload` is written as-is starting at the first pixel register, so
    /// it must already be in green, red, blue order and attenuated. Layout
    /// beyond the length check is the caller's responsibility.
    ///
    /// # Errors
    /// * [`ModuleError::PayloadTooLong`] if `payload` exceeds 24 bytes
    /// * [`ModuleError::I2c`] on communication failure
    pub async fn write_pixel_buffer(
        &mut self,
        module: ModuleIndex,
        payload: &[u8],
    ) -> Result<(), ModuleError<I2C::Error>> {
        let frame = Vec::<u8, RGB_FRAME_LEN>::from_slice(&FRAME_HEADER)
            .and_then(|mut frame| frame.extend_from_slice(payload).map(|()| frame))
            .map_err(|()| ModuleError::PayloadTooLong)?;

        let address = self.address(Peripheral::RgbTouch, module);
        self.driver.write_buffer(address, &frame).await
    }

    /// Whether a touch key is currently pressed.
    pub async fn is_touched(
        &mut self,
        module: ModuleIndex,
        key: TouchPoint,
    ) -> Result<bool, ModuleError<I2C::Error>> {
        self.is_touched_raw(module, key as u8).await
    }

    /// [`is_touched`](Self::is_touched) with a raw key selector: 0 reads the
    /// triangle key, anything else the circle key.
    pub async fn is_touched_raw(
        &mut self,
        module: ModuleIndex,
        selector: u8,
    ) -> Result<bool, ModuleError<I2C::Error>> {
        let address = self.address(Peripheral::RgbTouch, module);
        self.driver.trigger(address).await?;
        let state = self.driver.read_u8(address, touch_register(selector)).await?;
        Ok(state == 1)
    }

    // -----------------------------------------------------------------------
    // 7-segment display / climate sensor
    // -----------------------------------------------------------------------

    /// Show a number on the display.
    ///
    /// In [`Scale::Decimal`] the value is formatted and encoded with
    /// [`segment::encode_decimal_value`]. If the text is rejected (more than
    /// five characters without a decimal point, or not finite) nothing is
    /// written and `Ok(())` is returned. In [`Scale::Hexadecimal`] the value
    /// is rounded, clamped to 0..=0xFFFF and shown as four hex digits.
    pub async fn display_number(
        &mut self,
        module: ModuleIndex,
        value: f32,
        scale: Scale,
    ) -> Result<(), ModuleError<I2C::Error>> {
        let frame = match scale {
            Scale::Decimal => segment::encode_decimal_value(value),
            Scale::Hexadecimal => Some(segment::encode_hex(value)),
        };
        self.write_segment_frame(module, frame).await
    }

    /// Show a preformatted decimal string.
    ///
    /// Same validation and silent skip as [`display_number`](Self::display_number).
    pub async fn display_decimal(
        &mut self,
        module: ModuleIndex,
        text: &str,
    ) -> Result<(), ModuleError<I2C::Error>> {
        self.write_segment_frame(module, segment::encode_decimal(text))
            .await
    }

    async fn write_segment_frame(
        &mut self,
        module: ModuleIndex,
        frame: Option<SegmentFrame>,
    ) -> Result<(), ModuleError<I2C::Error>> {
        let Some(frame) = frame else {
            #[cfg(feature = "defmt")]
            defmt::warn!("segment {}: value does not fit, not shown", module);
            return Ok(());
        };

        let address = self.address(Peripheral::Segment, module);
        self.driver.write_buffer(address, &frame.to_bytes()).await
    }

    /// Raw temperature and humidity words from the climate sensor.
    pub async fn read_climate_raw(
        &mut self,
        module: ModuleIndex,
    ) -> Result<(u16, u16), ModuleError<I2C::Error>> {
        let address = self.address(Peripheral::Segment, module);
        self.driver.trigger(address).await?;

        // The firmware does not auto-increment; read byte by byte.
        let mut bytes = [0u8; 4];
        for (register, byte) in (REG_CLIMATE_START..).zip(bytes.iter_mut()) {
            *byte = self.driver.read_u8(address, register).await?;
        }
        Ok(codec::climate_words(bytes))
    }

    /// Temperature in °C, rounded to a tenth.
    pub async fn read_temperature(
        &mut self,
        module: ModuleIndex,
    ) -> Result<f32, ModuleError<I2C::Error>> {
        let (raw, _) = self.read_climate_raw(module).await?;
        Ok(codec::temperature_celsius(raw))
    }

    /// Relative humidity in whole percent.
    pub async fn read_humidity(
        &mut self,
        module: ModuleIndex,
    ) -> Result<u8, ModuleError<I2C::Error>> {
        let (_, raw) = self.read_climate_raw(module).await?;
        Ok(codec::humidity_percent(raw))
    }

    /// Temperature (°C) or humidity (%) as one numeric value.
    pub async fn read_measurement(
        &mut self,
        module: ModuleIndex,
        measurement: Measurement,
    ) -> Result<f32, ModuleError<I2C::Error>> {
        self.read_measurement_raw(module, measurement as u8).await
    }

    /// [`read_measurement`](Self::read_measurement) with a raw selector.
    ///
    /// Selectors other than 0 and 1 still perform the read but return the
    /// 9999 sentinel.
    pub async fn read_measurement_raw(
        &mut self,
        module: ModuleIndex,
        selector: u8,
    ) -> Result<f32, ModuleError<I2C::Error>> {
        let (temperature, humidity) = self.read_climate_raw(module).await?;
        Ok(codec::decode_measurement(selector, temperature, humidity))
    }

    // -----------------------------------------------------------------------
    // Potentiometer / soil probe
    // -----------------------------------------------------------------------

    /// Knob position in percent (0-100).
    pub async fn read_potentiometer(
        &mut self,
        module: ModuleIndex,
    ) -> Result<u8, ModuleError<I2C::Error>> {
        let address = self.address(Peripheral::Potentiometer, module);
        self.driver.trigger(address).await?;
        let raw = self.driver.read_u8(address, REG_POTENTIOMETER).await?;
        Ok(codec::potentiometer_percent(raw))
    }

    /// Soil moisture, unscaled (0-255).
    pub async fn read_soil_moisture(
        &mut self,
        module: ModuleIndex,
    ) -> Result<u8, ModuleError<I2C::Error>> {
        let address = self.address(Peripheral::Soil, module);
        self.driver.trigger(address).await?;
        self.driver.read_u8(address, REG_SOIL).await
    }
}
