//! Low-level register access shared by every module.
//!
//! Implements the three bus primitives the module firmware understands:
//! single-byte register writes, register reads (pointer write followed by a
//! repeated-start read), and raw buffer writes whose first byte is the
//! start register.
//!
//! This module is crate-private. Consumers interact with
//! [`XtronModules`](crate::XtronModules) instead.

use embedded_hal_async::i2c::I2c;

use crate::error::ModuleError;
use crate::registers::{CMD_TRIGGER, REG_CONTROL};

/// Register transport over a shared I2C bus.
///
/// Unlike a single-device driver this holds no address: one bus carries
/// every module, so each call names its target.
pub(crate) struct RegisterDriver<I2C> {
    i2c: I2C,
}

impl<I2C> RegisterDriver<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back to the caller.
    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Write one byte to a register.
    pub async fn write_register(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), ModuleError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("i2c {=u8:#x}: [{=u8:#x}] <- {=u8:#x}", address, register, value);

        self.i2c.write(address, &[register, value]).await?;
        Ok(())
    }

    /// Write a prepared buffer; `buf[0]` is the start register.
    pub async fn write_buffer(
        &mut self,
        address: u8,
        buf: &[u8],
    ) -> Result<(), ModuleError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("i2c {=u8:#x}: buffer {=[u8]:#x}", address, buf);

        self.i2c.write(address, buf).await?;
        Ok(())
    }

    /// Latch a fresh sample (sensors) or commit pending output (strip).
    pub async fn trigger(&mut self, address: u8) -> Result<(), ModuleError<I2C::Error>> {
        self.write_register(address, REG_CONTROL, CMD_TRIGGER).await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Fill `buf` starting at `register`.
    async fn read_into(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), ModuleError<I2C::Error>> {
        self.i2c.write_read(address, &[register], buf).await?;

        #[cfg(feature = "defmt")]
        defmt::trace!("i2c {=u8:#x}: [{=u8:#x}] -> {=[u8]:#x}", address, register, buf);

        Ok(())
    }

    /// Read one unsigned byte.
    pub async fn read_u8(
        &mut self,
        address: u8,
        register: u8,
    ) -> Result<u8, ModuleError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.read_into(address, register, &mut buf).await?;
        Ok(buf[0])
    }

    /// Read a signed 16-bit little-endian value.
    pub async fn read_i16_le(
        &mut self,
        address: u8,
        register: u8,
    ) -> Result<i16, ModuleError<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_into(address, register, &mut buf).await?;
        Ok(i16::from_le_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{block_on, MockI2c, Transaction};

    #[test]
    fn register_write_sends_register_then_value() {
        let mut driver = RegisterDriver::new(MockI2c::new());
        block_on(driver.write_register(0x74, 2, 18)).unwrap();

        let bus = driver.release();
        assert_eq!(bus.log, [Transaction::Write(0x74, vec![2, 18])]);
    }

    #[test]
    fn trigger_writes_control_register() {
        let mut driver = RegisterDriver::new(MockI2c::new());
        block_on(driver.trigger(0x58)).unwrap();

        let bus = driver.release();
        assert_eq!(bus.log, [Transaction::Write(0x58, vec![0x00, 0x01])]);
    }

    #[test]
    fn i16_read_is_little_endian() {
        let mut bus = MockI2c::new();
        bus.set_registers(0x58, 0x01, &[0x34, 0x12]);
        let mut driver = RegisterDriver::new(bus);

        assert_eq!(block_on(driver.read_i16_le(0x58, 0x01)).unwrap(), 0x1234);

        let bus = driver.release();
        assert_eq!(bus.log, [Transaction::WriteRead(0x58, 0x01, 2)]);
    }

    #[test]
    fn i16_read_is_signed() {
        let mut bus = MockI2c::new();
        bus.set_registers(0x58, 0x01, &[0xFE, 0xFF]);
        let mut driver = RegisterDriver::new(bus);

        assert_eq!(block_on(driver.read_i16_le(0x58, 0x01)).unwrap(), -2);
    }

    #[test]
    fn bus_error_propagates() {
        let mut bus = MockI2c::new();
        bus.fail_with(embedded_hal_async::i2c::ErrorKind::Bus);
        let mut driver = RegisterDriver::new(bus);

        let result = block_on(driver.read_u8(0x60, 0x01));
        assert_eq!(result, Err(ModuleError::I2c(embedded_hal_async::i2c::ErrorKind::Bus)));
    }
}
