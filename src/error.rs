//! Error types for the module driver.

use core::fmt;

/// Errors that can occur when talking to a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleError<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// Raw pixel payload does not fit in one RGB frame.
    PayloadTooLong,

    /// A configured base address would leave the 7-bit space for the
    /// highest module index.
    AddressOutOfRange,
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for ModuleError<E> {
    fn from(error: E) -> Self {
        ModuleError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for ModuleError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModuleError::I2c(e) => write!(f, "I2C error: {:?}", e),
            ModuleError::PayloadTooLong => write!(f, "Pixel payload exceeds 24 bytes"),
            ModuleError::AddressOutOfRange => {
                write!(f, "Base address leaves the 7-bit range for module 4")
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for ModuleError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ModuleError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            ModuleError::PayloadTooLong => defmt::write!(f, "Pixel payload too long"),
            ModuleError::AddressOutOfRange => defmt::write!(f, "Base address out of range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct BusFault;

    #[test]
    fn raw_bus_error_lifts_into_i2c_variant() {
        let err: ModuleError<BusFault> = BusFault.into();
        assert_eq!(err, ModuleError::I2c(BusFault));
    }

    #[test]
    fn display_names_the_failure() {
        let err: ModuleError<BusFault> = ModuleError::I2c(BusFault);
        assert_eq!(format!("{}", err), "I2C error: BusFault");

        let err: ModuleError<BusFault> = ModuleError::PayloadTooLong;
        assert_eq!(format!("{}", err), "Pixel payload exceeds 24 bytes");
    }
}
