//! Async driver for the Xtron I2C module catalog.
//!
//! This crate provides an Embassy-compatible async I2C driver for the
//! Xtron family of chainable classroom modules:
//!
//! | Module                        | Base address | Operations                         |
//! |-------------------------------|--------------|------------------------------------|
//! | Ultrasonic / sound sensor     | `0x58`       | distance, loudness                 |
//! | Servo controller (4 ports)    | `0x74`       | set angle                          |
//! | 7-segment display + climate   | `0x6C`       | show number, temperature, humidity |
//! | RGB strip (8 px) + touch keys | `0x4C`       | set pixels, touch state            |
//! | Potentiometer                 | `0x60`       | position                           |
//! | Soil moisture probe           | `0x48`       | moisture                           |
//!
//! Up to four boards of each kind can share the bus; the
//! [`ModuleIndex`] selector is added to the base address.
//!
//! # Architecture
//!
//! - **`driver`** (crate-private): register read/write primitives.
//! - **[`codec`]** and **[`segment`]**: pure conversions between raw
//!   register values and physical units or display frames. Usable without
//!   a bus.
//! - **[`XtronModules`]** (public): one method per module operation.
//!
//! # Quick start
//!
//! ```no_run
//! use xtron_modules::{Measurement, ModuleIndex, Scale, XtronModules};
//!
//! # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
//! let mut modules = XtronModules::new(i2c);
//!
//! let t = modules
//!     .read_measurement(ModuleIndex::Module1, Measurement::Temperature)
//!     .await
//!     .unwrap();
//! modules
//!     .display_number(ModuleIndex::Module1, t, Scale::Decimal)
//!     .await
//!     .unwrap();
//! # }
//! ```
//!
//! # Features
//!
//! - **`defmt`**: enable [`defmt::Format`] implementations on public types
//!   and trace logging of every bus transaction.

#![cfg_attr(not(test), no_std)]

pub mod codec;
pub mod segment;

pub use color::Rgb;
pub use config::ModuleConfig;
pub use error::ModuleError;
pub use modules::XtronModules;
pub use registers::{
    MEASUREMENT_SENTINEL, MODULE_COUNT, PIXEL_COUNT, POTENTIOMETER_ADDRESS, RGB_TOUCH_ADDRESS,
    SEGMENT_ADDRESS, SERVO_ADDRESS, SOIL_ADDRESS, SONAR_ADDRESS,
};
pub use segment::SegmentFrame;
pub use selectors::{
    InvalidSelector, LedIndex, Measurement, ModuleIndex, Peripheral, Scale, SubModule, TouchPoint,
};

mod color;
mod config;
mod driver;
mod error;
mod modules;
mod registers;
mod selectors;

#[cfg(test)]
mod mock;
