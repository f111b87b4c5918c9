//! Register map and fixed constants for the Xtron module catalog.
//!
//! Every module answers on `base + module_index`, where the base address
//! depends on the peripheral kind and the index is the position of the
//! module in a chain of up to four identical boards.
//!
//! All modules share one convention: writing `CMD_TRIGGER` to
//! `REG_CONTROL` latches a fresh sample (or commits pending output), after
//! which data registers can be read.

// ---------------------------------------------------------------------------
// Default base addresses (7-bit)
// ---------------------------------------------------------------------------

/// Ultrasonic ranging + loudness sensor.
pub const SONAR_ADDRESS: u8 = 0x58;

/// Four-channel servo controller.
pub const SERVO_ADDRESS: u8 = 0x74;

/// 7-segment display with onboard temperature/humidity sensor.
pub const SEGMENT_ADDRESS: u8 = 0x6C;

/// RGB pixel strip with two capacitive touch keys.
pub const RGB_TOUCH_ADDRESS: u8 = 0x4C;

/// Rotary potentiometer.
pub const POTENTIOMETER_ADDRESS: u8 = 0x60;

/// Soil moisture probe.
pub const SOIL_ADDRESS: u8 = 0x48;

/// Highest valid 7-bit address.
pub const MAX_ADDRESS: u8 = 0x7F;

/// Number of identical modules that may be chained per peripheral kind.
pub const MODULE_COUNT: u8 = 4;

// ---------------------------------------------------------------------------
// Shared control register
// ---------------------------------------------------------------------------

/// Control register present on every module.
pub const REG_CONTROL: u8 = 0x00;

/// Value written to [`REG_CONTROL`] to trigger a measurement or commit.
pub const CMD_TRIGGER: u8 = 0x01;

// ---------------------------------------------------------------------------
// Per-module data registers
// ---------------------------------------------------------------------------

/// Sonar: raw range, signed 16-bit little-endian.
pub const REG_SONAR_RANGE: u8 = 0x01;

/// Sonar: loudness, unsigned byte.
pub const REG_SONAR_LOUDNESS: u8 = 0x03;

/// Touch strip: triangle key state.
pub const REG_TOUCH_TRIANGLE: u8 = 0x1A;

/// Touch strip: circle key state.
pub const REG_TOUCH_CIRCLE: u8 = 0x19;

/// Segment board: first of four consecutive climate bytes
/// (temperature hi/lo, humidity hi/lo).
pub const REG_CLIMATE_START: u8 = 0x05;

/// Potentiometer: raw position byte.
pub const REG_POTENTIOMETER: u8 = 0x01;

/// Soil probe: raw moisture byte.
pub const REG_SOIL: u8 = 0x01;

// ---------------------------------------------------------------------------
// Frame layout
// ---------------------------------------------------------------------------

/// Header prefixed to every bulk frame: control register, then trigger.
pub const FRAME_HEADER: [u8; 2] = [REG_CONTROL, CMD_TRIGGER];

/// Pixels on one RGB strip.
pub const PIXEL_COUNT: usize = 8;

/// Wire bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 3;

/// Full RGB frame: header plus every pixel.
pub const RGB_FRAME_LEN: usize = FRAME_HEADER.len() + PIXEL_COUNT * BYTES_PER_PIXEL;

/// Digit cells on the 7-segment display.
pub const SEGMENT_CELLS: usize = 4;

/// Full segment frame: header plus every cell.
pub const SEGMENT_FRAME_LEN: usize = FRAME_HEADER.len() + SEGMENT_CELLS;

// ---------------------------------------------------------------------------
// Encoding constants
// ---------------------------------------------------------------------------

/// Default divisor applied to each color channel before transmission.
pub const DEFAULT_LED_BRIGHTNESS: u8 = 8;

/// Segment cell flag lighting the decimal point.
pub const SEGMENT_POINT: u8 = 0x80;

/// Segment cell code for a minus sign.
pub const SEGMENT_DASH: u8 = 0x40;

/// Returned by the measurement decoder for an unknown selector.
pub const MEASUREMENT_SENTINEL: f32 = 9999.0;
