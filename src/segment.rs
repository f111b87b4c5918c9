//! Frame encoding for the four-digit 7-segment display.
//!
//! A frame is the 2-byte header followed by one code per cell, left to
//! right. In decimal mode a cell holds a digit value (0-9), optionally OR'd
//! with [`SEGMENT_POINT`], or [`SEGMENT_DASH`] for a minus sign. In
//! hexadecimal mode a cell holds a nibble (0x0-0xF).

use core::fmt::Write;

use heapless::String;

use crate::registers::{FRAME_HEADER, SEGMENT_CELLS, SEGMENT_DASH, SEGMENT_FRAME_LEN, SEGMENT_POINT};

/// Longest string form accepted without a decimal point.
pub const MAX_DECIMAL_CHARS: usize = 5;

/// Largest value shown in hexadecimal mode.
pub const MAX_HEX_VALUE: u16 = 0xFFFF;

/// Encoded contents of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentFrame {
    pub cells: [u8; SEGMENT_CELLS],
}

impl SegmentFrame {
    /// All cells zero.
    pub const fn blank() -> Self {
        Self {
            cells: [0; SEGMENT_CELLS],
        }
    }

    /// Bytes written to the display in one buffer write.
    pub fn to_bytes(&self) -> [u8; SEGMENT_FRAME_LEN] {
        let mut buf = [0u8; SEGMENT_FRAME_LEN];
        buf[..FRAME_HEADER.len()].copy_from_slice(&FRAME_HEADER);
        buf[FRAME_HEADER.len()..].copy_from_slice(&self.cells);
        buf
    }
}

impl Default for SegmentFrame {
    fn default() -> Self {
        Self::blank()
    }
}

/// Whether the display accepts `text` in decimal mode.
///
/// Up to five characters are always accepted. Longer strings are accepted
/// as soon as they contain a `.` anywhere, without looking at their length
/// or content. Such strings may not fit in four cells; see
/// [`encode_decimal`] for how the excess is dropped.
pub fn accepts_decimal(text: &str) -> bool {
    text.len() <= MAX_DECIMAL_CHARS || text.contains('.')
}

/// Encode a decimal string, or `None` if [`accepts_decimal`] rejects it.
///
/// Characters are consumed right to left into the cells, rightmost cell
/// first:
/// - a digit becomes its value;
/// - a `.` is folded into the character before it, which is encoded as a
///   digit with [`SEGMENT_POINT`] set (a leading `.` lights only the point);
/// - a `-` becomes [`SEGMENT_DASH`].
///
/// When the string holds more than four cells' worth of characters the
/// leftmost ones are dropped.
pub fn encode_decimal(text: &str) -> Option<SegmentFrame> {
    if !accepts_decimal(text) {
        return None;
    }

    let mut frame = SegmentFrame::blank();
    let bytes = text.as_bytes();
    let mut i = bytes.len();
    let mut cell = SEGMENT_CELLS;

    while i > 0 && cell > 0 {
        i -= 1;
        let code = match bytes[i] {
            b'.' => {
                if i > 0 {
                    i -= 1;
                    digit_code(bytes[i]) | SEGMENT_POINT
                } else {
                    SEGMENT_POINT
                }
            }
            b'-' => SEGMENT_DASH,
            c => digit_code(c),
        };
        cell -= 1;
        frame.cells[cell] = code;
    }

    #[cfg(feature = "defmt")]
    if i > 0 {
        defmt::warn!("segment: {} leading chars of {=str} dropped", i, text);
    }

    Some(frame)
}

/// Format `value` the way it is shown on the display and encode it.
///
/// Integral values print without a fractional part (`3.0` → `"3"`), other
/// values use the shortest representation that round-trips. Negative zero
/// is shown as `0`. Non-finite values are rejected.
pub fn encode_decimal_value(value: f32) -> Option<SegmentFrame> {
    if !value.is_finite() {
        return None;
    }
    // -0.0 == 0.0, and this maps it to +0.0
    let value = if value == 0.0 { 0.0 } else { value };

    let mut text: String<48> = String::new();
    write!(text, "{}", value).ok()?;
    encode_decimal(&text)
}

/// Encode `value` as four hex nibbles, most significant first.
///
/// The value is rounded half up and clamped to `0..=0xFFFF`.
pub fn encode_hex(value: f32) -> SegmentFrame {
    let n = round_to_u16(value);
    SegmentFrame {
        cells: [
            (n >> 12) as u8 & 0x0F,
            (n >> 8) as u8 & 0x0F,
            (n >> 4) as u8 & 0x0F,
            n as u8 & 0x0F,
        ],
    }
}

fn round_to_u16(value: f32) -> u16 {
    // Add in f64 so values just under .5 do not round up onto it.
    let shifted = value as f64 + 0.5;
    if shifted >= MAX_HEX_VALUE as f64 {
        MAX_HEX_VALUE
    } else {
        // `as` saturates negatives and NaN to 0 and truncates the rest,
        // which is floor for non-negative inputs.
        shifted as u16
    }
}

fn digit_code(c: u8) -> u8 {
    c.wrapping_sub(b'0')
}
