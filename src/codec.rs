//! Pure scalar conversions between raw register values and physical units.
//!
//! Nothing here touches the bus. Rounding follows "round half up" (toward
//! positive infinity) throughout, which is what the module firmware's
//! reference tables were computed with. Where the result is integral the
//! arithmetic stays in integers so the outcome is exact.

use crate::registers::MEASUREMENT_SENTINEL;

/// Raw sonar units per centimetre.
pub const SONAR_UNITS_PER_CM: i32 = 58;

/// Full scale of the climate sensor's 16-bit channels.
const CLIMATE_FULL_SCALE: u32 = 65_535;

// ---------------------------------------------------------------------------
// Sonar
// ---------------------------------------------------------------------------

/// Convert a raw sonar reading to centimetres, `round(raw / 58)`.
pub fn distance_cm(raw: i16) -> i16 {
    // floor((2 * raw + 58) / 116) == floor(raw / 58 + 0.5)
    let twice = 2 * raw as i32 + SONAR_UNITS_PER_CM;
    twice.div_euclid(2 * SONAR_UNITS_PER_CM) as i16
}

// ---------------------------------------------------------------------------
// Servo
// ---------------------------------------------------------------------------

/// Pulse value for a servo angle in degrees (-90..=90).
///
/// `18.5 + 25 * angle / 180`, so -90° maps to 6.0, 0° to 18.5 and 90° to
/// 31.0. The angle is not clamped.
pub fn servo_pulse(angle: f32) -> f32 {
    18.5 + 25.0 * angle / 180.0
}

/// Byte actually written to the servo channel register.
///
/// The controller takes an integer register value, so the pulse is
/// truncated. Out-of-range angles saturate at the byte limits.
pub fn servo_register_value(angle: f32) -> u8 {
    servo_pulse(angle) as u8
}

// ---------------------------------------------------------------------------
// Climate sensor
// ---------------------------------------------------------------------------

/// Split the four climate bytes into raw temperature and humidity words.
pub fn climate_words(bytes: [u8; 4]) -> (u16, u16) {
    (
        u16::from_be_bytes([bytes[0], bytes[1]]),
        u16::from_be_bytes([bytes[2], bytes[3]]),
    )
}

/// Temperature in tenths of a degree, `round(-450 + 1750 * raw / 65535)`.
pub fn temperature_tenths(raw: u16) -> i16 {
    let scaled = (2 * 1750 * raw as u32 + CLIMATE_FULL_SCALE) / (2 * CLIMATE_FULL_SCALE);
    -450 + scaled as i16
}

/// Temperature in °C, rounded to the nearest tenth.
///
/// Rounds in tenths first and then divides by ten, so the result is the
/// `f32` closest to that tenth and formats with at most one decimal.
pub fn temperature_celsius(raw: u16) -> f32 {
    temperature_tenths(raw) as f32 / 10.0
}

/// Relative humidity in whole percent, `round(100 * raw / 65535)`.
pub fn humidity_percent(raw: u16) -> u8 {
    ((2 * 100 * raw as u32 + CLIMATE_FULL_SCALE) / (2 * CLIMATE_FULL_SCALE)) as u8
}

/// Decode a climate reading for a raw measurement selector.
///
/// `0` selects temperature, `1` humidity. Any other selector returns
/// [`MEASUREMENT_SENTINEL`] (9999).
pub fn decode_measurement(selector: u8, raw_temperature: u16, raw_humidity: u16) -> f32 {
    match selector {
        0 => temperature_celsius(raw_temperature),
        1 => humidity_percent(raw_humidity) as f32,
        _ => MEASUREMENT_SENTINEL,
    }
}

// ---------------------------------------------------------------------------
// Potentiometer
// ---------------------------------------------------------------------------

/// Knob position in percent, `clamp(round((255 - raw) * 106 / 255) - 3, 0, 100)`.
///
/// The 106/-3 stretch trims the dead zones at both ends of the track.
pub fn potentiometer_percent(raw: u8) -> u8 {
    let travel = 255 - raw as i32;
    let scaled = (2 * 106 * travel + 255) / (2 * 255);
    (scaled - 3).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── Sonar ────────────────────────────────────────────────────────

    #[test]
    fn distance_rounds_to_nearest_centimetre() {
        assert_eq!(distance_cm(0), 0);
        assert_eq!(distance_cm(28), 0);
        assert_eq!(distance_cm(29), 1); // exactly 0.5
        assert_eq!(distance_cm(58), 1);
        assert_eq!(distance_cm(5800), 100);
    }

    #[test]
    fn distance_matches_float_formula_over_full_range() {
        for raw in i16::MIN..=i16::MAX {
            let expected = (raw as f64 / 58.0 + 0.5).floor() as i16;
            assert_eq!(distance_cm(raw), expected, "raw = {}", raw);
        }
    }

    #[test]
    fn negative_half_rounds_toward_zero() {
        // round(-0.5) is 0 under half-up rounding
        assert_eq!(distance_cm(-29), 0);
        assert_eq!(distance_cm(-30), -1);
    }

    // ── Servo ────────────────────────────────────────────────────────

    #[test]
    fn servo_pulse_endpoints() {
        assert!(approx(servo_pulse(-90.0), 6.0));
        assert!(approx(servo_pulse(0.0), 18.5));
        assert!(approx(servo_pulse(90.0), 31.0));
    }

    #[test]
    fn servo_pulse_is_linear_over_range() {
        for angle in -90..=90 {
            let a = angle as f32;
            assert!(approx(servo_pulse(a), 18.5 + 25.0 * a / 180.0));
        }
    }

    #[test]
    fn servo_register_value_truncates() {
        assert_eq!(servo_register_value(0.0), 18);
        assert_eq!(servo_register_value(-90.0), 6);
        assert_eq!(servo_register_value(90.0), 31);
        // 18.5 + 25 * 45 / 180 = 24.75
        assert_eq!(servo_register_value(45.0), 24);
    }

    // ── Climate ──────────────────────────────────────────────────────

    #[test]
    fn climate_words_are_big_endian() {
        assert_eq!(climate_words([0x12, 0x34, 0xAB, 0xCD]), (0x1234, 0xABCD));
    }

    #[test]
    fn temperature_range_endpoints() {
        assert_eq!(temperature_tenths(0), -450);
        assert_eq!(temperature_tenths(65535), 1300);
        assert_eq!(temperature_celsius(0), -45.0);
        assert_eq!(temperature_celsius(65535), 130.0);
    }

    #[test]
    fn temperature_loses_sub_tenth_precision() {
        // -45 + 175 * 26000 / 65535 = 24.428...
        assert_eq!(temperature_tenths(26000), 244);
        assert_eq!(temperature_celsius(26000), 24.4);
    }

    #[test]
    fn temperature_is_closest_float_to_tenth() {
        // raw 132 and 20000 land on -44.6 and 8.4, which a multiply by 0.1
        // misses by one ulp.
        assert_eq!(temperature_celsius(132), -44.6);
        assert_eq!(temperature_celsius(20000), 8.4);
        for raw in 0..=u16::MAX {
            let expected = temperature_tenths(raw) as f32 / 10.0;
            assert_eq!(temperature_celsius(raw), expected, "raw = {}", raw);
        }
    }

    #[test]
    fn temperature_formats_with_one_decimal_at_most() {
        for raw in 0..=u16::MAX {
            let text = format!("{}", temperature_celsius(raw));
            let decimals = text.split_once('.').map_or(0, |(_, frac)| frac.len());
            assert!(decimals <= 1, "raw = {} formats as {}", raw, text);
        }
    }

    #[test]
    fn humidity_rounds_to_whole_percent() {
        assert_eq!(humidity_percent(0), 0);
        assert_eq!(humidity_percent(32767), 50);
        assert_eq!(humidity_percent(65535), 100);
    }

    #[test]
    fn measurement_selector_picks_channel() {
        assert_eq!(decode_measurement(0, 0, 65535), -45.0);
        assert_eq!(decode_measurement(1, 0, 65535), 100.0);
    }

    #[test]
    fn unknown_measurement_selector_returns_sentinel() {
        assert_eq!(decode_measurement(2, 0, 0), 9999.0);
        assert_eq!(decode_measurement(255, 1234, 5678), 9999.0);
    }

    // ── Potentiometer ────────────────────────────────────────────────

    #[test]
    fn potentiometer_clamps_both_ends() {
        assert_eq!(potentiometer_percent(0), 100);
        assert_eq!(potentiometer_percent(255), 0);
        assert_eq!(potentiometer_percent(250), 0);
    }

    #[test]
    fn potentiometer_midpoint() {
        // round(127 * 106 / 255) - 3 = round(52.79) - 3 = 50
        assert_eq!(potentiometer_percent(128), 50);
    }

    #[test]
    fn potentiometer_matches_float_formula() {
        for raw in 0..=255u8 {
            let v = ((255.0 - raw as f64) * 106.0 / 255.0 + 0.5).floor() - 3.0;
            let expected = v.clamp(0.0, 100.0) as u8;
            assert_eq!(potentiometer_percent(raw), expected, "raw = {}", raw);
        }
    }
}
