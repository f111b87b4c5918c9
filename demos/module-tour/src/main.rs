//! Module tour
//!
//! Demonstrates the xtron-modules crate on the Raspberry Pi Pico 2. Polls
//! every sensor board once per second, logs the readings via defmt, and
//! drives the output boards from them:
//!
//! - the servo on port 1 follows the potentiometer (-90°..90°);
//! - the RGB strip turns red when an obstacle is closer than 20 cm, green
//!   otherwise, and pixel 0 turns blue while the triangle key is held;
//! - the 7-segment display shows the temperature, or the soil moisture in
//!   hex while the circle key is held.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP20       | all modules daisy-chained    |
//! | I2C0 SCL  | GP21       |                              |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use xtron_modules::{
    LedIndex, Measurement, ModuleIndex, Rgb, Scale, SubModule, TouchPoint, XtronModules,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Closer than this lights the strip red.
const OBSTACLE_CM: i16 = 20;

const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);
const GREEN: Rgb = Rgb::new(0x00, 0xFF, 0x00);
const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xFF);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- I2C bus (GP20 = SDA, GP21 = SCL) ---
    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let mut modules = XtronModules::new(i2c);
    let board = ModuleIndex::Module1;
    let first_pixel = unwrap!(LedIndex::new(0));

    info!("Module tour started");

    loop {
        // The modules sample on trigger; give the previous cycle's
        // triggers time to settle before reading again.
        Timer::after(Duration::from_millis(1000)).await;

        let distance = match modules.read_distance(board).await {
            Ok(cm) => cm,
            Err(e) => {
                error!("Sonar read failed: {}", e);
                continue;
            }
        };
        let loudness = modules.read_loudness(board).await.unwrap_or(0);
        let knob = modules.read_potentiometer(board).await.unwrap_or(50);
        let soil = modules.read_soil_moisture(board).await.unwrap_or(0);

        let temperature = modules
            .read_measurement(board, Measurement::Temperature)
            .await;
        let humidity = modules.read_humidity(board).await;

        info!(
            "distance={}cm loudness={} knob={}% soil={} temperature={} humidity={}",
            distance, loudness, knob, soil, temperature, humidity,
        );

        // Knob 0..100 % → servo -90..90°.
        let angle = knob as f32 * 1.8 - 90.0;
        if let Err(e) = modules.set_servo_angle(board, SubModule::Port1, angle).await {
            error!("Servo write failed: {}", e);
        }

        let strip = if distance < OBSTACLE_CM { RED } else { GREEN };
        if let Err(e) = modules.set_all_pixels(board, strip).await {
            error!("Strip write failed: {}", e);
        }

        if let Ok(true) = modules.is_touched(board, TouchPoint::Triangle).await {
            if let Err(e) = modules.set_pixel(board, first_pixel, BLUE).await {
                error!("Pixel write failed: {}", e);
            }
        }

        let shown = match modules.is_touched(board, TouchPoint::Circle).await {
            Ok(true) => modules
                .display_number(board, soil as f32, Scale::Hexadecimal)
                .await,
            _ => match temperature {
                Ok(t) => modules.display_number(board, t, Scale::Decimal).await,
                Err(e) => Err(e),
            },
        };
        if let Err(e) = shown {
            error!("Display write failed: {}", e);
        }
    }
}
