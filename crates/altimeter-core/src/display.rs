//! Display model derived from a [`ReadingState`]
//!
//! The background darkens linearly with altitude until it bottoms out at
//! [`DARKNESS_CEILING_M`]:
//!
//! ```text
//! darkness = min(1.0, altitude / 5000.0)
//! shade    = 0.15 + 0.6 * (1 - darkness)
//! ```
//!
//! `shade` drives all three colour channels, giving a grey in `[0.15, 0.75]`
//! for non-negative altitudes.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

use crate::reading::ReadingState;

/// Altitude at which the background reaches its darkest shade
pub const DARKNESS_CEILING_M: f64 = 5000.0;

/// Shade at or above [`DARKNESS_CEILING_M`]
pub const MIN_SHADE: f64 = 0.15;

/// Shade range between sea level and the ceiling
pub const SHADE_RANGE: f64 = 0.6;

/// Capacity of a formatted reading label
pub const LABEL_CAPACITY: usize = 48;

pub const NO_SENSOR_NOTICE: &str = "No barometer detected. Using simulation only.";
pub const SIMULATION_NOTICE: &str = "SIMULATION ACTIVE";

pub type Label = heapless::String<LABEL_CAPACITY>;

/// Fraction of full darkness for the given altitude.
pub fn darkness(altitude_m: f64) -> f64 {
    (altitude_m / DARKNESS_CEILING_M).min(1.0)
}

/// Grey level of the background for the given altitude.
pub fn shade(altitude_m: f64) -> f64 {
    MIN_SHADE + SHADE_RANGE * (1.0 - darkness(altitude_m))
}

/// Background colour for the given altitude.
///
/// Below sea level the shade exceeds its nominal range; it is saturated to
/// white rather than wrapping.
pub fn background_color(altitude_m: f64) -> Rgb565 {
    let level = shade(altitude_m).clamp(0.0, 1.0);
    Rgb565::new(
        scale_channel(level, Rgb565::MAX_R),
        scale_channel(level, Rgb565::MAX_G),
        scale_channel(level, Rgb565::MAX_B),
    )
}

fn scale_channel(level: f64, max: u8) -> u8 {
    libm::round(level * max as f64) as u8
}

pub fn pressure_label(pressure_hpa: f64) -> Label {
    let mut label = Label::new();
    write!(label, "Pressure: {:.2} hPa", pressure_hpa).ok();
    label
}

pub fn altitude_label(altitude_m: f64) -> Label {
    let mut label = Label::new();
    write!(label, "Altitude: {:.2} m", altitude_m).ok();
    label
}

/// Everything the altimeter screen renders for one [`ReadingState`].
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub pressure: Label,
    pub altitude: Label,
    pub background: Rgb565,
    pub show_no_sensor_notice: bool,
    pub show_simulation_notice: bool,
    /// The stop button is only offered while simulating
    pub show_stop_button: bool,
}

impl From<&ReadingState> for DisplayModel {
    fn from(state: &ReadingState) -> Self {
        Self {
            pressure: pressure_label(state.pressure_hpa),
            altitude: altitude_label(state.altitude_m),
            background: background_color(state.altitude_m),
            show_no_sensor_notice: !state.sensor_available,
            show_simulation_notice: state.is_simulating(),
            show_stop_button: state.is_simulating(),
        }
    }
}
