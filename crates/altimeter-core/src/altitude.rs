//! Barometric altitude model
//!
//! Converts a pressure reading in hectopascals to an altitude estimate in
//! metres using the international barometric formula:
//!
//! ```text
//! altitude = 44330 * (1 - (p / 1013.25) ^ (1 / 5.255))
//! ```
//!
//! All arithmetic is `f64` so repeated simulated deltas do not accumulate
//! rounding error.

/// Reference sea-level pressure in hPa
pub const SEA_LEVEL_PRESSURE_HPA: f64 = 1013.25;

/// Lowest pressure the simulation may reach in hPa
pub const MIN_PRESSURE_HPA: f64 = 300.0;

/// Scale height of the barometric formula in metres
pub const BAROMETRIC_SCALE_M: f64 = 44330.0;

/// Exponent of the barometric formula
pub const BAROMETRIC_EXPONENT: f64 = 5.255;

/// Estimate altitude in metres from a pressure reading in hPa.
///
/// Total over `pressure_hpa > 0`. Callers clamp the input with
/// [`clamp_pressure`] when it comes from a source that could go non-physical.
pub fn estimate_altitude(pressure_hpa: f64) -> f64 {
    let ratio = pressure_hpa / SEA_LEVEL_PRESSURE_HPA;
    BAROMETRIC_SCALE_M * (1.0 - libm::pow(ratio, 1.0 / BAROMETRIC_EXPONENT))
}

/// Apply the pressure floor.
pub fn clamp_pressure(pressure_hpa: f64) -> f64 {
    pressure_hpa.max(MIN_PRESSURE_HPA)
}
