//! Live/simulated reading state
//!
//! [`ReadingController`] owns the pressure, altitude and mode shown on the
//! altimeter screen. Sensor readings are applied only in
//! [`ReadingMode::Live`]; user-issued deltas switch the controller to
//! [`ReadingMode::Simulated`] and from then on the sensor is ignored until
//! [`ReadingController::stop_simulation`] is called.
//!
//! ```text
//!            simulate()                 simulate()
//!   Live ───────────────▶ Simulated ◀──────────────┐
//!    ▲                        │  └──────────────────┘
//!    └────────────────────────┘
//!         stop_simulation()
//! ```
//!
//! Leaving simulation does not resync the values. They stay at the last
//! simulated reading until the next accepted sensor reading arrives.

use log::debug;

use crate::altitude::{SEA_LEVEL_PRESSURE_HPA, clamp_pressure, estimate_altitude};

/// Where displayed readings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingMode {
    /// Readings track the pressure sensor
    #[default]
    Live,
    /// Readings come only from user-issued deltas
    Simulated,
}

/// Snapshot of everything the display needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingState {
    pub pressure_hpa: f64,
    pub altitude_m: f64,
    pub mode: ReadingMode,
    pub sensor_available: bool,
}

impl ReadingState {
    pub fn is_simulating(&self) -> bool {
        self.mode == ReadingMode::Simulated
    }
}

/// Anything a pressure source can push readings into.
pub trait ReadingSink {
    /// Deliver one pressure reading in hPa.
    ///
    /// Returns `true` if the reading changed the sink's state.
    fn on_reading(&mut self, pressure_hpa: f64) -> bool;
}

/// Holds the current pressure, altitude and mode.
#[derive(Debug, Clone)]
pub struct ReadingController {
    state: ReadingState,
}

impl ReadingController {
    /// Create a controller at the sea-level reference (1013.25 hPa, 0 m).
    ///
    /// `sensor_available` is fixed for the lifetime of the controller.
    pub fn new(sensor_available: bool) -> Self {
        Self {
            state: ReadingState {
                pressure_hpa: SEA_LEVEL_PRESSURE_HPA,
                altitude_m: estimate_altitude(SEA_LEVEL_PRESSURE_HPA),
                mode: ReadingMode::Live,
                sensor_available,
            },
        }
    }

    pub fn state(&self) -> ReadingState {
        self.state
    }

    pub fn pressure_hpa(&self) -> f64 {
        self.state.pressure_hpa
    }

    pub fn altitude_m(&self) -> f64 {
        self.state.altitude_m
    }

    pub fn mode(&self) -> ReadingMode {
        self.state.mode
    }

    pub fn is_simulating(&self) -> bool {
        self.state.is_simulating()
    }

    pub fn sensor_available(&self) -> bool {
        self.state.sensor_available
    }

    /// Apply a reading delivered by the sensor.
    ///
    /// Ignored while simulating and when no sensor is present. Returns `true`
    /// if the reading was accepted.
    pub fn on_sensor_reading(&mut self, pressure_hpa: f64) -> bool {
        if self.state.is_simulating() || !self.state.sensor_available {
            return false;
        }

        self.set_pressure(pressure_hpa);
        true
    }

    /// Nudge the pressure by `delta_hpa` and enter simulation mode.
    ///
    /// The resulting pressure never drops below
    /// [`MIN_PRESSURE_HPA`](crate::altitude::MIN_PRESSURE_HPA).
    pub fn simulate(&mut self, delta_hpa: f64) {
        if !self.state.is_simulating() {
            debug!("Entering simulation mode");
        }
        self.state.mode = ReadingMode::Simulated;

        let pressure = clamp_pressure(self.state.pressure_hpa + delta_hpa);
        self.set_pressure(pressure);
        debug!(
            "Simulated {:+.2} hPa -> {:.2} hPa / {:.2} m",
            delta_hpa, self.state.pressure_hpa, self.state.altitude_m
        );
    }

    /// Return to live mode. Values stay as they are until the next reading.
    pub fn stop_simulation(&mut self) {
        if self.state.is_simulating() {
            debug!("Leaving simulation mode");
        }
        self.state.mode = ReadingMode::Live;
    }

    fn set_pressure(&mut self, pressure_hpa: f64) {
        self.state.pressure_hpa = pressure_hpa;
        self.state.altitude_m = estimate_altitude(pressure_hpa);
    }
}

impl Default for ReadingController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReadingSink for ReadingController {
    fn on_reading(&mut self, pressure_hpa: f64) -> bool {
        self.on_sensor_reading(pressure_hpa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altitude::MIN_PRESSURE_HPA;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_initial_state() {
        let controller = ReadingController::new(true);
        assert_close(controller.pressure_hpa(), 1013.25);
        assert_close(controller.altitude_m(), 0.0);
        assert_eq!(controller.mode(), ReadingMode::Live);
        assert!(controller.sensor_available());
    }

    #[test]
    fn test_live_reading_updates_state() {
        let mut controller = ReadingController::new(true);
        assert!(controller.on_sensor_reading(1000.0));
        assert_close(controller.pressure_hpa(), 1000.0);
        assert_close(controller.altitude_m(), estimate_altitude(1000.0));
    }

    #[test]
    fn test_reading_ignored_without_sensor() {
        let mut controller = ReadingController::new(false);
        assert!(!controller.on_sensor_reading(950.0));
        assert_close(controller.pressure_hpa(), 1013.25);
        assert_close(controller.altitude_m(), 0.0);
    }

    #[test]
    fn test_simulation_works_without_sensor() {
        let mut controller = ReadingController::new(false);
        controller.simulate(-2.0);
        assert_close(controller.pressure_hpa(), 1011.25);
        assert!(controller.is_simulating());
    }

    #[test]
    fn test_sensor_ignored_while_simulating() {
        let mut controller = ReadingController::new(true);
        controller.simulate(5.0);
        let before = controller.state();

        assert!(!controller.on_sensor_reading(900.0));
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn test_stop_simulation_when_live_is_noop() {
        let mut controller = ReadingController::new(true);
        controller.on_sensor_reading(998.0);
        let before = controller.state();

        controller.stop_simulation();
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn test_stop_simulation_keeps_values_until_next_reading() {
        let mut controller = ReadingController::new(true);
        controller.simulate(-20.0);
        controller.stop_simulation();

        assert_eq!(controller.mode(), ReadingMode::Live);
        assert_close(controller.pressure_hpa(), 993.25);

        assert!(controller.on_sensor_reading(1001.5));
        assert_close(controller.pressure_hpa(), 1001.5);
        assert_close(controller.altitude_m(), estimate_altitude(1001.5));
    }

    #[test]
    fn test_simulation_floor() {
        let mut controller = ReadingController::new(true);
        for _ in 0..5 {
            controller.simulate(-10_000.0);
            assert!(controller.pressure_hpa() >= MIN_PRESSURE_HPA);
        }
        assert_close(controller.pressure_hpa(), MIN_PRESSURE_HPA);
        assert_close(controller.altitude_m(), estimate_altitude(MIN_PRESSURE_HPA));

        // Climbing back out of the floor accumulates from the clamped value
        controller.simulate(2.0);
        assert_close(controller.pressure_hpa(), 302.0);
    }

    #[test]
    fn test_sensor_readings_are_not_clamped() {
        let mut controller = ReadingController::new(true);
        controller.on_sensor_reading(250.0);
        assert_close(controller.pressure_hpa(), 250.0);
    }

    #[test]
    fn test_end_to_end_sequence() {
        let mut controller = ReadingController::new(true);

        controller.simulate(-2.0);
        assert_eq!(controller.mode(), ReadingMode::Simulated);
        assert_close(controller.pressure_hpa(), 1011.25);
        assert!((controller.altitude_m() - 16.664).abs() < 0.01);

        controller.simulate(-2.0);
        assert_close(controller.pressure_hpa(), 1009.25);
        assert!((controller.altitude_m() - 33.355).abs() < 0.01);

        let simulated = controller.state();
        controller.stop_simulation();
        assert_eq!(controller.mode(), ReadingMode::Live);
        assert_close(controller.pressure_hpa(), simulated.pressure_hpa);
        assert_close(controller.altitude_m(), simulated.altitude_m);

        assert!(controller.on_sensor_reading(1013.25));
        assert_close(controller.pressure_hpa(), 1013.25);
        assert_close(controller.altitude_m(), 0.0);
    }

    #[test]
    fn test_reading_sink_forwards_to_controller() {
        fn deliver<S: ReadingSink>(sink: &mut S, readings: &[f64]) -> usize {
            readings.iter().filter(|p| sink.on_reading(**p)).count()
        }

        let mut controller = ReadingController::new(true);
        assert_eq!(deliver(&mut controller, &[1000.0, 1001.0]), 2);

        controller.simulate(1.0);
        assert_eq!(deliver(&mut controller, &[1000.0, 1001.0]), 0);
    }
}
