//! Synthetic barometer for running the altimeter without hardware.

use std::time::{Duration, Instant};

use altimeter_core::sensors::{PressureSource, SensorError};

/// Generates pressure readings that drift slowly around a base pressure.
///
/// Readings are produced at a fixed cadence while subscribed, mimicking a
/// platform sensor service.
pub struct SyntheticBarometer {
    base_pressure_hpa: f64,
    interval: Duration,
    /// Monotonic seconds counter used as the waveform's clock
    elapsed_secs: f64,
    last_sample: Option<Instant>,
}

impl SyntheticBarometer {
    pub fn new(base_pressure_hpa: f64, interval: Duration) -> Self {
        Self {
            base_pressure_hpa,
            interval,
            elapsed_secs: 0.0,
            last_sample: None,
        }
    }

    /// Advance the internal clock and return a new sample.
    fn next_sample(&mut self, dt_secs: f64) -> f64 {
        self.elapsed_secs += dt_secs;
        let t = self.elapsed_secs;

        // A few hPa of slow swell plus a little jitter, roughly ±30 m
        self.base_pressure_hpa + 3.0 * (t / 90.0).sin() + 0.3 * (t / 7.0).cos()
    }
}

impl PressureSource for SyntheticBarometer {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn is_present(&self) -> bool {
        true
    }

    fn subscribe(&mut self) -> Result<(), SensorError> {
        self.last_sample = Some(Instant::now());
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.last_sample = None;
    }

    fn poll(&mut self) -> Result<Option<f64>, SensorError> {
        let Some(last) = self.last_sample else {
            return Ok(None);
        };

        let elapsed = last.elapsed();
        if elapsed < self.interval {
            return Ok(None);
        }

        self.last_sample = Some(Instant::now());
        Ok(Some(self.next_sample(elapsed.as_secs_f64())))
    }
}
