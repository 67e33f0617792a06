use super::{PressureSource, SensorError};

/// Stand-in for devices without a barometer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSensor;

impl PressureSource for NoSensor {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_present(&self) -> bool {
        false
    }

    fn subscribe(&mut self) -> Result<(), SensorError> {
        Err(SensorError::NotPresent)
    }

    fn unsubscribe(&mut self) {}

    fn poll(&mut self) -> Result<Option<f64>, SensorError> {
        Ok(None)
    }
}
