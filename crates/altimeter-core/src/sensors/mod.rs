//! Pressure sensor collaborator
//!
//! A [`PressureSource`] is whatever the platform offers as a barometer. It is
//! asked once whether it exists, and while the altimeter screen is visible it
//! is held in a [`SensorSubscription`] that delivers readings. Dropping the
//! subscription always unsubscribes, so pausing the view on any path releases
//! the listener.

mod none;

pub use none::NoSensor;

use log::{info, warn};
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    #[error("No pressure sensor present")]
    NotPresent,
    #[error("{sensor}: read failed ({details})")]
    ReadFailed {
        sensor: &'static str,
        details: &'static str,
    },
    #[error("{sensor}: rejected reading {value} hPa")]
    InvalidReading { sensor: &'static str, value: f64 },
}

/// Platform barometer.
pub trait PressureSource {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Whether a pressure sensor exists on this device.
    fn is_present(&self) -> bool;

    /// Start delivering readings.
    fn subscribe(&mut self) -> Result<(), SensorError>;

    /// Stop delivering readings. Must be safe to call when not subscribed.
    fn unsubscribe(&mut self);

    /// Take the next pending reading in hPa, if one is ready.
    fn poll(&mut self) -> Result<Option<f64>, SensorError>;
}

/// Active subscription to a [`PressureSource`].
///
/// Acquired when the view becomes visible and released when it is dropped.
pub struct SensorSubscription<'a, S: PressureSource> {
    source: &'a mut S,
}

impl<'a, S: PressureSource> SensorSubscription<'a, S> {
    /// Subscribe to `source`.
    ///
    /// Fails with [`SensorError::NotPresent`] on devices without a barometer.
    pub fn acquire(source: &'a mut S) -> Result<Self, SensorError> {
        if !source.is_present() {
            return Err(SensorError::NotPresent);
        }

        source.subscribe()?;
        info!("{}: subscribed", source.name());
        Ok(Self { source })
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Next valid reading in hPa.
    ///
    /// Non-finite and non-positive values are outside the altitude formula's
    /// domain and come back as [`SensorError::InvalidReading`].
    pub fn next_reading(&mut self) -> Result<Option<f64>, SensorError> {
        match self.source.poll()? {
            Some(value) if !value.is_finite() || value <= 0.0 => {
                warn!("{}: discarding reading {}", self.source.name(), value);
                Err(SensorError::InvalidReading {
                    sensor: self.source.name(),
                    value,
                })
            }
            reading => Ok(reading),
        }
    }
}

impl<S: PressureSource> Drop for SensorSubscription<'_, S> {
    fn drop(&mut self) {
        self.source.unsubscribe();
        info!("{}: unsubscribed", self.source.name());
    }
}
