//! Simulator configuration from the environment
//!
//! A `.env` file in the working directory is loaded first, so any of these
//! can live there instead of the shell:
//!
//! | Variable                       | Default  |
//! |--------------------------------|----------|
//! | `ALTIMETER_NO_SENSOR`          | `false`  |
//! | `ALTIMETER_BASE_PRESSURE_HPA`  | `1005.0` |
//! | `ALTIMETER_SAMPLE_INTERVAL_MS` | `200`    |
//! | `ALTIMETER_WINDOW_SCALE`       | `2`      |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Pretend the device has no barometer
    pub no_sensor: bool,
    /// Centre of the synthetic barometer's drift
    pub base_pressure_hpa: f64,
    /// Delay between synthetic readings
    pub sample_interval: Duration,
    /// Pixel scale factor for the simulator window
    pub window_scale: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            no_sensor: false,
            base_pressure_hpa: 1005.0,
            sample_interval: Duration::from_millis(200),
            window_scale: 2,
        }
    }
}

impl SimulatorConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            log::info!("Loaded {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let no_sensor = match lookup("ALTIMETER_NO_SENSOR") {
            Some(value) => parse_flag(&value).context("ALTIMETER_NO_SENSOR")?,
            None => defaults.no_sensor,
        };

        let base_pressure_hpa: f64 =
            parse_or("ALTIMETER_BASE_PRESSURE_HPA", &lookup, defaults.base_pressure_hpa)?;
        if !base_pressure_hpa.is_finite() || base_pressure_hpa <= 0.0 {
            bail!("ALTIMETER_BASE_PRESSURE_HPA must be a positive pressure, got {base_pressure_hpa}");
        }

        let sample_interval_ms: u64 = parse_or(
            "ALTIMETER_SAMPLE_INTERVAL_MS",
            &lookup,
            defaults.sample_interval.as_millis() as u64,
        )?;

        let window_scale: u32 = parse_or("ALTIMETER_WINDOW_SCALE", &lookup, defaults.window_scale)?;
        if window_scale == 0 {
            bail!("ALTIMETER_WINDOW_SCALE must be at least 1");
        }

        Ok(Self {
            no_sensor,
            base_pressure_hpa,
            sample_interval: Duration::from_millis(sample_interval_ms),
            window_scale,
        })
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key}: cannot parse {value:?}")),
        None => Ok(default),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
