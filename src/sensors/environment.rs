//! Ambient temperature, pressure and humidity from an environmental sensor

use crate::error::Result;
use crate::shared::serialize_number;
use serde::Serialize;

/// One measurement as the driver reports it: °C, Pa, %RH
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMeasurement {
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentalReading {
    #[serde(serialize_with = "serialize_number")]
    pub temperature: f64,
    /// Hectopascals
    #[serde(serialize_with = "serialize_number")]
    pub pressure: f64,
    #[serde(serialize_with = "serialize_number")]
    pub humidity: f64,
}

impl From<RawMeasurement> for EnvironmentalReading {
    fn from(raw: RawMeasurement) -> Self {
        Self {
            temperature: raw.temperature,
            pressure: raw.pressure / 100.0,
            humidity: raw.humidity,
        }
    }
}

/// A sensor that can perform one temperature/pressure/humidity transaction
pub trait EnvironmentalSensor {
    fn measure(&mut self) -> Result<RawMeasurement>;
}

/// Take one measurement and convert it to reporting units
pub fn read_environment<S: EnvironmentalSensor>(sensor: &mut S) -> Result<EnvironmentalReading> {
    let raw = sensor.measure()?;
    tracing::debug!(
        "Sensor measured {}°C, {} Pa, {}%",
        raw.temperature,
        raw.pressure,
        raw.humidity
    );
    Ok(raw.into())
}
