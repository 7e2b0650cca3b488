//! Shared utilities for climate-probe

use crate::error::Error;
use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::value::RawValue;

/// Serialize a reading the way the JSON consumers of this tool expect:
/// shortest round-trip digits, plain decimal notation for magnitudes in
/// [1e-6, 1e21) and exponent notation (`1e-7`, `1e+21`) outside it.
/// NaN and infinities are rejected.
pub fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = format_number(*value)
        .ok_or_else(|| S::Error::custom(format!("unsupported value: {}", value)))?;
    RawValue::from_string(text)
        .map_err(S::Error::custom)?
        .serialize(serializer)
}

/// JSON text for a finite number, `None` for NaN and infinities
pub fn format_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let abs = value.abs();
    if abs == 0.0 || (1e-6..1e21).contains(&abs) {
        return Some(value.to_string());
    }

    let text = format!("{:e}", value);
    Some(match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    })
}

/// Widen a driver `f32` through its shortest decimal form, so 60.2f32 stays 60.2
pub fn widen(value: f32) -> f64 {
    value
        .to_string()
        .parse()
        .unwrap_or_else(|_| f64::from(value))
}

/// Create a sensor error
pub fn sensor_error(cause: impl std::fmt::Display) -> Error {
    Error::Sensor(cause.to_string())
}
