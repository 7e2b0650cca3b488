//! CPU temperature from the SoC thermal zone

use crate::error::{Error, Result};
use crate::shared::serialize_number;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Default thermal zone exposed by the kernel, in milli-degrees Celsius
pub const DEFAULT_THERMAL_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpuReading {
    #[serde(serialize_with = "serialize_number")]
    pub temperature: f64,
}

impl CpuReading {
    /// Build a reading from the raw thermal zone value (milli-degrees)
    pub fn from_millidegrees(raw: f64) -> Self {
        Self {
            temperature: raw / 1000.0,
        }
    }
}

/// Parse the content of a thermal zone file
pub fn parse_cpu_temperature(content: &str) -> Result<CpuReading> {
    let trimmed = content.trim();
    let raw: f64 = trimmed.parse().map_err(|source| Error::Parse {
        content: trimmed.to_string(),
        source,
    })?;

    Ok(CpuReading::from_millidegrees(raw))
}

/// Read and convert the CPU temperature at `path`
pub fn read_cpu_temperature(path: &Path) -> Result<CpuReading> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let reading = parse_cpu_temperature(&content)?;
    tracing::debug!("CPU temperature {}°C from {:?}", reading.temperature, path);
    Ok(reading)
}
