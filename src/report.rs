//! Combined JSON record printed on stdout

use crate::error::Result;
use crate::sensors::cpu::CpuReading;
use crate::sensors::environment::EnvironmentalReading;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombinedResult {
    pub cpu: CpuReading,
    pub bme280: EnvironmentalReading,
}

impl CombinedResult {
    pub fn new(cpu: CpuReading, bme280: EnvironmentalReading) -> Self {
        Self { cpu, bme280 }
    }

    /// Compact single-line JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
