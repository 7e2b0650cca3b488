//! Sensors module - read-only acquisition: CPU thermal zone and environmental sensor

pub mod cpu;
pub mod environment;
