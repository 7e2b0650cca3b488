//! Configuration module for the acquisition sources
//!
//! Reads configuration from ~/.config/climate-probe/config.toml

use crate::error::{Error, Result};
use crate::sensors::cpu::DEFAULT_THERMAL_PATH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// I2C address the BME280 answers on, selected by its SDO pin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorAddress {
    /// SDO to GND (0x76)
    #[default]
    Primary,
    /// SDO to VDDIO (0x77)
    Secondary,
}

impl SensorAddress {
    pub fn value(self) -> u8 {
        match self {
            SensorAddress::Primary => 0x76,
            SensorAddress::Secondary => 0x77,
        }
    }
}

/// Acquisition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Thermal zone file reporting CPU temperature in milli-degrees
    pub thermal_path: PathBuf,
    /// I2C bus number, opened as /dev/i2c-<n>
    pub i2c_bus: u32,
    pub sensor_address: SensorAddress,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thermal_path: PathBuf::from(DEFAULT_THERMAL_PATH),
            i2c_bus: 1,
            sensor_address: SensorAddress::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("climate-probe").join("config.toml"))
    }

    /// Load config from the default location, or return default if not usable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            tracing::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit file; any failure is an error
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::parse(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Device node of the configured I2C bus
    pub fn i2c_device(&self) -> PathBuf {
        PathBuf::from(format!("/dev/i2c-{}", self.i2c_bus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(
            config.thermal_path,
            PathBuf::from("/sys/class/thermal/thermal_zone0/temp")
        );
        assert_eq!(config.i2c_device(), PathBuf::from("/dev/i2c-1"));
        assert_eq!(config.sensor_address.value(), 0x76);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("sensor_address = \"secondary\"\n").unwrap();
        assert_eq!(config.sensor_address, SensorAddress::Secondary);
        assert_eq!(config.sensor_address.value(), 0x77);
        assert_eq!(config.i2c_bus, 1);

        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_file() {
        let config = Config::parse(
            "thermal_path = \"/sys/class/thermal/thermal_zone1/temp\"\n\
             i2c_bus = 3\n\
             sensor_address = \"primary\"\n",
        )
        .unwrap();
        assert_eq!(config.i2c_device(), PathBuf::from("/dev/i2c-3"));
        assert_eq!(
            config.thermal_path,
            PathBuf::from("/sys/class/thermal/thermal_zone1/temp")
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::parse("sensor_address = \"tertiary\"").is_err());
        assert!(Config::parse("i2c_bus = -1").is_err());
        assert!(Config::parse("i2c_buss = 1").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config {
            i2c_bus: 0,
            sensor_address: SensorAddress::Secondary,
            ..Config::default()
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("sensor_address = \"secondary\""));
        assert_eq!(Config::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_from_file_is_strict() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::from_file(&missing), Err(Error::Config(_))));

        let bad = dir.path().join("bad.toml");
        fs::File::create(&bad)
            .unwrap()
            .write_all(b"i2c_bus = \"one\"")
            .unwrap();
        assert!(matches!(Config::from_file(&bad), Err(Error::Config(_))));

        let good = dir.path().join("good.toml");
        fs::write(&good, "i2c_bus = 2\n").unwrap();
        assert_eq!(Config::from_file(&good).unwrap().i2c_bus, 2);
    }

    #[test]
    fn test_example_file_parses_to_defaults() {
        let config = Config::parse(include_str!("../config.toml.example")).unwrap();
        assert_eq!(config, Config::default());
    }
}
