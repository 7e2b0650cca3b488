//! BME280 over Linux i2c-dev

use crate::config::{Config, SensorAddress};
use crate::error::Result;
use crate::sensors::environment::{
    self, EnvironmentalReading, EnvironmentalSensor, RawMeasurement,
};
use crate::shared::{sensor_error, widen};
use ::bme280::i2c::BME280;
use embedded_hal::i2c::I2c;
use linux_embedded_hal::{Delay, I2cdev};
use std::path::{Path, PathBuf};

/// Exclusive handle on an I2C bus device node. The node is closed when this is dropped.
pub struct I2cBus {
    device: I2cdev,
    path: PathBuf,
}

impl I2cBus {
    pub fn open(path: &Path) -> Result<Self> {
        let device = I2cdev::new(path)
            .map_err(|e| sensor_error(format!("{}: {}", path.display(), e)))?;
        tracing::trace!("Opened I2C bus {:?}", path);

        Ok(Self {
            device,
            path: path.to_path_buf(),
        })
    }

    pub fn device(&mut self) -> &mut I2cdev {
        &mut self.device
    }
}

impl Drop for I2cBus {
    fn drop(&mut self) {
        tracing::trace!("Released I2C bus {:?}", self.path);
    }
}

/// BME280 client on any I2C bus, using the driver's default configuration
pub struct Bme280Sensor<I2C> {
    driver: BME280<I2C>,
    delay: Delay,
}

impl<I2C: I2c> Bme280Sensor<I2C> {
    pub fn new(i2c: I2C, address: SensorAddress) -> Result<Self> {
        let driver = match address {
            SensorAddress::Primary => BME280::new_primary(i2c),
            SensorAddress::Secondary => BME280::new_secondary(i2c),
        };

        let mut sensor = Self {
            driver,
            delay: Delay,
        };
        sensor
            .driver
            .init(&mut sensor.delay)
            .map_err(|e| sensor_error(format!("init at {:#04x}: {:?}", address.value(), e)))?;

        Ok(sensor)
    }
}

impl<I2C: I2c> EnvironmentalSensor for Bme280Sensor<I2C> {
    fn measure(&mut self) -> Result<RawMeasurement> {
        let m = self
            .driver
            .measure(&mut self.delay)
            .map_err(|e| sensor_error(format!("measurement: {:?}", e)))?;

        Ok(RawMeasurement {
            temperature: widen(m.temperature),
            pressure: widen(m.pressure),
            humidity: widen(m.humidity),
        })
    }
}

/// Open the configured bus, take one BME280 measurement, release the bus
pub fn read_bme280(config: &Config) -> Result<EnvironmentalReading> {
    let mut bus = I2cBus::open(&config.i2c_device())?;
    let mut sensor = Bme280Sensor::new(bus.device(), config.sensor_address)?;
    environment::read_environment(&mut sensor)
}
