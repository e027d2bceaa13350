// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::bus::{self, I2cBus, LinuxI2cBus};
use crate::driver::Sht31;
use crate::error::{FailureKind, FailureReason, Sht31Error};
use crate::frame::Measurement;
use log::{debug, info, warn};

/// Either a measurement or the reason there is none
pub type MeasurementOutcome = Result<Measurement, FailureReason>;

/// Anything that produces temperature and humidity measurements
pub trait Sensor {
    fn measure(&mut self) -> MeasurementOutcome;
}

///
/// Session on one SHT31 device. The bus handle is opened when the
/// session is created and released exactly once, either by [`close`]
/// or when the session is dropped.
///
/// A session is not reentrant: share it between threads only behind
/// a lock.
///
/// [`close`]: Sht31Sensor::close
pub struct Sht31Sensor<B: I2cBus = LinuxI2cBus> {
    device: String,
    driver: Option<Sht31<B>>,
}

impl Sht31Sensor<LinuxI2cBus> {
    /// Opens `/dev/i2c-<bus_number>` and addresses the sensor on it.
    ///
    /// If the bus cannot be opened no session is created.
    ///
    pub fn new(bus_number: u32) -> Result<Sht31Sensor<LinuxI2cBus>, Sht31Error> {
        let device = bus::device_path(bus_number);
        info!("Using i2c device [{}]", device);
        let driver = Sht31::open(&device)?;
        Ok(Sht31Sensor {
            device,
            driver: Some(driver),
        })
    }
}

impl<B: I2cBus> Sht31Sensor<B> {
    /// Session over an already opened bus. `device` is only used for logging.
    pub fn with_bus(device: impl Into<String>, bus: B) -> Sht31Sensor<B> {
        Sht31Sensor {
            device: device.into(),
            driver: Some(Sht31::new(bus)),
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// Takes one measurement. Blocks for about a second.
    pub fn measure(&mut self) -> MeasurementOutcome {
        let driver = match self.driver.as_mut() {
            Some(driver) => driver,
            None => {
                return Err(FailureReason {
                    kind: FailureKind::Unknown,
                    message: format!("I2C device {} already closed", self.device),
                })
            }
        };
        match driver.read_measurement() {
            Ok(measurement) => Ok(measurement),
            Err(e) => {
                debug!("measurement on [{}] failed: {}", self.device, e);
                Err(FailureReason::from(e))
            }
        }
    }

    /// Releases the bus handle now and reports whether that worked.
    pub fn close(mut self) -> Result<(), FailureReason> {
        self.release().map_err(FailureReason::from)
    }

    fn release(&mut self) -> Result<(), Sht31Error> {
        match self.driver.take() {
            Some(driver) => {
                info!("Closing device [{}]", self.device);
                driver.close()
            }
            None => Ok(()),
        }
    }
}

impl<B: I2cBus> Sensor for Sht31Sensor<B> {
    fn measure(&mut self) -> MeasurementOutcome {
        Sht31Sensor::measure(self)
    }
}

impl<B: I2cBus> Drop for Sht31Sensor<B> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("{}: {}", self.device, e);
        }
    }
}
