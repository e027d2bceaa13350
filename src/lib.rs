// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! SHT31 temperature and humidity sensor over the Linux I2C interface
//!
//! Protocol taken from the [datasheet](https://sensirion.com/media/documents/213E6A3B/63A5A569/Datasheet_SHT3x_DIS.pdf):
//! a single shot high repeatability command `0x2C 0x06` is sent to the
//! sensor at address `0x44`, and after the conversion the sensor answers
//! with 6 bytes, two 16 bit words each followed by its CRC-8.
//!
//! **IMPORTANT**
//! Measuring faster than about once per second ends up hanging the bus.
//! The driver always waits one second between command and read; callers
//! polling in a loop should not go below that period either. A hung bus
//! is only recovered by physically reconnecting the sensor.
//!
//! Nothing here retries. A failed measurement is returned to the caller
//! as a [`FailureReason`] and the session stays usable.
//!
//! ## Basic Example
//!
//! Obtaining one measurement from bus 1
//!
//!```no_run
//!use sht31_i2c::Sht31Sensor;
//!
//!fn main() {
//!    let mut sensor = match Sht31Sensor::new(1) {
//!        Ok(sensor) => sensor,
//!        Err(e) => {
//!            println!("Could not open the sensor: {}", e);
//!            return;
//!        }
//!    };
//!
//!    match sensor.measure() {
//!        Ok(m) => println!("{}", m),
//!        Err(reason) => println!("Error obtaining measurement. More details: {}", reason),
//!    }
//!    // The bus is closed when `sensor` goes out of scope
//!}
//!```
//!

pub mod bus;
pub mod crc;
/// Wire protocol of the SHT31 device
pub mod driver;
pub mod error;
pub mod frame;
/// Resource managed sensor session
pub mod sensor;

pub use bus::{I2cBus, LinuxI2cBus};
pub use driver::Sht31;
pub use error::{FailureKind, FailureReason, Sht31Error};
pub use frame::{Measurement, RawFrame};
pub use sensor::{MeasurementOutcome, Sensor, Sht31Sensor};
