// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Transport the driver talks through.
//!
//! The driver only needs raw writes and reads to an already addressed
//! device, a way to wait for the conversion and a way to release the
//! handle. [`LinuxI2cBus`] provides them on top of the kernel i2c-dev
//! interface, tests provide scripted ones.

use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use log::debug;
use std::io;
use std::thread;
use std::time::Duration;

/// Device file of I2C bus number `bus`, e.g. `/dev/i2c-1`.
pub fn device_path(bus: u32) -> String {
    format!("/dev/i2c-{}", bus)
}

/// Byte level access to a single addressed I2C device
pub trait I2cBus {
    /// Writes `bytes` in a single transfer, returning how many were sent.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Reads into `buf` in a single transfer, returning how many bytes arrived.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Blocks the caller while the device works.
    fn delay(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    /// Releases the handle. Consuming `self` makes a second close impossible.
    fn close(self) -> io::Result<()>
    where
        Self: Sized;
}

/// Linux i2c-dev character device with the slave address already selected
///
/// `i2cdev` hides the byte counts of transfers: a write or read either
/// moves the whole buffer or fails, so short transfers show up as errors.
/// The file is closed when the device is dropped and the kernel's close
/// status is not observable, so [`I2cBus::close`] always succeeds here.
pub struct LinuxI2cBus {
    i2cdev: LinuxI2CDevice,
}

impl LinuxI2cBus {
    /// Opens `path` for read/write and selects `address` with the
    /// `I2C_SLAVE` ioctl. Whether the device answers is only known
    /// on the first transfer.
    pub fn open(path: &str, address: u16) -> io::Result<LinuxI2cBus> {
        let device = LinuxI2CDevice::new(path, address).map_err(to_io)?;
        debug!("opened {} for address {:#04x}", path, address);
        Ok(LinuxI2cBus { i2cdev: device })
    }
}

fn to_io(e: LinuxI2CError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

impl I2cBus for LinuxI2cBus {
    // partial writes come back as errors, never as a short count
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.i2cdev.write(bytes).map_err(to_io)?;
        Ok(bytes.len())
    }

    // i2c-dev either fills the whole buffer or fails the transfer
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.i2cdev.read(buf).map_err(to_io)?;
        Ok(buf.len())
    }

    // close(2) errors are discarded by the device's Drop
    fn close(self) -> io::Result<()> {
        drop(self.i2cdev);
        Ok(())
    }
}
