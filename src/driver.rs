// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::bus::{I2cBus, LinuxI2cBus};
use crate::error::Sht31Error;
use crate::frame::{self, Measurement, RawFrame, FRAME_LEN};
use log::{debug, trace, warn};
use std::io;
use std::time::Duration;

/// Fixed 7 bit address of the sensor (ADDR pin low)
pub const ADDRESS: u16 = 0x44;

/// Single shot, high repeatability, clock stretching enabled
pub const MEASURE_HIGH_REPEATABILITY: [u8; 2] = [0x2C, 0x06];

/// Wait between command and read. Shorter waits desynchronize the
/// sensor and eventually hang the bus, so this is not configurable.
pub const CONVERSION_DELAY: Duration = Duration::from_secs(1);

/// SHT31 struct, owns the bus handle
/// and implements the measurement protocol
///
pub struct Sht31<B: I2cBus> {
    bus: B,
}

impl Sht31<LinuxI2cBus> {
    /// Opens the bus device at `path` and addresses the sensor.
    ///
    /// If fails, returns `Sht31Error::OpenBus`
    ///
    pub fn open(path: &str) -> Result<Sht31<LinuxI2cBus>, Sht31Error> {
        let bus = LinuxI2cBus::open(path, ADDRESS).map_err(|source| Sht31Error::OpenBus {
            path: path.to_string(),
            source,
        })?;
        Ok(Sht31::new(bus))
    }
}

impl<B: I2cBus> Sht31<B> {
    /// Wraps an already opened and addressed bus.
    pub fn new(bus: B) -> Sht31<B> {
        Sht31 { bus }
    }

    /// Sends the measurement command, waits for the conversion and reads
    /// back the frame. The frame is only returned if both checksums match.
    ///
    pub fn measure(&mut self) -> Result<RawFrame, Sht31Error> {
        debug!("sending measure command {:02x?}", MEASURE_HIGH_REPEATABILITY);
        match self.bus.write(&MEASURE_HIGH_REPEATABILITY) {
            Ok(n) if n == MEASURE_HIGH_REPEATABILITY.len() => {}
            Ok(n) => {
                return Err(Sht31Error::SendMeasureCmd(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!(
                        "{} of {} command bytes written",
                        n,
                        MEASURE_HIGH_REPEATABILITY.len()
                    ),
                )))
            }
            Err(e) => return Err(Sht31Error::SendMeasureCmd(e)),
        }

        self.bus.delay(CONVERSION_DELAY);

        let mut data_buffer = [0u8; FRAME_LEN];
        let received = self
            .bus
            .read(&mut data_buffer)
            .map_err(Sht31Error::ReadIo)?;
        if received < FRAME_LEN {
            warn!("short read from sensor: {} of {} bytes", received, FRAME_LEN);
            return Err(Sht31Error::ShortRead { received });
        }

        let frame = RawFrame::new(data_buffer);
        trace!("raw frame {:02x?}", frame.as_bytes());
        if !frame.crc_ok() {
            warn!("checksum mismatch in frame {:02x?}", frame.as_bytes());
            return Err(Sht31Error::CrcCheck { frame });
        }
        Ok(frame)
    }

    /// Measures and decodes to physical units.
    pub fn read_measurement(&mut self) -> Result<Measurement, Sht31Error> {
        let frame = self.measure()?;
        let measurement = frame::decode(&frame);
        debug!("got measurement {}", measurement);
        Ok(measurement)
    }

    /// Releases the bus handle.
    pub fn close(self) -> Result<(), Sht31Error> {
        self.bus.close().map_err(Sht31Error::CloseBus)
    }
}
