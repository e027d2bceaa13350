// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::crc;
use std::fmt;

/// Number of bytes the sensor answers a measurement command with
pub const FRAME_LEN: usize = 6;

///
/// Response to a measurement command, exactly as read from the bus:
/// temperature MSB, temperature LSB, temperature CRC,
/// humidity MSB, humidity LSB, humidity CRC.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame([u8; FRAME_LEN]);

impl RawFrame {
    pub fn new(bytes: [u8; FRAME_LEN]) -> RawFrame {
        RawFrame(bytes)
    }

    /// Builds a frame with valid checksums for the given counts.
    pub fn from_counts(raw_temperature: u16, raw_humidity: u16) -> RawFrame {
        let t = raw_temperature.to_be_bytes();
        let h = raw_humidity.to_be_bytes();
        RawFrame([t[0], t[1], crc::crc8(&t), h[0], h[1], crc::crc8(&h)])
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    pub fn raw_temperature(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    pub fn raw_humidity(&self) -> u16 {
        u16::from_be_bytes([self.0[3], self.0[4]])
    }

    /// True when both words match their transmitted checksum.
    pub fn crc_ok(&self) -> bool {
        crc::check_word(&[self.0[0], self.0[1], self.0[2]])
            && crc::check_word(&[self.0[3], self.0[4], self.0[5]])
    }
}

/// Temperature and relative humidity decoded from one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    temperature: f64,
    humidity: f64,
}

impl Measurement {
    /// Converts raw sensor counts to physical units.
    ///
    /// Temperature spans [-45, 130] °C and humidity [0, 100] %RH over the
    /// whole 16 bit range.
    pub fn from_counts(raw_temperature: u16, raw_humidity: u16) -> Measurement {
        Measurement {
            temperature: f64::from(raw_temperature) * 175.0 / 65535.0 - 45.0,
            humidity: f64::from(raw_humidity) * 100.0 / 65535.0,
        }
    }

    /// Celsius
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn fahrenheit(&self) -> f64 {
        self.temperature * 1.8 + 32.0
    }

    /// Relative humidity in percent
    pub fn humidity(&self) -> f64 {
        self.humidity
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "temperature: [{:.3}], humidity: [{:.3}]",
            self.temperature, self.humidity
        )
    }
}

/// Decodes a frame whose checksums were already verified.
pub fn decode(frame: &RawFrame) -> Measurement {
    Measurement::from_counts(frame.raw_temperature(), frame.raw_humidity())
}
