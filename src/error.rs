// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::frame::{RawFrame, FRAME_LEN};
use std::io;
use thiserror::Error;

/// Numeric status of a successful driver call
pub const STATUS_OK: u8 = 0;

///
/// SHT31 driver error enum. Every variant maps to one
/// numeric status code, see [`Sht31Error::status`].
/// Bus level errors are kept as the source of the variant.
///
#[derive(Debug, Error)]
pub enum Sht31Error {
    /// The bus device could not be opened or the sensor address selected
    #[error("Failure opening I2C bus {path}")]
    OpenBus {
        path: String,
        #[source]
        source: io::Error,
    },
    /// Releasing the bus device failed
    #[error("Failure closing I2C bus")]
    CloseBus(#[source] io::Error),
    /// The measurement command was not accepted by the bus
    #[error("Failure sending sensor measure command")]
    SendMeasureCmd(#[source] io::Error),
    /// Reading the measurement frame failed
    #[error("IOError reading measure command result")]
    ReadIo(#[source] io::Error),
    /// The sensor answered with fewer bytes than a full frame
    #[error("IOError reading measure command result: {received} of {} bytes", FRAME_LEN)]
    ShortRead { received: usize },
    /// At least one of the frame checksums does not match its data
    #[error("CRC check failure for read sensor measurement")]
    CrcCheck { frame: RawFrame },
}

impl Sht31Error {
    pub fn kind(&self) -> FailureKind {
        match self {
            Sht31Error::OpenBus { .. } => FailureKind::OpenBus,
            Sht31Error::CloseBus(_) => FailureKind::CloseBus,
            Sht31Error::SendMeasureCmd(_) => FailureKind::SendMeasureCmd,
            Sht31Error::ReadIo(_) | Sht31Error::ShortRead { .. } => {
                FailureKind::SendMeasureCmdIo
            }
            Sht31Error::CrcCheck { .. } => FailureKind::CrcCheck,
        }
    }

    /// Numeric status code, `1..=5`.
    pub fn status(&self) -> u8 {
        match self {
            Sht31Error::OpenBus { .. } => 1,
            Sht31Error::CloseBus(_) => 2,
            Sht31Error::SendMeasureCmd(_) => 3,
            Sht31Error::ReadIo(_) | Sht31Error::ShortRead { .. } => 4,
            Sht31Error::CrcCheck { .. } => 5,
        }
    }
}

/// Closed set of failure kinds reported by a sensor session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    OpenBus,
    CloseBus,
    SendMeasureCmd,
    SendMeasureCmdIo,
    CrcCheck,
    /// Status code not produced by this driver version
    Unknown,
}

impl FailureKind {
    /// Maps a driver status code. `STATUS_OK` and any unrecognized
    /// code yield `Unknown`.
    pub fn from_status(code: u8) -> FailureKind {
        match code {
            1 => FailureKind::OpenBus,
            2 => FailureKind::CloseBus,
            3 => FailureKind::SendMeasureCmd,
            4 => FailureKind::SendMeasureCmdIo,
            5 => FailureKind::CrcCheck,
            _ => FailureKind::Unknown,
        }
    }

    pub fn status(self) -> Option<u8> {
        match self {
            FailureKind::OpenBus => Some(1),
            FailureKind::CloseBus => Some(2),
            FailureKind::SendMeasureCmd => Some(3),
            FailureKind::SendMeasureCmdIo => Some(4),
            FailureKind::CrcCheck => Some(5),
            FailureKind::Unknown => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FailureKind::OpenBus => "Failure opening I2C bus",
            FailureKind::CloseBus => "Failure closing I2C bus",
            FailureKind::SendMeasureCmd => "Failure sending sensor measure command",
            FailureKind::SendMeasureCmdIo => "IOError reading measure command result",
            FailureKind::CrcCheck => "CRC check failure for read sensor measurement",
            FailureKind::Unknown => "Unknown error",
        }
    }
}

/// Why a measurement could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FailureReason {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureReason {
    /// Failure for a raw status code, described by its kind alone.
    pub fn from_status(code: u8) -> FailureReason {
        let kind = FailureKind::from_status(code);
        FailureReason {
            kind,
            message: kind.description().to_string(),
        }
    }
}

impl From<&Sht31Error> for FailureReason {
    fn from(e: &Sht31Error) -> Self {
        FailureReason {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl From<Sht31Error> for FailureReason {
    fn from(e: Sht31Error) -> Self {
        FailureReason::from(&e)
    }
}
