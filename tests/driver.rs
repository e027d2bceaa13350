// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use common::{ScriptedBus, ROOM_FRAME};
use proptest::prelude::*;
use sht31_i2c::driver::{CONVERSION_DELAY, MEASURE_HIGH_REPEATABILITY};
use sht31_i2c::{RawFrame, Sht31, Sht31Error};
use std::io;
use std::time::Duration;

#[test]
fn measurement_end_to_end() {
    let (bus, log) = ScriptedBus::replying(&ROOM_FRAME);
    let mut sht = Sht31::new(bus);

    let m = sht.read_measurement().unwrap();
    assert!((m.temperature() - 25.0).abs() < 0.1);
    assert!((m.humidity() - 49.0).abs() < 0.5);

    let log = log.borrow();
    assert_eq!(log.writes, vec![vec![0x2C, 0x06]]);
    assert_eq!(log.reads, 1);
}

#[test]
fn waits_one_second_before_reading() {
    let (bus, log) = ScriptedBus::replying(&ROOM_FRAME);
    let mut sht = Sht31::new(bus);
    sht.measure().unwrap();

    assert_eq!(CONVERSION_DELAY, Duration::from_secs(1));
    assert_eq!(log.borrow().delays, vec![Duration::from_secs(1)]);
}

#[test]
fn measure_returns_the_frame_as_read() {
    let (bus, _log) = ScriptedBus::replying(&ROOM_FRAME);
    let frame = Sht31::new(bus).measure().unwrap();
    assert_eq!(frame, RawFrame::new(ROOM_FRAME));
    assert_eq!(MEASURE_HIGH_REPEATABILITY, [0x2C, 0x06]);
}

#[test]
fn failed_command_write_skips_the_read() {
    let (bus, log) = ScriptedBus::replying(&ROOM_FRAME);
    let mut sht = Sht31::new(bus.failing_writes(io::ErrorKind::Other));

    let err = sht.measure().unwrap_err();
    assert!(matches!(err, Sht31Error::SendMeasureCmd(_)));
    assert_eq!(err.status(), 3);
    assert_eq!(log.borrow().reads, 0);
    assert!(log.borrow().delays.is_empty());
}

#[test]
fn partial_command_write_is_a_send_failure() {
    let (bus, log) = ScriptedBus::replying(&ROOM_FRAME);
    let mut sht = Sht31::new(bus.partial_writes(1));

    let err = sht.measure().unwrap_err();
    assert!(matches!(err, Sht31Error::SendMeasureCmd(_)));
    assert_eq!(log.borrow().reads, 0);
}

#[test]
fn short_read_is_an_io_error() {
    for len in 0..ROOM_FRAME.len() {
        let (bus, _log) = ScriptedBus::replying(&ROOM_FRAME[..len]);
        let err = Sht31::new(bus).measure().unwrap_err();
        match err {
            Sht31Error::ShortRead { received } => assert_eq!(received, len),
            other => panic!("unexpected error {:?}", other),
        }
    }
}

#[test]
fn failed_read_is_an_io_error() {
    let (bus, _log) = ScriptedBus::failing_reads(io::ErrorKind::TimedOut);
    let err = Sht31::new(bus).read_measurement().unwrap_err();
    assert!(matches!(err, Sht31Error::ReadIo(_)));
    assert_eq!(err.status(), 4);
}

#[test]
fn bad_humidity_crc_rejects_whole_frame() {
    let mut bytes = ROOM_FRAME;
    bytes[5] = 0x03;
    let (bus, _log) = ScriptedBus::replying(&bytes);

    let err = Sht31::new(bus).read_measurement().unwrap_err();
    match err {
        Sht31Error::CrcCheck { frame } => assert_eq!(frame.as_bytes(), &bytes),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn close_reports_bus_errors() {
    let (bus, log) = ScriptedBus::replying(&ROOM_FRAME);
    let err = Sht31::new(bus.failing_close(io::ErrorKind::Other))
        .close()
        .unwrap_err();
    assert!(matches!(err, Sht31Error::CloseBus(_)));
    assert_eq!(err.status(), 2);
    assert_eq!(log.borrow().closes, 1);
}

#[test]
fn open_missing_bus_device() {
    match Sht31::open("/dev/i2c-does-not-exist") {
        Err(err) => assert_eq!(err.status(), 1),
        Ok(_) => panic!("device should not exist"),
    }
}

proptest! {
    #[test]
    fn single_bit_corruption_is_rejected(t: u16, h: u16, bit in 0usize..32) {
        let mut bytes = *RawFrame::from_counts(t, h).as_bytes();
        let data_bytes = [0usize, 1, 3, 4];
        bytes[data_bytes[bit / 8]] ^= 1 << (bit % 8);

        let (bus, _log) = ScriptedBus::replying(&bytes);
        let err = Sht31::new(bus).read_measurement().unwrap_err();
        prop_assert!(
            matches!(err, Sht31Error::CrcCheck { frame: _ }),
            "expected a checksum failure, got {:?}",
            err
        );
        prop_assert_eq!(err.status(), 5);
    }
}
