// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

#![allow(dead_code)]

use sht31_i2c::I2cBus;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

/// What the scripted bus saw
#[derive(Debug, Default)]
pub struct BusLog {
    pub writes: Vec<Vec<u8>>,
    pub delays: Vec<Duration>,
    pub reads: usize,
    pub closes: usize,
}

pub enum Reply {
    Bytes(Vec<u8>),
    Fail(io::ErrorKind),
}

/// In-memory bus answering every read with the same reply
pub struct ScriptedBus {
    log: Rc<RefCell<BusLog>>,
    write_error: Option<io::ErrorKind>,
    write_limit: Option<usize>,
    reply: Reply,
    close_error: Option<io::ErrorKind>,
}

impl ScriptedBus {
    pub fn replying(bytes: &[u8]) -> (ScriptedBus, Rc<RefCell<BusLog>>) {
        let log = Rc::new(RefCell::new(BusLog::default()));
        let bus = ScriptedBus {
            log: Rc::clone(&log),
            write_error: None,
            write_limit: None,
            reply: Reply::Bytes(bytes.to_vec()),
            close_error: None,
        };
        (bus, log)
    }

    pub fn failing_reads(kind: io::ErrorKind) -> (ScriptedBus, Rc<RefCell<BusLog>>) {
        let (mut bus, log) = ScriptedBus::replying(&[]);
        bus.reply = Reply::Fail(kind);
        (bus, log)
    }

    pub fn failing_writes(mut self, kind: io::ErrorKind) -> ScriptedBus {
        self.write_error = Some(kind);
        self
    }

    pub fn partial_writes(mut self, accepted: usize) -> ScriptedBus {
        self.write_limit = Some(accepted);
        self
    }

    pub fn failing_close(mut self, kind: io::ErrorKind) -> ScriptedBus {
        self.close_error = Some(kind);
        self
    }
}

impl I2cBus for ScriptedBus {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.log.borrow_mut().writes.push(bytes.to_vec());
        if let Some(kind) = self.write_error {
            return Err(kind.into());
        }
        Ok(self.write_limit.map_or(bytes.len(), |n| n.min(bytes.len())))
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.log.borrow_mut().reads += 1;
        match &self.reply {
            Reply::Bytes(bytes) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Reply::Fail(kind) => Err((*kind).into()),
        }
    }

    fn delay(&mut self, duration: Duration) {
        self.log.borrow_mut().delays.push(duration);
    }

    fn close(self) -> io::Result<()> {
        self.log.borrow_mut().closes += 1;
        match self.close_error {
            Some(kind) => Err(kind.into()),
            None => Ok(()),
        }
    }
}

/// 25.000 °C and 48.9998 %RH with valid checksums
pub const ROOM_FRAME: [u8; 6] = [0x66, 0x66, 0x93, 0x7D, 0x70, 0x02];
