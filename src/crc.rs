// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! CRC-8 used by the SHT3x family to protect every 16 bit word on the wire.

/// Generator polynomial x^8 + x^5 + x^4 + 1
pub const POLYNOMIAL: u8 = 0x31;

/// Initial remainder
pub const INIT: u8 = 0xFF;

/// Checksum function.
///
/// MSB first, no reflection and no final XOR. The sensor computes it
/// independently over each 2 byte word it transmits.
/// More info regarding the [algorithm](https://en.wikipedia.org/wiki/Computation_of_cyclic_redundancy_checks)
///
pub fn crc8(data: &[u8]) -> u8 {
    let mut rem = INIT;
    for byte in data {
        rem ^= byte;
        for _ in 0..8 {
            if (rem & 0x80) != 0 {
                rem = (rem << 1) ^ POLYNOMIAL;
            } else {
                rem <<= 1;
            }
        }
    }
    rem
}

/// Checks a `[msb, lsb, crc]` word as sent by the sensor.
pub fn check_word(word: &[u8; 3]) -> bool {
    crc8(&word[..2]) == word[2]
}
