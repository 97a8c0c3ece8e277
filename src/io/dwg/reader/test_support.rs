//! Bit-level writer used by the reader unit tests to build inputs.

use crate::io::dwg::crc::crc8;

#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit(&mut self, value: bool) {
        if self.bit == 0 {
            self.bytes.push(0);
        }
        if value {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> self.bit;
        }
        self.bit = (self.bit + 1) & 7;
    }

    /// Low `count` bits of `value`, most significant first.
    pub fn bits(&mut self, value: u64, count: u8) {
        for i in (0..count).rev() {
            self.bit((value >> i) & 1 == 1);
        }
    }

    pub fn rc(&mut self, value: u8) {
        self.bits(value as u64, 8);
    }

    pub fn raw(&mut self, data: &[u8]) {
        for &b in data {
            self.rc(b);
        }
    }

    pub fn rs(&mut self, value: u16) {
        self.raw(&value.to_le_bytes());
    }

    pub fn rl(&mut self, value: u32) {
        self.raw(&value.to_le_bytes());
    }

    pub fn rd(&mut self, value: f64) {
        self.raw(&value.to_le_bytes());
    }

    pub fn bs(&mut self, value: i16) {
        match value {
            0 => self.bits(0b10, 2),
            256 => self.bits(0b11, 2),
            1..=255 => {
                self.bits(0b01, 2);
                self.rc(value as u8);
            }
            _ => {
                self.bits(0b00, 2);
                self.rs(value as u16);
            }
        }
    }

    pub fn bl(&mut self, value: i32) {
        match value {
            0 => self.bits(0b10, 2),
            1..=255 => {
                self.bits(0b01, 2);
                self.rc(value as u8);
            }
            _ => {
                self.bits(0b00, 2);
                self.rl(value as u32);
            }
        }
    }

    pub fn bd(&mut self, value: f64) {
        if value == 0.0 {
            self.bits(0b10, 2);
        } else if value == 1.0 {
            self.bits(0b01, 2);
        } else {
            self.bits(0b00, 2);
            self.rd(value);
        }
    }

    /// Signed modular char.
    pub fn mc(&mut self, value: i64) {
        let mut magnitude = value.unsigned_abs();
        while magnitude > 0x3F {
            self.rc((magnitude & 0x7F) as u8 | 0x80);
            magnitude >>= 7;
        }
        let sign = if value < 0 { 0x40 } else { 0 };
        self.rc(magnitude as u8 | sign);
    }

    /// Unsigned modular char.
    pub fn umc(&mut self, mut value: u64) {
        while value > 0x7F {
            self.rc((value & 0x7F) as u8 | 0x80);
            value >>= 7;
        }
        self.rc(value as u8);
    }

    pub fn handle(&mut self, code: u8, value: u64) {
        let bytes: Vec<u8> = value
            .to_be_bytes()
            .into_iter()
            .skip_while(|&b| b == 0)
            .collect();
        self.rc((code << 4) | bytes.len() as u8);
        self.raw(&bytes);
    }

    /// Narrow variable text.
    pub fn tv(&mut self, text: &str) {
        self.bs(text.len() as i16);
        self.raw(text.as_bytes());
    }

    pub fn align(&mut self) {
        self.bit = 0;
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Checksum of everything written so far from `start`.
    pub fn crc_from(&self, start: usize, seed: u16) -> u16 {
        crc8(seed, &self.bytes[start..])
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A complete R13-R2000 file header whose checksum XORs to `xor`.
pub fn legacy_file_header(
    tag: &[u8; 6],
    preview_address: u32,
    code_page: u16,
    records: &[(u8, u32, u32)],
    xor: u16,
) -> Vec<u8> {
    use crate::io::dwg::constants::{sentinels, CRC_SEED};

    let mut w = BitWriter::new();
    w.raw(tag);
    w.raw(&[0, 0, 0, 0, 0, 0x0F, 0x01]);
    w.rl(preview_address);
    w.rc(0x1F);
    w.rc(0x00);
    w.rs(code_page);
    w.rl(records.len() as u32);
    for &(number, seeker, size) in records {
        w.rc(number);
        w.rl(seeker);
        w.rl(size);
    }
    let crc = w.crc_from(0, CRC_SEED) ^ xor;
    w.rs(crc);
    w.raw(&sentinels::FILE_HEADER_END);
    w.into_bytes()
}
