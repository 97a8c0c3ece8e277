//! Bit-level cursor over a paged byte source.
//!
//! Data is read MSB first. While the cursor sits inside a byte the byte is
//! cached in `last_byte` and `bit_shift` counts the bits already consumed.
//!
//! The cursor also owns the running section checksum. A byte is folded into
//! it exactly once, at the moment its first bit is consumed.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::CRC_SEED;
use crate::io::dwg::crc::Crc8;

use super::paged_source::{PagedSource, DEFAULT_PAGE_SIZE};

/// Absolute cursor location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct CursorPosition {
    /// Byte holding the next unread bit.
    pub byte: u64,
    /// Bits of that byte already consumed (0-7).
    pub bit: u8,
}

impl CursorPosition {
    pub const fn new(byte: u64, bit: u8) -> Self {
        Self { byte, bit }
    }

    pub const fn in_bits(&self) -> u64 {
        self.byte * 8 + self.bit as u64
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}.{}", self.byte, self.bit)
    }
}

pub struct BitCursor<R> {
    source: PagedSource<R>,
    /// Offset of the next byte not yet fetched.
    position: u64,
    bit_shift: u8,
    last_byte: u8,
    crc: Crc8,
    eof: bool,
}

impl BitCursor<BufReader<File>> {
    /// Open a file for bit-level reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> BitCursor<R> {
    pub fn new(reader: R) -> Result<Self> {
        Self::with_page_size(reader, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(reader: R, page_size: usize) -> Result<Self> {
        Ok(Self {
            source: PagedSource::new(reader, page_size)?,
            position: 0,
            bit_shift: 0,
            last_byte: 0,
            crc: Crc8::new(CRC_SEED),
            eof: false,
        })
    }

    /// Length of the underlying data in bytes.
    pub fn len(&self) -> u64 {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Set once a read was attempted past the end of data.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    pub fn bit_shift(&self) -> u8 {
        self.bit_shift
    }

    pub fn position(&self) -> CursorPosition {
        if self.bit_shift == 0 {
            CursorPosition::new(self.position, 0)
        } else {
            CursorPosition::new(self.position - 1, self.bit_shift)
        }
    }

    pub fn position_in_bits(&self) -> u64 {
        self.position().in_bits()
    }

    /// Bytes between the current byte position and the end of data.
    pub fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.position().byte)
    }

    /// Fetch the next byte, folding it into the checksum.
    fn fetch_byte(&mut self) -> Result<u8> {
        let byte = match self.source.byte_at(self.position) {
            Ok(b) => b,
            Err(e) => {
                self.eof = true;
                return Err(e.into());
            }
        };
        self.crc.update(byte);
        self.position += 1;
        self.last_byte = byte;
        Ok(byte)
    }

    /// **B**
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_shift == 0 {
            self.fetch_byte()?;
            self.bit_shift = 1;
            return Ok(self.last_byte & 0x80 != 0);
        }

        let value = (self.last_byte << self.bit_shift) & 0x80 != 0;
        self.bit_shift = (self.bit_shift + 1) & 7;
        Ok(value)
    }

    /// Eight bits, straddling a byte boundary when mid-byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.bit_shift == 0 {
            return self.fetch_byte();
        }

        let high = self.last_byte << self.bit_shift;
        let next = self.fetch_byte()?;
        Ok(high | (next >> (8 - self.bit_shift)))
    }

    /// The byte following the current one, without moving the cursor.
    ///
    /// Only meaningful mid-byte. Returns `None` when that byte is past the
    /// end of data or not buffered.
    pub fn peek_next_byte(&self) -> Option<u8> {
        self.source.peek(self.position)
    }

    /// Move to an absolute byte and bit.
    ///
    /// Landing mid-byte caches that byte without folding it into the
    /// checksum: its leading bits belong to whatever was read before.
    pub fn seek(&mut self, byte: u64, bit: u8) -> Result<()> {
        if bit > 7 {
            return Err(DwgError::OutOfRange(format!("bit offset {bit} in seek")));
        }
        if byte > self.len() || (byte == self.len() && bit > 0) {
            self.eof = true;
            return Err(DwgError::unexpected_eof(&format!("seek to {byte:#X}.{bit}")));
        }

        if bit > 0 {
            let loaded = match self.source.byte_at(byte) {
                Ok(b) => b,
                Err(e) => {
                    self.eof = true;
                    return Err(e.into());
                }
            };
            self.last_byte = loaded;
            self.position = byte + 1;
        } else {
            self.position = byte;
        }
        self.bit_shift = bit;
        self.eof = false;
        Ok(())
    }

    pub fn seek_to(&mut self, position: CursorPosition) -> Result<()> {
        self.seek(position.byte, position.bit)
    }

    /// Skip the rest of the current byte.
    pub fn advance_to_byte_boundary(&mut self) {
        self.bit_shift = 0;
    }

    pub fn reset_checksum(&mut self, seed: u16) {
        self.crc.reset(seed);
    }

    /// Running checksum, byte-swapped for sections that store it big-endian.
    pub fn checksum(&self, swap_bytes: bool) -> u16 {
        let value = self.crc.value();
        if swap_bytes {
            value.swap_bytes()
        } else {
            value
        }
    }

    /// Read `n` bytes through the bit path without touching the checksum.
    pub fn read_bytes_untracked(&mut self, n: usize) -> Result<Vec<u8>> {
        if n as u64 > self.remaining() {
            self.eof = true;
            return Err(DwgError::unexpected_eof(&format!("{n}-byte block")));
        }

        let saved = self.crc;
        let mut out = vec![0u8; n];
        let result: Result<()> = if self.bit_shift == 0 {
            self.source
                .read_into(self.position, &mut out)
                .map_err(DwgError::from)
                .map(|_| {
                    self.position += n as u64;
                    if let Some(&last) = out.last() {
                        self.last_byte = last;
                    }
                })
        } else {
            out.iter_mut().try_for_each(|slot| {
                *slot = self.read_byte()?;
                Ok(())
            })
        };
        self.crc = saved;
        result.map(|_| out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dwg::crc::crc8;
    use std::io::Cursor;

    fn cursor(data: &[u8]) -> BitCursor<Cursor<Vec<u8>>> {
        BitCursor::new(Cursor::new(data.to_vec())).unwrap()
    }

    #[test]
    fn test_read_bits_msb_first() {
        // 0b1011_0000
        let mut c = cursor(&[0xB0]);
        let bits: Vec<bool> = (0..8).map(|_| c.read_bit().unwrap()).collect();
        assert_eq!(bits, [true, false, true, true, false, false, false, false]);
        assert_eq!(c.position(), CursorPosition::new(1, 0));
    }

    #[test]
    fn test_read_byte_mid_byte() {
        let mut c = cursor(&[0b1010_1010, 0b1100_1100]);
        c.read_bit().unwrap();
        c.read_bit().unwrap();
        // Remaining 6 bits of byte 0 then 2 bits of byte 1.
        assert_eq!(c.read_byte().unwrap(), 0b1010_1011);
        assert_eq!(c.position(), CursorPosition::new(1, 2));
        assert_eq!(c.position_in_bits(), 10);
    }

    #[test]
    fn test_checksum_folds_each_byte_once() {
        let data = [0x12, 0x34, 0x56];
        let mut c = cursor(&data);
        c.reset_checksum(CRC_SEED);
        c.read_bit().unwrap();
        c.read_byte().unwrap();
        c.read_bit().unwrap();
        assert_eq!(c.checksum(false), crc8(CRC_SEED, &data[..2]));

        for _ in 0..13 {
            c.read_bit().unwrap();
        }
        assert_eq!(c.checksum(false), crc8(CRC_SEED, &data));
        assert_eq!(c.checksum(true), crc8(CRC_SEED, &data).swap_bytes());
    }

    #[test]
    fn test_seek_mid_byte_does_not_fold() {
        let data = [0xFF, 0x0F, 0x80];
        let mut c = cursor(&data);
        c.seek(1, 4).unwrap();
        c.reset_checksum(0);
        // Low nibble of byte 1 is all ones.
        for _ in 0..4 {
            assert!(c.read_bit().unwrap());
        }
        assert_eq!(c.checksum(false), 0);
        assert!(c.read_bit().unwrap());
        assert_eq!(c.checksum(false), crc8(0, &data[2..]));
    }

    #[test]
    fn test_peek_is_non_mutating() {
        let mut c = cursor(&[0x01, 0x02, 0x03]);
        c.read_bit().unwrap();
        let before = c.position();
        assert_eq!(c.peek_next_byte(), Some(0x02));
        assert_eq!(c.peek_next_byte(), Some(0x02));
        assert_eq!(c.position(), before);
    }

    #[test]
    fn test_peek_at_page_boundary() {
        let data: Vec<u8> = (0..16).collect();

        let mut c = BitCursor::with_page_size(Cursor::new(data.clone()), 4).unwrap();
        for _ in 0..4 {
            c.read_byte().unwrap();
        }
        c.read_bit().unwrap();
        assert_eq!(c.position(), CursorPosition::new(4, 1));
        assert_eq!(c.peek_next_byte(), Some(5));

        let mut c = BitCursor::with_page_size(Cursor::new(data), 4).unwrap();
        c.seek(4, 3).unwrap();
        assert_eq!(c.peek_next_byte(), Some(5));
        c.seek(7, 1).unwrap();
        assert_eq!(c.peek_next_byte(), Some(8));
    }

    /// Reports a fixed length but fails every read.
    struct BrokenSource {
        pos: u64,
    }

    impl Read for BrokenSource {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
        }
    }

    impl Seek for BrokenSource {
        fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
            self.pos = match pos {
                std::io::SeekFrom::Start(p) => p,
                std::io::SeekFrom::End(d) => (16 + d) as u64,
                std::io::SeekFrom::Current(d) => (self.pos as i64 + d) as u64,
            };
            Ok(self.pos)
        }
    }

    #[test]
    fn test_failed_seek_keeps_position() {
        let mut c = BitCursor::with_page_size(BrokenSource { pos: 0 }, 4).unwrap();
        assert!(c.seek(5, 3).is_err());
        assert_eq!(c.position(), CursorPosition::new(0, 0));
        assert_eq!(c.bit_shift(), 0);
        assert!(c.is_eof());
    }

    #[test]
    fn test_advance_to_byte_boundary() {
        let mut c = cursor(&[0xFF, 0x42]);
        c.read_bit().unwrap();
        c.advance_to_byte_boundary();
        assert_eq!(c.position(), CursorPosition::new(1, 0));
        assert_eq!(c.read_byte().unwrap(), 0x42);

        // No-op when already aligned.
        c.advance_to_byte_boundary();
        assert_eq!(c.position(), CursorPosition::new(2, 0));
    }

    #[test]
    fn test_untracked_read_restores_checksum() {
        let data = [0x10, 0x20, 0x30, 0x40, 0x50];
        let mut c = cursor(&data);
        c.reset_checksum(CRC_SEED);
        c.read_byte().unwrap();
        let before = c.checksum(false);
        assert_eq!(c.read_bytes_untracked(3).unwrap(), vec![0x20, 0x30, 0x40]);
        assert_eq!(c.checksum(false), before);
        assert_eq!(c.read_byte().unwrap(), 0x50);

        let mut c = cursor(&data);
        c.read_bit().unwrap();
        c.reset_checksum(0);
        c.read_bytes_untracked(2).unwrap();
        assert_eq!(c.checksum(false), 0);
    }

    #[test]
    fn test_eof() {
        let mut c = cursor(&[0xAA]);
        c.read_byte().unwrap();
        assert!(!c.is_eof());
        assert!(c.read_bit().is_err());
        assert!(c.is_eof());

        assert!(c.seek(2, 0).is_err());
        c.seek(0, 0).unwrap();
        assert!(!c.is_eof());
        assert!(c.read_bytes_untracked(2).is_err());
    }

    #[test]
    fn test_small_pages() {
        let data: Vec<u8> = (0..50).collect();
        let mut c = BitCursor::with_page_size(Cursor::new(data.clone()), 3).unwrap();
        c.read_bit().unwrap();
        c.reset_checksum(CRC_SEED);
        let mut out = Vec::new();
        for _ in 0..40 {
            out.push(c.read_byte().unwrap());
        }
        let expected: Vec<u8> = data[..41].windows(2).map(|w| (w[0] << 1) | (w[1] >> 7)).collect();
        assert_eq!(out, expected);
        assert_eq!(c.checksum(false), crc8(CRC_SEED, &data[1..41]));
    }
}
