//! Versioned archive context: a bit cursor plus the active format version
//! and the last decode status.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use encoding_rs::Encoding;

use crate::error::{DecodeStatus, DwgError, Result};
use crate::types::DwgVersion;

use super::bit_cursor::{BitCursor, CursorPosition};
use super::paged_source::DEFAULT_PAGE_SIZE;
use super::stream_reader::IDwgStreamReader;

/// One open drawing, borrowed in turn by each section reader.
pub struct DwgArchive<R> {
    cursor: BitCursor<R>,
    version: DwgVersion,
    encoding: &'static Encoding,
    status: DecodeStatus,
}

impl DwgArchive<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BitCursor::open(path)?))
    }
}

impl DwgArchive<Cursor<Vec<u8>>> {
    /// In-memory archive with a fixed version, mostly for tests.
    pub fn from_bytes(data: Vec<u8>, version: DwgVersion) -> Result<Self> {
        let mut archive = Self::new(BitCursor::new(Cursor::new(data))?);
        archive.set_version(version);
        Ok(archive)
    }
}

impl<R: Read + Seek> DwgArchive<R> {
    pub fn new(cursor: BitCursor<R>) -> Self {
        Self {
            cursor,
            version: DwgVersion::None,
            encoding: encoding_rs::WINDOWS_1252,
            status: DecodeStatus::Ok,
        }
    }

    pub fn from_reader(reader: R, page_size: usize) -> Result<Self> {
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        Ok(Self::new(BitCursor::with_page_size(reader, page_size)?))
    }

    /// Set the version once the file header tag has been decoded.
    pub fn set_version(&mut self, version: DwgVersion) {
        self.version = version;
    }

    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    /// Status of the most recent recorded decode step.
    pub fn status(&self) -> DecodeStatus {
        self.status
    }

    /// Remember the outcome of a decode step and pass it through.
    pub fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        self.status = match &result {
            Ok(_) => DecodeStatus::Ok,
            Err(e) => e.status(),
        };
        result
    }

    pub fn cursor(&self) -> &BitCursor<R> {
        &self.cursor
    }

    pub fn len(&self) -> u64 {
        self.cursor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    pub fn seek(&mut self, byte: u64, bit: u8) -> Result<()> {
        self.cursor.seek(byte, bit)
    }

    pub fn seek_to(&mut self, position: CursorPosition) -> Result<()> {
        self.cursor.seek_to(position)
    }

    pub fn advance_to_byte_boundary(&mut self) {
        self.cursor.advance_to_byte_boundary();
    }

    pub fn peek_next_byte(&self) -> Option<u8> {
        self.cursor.peek_next_byte()
    }

    pub fn reset_checksum(&mut self, seed: u16) {
        self.cursor.reset_checksum(seed);
    }

    pub fn checksum(&self, swap_bytes: bool) -> u16 {
        self.cursor.checksum(swap_bytes)
    }

    pub fn read_bytes_untracked(&mut self, n: usize) -> Result<Vec<u8>> {
        self.cursor.read_bytes_untracked(n)
    }

    /// Byte offset of the cursor, failing if it sits mid-byte.
    pub fn byte_position(&self) -> Result<u64> {
        let pos = self.cursor.position();
        if pos.bit != 0 {
            return Err(DwgError::InvalidFormat(format!(
                "expected a byte boundary at {pos}"
            )));
        }
        Ok(pos.byte)
    }
}

impl<R: Read + Seek> IDwgStreamReader for DwgArchive<R> {
    fn version(&self) -> DwgVersion {
        self.version
    }

    fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn bit_shift(&self) -> u8 {
        self.cursor.bit_shift()
    }

    fn position(&self) -> CursorPosition {
        self.cursor.position()
    }

    fn remaining(&self) -> u64 {
        self.cursor.remaining()
    }

    fn read_bit(&mut self) -> Result<bool> {
        self.cursor.read_bit()
    }

    fn read_byte(&mut self) -> Result<u8> {
        self.cursor.read_byte()
    }
}
