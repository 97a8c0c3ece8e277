//! Second file header reader (R13/R14).
//!
//! R13 and R14 drawings repeat the locator table after the last located
//! section, together with the handle seeds of the control objects. The
//! copy must agree with the file header.

use std::io::{Read, Seek};

use log::debug;

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::{section_names, sentinels, CRC_SEED};
use crate::io::dwg::file_header::{
    DwgFileHeader, DwgSectionLocatorRecord, SecondFileHeader, SecondHeaderHandle,
};
use crate::io::dwg::section_io::SectionIO;
use crate::types::DwgVersion;

use super::archive::DwgArchive;
use super::stream_reader::IDwgStreamReader;

/// Reader for the `AcDb:SecondHeader` section.
#[derive(Debug, Default)]
pub struct DwgSecondHeaderReader;

impl DwgSecondHeaderReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the second header, which starts where the furthest section of
    /// `file_header` ends.
    pub fn read<R: Read + Seek>(
        &self,
        archive: &mut DwgArchive<R>,
        file_header: &DwgFileHeader,
    ) -> Result<SecondFileHeader> {
        let section = section_names::SECOND_HEADER;
        let sio = SectionIO::new(archive.version());
        if !sio.r13_14_only {
            return Err(DwgError::NotImplemented(format!(
                "{section} for {}",
                sio.version()
            )));
        }

        let offset = file_header.furthest_section_end();
        archive.seek(offset, 0)?;

        let sentinel = archive.read_sentinel()?;
        SectionIO::expect_sentinel(&sentinel, &sentinels::SECOND_HEADER_START, section, offset)?;
        archive.reset_checksum(CRC_SEED);

        let mut header = SecondFileHeader {
            offset,
            ..Default::default()
        };

        // RL : size of this section
        header.size = archive.read_raw_ulong()?;
        let body_start = archive.byte_position()?;
        // BL : location of the beginning of this sentinel
        let address = archive.read_bit_long()? as u32 as u64;
        SectionIO::expect_offset(section, offset, address)?;

        // 12 RC : version block, AC1012 or AC1014 followed by zeros
        for b in header.version_block.iter_mut() {
            *b = archive.read_raw_char()?;
        }
        // B[4] : zero bits
        for _ in 0..4 {
            archive.read_bit()?;
        }
        header.unknown_rc = archive.read_raw_char()?;
        for b in header.unknown_rc4.iter_mut() {
            *b = archive.read_raw_char()?;
        }

        // RC : number of locator records
        let count = archive.read_raw_char()?;
        for _ in 0..count {
            let number = archive.read_raw_char()?;
            let seeker = archive.read_bit_long()? as u32;
            let size = archive.read_bit_long()? as u32;
            let copy = DwgSectionLocatorRecord::new(number, seeker, size);
            Self::check_record(file_header, &copy)?;
            header.records.push(copy);
        }

        // BS : number of handle records
        let handles = archive.read_bit_short()?;
        for _ in 0..handles {
            header.handles.push(Self::read_handle(archive)?);
        }

        archive.advance_to_byte_boundary();
        let consumed = archive.byte_position()? - body_start;
        if consumed != header.size as u64 {
            return Err(DwgError::SizeMismatch {
                section,
                declared: header.size as u64,
                consumed,
            });
        }

        let computed = archive.checksum(false);
        // RS : CRC
        header.crc = archive.read_raw_ushort()?;
        SectionIO::verify_checksum(section, header.crc, computed)?;

        if sio.version() == DwgVersion::R14 {
            // 8 junk bytes
            archive.read_bytes_untracked(8)?;
        }

        let end = archive.byte_position()?;
        let sentinel = archive.read_sentinel()?;
        SectionIO::expect_sentinel(&sentinel, &sentinels::SECOND_HEADER_END, section, end)?;

        debug!(
            "second header at {:#X}: {} locators, {} handle records",
            offset,
            header.records.len(),
            header.handles.len()
        );
        Ok(header)
    }

    fn check_record(file_header: &DwgFileHeader, copy: &DwgSectionLocatorRecord) -> Result<()> {
        let section = section_names::SECOND_HEADER;
        let original = file_header
            .record(copy.number as usize)
            .copied()
            .unwrap_or_default();
        SectionIO::expect_offset(section, original.seeker as u64, copy.seeker as u64)?;
        SectionIO::expect_offset(section, original.end(), copy.end())
    }

    /// RC size, RC index, then `size` value bytes, most significant first.
    fn read_handle<S: IDwgStreamReader + ?Sized>(reader: &mut S) -> Result<SecondHeaderHandle> {
        let size = reader.read_raw_char()?;
        let index = reader.read_raw_char()?;
        if size > 8 {
            return Err(DwgError::InvalidFormat(format!(
                "second header handle record {index} declares {size} value bytes"
            )));
        }
        let mut value = 0u64;
        for _ in 0..size {
            value = (value << 8) | reader.read_raw_char()? as u64;
        }
        Ok(SecondHeaderHandle { index, size, value })
    }
}
