//! R13-R2000 file header reader.
//!
//! Layout:
//! - 6 bytes version tag (`AC1012`, `AC1014`, `AC1015`)
//! - 7 bytes: zeros, maintenance version at index 5, then 0x01
//! - RL preview image address
//! - RC DWG version, RC application maintenance version
//! - RS drawing code page
//! - RL locator count, then count × (RC number, RL seeker, RL size)
//! - RS checksum, XORed with a constant that depends on the locator count
//! - 16 byte end sentinel

use std::io::{Read, Seek};

use log::debug;

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::{
    section_names, sentinels, CRC_SEED, LEGACY_HEADER_XOR, VERSION_TAG_LEN,
};
use crate::io::dwg::file_header::{DwgFileHeader, DwgSectionLocatorRecord};
use crate::io::dwg::section_io::SectionIO;
use crate::types::DwgVersion;

use super::archive::DwgArchive;
use super::stream_reader::{encoding_for_code_page, IDwgStreamReader};

/// Bytes per locator record on disk.
const LOCATOR_RECORD_SIZE: u64 = 9;

/// Reader for the file header at offset 0.
#[derive(Debug, Default)]
pub struct DwgFileHeaderReader;

impl DwgFileHeaderReader {
    pub fn new() -> Self {
        Self
    }

    /// Decode the file header and configure the archive's version and text
    /// encoding from it.
    pub fn read<R: Read + Seek>(&self, archive: &mut DwgArchive<R>) -> Result<DwgFileHeader> {
        archive.seek(0, 0)?;
        archive.reset_checksum(CRC_SEED);

        let tag = archive.read_bytes(VERSION_TAG_LEN)?;
        let version = DwgVersion::from_tag(&tag)
            .ok_or_else(|| DwgError::UnknownVersion(String::from_utf8_lossy(&tag).into_owned()))?;
        if !version.is_locator_layout() {
            return Err(DwgError::UnsupportedVersion(format!(
                "{} ({})",
                version,
                version.tag()
            )));
        }
        archive.set_version(version);

        let mut header = DwgFileHeader::new(version);

        // 7 bytes: 5 zeros, ACADMAINTVER, 0x01
        let preamble = archive.read_bytes(7)?;
        header.maintenance_version = preamble[5];

        // RL: preview image address
        header.preview_address = archive.read_raw_ulong()?;

        // RC: DWG version, RC: application maintenance version
        header.dwg_version = archive.read_raw_char()?;
        header.app_maintenance_version = archive.read_raw_char()?;

        // RS: drawing code page
        header.drawing_code_page = archive.read_raw_ushort()?;
        archive.set_encoding(encoding_for_code_page(header.drawing_code_page));

        // RL: number of locator records
        let count = archive.read_raw_long()?;
        if count < 0 || count as u64 * LOCATOR_RECORD_SIZE > archive.remaining() {
            return Err(DwgError::InvalidFormat(format!(
                "locator record count {count} does not fit the file"
            )));
        }

        for _ in 0..count {
            let number = archive.read_raw_char()?;
            let seeker = archive.read_raw_ulong()?;
            let size = archive.read_raw_ulong()?;
            header
                .records
                .push(DwgSectionLocatorRecord::new(number, seeker, size));
        }

        // RS: checksum over everything from offset 0
        let computed = archive.checksum(false);
        header.crc = archive.read_raw_ushort()?;
        let xor = header.crc ^ computed;
        if !LEGACY_HEADER_XOR.contains(&xor) {
            return Err(DwgError::ChecksumMismatch {
                section: section_names::FILE_HEADER,
                stored: header.crc,
                computed,
            });
        }
        header.crc_xor = xor;

        let sentinel_offset = archive.byte_position()?;
        let sentinel = archive.read_sentinel()?;
        SectionIO::expect_sentinel(
            &sentinel,
            &sentinels::FILE_HEADER_END,
            section_names::FILE_HEADER,
            sentinel_offset,
        )?;
        header.end_offset = archive.byte_position()?;

        debug!(
            "file header: {} maint {} code page {} with {} locators, ends at {:#X}",
            version,
            header.maintenance_version,
            header.drawing_code_page,
            header.records.len(),
            header.end_offset
        );

        Ok(header)
    }
}
