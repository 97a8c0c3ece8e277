//! R13-R2000 file header.
//!
//! The file header carries the version tag, the preview address, the drawing
//! code page and the locator table every other section is reached through.

mod second_header;
mod section_locator;

pub use second_header::{SecondFileHeader, SecondHeaderHandle};
pub use section_locator::DwgSectionLocatorRecord;

use crate::types::DwgVersion;

/// Decoded file header of an R13-R2000 drawing.
#[derive(Debug, Clone, Default)]
pub struct DwgFileHeader {
    pub version: DwgVersion,
    /// Byte 5 of the seven bytes after the tag.
    pub maintenance_version: u8,
    /// Absolute offset of the preview image, 0 when absent.
    pub preview_address: u32,
    /// DWG version byte (the first of the two bytes after the preview address).
    pub dwg_version: u8,
    /// Application maintenance release byte.
    pub app_maintenance_version: u8,
    pub drawing_code_page: u16,
    /// Locator records in file order.
    pub records: Vec<DwgSectionLocatorRecord>,
    /// Stored header checksum (RS).
    pub crc: u16,
    /// Which legacy constant the checksum XORed to.
    pub crc_xor: u16,
    /// Absolute offset right after the closing sentinel.
    pub end_offset: u64,
}

impl DwgFileHeader {
    pub fn new(version: DwgVersion) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    /// Get a locator by its record number.
    pub fn record(&self, number: usize) -> Option<&DwgSectionLocatorRecord> {
        self.records.iter().find(|r| r.number as usize == number)
    }

    /// Get a locator by record number only if it actually locates a section.
    pub fn located(&self, number: usize) -> Option<&DwgSectionLocatorRecord> {
        self.record(number).filter(|r| r.is_present())
    }

    /// End offset of the furthest located section.
    pub fn furthest_section_end(&self) -> u64 {
        self.records.iter().map(|r| r.end()).max().unwrap_or(0)
    }

    /// Whether the file declares a preview image.
    pub fn has_preview(&self) -> bool {
        self.preview_address != 0
    }
}
