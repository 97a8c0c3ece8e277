//! Trailing copy of the file header found in R13/R14 drawings.

use super::DwgSectionLocatorRecord;

/// One handle seed record of the second file header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecondHeaderHandle {
    /// Record index (RC).
    pub index: u8,
    /// Number of value bytes as stored.
    pub size: u8,
    /// Value, stored most significant byte first.
    pub value: u64,
}

/// Decoded `AcDb:SecondHeader` section.
#[derive(Debug, Clone, Default)]
pub struct SecondFileHeader {
    /// Absolute offset of the start sentinel.
    pub offset: u64,
    /// Declared size (RL) following the start sentinel.
    pub size: u32,
    /// The 12-byte version block, starting with the ASCII version tag.
    pub version_block: [u8; 12],
    /// RC after the zero bits, usually 0x18.
    pub unknown_rc: u8,
    pub unknown_rc4: [u8; 4],
    /// Copies of the locator records.
    pub records: Vec<DwgSectionLocatorRecord>,
    pub handles: Vec<SecondHeaderHandle>,
    pub crc: u16,
}

impl SecondFileHeader {
    /// The version tag at the start of the version block.
    pub fn version_tag(&self) -> &[u8] {
        &self.version_block[..6]
    }

    /// Handle record with the given index.
    pub fn handle(&self, index: u8) -> Option<&SecondHeaderHandle> {
        self.handles.iter().find(|h| h.index == index)
    }
}
