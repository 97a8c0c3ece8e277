//! Section locator record from the R13-R2000 file header.

/// File offset and size of one section, as declared by the file header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DwgSectionLocatorRecord {
    /// Record number (RC).
    pub number: u8,
    /// Absolute byte offset of the section.
    pub seeker: u32,
    /// Size of the section in bytes.
    pub size: u32,
}

impl DwgSectionLocatorRecord {
    pub fn new(number: u8, seeker: u32, size: u32) -> Self {
        Self {
            number,
            seeker,
            size,
        }
    }

    /// Offset one past the last byte of the section.
    pub fn end(&self) -> u64 {
        self.seeker as u64 + self.size as u64
    }

    /// Whether the record actually locates a section.
    pub fn is_present(&self) -> bool {
        self.seeker != 0 && self.size != 0
    }
}
