//! Constants, sentinel bytes, and magic numbers for the R13-R2010 file family.

/// Seed every section checksum is reset to before its body.
pub const CRC_SEED: u16 = 0xC0C1;

/// Values the file header checksum may XOR to.
///
/// The stored file header checksum is never the plain running value; it is
/// XORed with one of these depending on how many locators the file declares
/// (3, 4, 5 or 6 in that order).
pub const LEGACY_HEADER_XOR: [u16; 4] = [0xA598, 0x8101, 0x3CC4, 0x8461];

/// Length of the ASCII version tag at file offset 0.
pub const VERSION_TAG_LEN: usize = 6;

/// Length of every section sentinel.
pub const SENTINEL_LEN: usize = 16;

/// Section names used in diagnostics and errors.
pub mod section_names {
    pub const FILE_HEADER: &str = "AcDb:FileHeader";
    /// System variables (header variables)
    pub const HEADER: &str = "AcDb:Header";
    /// DXF class definitions
    pub const CLASSES: &str = "AcDb:Classes";
    /// Object map (handle -> file offset)
    pub const HANDLES: &str = "AcDb:Handles";
    pub const OBJ_FREE_SPACE: &str = "AcDb:ObjFreeSpace";
    pub const TEMPLATE: &str = "AcDb:Template";
    /// Trailing copy of the locator table (R13/R14)
    pub const SECOND_HEADER: &str = "AcDb:SecondHeader";
    /// Thumbnail preview image
    pub const PREVIEW: &str = "AcDb:Preview";
    /// Object records addressed by the object map
    pub const OBJECTS: &str = "AcDb:AcDbObjects";

    /// Get the locator index for a section name.
    /// Returns `None` for sections not addressed by the locator table.
    pub fn get_section_locator_by_name(name: &str) -> Option<usize> {
        match name {
            HEADER => Some(0),
            CLASSES => Some(1),
            HANDLES => Some(2),
            OBJ_FREE_SPACE => Some(3),
            TEMPLATE => Some(4),
            _ => None,
        }
    }
}

/// Sentinel bytes for section boundaries (16-byte markers).
pub mod sentinels {
    use super::SENTINEL_LEN;

    pub type Sentinel = [u8; SENTINEL_LEN];

    /// AcDb:Header section start sentinel
    pub const HEADER_START: Sentinel = [
        0xCF, 0x7B, 0x1F, 0x23, 0xFD, 0xDE, 0x38, 0xA9, 0x5F, 0x7C, 0x68, 0xB8, 0x4E, 0x6D,
        0x33, 0x5F,
    ];
    /// AcDb:Header section end sentinel
    pub const HEADER_END: Sentinel = [
        0x30, 0x84, 0xE0, 0xDC, 0x02, 0x21, 0xC7, 0x56, 0xA0, 0x83, 0x97, 0x47, 0xB1, 0x92,
        0xCC, 0xA0,
    ];
    /// AcDb:Classes section start sentinel
    pub const CLASSES_START: Sentinel = [
        0x8D, 0xA1, 0xC4, 0xB8, 0xC4, 0xA9, 0xF8, 0xC5, 0xC0, 0xDC, 0xF4, 0x5F, 0xE7, 0xCF,
        0xB6, 0x8A,
    ];
    /// AcDb:Classes section end sentinel
    pub const CLASSES_END: Sentinel = [
        0x72, 0x5E, 0x3B, 0x47, 0x3B, 0x56, 0x07, 0x3A, 0x3F, 0x23, 0x0B, 0xA0, 0x18, 0x30,
        0x49, 0x75,
    ];
    /// AcDb:Preview section start sentinel
    pub const PREVIEW_START: Sentinel = [
        0x1F, 0x25, 0x6D, 0x07, 0xD4, 0x36, 0x28, 0x28, 0x9D, 0x57, 0xCA, 0x3F, 0x9D, 0x44,
        0x10, 0x2B,
    ];
    /// AcDb:Preview section end sentinel
    pub const PREVIEW_END: Sentinel = [
        0xE0, 0xDA, 0x92, 0xF8, 0x2B, 0xC9, 0xD7, 0xD7, 0x62, 0xA8, 0x35, 0xC0, 0x62, 0xBB,
        0xEF, 0xD4,
    ];
    /// File header end sentinel
    pub const FILE_HEADER_END: Sentinel = [
        0x95, 0xA0, 0x4E, 0x28, 0x99, 0x82, 0x1A, 0xE5, 0x5E, 0x41, 0xE0, 0x5F, 0x9D, 0x3A,
        0x4D, 0x00,
    ];
    /// Second file header start sentinel (R13/R14)
    pub const SECOND_HEADER_START: Sentinel = [
        0xD4, 0x7B, 0x21, 0xCE, 0x28, 0x93, 0x9F, 0xBF, 0x53, 0x24, 0x40, 0x09, 0x12, 0x3C,
        0xAA, 0x01,
    ];
    /// Second file header end sentinel (R13/R14)
    pub const SECOND_HEADER_END: Sentinel = [
        0x2B, 0x84, 0xDE, 0x31, 0xD7, 0x6C, 0x60, 0x40, 0xAC, 0xDB, 0xBF, 0xF6, 0xED, 0xC3,
        0x55, 0xFE,
    ];

    /// Get the start sentinel bytes for a given section name, if known.
    pub fn start_sentinel(section_name: &str) -> Option<&'static Sentinel> {
        use super::section_names as names;
        match section_name {
            names::HEADER => Some(&HEADER_START),
            names::CLASSES => Some(&CLASSES_START),
            names::PREVIEW => Some(&PREVIEW_START),
            names::SECOND_HEADER => Some(&SECOND_HEADER_START),
            _ => None,
        }
    }

    /// Get the end sentinel bytes for a given section name, if known.
    pub fn end_sentinel(section_name: &str) -> Option<&'static Sentinel> {
        use super::section_names as names;
        match section_name {
            names::FILE_HEADER => Some(&FILE_HEADER_END),
            names::HEADER => Some(&HEADER_END),
            names::CLASSES => Some(&CLASSES_END),
            names::PREVIEW => Some(&PREVIEW_END),
            names::SECOND_HEADER => Some(&SECOND_HEADER_END),
            _ => None,
        }
    }
}

/// Object map constants
pub mod handle_section {
    /// Largest payload a single object map chunk may declare
    pub const MAX_CHUNK_SIZE: usize = 2032;
    /// Width of the chunk size prefix and of the chunk checksum
    pub const CHUNK_CRC_SIZE: usize = 2;
}

/// Locator indices in the R13-R2000 file header table
pub mod section_locator {
    /// AcDb:Header section locator index
    pub const HEADER: usize = 0;
    /// AcDb:Classes section locator index
    pub const CLASSES: usize = 1;
    /// AcDb:Handles (object map) section locator index
    pub const HANDLES: usize = 2;
    /// AcDb:ObjFreeSpace section locator index
    pub const OBJ_FREE_SPACE: usize = 3;
    /// AcDb:Template section locator index
    pub const TEMPLATE: usize = 4;
}

/// Class numbers at or above this value refer to the class table.
pub const FIRST_CLASS_NUMBER: u16 = 500;
