//! Preview (thumbnail) image of a drawing.
//!
//! The image bytes are kept as stored; no image format is decoded.

/// Type of media stored in a preview entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PreviewType {
    /// Unrecognised entry code.
    Unknown = 0,
    /// BMP bitmap image.
    Bmp = 2,
    /// Windows Metafile (WMF) image.
    Wmf = 3,
    /// PNG image.
    Png = 6,
}

impl PreviewType {
    /// Create from a raw entry code.
    pub fn from_code(code: u8) -> Self {
        match code {
            2 => Self::Bmp,
            3 => Self::Wmf,
            6 => Self::Png,
            _ => Self::Unknown,
        }
    }
}

/// One image entry of the preview section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub kind: PreviewType,
    /// Raw entry code as stored.
    pub code: u8,
    /// Absolute file offset of the image bytes.
    pub start: u32,
    pub data: Vec<u8>,
}

/// Contents of the preview section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DwgPreview {
    /// Raw header block (entry code 1), usually 80 zero bytes.
    pub raw_header: Vec<u8>,
    /// Images in entry order.
    pub images: Vec<PreviewImage>,
}

impl DwgPreview {
    /// First image of the given kind.
    pub fn image(&self, kind: PreviewType) -> Option<&PreviewImage> {
        self.images.iter().find(|i| i.kind == kind)
    }

    /// Returns `true` if no image bytes are present.
    pub fn is_empty(&self) -> bool {
        self.images.iter().all(|i| i.data.is_empty())
    }
}
