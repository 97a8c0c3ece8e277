//! Color values as stored in the DWG bitstream (CMC)

use std::fmt;

/// Resolved color of an object or header variable
///
/// - By index (1-255): AutoCAD Color Index (ACI)
/// - By RGB values: True color (R2004+)
/// - By layer / by block: inherited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
    /// True color with RGB values
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from an AutoCAD Color Index
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            // Negative means layer is off
            _ if index < 0 => Color::Index((-(index as i32)).min(255) as u8),
            _ => Color::Index(7),
        }
    }

    /// Create a true color from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Interpret an R2004+ packed color long.
    ///
    /// The high byte is the color method: 0xC0 by layer, 0xC1 by block,
    /// 0xC2 true color, 0xC3 indexed (index in the low byte).
    pub fn from_packed(value: u32) -> Self {
        let [b, g, r, method] = value.to_le_bytes();
        match method {
            0xC0 => Color::ByLayer,
            0xC1 => Color::ByBlock,
            0xC2 => Color::from_rgb(r, g, b),
            0xC3 => Color::from_index(b as i16),
            _ => Color::ByLayer,
        }
    }

    /// Get RGB values (if applicable)
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Rgb { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "Index({})", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}

/// A full CMC color record.
///
/// Pre-R2004 only the index is on disk. R2004+ adds the packed RGB long,
/// a flag byte and, depending on flag bits 1 and 2, a color name and a
/// color book name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CmColor {
    /// BS color index (always 0 in R2004+ files).
    pub index: i16,
    /// Packed RGB long (R2004+).
    pub rgb: Option<u32>,
    /// Flag byte (R2004+).
    pub flags: u8,
    /// Color name, present when `flags & 1`.
    pub name: Option<String>,
    /// Color book name, present when `flags & 2`.
    pub book_name: Option<String>,
}

impl CmColor {
    /// Resolve to a [`Color`].
    pub fn color(&self) -> Color {
        match self.rgb {
            Some(packed) => Color::from_packed(packed),
            None => Color::from_index(self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_index() {
        assert_eq!(Color::from_index(0), Color::ByBlock);
        assert_eq!(Color::from_index(256), Color::ByLayer);
        assert_eq!(Color::from_index(1), Color::Index(1));
        assert_eq!(Color::from_index(-3), Color::Index(3));
    }

    #[test]
    fn test_color_from_packed() {
        assert_eq!(Color::from_packed(0xC000_0000), Color::ByLayer);
        assert_eq!(Color::from_packed(0xC200_FF80), Color::from_rgb(0x00, 0xFF, 0x80));
        assert_eq!(Color::from_packed(0xC300_0005), Color::Index(5));
    }

    #[test]
    fn test_cm_color_resolution() {
        let legacy = CmColor {
            index: 7,
            ..Default::default()
        };
        assert_eq!(legacy.color(), Color::Index(7));

        let truecolor = CmColor {
            rgb: Some(0xC210_2030),
            ..Default::default()
        };
        assert_eq!(truecolor.color().rgb(), Some((0x10, 0x20, 0x30)));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::ByLayer.to_string(), "ByLayer");
        assert_eq!(Color::from_rgb(255, 0, 0).to_string(), "RGB(255, 0, 0)");
    }
}
