//! DWG format revisions.

use std::fmt;

/// DWG file format revision.
///
/// Derived once from the 6-byte ASCII tag at the start of the file and
/// immutable for the rest of the decode session. Variants are ordered so
/// range checks such as `version >= DwgVersion::R2000` read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DwgVersion {
    /// No version decoded yet.
    #[default]
    None,
    /// AC1012
    R13,
    /// AC1014
    R14,
    /// AC1015
    R2000,
    /// AC1018
    R2004,
    /// AC1021
    R2007,
    /// AC1024
    R2010,
}

impl DwgVersion {
    /// Every real revision, oldest first.
    pub const ALL: [DwgVersion; 6] = [
        DwgVersion::R13,
        DwgVersion::R14,
        DwgVersion::R2000,
        DwgVersion::R2004,
        DwgVersion::R2007,
        DwgVersion::R2010,
    ];

    /// Map the on-disk tag (e.g. `b"AC1015"`) to a revision.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"AC1012" => Some(DwgVersion::R13),
            b"AC1014" => Some(DwgVersion::R14),
            b"AC1015" => Some(DwgVersion::R2000),
            b"AC1018" => Some(DwgVersion::R2004),
            b"AC1021" => Some(DwgVersion::R2007),
            b"AC1024" => Some(DwgVersion::R2010),
            _ => None,
        }
    }

    /// The on-disk tag for this revision.
    pub fn tag(&self) -> &'static str {
        match self {
            DwgVersion::None => "",
            DwgVersion::R13 => "AC1012",
            DwgVersion::R14 => "AC1014",
            DwgVersion::R2000 => "AC1015",
            DwgVersion::R2004 => "AC1018",
            DwgVersion::R2007 => "AC1021",
            DwgVersion::R2010 => "AC1024",
        }
    }

    /// Whether the R13–R2000 flat, locator-based layout applies.
    pub fn is_locator_layout(&self) -> bool {
        matches!(self, DwgVersion::R13 | DwgVersion::R14 | DwgVersion::R2000)
    }
}

impl fmt::Display for DwgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DwgVersion::None => "None",
            DwgVersion::R13 => "R13",
            DwgVersion::R14 => "R14",
            DwgVersion::R2000 => "R2000",
            DwgVersion::R2004 => "R2004",
            DwgVersion::R2007 => "R2007",
            DwgVersion::R2010 => "R2010",
        };
        f.write_str(name)
    }
}

/// Inclusive range of revisions in which an on-disk field is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    pub min: DwgVersion,
    pub max: DwgVersion,
}

impl VersionRange {
    pub const ALL: VersionRange = VersionRange::new(DwgVersion::R13, DwgVersion::R2010);
    pub const R13_R14: VersionRange = VersionRange::new(DwgVersion::R13, DwgVersion::R14);
    pub const R13_R2000: VersionRange = VersionRange::new(DwgVersion::R13, DwgVersion::R2000);
    pub const PRE_R2004: VersionRange = VersionRange::R13_R2000;
    pub const R2000_PLUS: VersionRange = VersionRange::new(DwgVersion::R2000, DwgVersion::R2010);
    pub const R2004_PLUS: VersionRange = VersionRange::new(DwgVersion::R2004, DwgVersion::R2010);
    pub const R2007_PLUS: VersionRange = VersionRange::new(DwgVersion::R2007, DwgVersion::R2010);
    pub const R2010_PLUS: VersionRange = VersionRange::new(DwgVersion::R2010, DwgVersion::R2010);

    pub const fn new(min: DwgVersion, max: DwgVersion) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, version: DwgVersion) -> bool {
        version >= self.min && version <= self.max
    }
}
