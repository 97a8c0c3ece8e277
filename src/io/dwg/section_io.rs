//! Shared helpers for section readers: version flags, sentinel matching
//! and checksum verification.

use crate::error::{DwgError, Result};
use crate::types::DwgVersion;

use super::constants::sentinels::Sentinel;

/// Pre-computed version flags for a section reader.
///
/// Each section reader creates a `SectionIO` so that version-conditional
/// reads stay short.
#[derive(Debug, Clone, Copy)]
pub struct SectionIO {
    version: DwgVersion,

    /// R13-R14 only
    pub r13_14_only: bool,
    /// R13-R2000 only
    pub r13_15_only: bool,
    /// R2000+ (AC1015+)
    pub r2000_plus: bool,
    /// Pre-R2004
    pub r2004_pre: bool,
    /// Pre-R2007
    pub r2007_pre: bool,
    /// R2004+ (AC1018+)
    pub r2004_plus: bool,
    /// R2007+ (AC1021+)
    pub r2007_plus: bool,
    /// R2010+ (AC1024+)
    pub r2010_plus: bool,
}

impl SectionIO {
    pub fn new(version: DwgVersion) -> Self {
        Self {
            r13_14_only: matches!(version, DwgVersion::R13 | DwgVersion::R14),
            r13_15_only: version >= DwgVersion::R13 && version <= DwgVersion::R2000,
            r2000_plus: version >= DwgVersion::R2000,
            r2004_pre: version < DwgVersion::R2004,
            r2007_pre: version < DwgVersion::R2007,
            r2004_plus: version >= DwgVersion::R2004,
            r2007_plus: version >= DwgVersion::R2007,
            r2010_plus: version >= DwgVersion::R2010,
            version,
        }
    }

    pub fn version(&self) -> DwgVersion {
        self.version
    }

    /// Check if two 16-byte sentinel arrays match.
    pub fn check_sentinel(actual: &Sentinel, expected: &Sentinel) -> bool {
        actual == expected
    }

    /// Fail with [`DwgError::InvalidSentinel`] unless `actual` matches.
    ///
    /// `offset` is the file position the sentinel was read from.
    pub fn expect_sentinel(
        actual: &Sentinel,
        expected: &Sentinel,
        section: &'static str,
        offset: u64,
    ) -> Result<()> {
        if Self::check_sentinel(actual, expected) {
            Ok(())
        } else {
            Err(DwgError::InvalidSentinel { section, offset })
        }
    }

    /// Fail with [`DwgError::ChecksumMismatch`] unless the stored value
    /// equals the running one.
    pub fn verify_checksum(section: &'static str, stored: u16, computed: u16) -> Result<()> {
        if stored == computed {
            Ok(())
        } else {
            Err(DwgError::ChecksumMismatch {
                section,
                stored,
                computed,
            })
        }
    }

    /// Fail with [`DwgError::OffsetMismatch`] unless the cursor sits where
    /// the locator table says it should.
    pub fn expect_offset(section: &'static str, expected: u64, actual: u64) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(DwgError::OffsetMismatch {
                section,
                expected,
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeStatus;
    use crate::io::dwg::constants::sentinels;

    #[test]
    fn test_version_flags_r13() {
        let sio = SectionIO::new(DwgVersion::R13);
        assert!(sio.r13_14_only);
        assert!(sio.r13_15_only);
        assert!(!sio.r2000_plus);
        assert!(sio.r2004_pre);
        assert!(!sio.r2004_plus);
        assert!(!sio.r2007_plus);
        assert!(!sio.r2010_plus);
    }

    #[test]
    fn test_version_flags_r2000() {
        let sio = SectionIO::new(DwgVersion::R2000);
        assert!(!sio.r13_14_only);
        assert!(sio.r13_15_only);
        assert!(sio.r2000_plus);
        assert!(sio.r2004_pre);
        assert!(!sio.r2004_plus);
    }

    #[test]
    fn test_version_flags_r2007() {
        let sio = SectionIO::new(DwgVersion::R2007);
        assert!(sio.r2004_plus);
        assert!(sio.r2007_plus);
        assert!(!sio.r2007_pre);
        assert!(!sio.r2010_plus);
        assert_eq!(sio.version(), DwgVersion::R2007);
    }

    #[test]
    fn test_expect_sentinel() {
        assert!(SectionIO::expect_sentinel(
            &sentinels::HEADER_START,
            &sentinels::HEADER_START,
            "AcDb:Header",
            0
        )
        .is_ok());

        let mut bad = sentinels::HEADER_START;
        bad[7] ^= 0x01;
        let err = SectionIO::expect_sentinel(&bad, &sentinels::HEADER_START, "AcDb:Header", 0x61)
            .unwrap_err();
        assert_eq!(err.status(), DecodeStatus::InvalidSentinel);
        assert!(err.to_string().contains("0x61"));
    }

    #[test]
    fn test_verify_checksum() {
        assert!(SectionIO::verify_checksum("AcDb:Classes", 0xBEEF, 0xBEEF).is_ok());
        let err = SectionIO::verify_checksum("AcDb:Classes", 0xBEEF, 0xBEEE).unwrap_err();
        assert_eq!(err.status(), DecodeStatus::ChecksumMismatch);
    }

    #[test]
    fn test_expect_offset() {
        assert!(SectionIO::expect_offset("AcDb:Handles", 10, 10).is_ok());
        let err = SectionIO::expect_offset("AcDb:Handles", 10, 12).unwrap_err();
        assert_eq!(err.status(), DecodeStatus::OffsetMismatch);
    }
}
