//! Error types for acadbits

use std::fmt;
use std::io;
use thiserror::Error;

/// Closed set of decode outcomes.
///
/// Every section decoder either succeeds or fails with exactly one of these
/// kinds. The orchestrator treats any kind other than [`DecodeStatus::Ok`]
/// as terminal for the current open operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodeStatus {
    /// No error recorded.
    #[default]
    Ok,
    /// The underlying file could not be read.
    IoError,
    /// The file exists but contains no bytes.
    EmptyFile,
    /// The path names something that is not a regular file.
    NotAFile,
    /// The 6-byte version tag is not a known DWG revision.
    UnknownVersion,
    /// The version is recognised but its container layout is not decoded.
    UnsupportedVersion,
    /// A 16-byte section sentinel did not match.
    InvalidSentinel,
    /// A stored section checksum did not match the running checksum.
    ChecksumMismatch,
    /// A section did not start or end where the locator table says.
    OffsetMismatch,
    /// A section's declared size disagrees with the bytes it consumed.
    SizeMismatch,
    /// A decoded value is outside its valid range (e.g. object type code).
    OutOfRange,
    /// The bitstream is structurally malformed.
    InvalidFormat,
    /// The payload kind is deliberately not decoded.
    NotImplemented,
}

impl DecodeStatus {
    /// Integrity and structural failures that invalidate every later file
    /// position.
    pub fn is_fatal(self) -> bool {
        !matches!(self, DecodeStatus::Ok | DecodeStatus::NotImplemented)
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Main error type for acadbits operations
#[derive(Debug, Error)]
pub enum DwgError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The file has zero length
    #[error("Empty file: {0}")]
    EmptyFile(String),

    /// The path is a directory or another non-regular file
    #[error("Not a regular file: {0}")]
    NotAFile(String),

    /// Unrecognised version tag
    #[error("Unknown DWG version tag: {0:?}")]
    UnknownVersion(String),

    /// Recognised but unsupported CAD version
    #[error("Unsupported DWG version: {0}")]
    UnsupportedVersion(String),

    /// Invalid sentinel in file
    #[error("Invalid sentinel in {section} at offset {offset:#X}")]
    InvalidSentinel { section: &'static str, offset: u64 },

    /// CRC checksum mismatch
    #[error("CRC checksum mismatch in {section}: stored {stored:#06X}, computed {computed:#06X}")]
    ChecksumMismatch {
        section: &'static str,
        stored: u16,
        computed: u16,
    },

    /// Section position disagrees with the locator table
    #[error("Offset mismatch in {section}: expected {expected:#X}, found {actual:#X}")]
    OffsetMismatch {
        section: &'static str,
        expected: u64,
        actual: u64,
    },

    /// Declared section size disagrees with consumed bytes
    #[error("Size mismatch in {section}: declared {declared}, consumed {consumed}")]
    SizeMismatch {
        section: &'static str,
        declared: u64,
        consumed: u64,
    },

    /// Value outside its valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Feature not yet implemented
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl DwgError {
    /// The closed status kind of this error.
    pub fn status(&self) -> DecodeStatus {
        match self {
            DwgError::Io(_) => DecodeStatus::IoError,
            DwgError::EmptyFile(_) => DecodeStatus::EmptyFile,
            DwgError::NotAFile(_) => DecodeStatus::NotAFile,
            DwgError::UnknownVersion(_) => DecodeStatus::UnknownVersion,
            DwgError::UnsupportedVersion(_) => DecodeStatus::UnsupportedVersion,
            DwgError::InvalidSentinel { .. } => DecodeStatus::InvalidSentinel,
            DwgError::ChecksumMismatch { .. } => DecodeStatus::ChecksumMismatch,
            DwgError::OffsetMismatch { .. } => DecodeStatus::OffsetMismatch,
            DwgError::SizeMismatch { .. } => DecodeStatus::SizeMismatch,
            DwgError::OutOfRange(_) => DecodeStatus::OutOfRange,
            DwgError::InvalidFormat(_) => DecodeStatus::InvalidFormat,
            DwgError::NotImplemented(_) => DecodeStatus::NotImplemented,
        }
    }

    /// Shorthand for an unexpected end of data.
    pub fn unexpected_eof(context: &str) -> Self {
        DwgError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("unexpected end of data while reading {context}"),
        ))
    }
}

/// Result type alias for acadbits operations
pub type Result<T> = std::result::Result<T, DwgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DwgError::UnsupportedVersion("R2004".to_string());
        assert_eq!(err.to_string(), "Unsupported DWG version: R2004");
    }

    #[test]
    fn test_checksum_error() {
        let err = DwgError::ChecksumMismatch {
            section: "AcDb:Classes",
            stored: 0x1234,
            computed: 0x5678,
        };
        assert!(err.to_string().contains("0x1234"));
        assert!(err.to_string().contains("0x5678"));
        assert_eq!(err.status(), DecodeStatus::ChecksumMismatch);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: DwgError = io_err.into();
        assert!(matches!(err, DwgError::Io(_)));
        assert_eq!(err.status(), DecodeStatus::IoError);
    }

    #[test]
    fn test_fatal_kinds() {
        assert!(DecodeStatus::InvalidSentinel.is_fatal());
        assert!(DecodeStatus::OffsetMismatch.is_fatal());
        assert!(DecodeStatus::ChecksumMismatch.is_fatal());
        assert!(!DecodeStatus::Ok.is_fatal());
        assert!(!DecodeStatus::NotImplemented.is_fatal());
    }
}
