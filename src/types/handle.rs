//! Handle type for DWG objects
//!
//! Handles are unique 64-bit identifiers for all objects in a drawing.

use std::fmt;

/// A unique identifier for DWG objects
///
/// Handles are 64-bit unsigned integers that uniquely identify
/// objects within a drawing. Handle 0 is reserved and invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The null/invalid handle (0)
    pub const NULL: Handle = Handle(0);

    /// Create a new handle from a u64 value
    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    /// Get the raw u64 value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Check if this is a null/invalid handle
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}

impl fmt::UpperHex for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// A handle reference as stored in the bitstream.
///
/// The code nibble is kept verbatim. Its meaning (ownership / pointer kind,
/// or relative offset forms) is not interpreted by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HandleReference {
    /// The opaque 4-bit code.
    pub code: u8,
    /// Handle value assembled big-endian from the counted bytes.
    pub handle: Handle,
}

impl HandleReference {
    pub const fn new(code: u8, handle: Handle) -> Self {
        Self { code, handle }
    }
}

impl fmt::Display for HandleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.code, self.handle)
    }
}
