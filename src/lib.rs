//! # acadbits
//!
//! A pure Rust reader for the DWG R13-R2010 bitstream.
//!
//! DWG packs values at sub-byte granularity, changes its layout by version
//! and guards every section with running 16-bit checksums and 16-byte
//! sentinels. This library provides the bit cursor, the full set of
//! primitive codecs and the section decoders for R13, R14 and R2000
//! drawings. Later revisions are recognised by their version tag and
//! reported as unsupported.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use acadbits::io::dwg::DwgReader;
//!
//! let doc = DwgReader::from_file("sample.dwg")?.read()?;
//!
//! println!("{} objects", doc.object_map.len());
//! for class in doc.classes.iter() {
//!     println!("{} -> {}", class.class_number, class.dxf_name);
//! }
//! # Ok::<(), acadbits::error::DwgError>(())
//! ```
//!
//! ## Architecture
//!
//! - `BitCursor` - buffered MSB-first bit reader with a running checksum
//! - `IDwgStreamReader` - primitive codecs on top of the cursor
//! - `DwgArchive` - cursor plus version and last decode status
//! - Section readers - one per section, each borrowing the archive in turn
//! - `DwgReader` - sequences the section readers into a `DwgDocument`

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classes;
pub mod document;
pub mod error;
pub mod free_space;
pub mod header;
pub mod io;
pub mod notification;
pub mod object_map;
pub mod preview;
pub mod template;
pub mod types;

use std::path::Path;

// Re-export commonly used types
pub use error::{DecodeStatus, DwgError, Result};
pub use types::{CmColor, Color, DwgVersion, Handle, HandleReference, JulianDate, Vector2, Vector3};

pub use classes::{ClassTable, DwgClass};
pub use header::{HeaderValue, HeaderVariables};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use object_map::{ObjectKind, ObjectMap, ObjectMapEntry, ObjectRecord};

// Re-export document
pub use document::DwgDocument;

// Re-export I/O types
pub use io::dwg::{DwgReader, DwgReaderConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open and decode the drawing at `path` with the default configuration.
pub fn open<P: AsRef<Path>>(path: P) -> Result<DwgDocument> {
    DwgReader::from_file(path)?.read()
}
