//! DWG file format reader support.
//!
//! This module implements reading of AutoCAD DWG binary files from R13
//! through R2000, and version recognition up to R2010.
//!
//! # Module Structure
//!
//! - [`constants`]: sentinel bytes, section names, checksum seed and legacy XOR values
//! - [`crc`]: CRC-8 (16-bit) table and accumulator
//! - [`object_type`]: fixed object type codes
//! - [`section_io`]: version flags and sentinel/checksum/offset validation
//! - [`file_header`]: file header, locator records and the second file header
//! - [`reader`]: bit cursor, primitive codecs and section readers

pub mod constants;
pub mod crc;
pub mod file_header;
pub mod object_type;
pub mod reader;
pub mod section_io;

// Re-export commonly used types
pub use file_header::{DwgFileHeader, DwgSectionLocatorRecord, SecondFileHeader};
pub use object_type::DwgObjectType;
pub use reader::{DwgReader, DwgReaderConfiguration};
pub use section_io::SectionIO;
