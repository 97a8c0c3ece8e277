//! DWG bit-level stream readers and section readers.
//!
//! This module contains the reader side of the DWG I/O system:
//!
//! ## Stream layer
//! - [`paged_source`]: bounds-checked, page-buffered byte source
//! - [`bit_cursor`]: MSB-first bit cursor with a running checksum
//! - [`stream_reader`]: the `IDwgStreamReader` trait (primitive codecs)
//! - [`archive`]: cursor plus version, code page and last decode status
//!
//! ## Section readers
//! - [`file_header_reader`]: version tag, code page and locator table
//! - [`header_reader`]: `AcDb:Header` section (system variables)
//! - [`classes_reader`]: `AcDb:Classes` section (class descriptors)
//! - [`handle_reader`]: `AcDb:Handles` section (object map)
//! - [`free_space_reader`]: `AcDb:ObjFreeSpace` section
//! - [`template_reader`]: `AcDb:Template` section
//! - [`second_header_reader`]: `AcDb:SecondHeader` section (R13/R14)
//! - [`preview_reader`]: `AcDb:Preview` section (thumbnail image)
//! - [`object_reader`]: object record classification
//! - [`dwg_reader`]: the orchestrator

pub mod archive;
pub mod bit_cursor;
pub mod paged_source;
pub mod stream_reader;

pub mod classes_reader;
pub mod dwg_reader;
pub mod file_header_reader;
pub mod free_space_reader;
pub mod handle_reader;
pub mod header_reader;
pub mod object_reader;
pub mod preview_reader;
pub mod second_header_reader;
pub mod template_reader;

#[cfg(test)]
pub(crate) mod test_support;

pub use archive::DwgArchive;
pub use bit_cursor::{BitCursor, CursorPosition};
pub use stream_reader::{encoding_for_code_page, IDwgStreamReader};

pub use classes_reader::DwgClassesReader;
pub use dwg_reader::{DwgReader, DwgReaderConfiguration};
pub use file_header_reader::DwgFileHeaderReader;
pub use free_space_reader::DwgFreeSpaceReader;
pub use handle_reader::DwgHandleReader;
pub use header_reader::{read_value, DwgHeaderReader};
pub use object_reader::DwgObjectReader;
pub use preview_reader::DwgPreviewReader;
pub use second_header_reader::DwgSecondHeaderReader;
pub use template_reader::DwgTemplateReader;
