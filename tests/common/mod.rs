//! Shared test utilities for acadbits integration tests.
//!
//! Synthetic drawings are built in memory (see [`builders`]) and either
//! read straight from a cursor or written to a temporary file first.

#![allow(dead_code)]

pub mod bits;
pub mod builders;

use std::io::{Cursor, Write};

use acadbits::io::dwg::{DwgReader, DwgReaderConfiguration};
use acadbits::{DwgDocument, Result};
use tempfile::NamedTempFile;

#[allow(unused_imports)]
pub use builders::{ClassDef, DrawingBuilder, Layout, ObjectDef};

/// Read a drawing from memory with the default configuration.
pub fn read_bytes(bytes: Vec<u8>) -> Result<DwgDocument> {
    DwgReader::from_reader(Cursor::new(bytes)).read()
}

/// Read a drawing from memory with small pages, so section reads cross
/// page boundaries.
pub fn read_bytes_paged(bytes: Vec<u8>, page_size: usize) -> Result<DwgDocument> {
    let config = DwgReaderConfiguration {
        page_size,
        ..Default::default()
    };
    DwgReader::from_reader(Cursor::new(bytes)).with_config(config).read()
}

/// Write `bytes` to a temporary `.dwg` file.
pub fn temp_dwg(bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".dwg")
        .tempfile()
        .expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
