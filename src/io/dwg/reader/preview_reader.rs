//! DWG Preview (thumbnail) section reader.
//!
//! Reads the embedded preview from the `AcDb:Preview` section. The section
//! is bounded by start/end sentinels and holds a raw header block plus one
//! or more BMP, WMF or PNG images. It carries no checksum.

use std::io::{Read, Seek};

use log::debug;

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::{section_names, sentinels};
use crate::io::dwg::section_io::SectionIO;
use crate::preview::{DwgPreview, PreviewImage, PreviewType};

use super::archive::DwgArchive;
use super::stream_reader::IDwgStreamReader;

/// Entry code of the raw header block.
const HEADER_ENTRY: u8 = 1;

/// Reader for the DWG `AcDb:Preview` (thumbnail image) section.
#[derive(Debug, Default)]
pub struct DwgPreviewReader;

impl DwgPreviewReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the preview located at `address`.
    pub fn read<R: Read + Seek>(&self, archive: &mut DwgArchive<R>, address: u64) -> Result<DwgPreview> {
        let section = section_names::PREVIEW;
        archive.seek(address, 0)?;

        // Start sentinel: {0x1F,0x25,0x6D,0x07,0xD4,0x36,0x28,0x28,0x9D,0x57,0xCA,0x3F,0x9D,0x44,0x10,0x2B}
        let sentinel = archive.read_sentinel()?;
        SectionIO::expect_sentinel(&sentinel, &sentinels::PREVIEW_START, section, address)?;

        // overall size RL: overall size of image area
        let overall_size = archive.read_raw_ulong()?;
        // images present RC: counter indicating what is present here
        let images_present = archive.read_raw_char()?;

        let mut header_block: Option<(u32, u32)> = None;
        let mut entries: Vec<(u8, u32, u32)> = Vec::with_capacity(images_present as usize);
        for _ in 0..images_present {
            // Code RC: code indicating what follows
            let code = archive.read_raw_char()?;
            // start RL, size RL
            let start = archive.read_raw_ulong()?;
            let size = archive.read_raw_ulong()?;
            if code == HEADER_ENTRY {
                header_block = Some((start, size));
            } else {
                entries.push((code, start, size));
            }
        }

        let table_end = archive.byte_position()?;
        let mut end = table_end;
        let mut preview = DwgPreview::default();

        if let Some((start, size)) = header_block {
            preview.raw_header = Self::read_block(archive, table_end, start, size)?;
            end = end.max(start as u64 + size as u64);
        }
        for (code, start, size) in entries {
            let data = Self::read_block(archive, table_end, start, size)?;
            end = end.max(start as u64 + size as u64);
            preview.images.push(PreviewImage {
                kind: PreviewType::from_code(code),
                code,
                start,
                data,
            });
        }

        // End sentinel: {0xE0,0xDA,0x92,0xF8,0x2B,0xC9,0xD7,0xD7,0x62,0xA8,0x35,0xC0,0x62,0xBB,0xEF,0xD4}
        archive.seek(end, 0)?;
        let sentinel = archive.read_sentinel()?;
        SectionIO::expect_sentinel(&sentinel, &sentinels::PREVIEW_END, section, end)?;

        debug!(
            "preview: {} image(s), {} header bytes, overall size {}",
            preview.images.len(),
            preview.raw_header.len(),
            overall_size
        );
        Ok(preview)
    }

    /// Block of `size` bytes at absolute `start`, which must lie past the
    /// entry table.
    fn read_block<R: Read + Seek>(
        archive: &mut DwgArchive<R>,
        table_end: u64,
        start: u32,
        size: u32,
    ) -> Result<Vec<u8>> {
        let start = start as u64;
        if start < table_end {
            return Err(DwgError::InvalidFormat(format!(
                "preview block at {start:#X} overlaps its entry table ending at {table_end:#X}"
            )));
        }
        archive.seek(start, 0)?;
        archive.read_bytes_untracked(size as usize)
    }
}
