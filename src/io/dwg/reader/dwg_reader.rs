//! DWG reader orchestrator, the main entry point for reading DWG files.
//!
//! Reads the file header, then every section in file order, and builds the
//! final [`DwgDocument`]. The first failing section aborts the read.
//!
//! # Usage
//!
//! ```rust,ignore
//! use acadbits::io::dwg::reader::DwgReader;
//!
//! let doc = DwgReader::from_file("sample.dwg")?.read()?;
//! ```

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, error};

use crate::document::DwgDocument;
use crate::error::{DwgError, Result};
use crate::io::dwg::constants::{section_locator, section_names};
use crate::io::dwg::file_header::DwgFileHeader;
use crate::io::dwg::section_io::SectionIO;
use crate::notification::NotificationType;

use super::archive::DwgArchive;
use super::paged_source::DEFAULT_PAGE_SIZE;
use super::{
    DwgClassesReader, DwgFileHeaderReader, DwgFreeSpaceReader, DwgHandleReader, DwgHeaderReader,
    DwgObjectReader, DwgPreviewReader, DwgSecondHeaderReader, DwgTemplateReader,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for the DWG reader.
#[derive(Debug, Clone)]
pub struct DwgReaderConfiguration {
    /// Decode the preview image when the file header points at one.
    ///
    /// Default: `true`.
    pub read_preview: bool,

    /// Classify every object record the object map addresses.
    ///
    /// Default: `true`.
    pub classify_objects: bool,

    /// Size of the pages the byte source fetches from the file. `0` selects
    /// the default.
    pub page_size: usize,
}

impl Default for DwgReaderConfiguration {
    fn default() -> Self {
        Self {
            read_preview: true,
            classify_objects: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// DwgReader
// ---------------------------------------------------------------------------

/// DWG file reader: decodes an R13-R2000 drawing into a [`DwgDocument`].
///
/// # Pipeline
///
/// 1. File header and locator table.
/// 2. Header variables, which start right after the file header.
/// 3. Class table, object map, object free space, template.
/// 4. Second file header (R13/R14).
/// 5. Preview image.
/// 6. Object record classification.
///
/// After each located section the cursor must sit exactly at the end the
/// locator declares.
pub struct DwgReader<R: Read + Seek> {
    /// Underlying byte stream.
    reader: R,

    /// User configuration.
    config: DwgReaderConfiguration,
}

impl DwgReader<BufReader<File>> {
    /// Open a DWG file by path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(DwgError::NotAFile(path.display().to_string()));
        }
        if metadata.len() == 0 {
            return Err(DwgError::EmptyFile(path.display().to_string()));
        }
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read + Seek> DwgReader<R> {
    /// Create a DWG reader from any seekable byte stream.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            config: DwgReaderConfiguration::default(),
        }
    }

    /// Set configuration options.
    pub fn with_config(mut self, config: DwgReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the entire DWG file and return a [`DwgDocument`].
    ///
    /// The stream is consumed and dropped whether or not the read succeeds.
    pub fn read(self) -> Result<DwgDocument> {
        let result = DwgArchive::from_reader(self.reader, self.config.page_size)
            .and_then(|mut archive| read_document(&mut archive, &self.config));
        if let Err(e) = &result {
            error!("DWG read failed ({}): {}", e.status(), e);
        }
        result
    }
}

/// Run one decode step and record its status in the archive.
fn step<R, T, F>(archive: &mut DwgArchive<R>, f: F) -> Result<T>
where
    R: Read + Seek,
    F: FnOnce(&mut DwgArchive<R>) -> Result<T>,
{
    let result = f(archive);
    archive.record(result)
}

/// Decode a section the locator table addresses: seek to it, decode it and
/// check that the decoder stopped exactly at the declared end.
fn read_located<R, T, F>(
    archive: &mut DwgArchive<R>,
    file_header: &DwgFileHeader,
    locator: usize,
    section: &'static str,
    f: F,
) -> Result<Option<T>>
where
    R: Read + Seek,
    F: FnOnce(&mut DwgArchive<R>) -> Result<T>,
{
    let Some(record) = file_header.located(locator).copied() else {
        return Ok(None);
    };
    step(archive, |a| {
        a.seek(record.seeker as u64, 0)?;
        let value = f(&mut *a)?;
        a.advance_to_byte_boundary();
        SectionIO::expect_offset(section, record.end(), a.byte_position()?)?;
        debug!("{section}: {:#X}..{:#X}", record.seeker, record.end());
        Ok(value)
    })
    .map(Some)
}

/// A located section the format always carries.
fn required<T>(value: Option<T>, section: &'static str) -> Result<T> {
    value.ok_or_else(|| DwgError::InvalidFormat(format!("no locator record for {section}")))
}

fn read_document<R: Read + Seek>(
    archive: &mut DwgArchive<R>,
    config: &DwgReaderConfiguration,
) -> Result<DwgDocument> {
    if archive.is_empty() {
        return Err(DwgError::EmptyFile("input stream".to_string()));
    }

    let file_header = step(archive, |a| DwgFileHeaderReader::new().read(a))?;
    let mut doc = DwgDocument::new(file_header.clone());

    // The header variables follow the file header without a gap.
    if let Some(record) = file_header.located(section_locator::HEADER) {
        step(archive, |_| {
            SectionIO::expect_offset(
                section_names::HEADER,
                file_header.end_offset,
                record.seeker as u64,
            )
        })?;
    }
    doc.header = required(
        read_located(archive, &file_header, section_locator::HEADER, section_names::HEADER, |a| {
            DwgHeaderReader::new().read(a)
        })?,
        section_names::HEADER,
    )?;

    doc.classes = required(
        read_located(archive, &file_header, section_locator::CLASSES, section_names::CLASSES, |a| {
            DwgClassesReader::new().read(a)
        })?,
        section_names::CLASSES,
    )?;

    let notifications = &mut doc.notifications;
    doc.object_map = required(
        read_located(archive, &file_header, section_locator::HANDLES, section_names::HANDLES, |a| {
            DwgHandleReader::new().read(a, notifications)
        })?,
        section_names::HANDLES,
    )?;

    doc.free_space = read_located(
        archive,
        &file_header,
        section_locator::OBJ_FREE_SPACE,
        section_names::OBJ_FREE_SPACE,
        |a| DwgFreeSpaceReader::new().read(a),
    )?;

    doc.template = read_located(
        archive,
        &file_header,
        section_locator::TEMPLATE,
        section_names::TEMPLATE,
        |a| DwgTemplateReader::new().read(a),
    )?;

    if SectionIO::new(doc.version).r13_14_only {
        doc.second_header = Some(step(archive, |a| {
            DwgSecondHeaderReader::new().read(a, &file_header)
        })?);
    }

    if config.read_preview {
        if file_header.has_preview() {
            let address = file_header.preview_address as u64;
            doc.preview = Some(step(archive, |a| DwgPreviewReader::new().read(a, address))?);
        } else {
            doc.notifications.notify(
                NotificationType::Absent,
                section_names::PREVIEW,
                "file header declares no preview image",
            );
        }
    }

    if config.classify_objects {
        let classes = &doc.classes;
        let map = &doc.object_map;
        doc.objects = step(archive, |a| DwgObjectReader::new(classes).read(a, map))?;
    }

    debug!(
        "{}: {} header variables, {} classes, {} objects, {} notifications",
        doc.version,
        doc.header.len(),
        doc.classes.len(),
        doc.object_map.len(),
        doc.notifications.len()
    );
    Ok(doc)
}
