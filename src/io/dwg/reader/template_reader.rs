//! DWG Template section reader.
//!
//! The `AcDb:Template` section (locator 4) holds the description of the
//! template the drawing was created from and its MEASUREMENT value.

use std::io::{Read, Seek};

use log::debug;

use crate::error::{DwgError, Result};
use crate::template::{Measurement, TemplateSection};

use super::archive::DwgArchive;
use super::stream_reader::IDwgStreamReader;

/// Reader for the `AcDb:Template` section.
#[derive(Debug, Default)]
pub struct DwgTemplateReader;

impl DwgTemplateReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the section at the archive's current position.
    pub fn read<R: Read + Seek>(&self, archive: &mut DwgArchive<R>) -> Result<TemplateSection> {
        // RS : template description string length
        let length = archive.read_raw_ushort()? as usize;
        // RC[length] : template description string
        let mut bytes = archive.read_bytes(length)?;
        if bytes.last() == Some(&0) {
            bytes.pop();
        }
        let (description, _, _) = archive.encoding().decode(&bytes);

        // RS : MEASUREMENT
        let value = archive.read_raw_ushort()?;
        let measurement = Measurement::from_value(value)
            .ok_or_else(|| DwgError::OutOfRange(format!("MEASUREMENT value {value}")))?;

        debug!("template: {measurement} units, description {:?}", description);
        Ok(TemplateSection {
            description: description.into_owned(),
            measurement,
        })
    }
}
