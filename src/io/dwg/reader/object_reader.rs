//! Object record classification.
//!
//! For every object map entry the reader seeks to the record, reads its
//! size and type code and resolves the code either to a fixed object type
//! or to a class descriptor. Payloads are not decoded.

use std::io::{Read, Seek};

use log::debug;

use crate::classes::ClassTable;
use crate::error::{DwgError, Result};
use crate::io::dwg::constants::FIRST_CLASS_NUMBER;
use crate::io::dwg::object_type::{DwgObjectType, BUILTIN_TYPE_LIMIT};
use crate::io::dwg::section_io::SectionIO;
use crate::object_map::{ObjectKind, ObjectMap, ObjectMapEntry, ObjectRecord};

use super::archive::DwgArchive;
use super::stream_reader::IDwgStreamReader;

/// Classifies object records against one drawing's class table.
pub struct DwgObjectReader<'c> {
    classes: &'c ClassTable,
}

impl<'c> DwgObjectReader<'c> {
    pub fn new(classes: &'c ClassTable) -> Self {
        Self { classes }
    }

    /// Classify every entry of `map`, in map order. The first record that
    /// cannot be classified aborts.
    pub fn read<R: Read + Seek>(
        &self,
        archive: &mut DwgArchive<R>,
        map: &ObjectMap,
    ) -> Result<Vec<ObjectRecord>> {
        let mut records = Vec::with_capacity(map.len());
        for entry in map {
            records.push(self.read_record(archive, entry)?);
        }
        debug!("objects: {} records classified", records.len());
        Ok(records)
    }

    /// Read the record header at `entry.offset`.
    pub fn read_record<R: Read + Seek>(
        &self,
        archive: &mut DwgArchive<R>,
        entry: &ObjectMapEntry,
    ) -> Result<ObjectRecord> {
        let sio = SectionIO::new(archive.version());
        archive.seek(entry.offset as u64, 0)?;

        // MS : Size of object, not including the CRC
        let size = archive.read_modular_short()?;
        if sio.r2010_plus {
            // MC : Size in bits of the handle stream
            archive.read_modular_char()?;
        }
        // BS (OT from R2010) : Object type
        let code = archive.read_object_type()?;

        let kind = self.classify(code).map_err(|e| match e {
            DwgError::OutOfRange(msg) => {
                DwgError::OutOfRange(format!("{msg} (handle {}, offset {:#X})", entry.handle, entry.offset))
            }
            other => other,
        })?;

        Ok(ObjectRecord {
            handle: entry.handle,
            offset: entry.offset,
            size,
            kind,
        })
    }

    /// Resolve a type code. Codes below 0x52 are fixed types, codes from
    /// 500 must name a declared class, anything else is out of range.
    pub fn classify(&self, code: u16) -> Result<ObjectKind> {
        if code < BUILTIN_TYPE_LIMIT {
            return DwgObjectType::from_code(code)
                .map(ObjectKind::BuiltIn)
                .ok_or_else(|| DwgError::OutOfRange(format!("object type code {code:#X}")));
        }
        if code >= FIRST_CLASS_NUMBER {
            return match self.classes.get(code) {
                Some(_) => Ok(ObjectKind::Class(code)),
                None => Err(DwgError::OutOfRange(format!(
                    "object type code {code} has no class descriptor"
                ))),
            };
        }
        Err(DwgError::OutOfRange(format!(
            "object type code {code:#X} is neither a fixed type nor a class"
        )))
    }
}
