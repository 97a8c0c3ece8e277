//! DWG Handle/Object Map section reader.
//!
//! Reads the handle-to-file-offset map from the `AcDb:Handles` section.
//!
//! The section is a series of chunks. Each chunk starts with its size as a
//! big-endian short (the size counts itself but not the trailing CRC),
//! holds delta-encoded (handle, offset) pairs and ends with a big-endian
//! CRC over the size and the pairs. A chunk of size 2 ends the section.
//! Deltas restart from zero in every chunk.

use std::io::{Read, Seek};

use log::debug;

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::handle_section::{CHUNK_CRC_SIZE, MAX_CHUNK_SIZE};
use crate::io::dwg::constants::{section_names, CRC_SEED};
use crate::io::dwg::section_io::SectionIO;
use crate::notification::{NotificationCollection, NotificationType};
use crate::object_map::{ObjectMap, ObjectMapEntry};

use super::archive::DwgArchive;
use super::stream_reader::IDwgStreamReader;

/// Reader for the DWG `AcDb:Handles` (object map) section.
#[derive(Debug, Default)]
pub struct DwgHandleReader;

impl DwgHandleReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the object map starting at the archive's current position.
    ///
    /// Zero handle deltas and repeated handles are kept in the map and
    /// reported through `notifications`.
    pub fn read<R: Read + Seek>(
        &self,
        archive: &mut DwgArchive<R>,
        notifications: &mut NotificationCollection,
    ) -> Result<ObjectMap> {
        let section = section_names::HANDLES;
        let mut map = ObjectMap::new();
        let mut chunks = 0usize;

        // Repeat until section size == 2 (the last empty section, except CRC):
        loop {
            let chunk_start = archive.byte_position()?;
            archive.reset_checksum(CRC_SEED);

            // Short: size of this section, MSB first
            let hi = archive.read_raw_char()?;
            let lo = archive.read_raw_char()?;
            let size = u16::from_be_bytes([hi, lo]) as u64;

            if size <= CHUNK_CRC_SIZE as u64 {
                Self::verify_chunk_crc(archive, section)?;
                break;
            }

            let payload = size - CHUNK_CRC_SIZE as u64;
            if payload > MAX_CHUNK_SIZE as u64 {
                return Err(DwgError::InvalidFormat(format!(
                    "object map chunk at {chunk_start:#X} holds {payload} bytes, \
                     limit is {MAX_CHUNK_SIZE}"
                )));
            }

            let end = chunk_start + size;
            // Set the "last handle" to all 0 and the "last loc" to 0L
            let mut last_handle: u64 = 0;
            let mut last_loc: i64 = 0;

            while archive.byte_position()? < end {
                // Offset of this handle from last handle as modular char
                let handle_delta = archive.read_modular_char()?;
                // Offset of location in file from last loc as signed modular char
                let loc_delta = archive.read_signed_modular_char()?;

                let pos = archive.byte_position()?;
                if pos > end {
                    return Err(DwgError::InvalidFormat(format!(
                        "object map pair ends at {pos:#X}, past its chunk end {end:#X}"
                    )));
                }

                last_handle = last_handle.checked_add(handle_delta).ok_or_else(|| {
                    DwgError::OutOfRange(format!("handle overflow in chunk at {chunk_start:#X}"))
                })?;
                last_loc += loc_delta;
                let offset = u32::try_from(last_loc).map_err(|_| {
                    DwgError::OutOfRange(format!(
                        "object offset {last_loc} for handle {last_handle:#X} is not a file position"
                    ))
                })?;

                if handle_delta == 0 {
                    notifications.notify(
                        NotificationType::Warning,
                        section,
                        format!("zero handle delta at handle {last_handle:#X}"),
                    );
                }
                if let Some(previous) = map.push(ObjectMapEntry::new(last_handle, offset)) {
                    notifications.notify(
                        NotificationType::Warning,
                        section,
                        format!(
                            "handle {last_handle:#X} repeated, offset {previous:#X} replaced by {offset:#X}"
                        ),
                    );
                }
            }

            Self::verify_chunk_crc(archive, section)?;
            chunks += 1;
        }

        debug!("handles: {} entries in {} chunks", map.len(), chunks);
        Ok(map)
    }

    /// CRC (most significant byte followed by least significant byte).
    fn verify_chunk_crc<R: Read + Seek>(
        archive: &mut DwgArchive<R>,
        section: &'static str,
    ) -> Result<()> {
        let computed = archive.checksum(true);
        let stored = archive.read_raw_ushort()?;
        SectionIO::verify_checksum(section, stored, computed)
    }
}
