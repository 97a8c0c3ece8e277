//! DWG object free-space section reader (locator 3).

use std::io::{Read, Seek};

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::error::Result;
use crate::free_space::ObjFreeSpace;
use crate::types::JulianDate;

use super::archive::DwgArchive;
use super::stream_reader::IDwgStreamReader;

/// Reader for the `AcDb:ObjFreeSpace` section.
#[derive(Debug, Default)]
pub struct DwgFreeSpaceReader;

impl DwgFreeSpaceReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the section at the archive's current position.
    pub fn read<R: Read + Seek>(&self, archive: &mut DwgArchive<R>) -> Result<ObjFreeSpace> {
        // RL : 0
        let zero = archive.read_raw_ulong()?;
        if zero != 0 {
            debug!("free space: leading value is {zero:#X}, expected 0");
        }
        // RL : approximate number of objects in the drawing
        let object_count = archive.read_raw_ulong()?;
        // 2RL : julian datetime of the last update
        let day = archive.read_raw_long()?;
        let milliseconds = archive.read_raw_long()?;
        // RL : offset of the objects section
        let objects_offset = archive.read_raw_ulong()?;
        // RC : number of 64-bit values that follow, usually 4
        let count = archive.read_raw_char()? as usize;
        let block = archive.read_bytes(count * 8)?;
        let values = block.chunks_exact(8).map(LittleEndian::read_u64).collect();

        debug!("free space: ~{object_count} objects, {count} values");
        Ok(ObjFreeSpace {
            object_count,
            update_date: JulianDate::new(day, milliseconds),
            objects_offset,
            values,
        })
    }
}
