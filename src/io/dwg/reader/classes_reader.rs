//! DWG Classes section reader.
//!
//! Reads the class descriptors of the `AcDb:Classes` section. Each
//! descriptor binds a class number (500 and up) to the names of a custom
//! object or entity type; object records use that number as their type code.

use std::io::{Read, Seek};

use log::{debug, warn};

use crate::classes::{ClassTable, DwgClass, ProxyFlags};
use crate::error::{DwgError, Result};
use crate::io::dwg::constants::{section_names, sentinels, CRC_SEED};
use crate::io::dwg::section_io::SectionIO;
use crate::types::DwgVersion;

use super::archive::DwgArchive;
use super::stream_reader::IDwgStreamReader;

/// Reader for the DWG `AcDb:Classes` section.
#[derive(Debug, Default)]
pub struct DwgClassesReader;

impl DwgClassesReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the section at the archive's current (byte aligned) position.
    pub fn read<R: Read + Seek>(&self, archive: &mut DwgArchive<R>) -> Result<ClassTable> {
        let sio = SectionIO::new(archive.version());
        if sio.r2007_plus {
            return Err(DwgError::NotImplemented(format!(
                "{} string stream ({})",
                section_names::CLASSES,
                sio.version()
            )));
        }

        // SN: 0x8D 0xA1 0xC4 0xB8 0xC4 0xA9 0xF8 0xC5 0xC0 0xDC 0xF4 0x5F 0xE7 0xCF 0xB6 0x8A
        let start = archive.byte_position()?;
        let sentinel = archive.read_sentinel()?;
        SectionIO::expect_sentinel(
            &sentinel,
            &sentinels::CLASSES_START,
            section_names::CLASSES,
            start,
        )?;

        archive.reset_checksum(CRC_SEED);

        // RL: size of class data area
        let size = archive.read_raw_ulong()? as u64;
        let end_section = archive.byte_position()? + size;

        if sio.version() == DwgVersion::R2004 {
            // BS: Maximum class number
            let max = archive.read_bit_short()?;
            // RC: 0x00
            archive.read_raw_char()?;
            // RC: 0x00
            archive.read_raw_char()?;
            // B: true
            archive.read_bit()?;
            debug!("classes: declared maximum class number {}", max);
        }

        let mut classes = ClassTable::new();
        // Descriptors are not byte aligned; stop once the byte holding the
        // cursor reaches the end so trailing pad bits are not read.
        while fetched_bytes(&*archive) < end_section {
            let class = Self::read_class(archive, &sio)?;
            let number = class.class_number;
            if classes.get(number).is_some() {
                warn!("classes: class number {} declared twice", number);
            }
            if !classes.insert(class) {
                return Err(DwgError::OutOfRange(format!(
                    "class number {number} is below the first custom class number"
                )));
            }
        }

        archive.advance_to_byte_boundary();
        let consumed_end = archive.byte_position()?;
        if consumed_end != end_section {
            return Err(DwgError::SizeMismatch {
                section: section_names::CLASSES,
                declared: size,
                consumed: consumed_end.saturating_sub(end_section - size),
            });
        }

        // RS: CRC
        let computed = archive.checksum(false);
        let stored = archive.read_raw_ushort()?;
        SectionIO::verify_checksum(section_names::CLASSES, stored, computed)?;

        // SN: 0x72 0x5E 0x3B 0x47 0x3B 0x56 0x07 0x3A 0x3F 0x23 0x0B 0xA0 0x18 0x30 0x49 0x75
        let end = archive.byte_position()?;
        let sentinel = archive.read_sentinel()?;
        SectionIO::expect_sentinel(&sentinel, &sentinels::CLASSES_END, section_names::CLASSES, end)?;

        debug!("classes: {} descriptors", classes.len());
        Ok(classes)
    }

    /// Read a single class descriptor.
    fn read_class<S: IDwgStreamReader + ?Sized>(reader: &mut S, sio: &SectionIO) -> Result<DwgClass> {
        let mut class = DwgClass::default();

        // BS: classnum
        class.class_number = reader.read_bit_short()? as u16;
        // BS: version in R13, proxy capability flags from R14
        let second = reader.read_bit_short()? as u16;
        if sio.version() == DwgVersion::R13 {
            class.legacy_version = Some(second);
        } else {
            class.proxy_flags = Some(ProxyFlags::from_bits_retain(second));
        }

        // TV: appname
        class.application_name = reader.read_variable_text()?;
        // TV: cplusplusclassname
        class.cpp_class_name = reader.read_variable_text()?;
        // TV: classdxfname
        class.dxf_name = reader.read_variable_text()?;

        // B: wasazombie
        class.was_a_proxy = reader.read_bit()?;
        // BS: itemclassid -- 0x1F2 for entities, 0x1F3 for objects
        class.item_class_id = reader.read_bit_short()? as u16;

        if sio.r2004_plus {
            // BL: Number of objects created of this type in the current DB
            class.instance_count = Some(reader.read_bit_long()?);
            // BL: Dwg Version
            class.dwg_version = Some(reader.read_bit_long()?);
            // BL: Maintenance release version
            class.maintenance_version = Some(reader.read_bit_long()?);
            // BL: Unknown (normally 0L)
            reader.read_bit_long()?;
            // BL: Unknown (normally 0L)
            reader.read_bit_long()?;
        }

        Ok(class)
    }
}

/// Bytes fetched so far, counting a partly read byte as consumed.
fn fetched_bytes<S: IDwgStreamReader + ?Sized>(reader: &S) -> u64 {
    let pos = reader.position();
    pos.byte + u64::from(pos.bit != 0)
}
