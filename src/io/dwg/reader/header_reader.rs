//! DWG Header section reader.
//!
//! Reads the system variables of the `AcDb:Header` section by walking a
//! version-annotated field table (see [`crate::header::schema`]). Fields not
//! stored for the active version, or whose presence condition fails, are
//! skipped without consuming bits.

use std::io::{Read, Seek};

use log::debug;

use crate::error::{DwgError, Result};
use crate::header::{
    HeaderCondition, HeaderField, HeaderFieldKind, HeaderValue, HeaderVariables, HEADER_SCHEMA,
};
use crate::io::dwg::constants::{section_names, sentinels, CRC_SEED};
use crate::io::dwg::section_io::SectionIO;

use super::archive::DwgArchive;
use super::stream_reader::IDwgStreamReader;

/// Reader for the DWG `AcDb:Header` section.
pub struct DwgHeaderReader<'s> {
    schema: &'s [HeaderField],
}

impl DwgHeaderReader<'static> {
    /// Reader over the built-in R13-R2010 schema.
    pub fn new() -> Self {
        Self::with_schema(HEADER_SCHEMA)
    }
}

impl Default for DwgHeaderReader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> DwgHeaderReader<'s> {
    pub fn with_schema(schema: &'s [HeaderField]) -> Self {
        Self { schema }
    }

    /// Read the section at the archive's current (byte aligned) position.
    pub fn read<R: Read + Seek>(&self, archive: &mut DwgArchive<R>) -> Result<HeaderVariables> {
        let sio = SectionIO::new(archive.version());
        if sio.r2007_plus {
            // Text lives in a separate string stream from R2007 on.
            return Err(DwgError::NotImplemented(format!(
                "{} string stream ({})",
                section_names::HEADER,
                sio.version()
            )));
        }

        // SN: 0xCF,0x7B,0x1F,0x23,0xFD,0xDE,0x38,0xA9,0x5F,0x7C,0x68,0xB8,0x4E,0x6D,0x33,0x5F
        let start = archive.byte_position()?;
        let sentinel = archive.read_sentinel()?;
        SectionIO::expect_sentinel(&sentinel, &sentinels::HEADER_START, section_names::HEADER, start)?;

        archive.reset_checksum(CRC_SEED);

        // RL: size of the variable data
        let size = archive.read_raw_ulong()? as u64;
        let body_start = archive.byte_position()?;

        let mut vars = HeaderVariables::new();
        for field in self.schema {
            if !field.applies_to(sio.version()) {
                continue;
            }
            if let Some(condition) = field.condition {
                if !condition_holds(&vars, condition) {
                    continue;
                }
            }
            let value = read_value(archive, field.kind)?;
            vars.insert(field.name, value);
        }

        archive.advance_to_byte_boundary();
        let consumed = archive.byte_position()? - body_start;
        if consumed != size {
            return Err(DwgError::SizeMismatch {
                section: section_names::HEADER,
                declared: size,
                consumed,
            });
        }

        // RS: CRC over the size and the data
        let computed = archive.checksum(false);
        let stored = archive.read_raw_ushort()?;
        SectionIO::verify_checksum(section_names::HEADER, stored, computed)?;

        let end = archive.byte_position()?;
        let sentinel = archive.read_sentinel()?;
        SectionIO::expect_sentinel(&sentinel, &sentinels::HEADER_END, section_names::HEADER, end)?;

        debug!("header: {} variables in {} bytes", vars.len(), size);
        Ok(vars)
    }
}

fn condition_holds(vars: &HeaderVariables, condition: HeaderCondition) -> bool {
    match condition {
        HeaderCondition::Equals { field, value } => vars.get_i64(field) == Some(value),
    }
}

/// Decode one value of the given kind.
pub fn read_value<S: IDwgStreamReader + ?Sized>(
    reader: &mut S,
    kind: HeaderFieldKind,
) -> Result<HeaderValue> {
    Ok(match kind {
        HeaderFieldKind::Bit => HeaderValue::Bool(reader.read_bit()?),
        HeaderFieldKind::BitShort => HeaderValue::Short(reader.read_bit_short()?),
        HeaderFieldKind::BitLong => HeaderValue::Long(reader.read_bit_long()?),
        HeaderFieldKind::BitLongLong => HeaderValue::LongLong(reader.read_bit_long_long()?),
        HeaderFieldKind::BitDouble => HeaderValue::Double(reader.read_bit_double()?),
        HeaderFieldKind::RawChar => HeaderValue::Char(reader.read_raw_char()?),
        HeaderFieldKind::Point2Raw => HeaderValue::Point2(reader.read_2raw_double()?),
        HeaderFieldKind::Point3Bit => HeaderValue::Point3(reader.read_3bit_double()?),
        HeaderFieldKind::Color => HeaderValue::Color(reader.read_cm_color()?),
        HeaderFieldKind::Handle => HeaderValue::Handle(reader.handle_reference()?),
        HeaderFieldKind::Text => HeaderValue::Text(reader.read_text()?),
        HeaderFieldKind::VariableText => HeaderValue::Text(reader.read_variable_text()?),
        HeaderFieldKind::Date => HeaderValue::Date(reader.read_date_time()?),
        HeaderFieldKind::TimeSpan => HeaderValue::Date(reader.read_time_span()?),
    })
}
