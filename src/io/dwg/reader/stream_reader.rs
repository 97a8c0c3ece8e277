//! Bit-level stream reader trait.
//!
//! DWG data is **bit-aligned** (not byte-aligned). Implementors supply the
//! cursor primitives (a bit, a byte, the position and the version); every
//! compound encoding is a provided method built on those.
//!
//! - **B**: bit (1 bit)
//! - **BB**: 2-bit code
//! - **BS**: BitShort (2+8/16 bits)
//! - **BL**: BitLong (2+8/32 bits)
//! - **BLL**: BitLongLong (3+N*8 bits)
//! - **BD**: BitDouble (2+0/64 bits)
//! - **MC**: Modular Char (7-bit chunks)
//! - **MS**: Modular Short (15-bit chunks)
//! - **H**: Handle reference
//! - **T**: Text, **TU**: Unicode text, **TV**: Variable text
//! - **RC**: Raw Char, **RS**: Raw Short, **RL**: Raw Long, **RD**: Raw Double
//! - **SN**: Sentinel (16 bytes)
//! - **BE**: BitExtrusion, **BT**: BitThickness
//! - **CMC**: CmColor
//! - **OT**: ObjectType

use encoding_rs::Encoding;

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::sentinels::Sentinel;
use crate::io::dwg::constants::SENTINEL_LEN;
use crate::types::{
    CmColor, DwgVersion, Handle, HandleReference, JulianDate, Vector2, Vector3,
};

use super::bit_cursor::CursorPosition;

/// Longest signed modular char accepted.
pub const MAX_MC_BYTES: usize = 4;
/// Longest unsigned modular char accepted (handle deltas).
pub const MAX_UMC_BYTES: usize = 8;
/// Most 15-bit groups a modular short may carry.
pub const MAX_MS_GROUPS: usize = 2;

/// Value decoded for BitLong prefix `11`, which carries no payload.
pub const BIT_LONG_ABSENT: i32 = i32::MIN;

pub trait IDwgStreamReader {
    /// Active format version.
    fn version(&self) -> DwgVersion;

    /// Code page used for narrow text.
    fn encoding(&self) -> &'static Encoding;

    /// Bits of the current byte already consumed (0-7).
    fn bit_shift(&self) -> u8;

    fn position(&self) -> CursorPosition;

    /// Bytes left from the current byte to the end of data.
    fn remaining(&self) -> u64;

    /// **B**: Read a single bit.
    fn read_bit(&mut self) -> Result<bool>;

    /// Read eight bits, across a byte boundary if needed.
    fn read_byte(&mut self) -> Result<u8>;

    fn position_in_bits(&self) -> u64 {
        self.position().in_bits()
    }

    // ---------------------------------------------------------------
    // BIT CODES
    // ---------------------------------------------------------------

    /// **BB**: Read a 2-bit code.
    fn read_2bits(&mut self) -> Result<u8> {
        let high = self.read_bit()? as u8;
        let low = self.read_bit()? as u8;
        Ok((high << 1) | low)
    }

    /// **3B**: Read 3 bits as a number, most significant first.
    fn read_3bits(&mut self) -> Result<u8> {
        let mut value = 0u8;
        for _ in 0..3 {
            value = (value << 1) | self.read_bit()? as u8;
        }
        Ok(value)
    }

    /// Two bit pairs, high then low.
    fn read_nibble(&mut self) -> Result<u8> {
        let high = self.read_2bits()?;
        let low = self.read_2bits()?;
        Ok((high << 2) | low)
    }

    // ---------------------------------------------------------------
    // Raw values
    // ---------------------------------------------------------------

    /// **RC**
    fn read_raw_char(&mut self) -> Result<u8> {
        self.read_byte()
    }

    /// **RS**
    fn read_raw_short(&mut self) -> Result<i16> {
        Ok(self.read_raw_ushort()? as i16)
    }

    /// **RS** as unsigned.
    fn read_raw_ushort(&mut self) -> Result<u16> {
        let low = self.read_raw_char()? as u16;
        let high = self.read_raw_char()? as u16;
        Ok(low | (high << 8))
    }

    /// **RL**
    fn read_raw_long(&mut self) -> Result<i32> {
        Ok(self.read_raw_ulong()? as i32)
    }

    /// **RL** as unsigned.
    fn read_raw_ulong(&mut self) -> Result<u32> {
        let low = self.read_raw_ushort()? as u32;
        let high = self.read_raw_ushort()? as u32;
        Ok(low | (high << 16))
    }

    /// **RD**: byte 0 least significant.
    fn read_raw_double(&mut self) -> Result<f64> {
        let mut bits = 0u64;
        for i in 0..8 {
            bits |= (self.read_raw_char()? as u64) << (i * 8);
        }
        Ok(f64::from_bits(bits))
    }

    /// **2RD**
    fn read_2raw_double(&mut self) -> Result<Vector2> {
        let x = self.read_raw_double()?;
        let y = self.read_raw_double()?;
        Ok(Vector2::new(x, y))
    }

    /// **3RD**
    fn read_3raw_double(&mut self) -> Result<Vector3> {
        let x = self.read_raw_double()?;
        let y = self.read_raw_double()?;
        let z = self.read_raw_double()?;
        Ok(Vector3::new(x, y, z))
    }

    /// Read `length` bytes through the bit path.
    fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        if length as u64 > self.remaining() {
            return Err(DwgError::unexpected_eof(&format!("{length}-byte run")));
        }
        (0..length).map(|_| self.read_byte()).collect()
    }

    // ---------------------------------------------------------------
    // Bit-coded numbers
    // ---------------------------------------------------------------

    /// **BS**
    fn read_bit_short(&mut self) -> Result<i16> {
        match self.read_2bits()? {
            // 00: a raw short follows
            0 => self.read_raw_short(),
            // 01: an unsigned char follows
            1 => Ok(self.read_raw_char()? as i16),
            2 => Ok(0),
            _ => Ok(256),
        }
    }

    /// **BS** read as a flag (nonzero = true).
    fn read_bit_short_as_bool(&mut self) -> Result<bool> {
        Ok(self.read_bit_short()? != 0)
    }

    /// **BL**: prefix `11` yields [`BIT_LONG_ABSENT`].
    fn read_bit_long(&mut self) -> Result<i32> {
        match self.read_2bits()? {
            0 => self.read_raw_long(),
            1 => Ok(self.read_raw_char()? as i32),
            2 => Ok(0),
            _ => Ok(BIT_LONG_ABSENT),
        }
    }

    /// **BLL**: 3-bit byte count, then that many bytes, least significant
    /// first.
    fn read_bit_long_long(&mut self) -> Result<u64> {
        let size = self.read_3bits()?;
        let mut value = 0u64;
        for i in 0..size as u64 {
            value |= (self.read_raw_char()? as u64) << (i * 8);
        }
        Ok(value)
    }

    /// **BD**: prefix `11` yields NaN.
    fn read_bit_double(&mut self) -> Result<f64> {
        match self.read_2bits()? {
            0 => self.read_raw_double(),
            1 => Ok(1.0),
            2 => Ok(0.0),
            _ => Ok(f64::NAN),
        }
    }

    /// **2BD**
    fn read_2bit_double(&mut self) -> Result<Vector2> {
        let x = self.read_bit_double()?;
        let y = self.read_bit_double()?;
        Ok(Vector2::new(x, y))
    }

    /// **3BD**
    fn read_3bit_double(&mut self) -> Result<Vector3> {
        let x = self.read_bit_double()?;
        let y = self.read_bit_double()?;
        let z = self.read_bit_double()?;
        Ok(Vector3::new(x, y, z))
    }

    /// **BE**: R2000+ stores nothing and the extrusion is (0,0,1).
    fn read_bit_extrusion(&mut self) -> Result<Vector3> {
        if self.version() >= DwgVersion::R2000 {
            Ok(Vector3::UNIT_Z)
        } else {
            self.read_3bit_double()
        }
    }

    /// **BT**: R2000+ a set flag bit means 0.0.
    fn read_bit_thickness(&mut self) -> Result<f64> {
        if self.version() >= DwgVersion::R2000 && self.read_bit()? {
            return Ok(0.0);
        }
        self.read_bit_double()
    }

    // ---------------------------------------------------------------
    // Modular values
    // ---------------------------------------------------------------

    /// **MC**: unsigned, used for object map handle deltas.
    fn read_modular_char(&mut self) -> Result<u64> {
        let mut value = 0u64;
        for i in 0..MAX_UMC_BYTES {
            let b = self.read_byte()?;
            value |= ((b & 0x7F) as u64) << (7 * i);
            if b & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DwgError::InvalidFormat(format!(
            "unsigned modular char longer than {MAX_UMC_BYTES} bytes"
        )))
    }

    /// **MC**: signed. The final byte carries the sign in bit 0x40.
    fn read_signed_modular_char(&mut self) -> Result<i64> {
        let mut value = 0i64;
        for i in 0..MAX_MC_BYTES {
            let b = self.read_byte()?;
            let shift = 7 * i;
            if b & 0x80 == 0 {
                value |= ((b & 0x3F) as i64) << shift;
                return Ok(if b & 0x40 != 0 { -value } else { value });
            }
            value |= ((b & 0x7F) as i64) << shift;
        }
        Err(DwgError::InvalidFormat(format!(
            "modular char longer than {MAX_MC_BYTES} bytes"
        )))
    }

    /// **MS**: 15-bit groups in raw shorts, bit 0x8000 continues.
    fn read_modular_short(&mut self) -> Result<u32> {
        let mut value = 0u32;
        for i in 0..MAX_MS_GROUPS {
            let group = self.read_raw_ushort()?;
            value |= ((group & 0x7FFF) as u32) << (15 * i);
            if group & 0x8000 == 0 {
                return Ok(value);
            }
        }
        Err(DwgError::InvalidFormat(format!(
            "modular short longer than {MAX_MS_GROUPS} groups"
        )))
    }

    // ---------------------------------------------------------------
    // Handle references
    // ---------------------------------------------------------------

    /// **H**: `|CODE (4 bits)|COUNTER (4 bits)|HANDLE bytes, big-endian|`.
    ///
    /// The code is returned as read.
    fn handle_reference(&mut self) -> Result<HandleReference> {
        let form = self.read_byte()?;
        let code = form >> 4;
        let counter = form & 0x0F;
        if counter > 8 {
            return Err(DwgError::InvalidFormat(format!(
                "handle byte count {counter} exceeds maximum of 8"
            )));
        }

        let mut value = 0u64;
        for _ in 0..counter {
            value = (value << 8) | self.read_byte()? as u64;
        }
        Ok(HandleReference::new(code, Handle::new(value)))
    }

    // ---------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------

    /// **T**: BS length, then that many 8-bit units in the drawing code page.
    fn read_text(&mut self) -> Result<String> {
        let length = self.read_bit_short()? as u16 as usize;
        let mut bytes = self.read_bytes(length)?;
        if bytes.last() == Some(&0) {
            bytes.pop();
        }
        let (decoded, _, _) = self.encoding().decode(&bytes);
        Ok(decoded.into_owned())
    }

    /// **TU**: BS length, then that many UTF-16LE units.
    fn read_text_unicode(&mut self) -> Result<String> {
        let length = self.read_bit_short()? as u16 as usize;
        let mut bytes = self.read_bytes(length * 2)?;
        if bytes.len() >= 2 && bytes[bytes.len() - 2..] == [0, 0] {
            bytes.truncate(bytes.len() - 2);
        }
        let (decoded, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(&bytes);
        Ok(decoded.into_owned())
    }

    /// **TV**: T up to R2004, TU from R2007.
    fn read_variable_text(&mut self) -> Result<String> {
        if self.version() >= DwgVersion::R2007 {
            self.read_text_unicode()
        } else {
            self.read_text()
        }
    }

    // ---------------------------------------------------------------
    // Sentinel
    // ---------------------------------------------------------------

    /// **SN**
    fn read_sentinel(&mut self) -> Result<Sentinel> {
        let mut sentinel = [0u8; SENTINEL_LEN];
        for slot in sentinel.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(sentinel)
    }

    // ---------------------------------------------------------------
    // Colors
    // ---------------------------------------------------------------

    /// **CMC**
    fn read_cm_color(&mut self) -> Result<CmColor> {
        let index = self.read_bit_short()?;
        if self.version() < DwgVersion::R2004 {
            return Ok(CmColor {
                index,
                ..Default::default()
            });
        }

        let rgb = self.read_bit_long()? as u32;
        let flags = self.read_raw_char()?;
        let name = if flags & 1 != 0 {
            Some(self.read_variable_text()?)
        } else {
            None
        };
        let book_name = if flags & 2 != 0 {
            Some(self.read_variable_text()?)
        } else {
            None
        };

        Ok(CmColor {
            index,
            rgb: Some(rgb),
            flags,
            name,
            book_name,
        })
    }

    // ---------------------------------------------------------------
    // Special types
    // ---------------------------------------------------------------

    /// **OT**: BS before R2010, a bit-pair encoding from R2010.
    fn read_object_type(&mut self) -> Result<u16> {
        if self.version() < DwgVersion::R2010 {
            return Ok(self.read_bit_short()? as u16);
        }

        match self.read_2bits()? {
            0 => Ok(self.read_raw_char()? as u16),
            1 => Ok(0x1F0 + self.read_raw_char()? as u16),
            _ => self.read_raw_ushort(),
        }
    }

    /// Julian day and milliseconds as two BL.
    fn read_date_time(&mut self) -> Result<JulianDate> {
        let day = self.read_bit_long()?;
        let milliseconds = self.read_bit_long()?;
        Ok(JulianDate::new(day, milliseconds))
    }

    /// Elapsed days and milliseconds as two BL.
    fn read_time_span(&mut self) -> Result<JulianDate> {
        self.read_date_time()
    }
}

/// Map the drawing code page number from the file header to an encoding.
///
/// Pages `encoding_rs` does not carry fall back to Windows-1252.
pub fn encoding_for_code_page(code_page: u16) -> &'static Encoding {
    match code_page {
        3 => encoding_rs::ISO_8859_2,
        4 => encoding_rs::ISO_8859_3,
        5 => encoding_rs::ISO_8859_4,
        6 => encoding_rs::ISO_8859_5,
        7 => encoding_rs::ISO_8859_6,
        8 => encoding_rs::ISO_8859_7,
        9 => encoding_rs::ISO_8859_8,
        10 => encoding_rs::WINDOWS_1254,
        22 | 38 => encoding_rs::SHIFT_JIS,
        23 => encoding_rs::MACINTOSH,
        24 | 41 => encoding_rs::BIG5,
        25 | 26 | 40 => encoding_rs::EUC_KR,
        27 => encoding_rs::IBM866,
        28 => encoding_rs::WINDOWS_1250,
        29 => encoding_rs::WINDOWS_1251,
        31 | 39 => encoding_rs::GBK,
        32 => encoding_rs::WINDOWS_1253,
        33 => encoding_rs::WINDOWS_1254,
        34 => encoding_rs::WINDOWS_1255,
        35 => encoding_rs::WINDOWS_1256,
        36 => encoding_rs::WINDOWS_1257,
        37 => encoding_rs::WINDOWS_874,
        _ => encoding_rs::WINDOWS_1252,
    }
}
