//! Synthetic R13-R2000 drawing builder.
//!
//! Lays a complete drawing out in this order: file header, header
//! variables, classes, object records, object map, object free space,
//! template, second header (R13/R14) and preview. Every checksum is
//! computed, so an unmodified build opens cleanly; tests corrupt single
//! bytes through the returned [`Layout`].

#![allow(dead_code)]

use acadbits::header::schema::fields_for;
use acadbits::header::HeaderFieldKind;
use acadbits::io::dwg::constants::{sentinels, CRC_SEED, LEGACY_HEADER_XOR};
use acadbits::DwgVersion;

use super::bits::BitWriter;

/// One class descriptor to emit.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub number: i16,
    pub dxf_name: &'static str,
    pub cpp_name: &'static str,
    pub item_class_id: i16,
}

impl ClassDef {
    pub fn object(number: i16, dxf_name: &'static str, cpp_name: &'static str) -> Self {
        Self {
            number,
            dxf_name,
            cpp_name,
            item_class_id: 0x1F3,
        }
    }
}

/// One object record to emit.
#[derive(Debug, Clone, Copy)]
pub struct ObjectDef {
    pub handle: u64,
    pub type_code: u16,
}

/// Absolute offsets of everything the builder laid out.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub file_header_end: u32,
    /// (offset, size) per locator record number.
    pub sections: [(u32, u32); 5],
    pub objects: Vec<u32>,
    pub second_header: Option<u32>,
    pub preview: Option<u32>,
    pub len: usize,
}

impl Layout {
    pub fn header(&self) -> (u32, u32) {
        self.sections[0]
    }
    pub fn classes(&self) -> (u32, u32) {
        self.sections[1]
    }
    pub fn handles(&self) -> (u32, u32) {
        self.sections[2]
    }
}

/// Synthetic drawing description.
#[derive(Debug, Clone)]
pub struct DrawingBuilder {
    pub version: DwgVersion,
    pub code_page: u16,
    pub handseed: u64,
    /// CEPSNTYPE (R2000); 3 makes the file carry CPSNID.
    pub cepsntype: i16,
    pub classes: Vec<ClassDef>,
    pub objects: Vec<ObjectDef>,
    /// Object map pairs per chunk.
    pub chunk_pairs: usize,
    pub free_space: bool,
    pub template: Option<(&'static str, u16)>,
    /// BMP body bytes for the preview section.
    pub preview: Option<Vec<u8>>,
    /// Replace one (record, offset, size) triple in the file header table
    /// only; the second header keeps the real values.
    pub record_override: Option<(usize, u32, u32)>,
}

impl DrawingBuilder {
    pub fn new(version: DwgVersion) -> Self {
        Self {
            version,
            code_page: 30,
            handseed: 0x40,
            cepsntype: 0,
            classes: Vec::new(),
            objects: Vec::new(),
            chunk_pairs: 64,
            free_space: false,
            template: None,
            preview: None,
            record_override: None,
        }
    }

    /// A drawing with one class, a handful of objects, every optional
    /// section and a preview.
    pub fn typical(version: DwgVersion) -> Self {
        let mut b = Self::new(version);
        b.classes = vec![
            ClassDef::object(500, "ACDBDICTIONARYWDFLT", "AcDbDictionaryWithDefault"),
            ClassDef::object(501, "XRECORD", "AcDbXrecord"),
        ];
        b.objects = vec![
            ObjectDef { handle: 1, type_code: 0x30 },
            ObjectDef { handle: 2, type_code: 0x32 },
            ObjectDef { handle: 5, type_code: 0x33 },
            ObjectDef { handle: 0x10, type_code: 0x13 },
            ObjectDef { handle: 0x11, type_code: 500 },
        ];
        b.free_space = true;
        b.template = Some(("acad.dwt", 0));
        b.preview = Some(vec![0x42, 0x4D, 0x1E, 0, 0, 0, 0, 0]);
        b
    }

    pub fn build(&self) -> (Vec<u8>, Layout) {
        let mut layout = Layout::default();
        let header_len = 43 + 9 * 5;
        layout.file_header_end = header_len as u32;

        let mut sections = Vec::new();
        let mut pos = header_len as u32;

        let header = self.header_section();
        layout.sections[0] = (pos, header.len() as u32);
        pos += header.len() as u32;
        sections.push(header);

        let classes = self.classes_section();
        layout.sections[1] = (pos, classes.len() as u32);
        pos += classes.len() as u32;
        sections.push(classes);

        let mut objects = Vec::new();
        for object in &self.objects {
            layout.objects.push(pos + objects.len() as u32);
            objects.extend(object_record(object.type_code));
        }
        pos += objects.len() as u32;
        let objects_offset = layout.objects.first().copied().unwrap_or(pos);
        sections.push(objects);

        let handles = self.handles_section(&layout.objects);
        layout.sections[2] = (pos, handles.len() as u32);
        pos += handles.len() as u32;
        sections.push(handles);

        if self.free_space {
            let fs = free_space_section(self.objects.len() as u32, objects_offset);
            layout.sections[3] = (pos, fs.len() as u32);
            pos += fs.len() as u32;
            sections.push(fs);
        }

        if let Some((description, measurement)) = self.template {
            let t = template_section(description, measurement);
            layout.sections[4] = (pos, t.len() as u32);
            pos += t.len() as u32;
            sections.push(t);
        }

        if matches!(self.version, DwgVersion::R13 | DwgVersion::R14) {
            let sh = self.second_header(pos, &layout.sections);
            layout.second_header = Some(pos);
            pos += sh.len() as u32;
            sections.push(sh);
        }

        if let Some(image) = &self.preview {
            let p = preview_section(pos, image);
            layout.preview = Some(pos);
            sections.push(p);
        }

        let mut bytes = self.file_header(layout.preview.unwrap_or(0), &layout.sections);
        assert_eq!(bytes.len(), header_len);
        for s in sections {
            bytes.extend(s);
        }
        layout.len = bytes.len();
        (bytes, layout)
    }

    fn file_header(&self, preview_address: u32, sections: &[(u32, u32); 5]) -> Vec<u8> {
        let mut w = BitWriter::new();
        w.raw(self.version.tag().as_bytes());
        w.raw(&[0, 0, 0, 0, 0, 0x0F, 0x01]);
        w.rl(preview_address);
        w.rc(0x1F);
        w.rc(0x00);
        w.rs(self.code_page);
        w.rl(sections.len() as u32);
        for (i, &(offset, size)) in sections.iter().enumerate() {
            let (offset, size) = match self.record_override {
                Some((nr, o, s)) if nr == i => (o, s),
                _ => (offset, size),
            };
            w.rc(i as u8);
            w.rl(offset);
            w.rl(size);
        }
        let crc = w.crc_from(0, CRC_SEED) ^ LEGACY_HEADER_XOR[sections.len() - 3];
        w.rs(crc);
        w.raw(&sentinels::FILE_HEADER_END);
        w.into_bytes()
    }

    fn header_section(&self) -> Vec<u8> {
        let mut body = BitWriter::new();
        for (i, field) in fields_for(self.version).enumerate() {
            if field.condition.is_some() && self.cepsntype != 3 {
                continue;
            }
            match field.name {
                "HANDSEED" => body.handle(0, self.handseed),
                "CEPSNTYPE" => body.bs(self.cepsntype),
                _ => write_default(&mut body, field.kind, i as u64 + 1),
            }
        }
        let body = body.into_bytes();

        let mut w = BitWriter::new();
        w.raw(&sentinels::HEADER_START);
        let start = w.len();
        w.rl(body.len() as u32);
        w.raw(&body);
        let crc = w.crc_from(start, CRC_SEED);
        w.rs(crc);
        w.raw(&sentinels::HEADER_END);
        w.into_bytes()
    }

    fn classes_section(&self) -> Vec<u8> {
        let mut body = BitWriter::new();
        for c in &self.classes {
            body.bs(c.number);
            body.bs(0);
            body.tv("ObjectDBX Classes");
            body.tv(c.cpp_name);
            body.tv(c.dxf_name);
            body.bit(false);
            body.bs(c.item_class_id);
        }
        let body = body.into_bytes();

        let mut w = BitWriter::new();
        w.raw(&sentinels::CLASSES_START);
        let start = w.len();
        w.rl(body.len() as u32);
        w.raw(&body);
        let crc = w.crc_from(start, CRC_SEED);
        w.rs(crc);
        w.raw(&sentinels::CLASSES_END);
        w.into_bytes()
    }

    fn handles_section(&self, offsets: &[u32]) -> Vec<u8> {
        let mut pairs: Vec<(u64, u32)> = self
            .objects
            .iter()
            .zip(offsets)
            .map(|(o, &off)| (o.handle, off))
            .collect();
        pairs.sort_by_key(|p| p.0);

        let mut w = BitWriter::new();
        for chunk in pairs.chunks(self.chunk_pairs.max(1)) {
            let mut body = BitWriter::new();
            let (mut last_handle, mut last_offset) = (0u64, 0i64);
            for &(handle, offset) in chunk {
                body.umc(handle - last_handle);
                body.mc(offset as i64 - last_offset);
                last_handle = handle;
                last_offset = offset as i64;
            }
            let body = body.into_bytes();
            let start = w.len();
            w.raw(&((body.len() + 2) as u16).to_be_bytes());
            w.raw(&body);
            let crc = w.crc_from(start, CRC_SEED);
            w.raw(&crc.to_be_bytes());
        }
        let start = w.len();
        w.raw(&[0x00, 0x02]);
        let crc = w.crc_from(start, CRC_SEED);
        w.raw(&crc.to_be_bytes());
        w.into_bytes()
    }

    fn second_header(&self, offset: u32, sections: &[(u32, u32); 5]) -> Vec<u8> {
        let mut body = BitWriter::new();
        body.bl(offset as i32);
        body.raw(self.version.tag().as_bytes());
        body.raw(&[0; 6]);
        body.bits(0, 4);
        body.rc(0x18);
        body.raw(&[0x78, 0x01, 0x04, 0x00]);
        body.rc(sections.len() as u8);
        for (i, &(seeker, size)) in sections.iter().enumerate() {
            body.rc(i as u8);
            body.bl(seeker as i32);
            body.bl(size as i32);
        }
        body.bs(1);
        body.rc(1);
        body.rc(0);
        body.rc(self.handseed as u8);
        let body = body.into_bytes();

        let mut w = BitWriter::new();
        w.raw(&sentinels::SECOND_HEADER_START);
        let start = w.len();
        w.rl(body.len() as u32);
        w.raw(&body);
        let crc = w.crc_from(start, CRC_SEED);
        w.rs(crc);
        if self.version == DwgVersion::R14 {
            w.raw(&[0; 8]);
        }
        w.raw(&sentinels::SECOND_HEADER_END);
        w.into_bytes()
    }
}

/// MS size, BS type code, a few payload bytes and a record CRC.
fn object_record(type_code: u16) -> Vec<u8> {
    let mut w = BitWriter::new();
    w.ms(6);
    w.bs(type_code as i16);
    w.align();
    w.raw(&[0xA5; 4]);
    w.rs(0);
    w.into_bytes()
}

fn free_space_section(object_count: u32, objects_offset: u32) -> Vec<u8> {
    let mut w = BitWriter::new();
    w.rl(0);
    w.rl(object_count);
    w.rl(2_460_000);
    w.rl(43_200_000);
    w.rl(objects_offset);
    w.rc(4);
    for v in [0x32u64, 0, 0x40, 0] {
        w.rl(v as u32);
        w.rl((v >> 32) as u32);
    }
    w.into_bytes()
}

fn template_section(description: &str, measurement: u16) -> Vec<u8> {
    let mut w = BitWriter::new();
    w.rs(description.len() as u16);
    w.raw(description.as_bytes());
    w.rs(measurement);
    w.into_bytes()
}

/// Preview at absolute `address` with an 80-byte header and one BMP.
fn preview_section(address: u32, image: &[u8]) -> Vec<u8> {
    let table_end = address + 16 + 4 + 1 + 9 * 2;
    let mut w = BitWriter::new();
    w.raw(&sentinels::PREVIEW_START);
    w.rl((1 + 9 * 2 + 80 + image.len()) as u32);
    w.rc(2);
    w.rc(1);
    w.rl(table_end);
    w.rl(80);
    w.rc(2);
    w.rl(table_end + 80);
    w.rl(image.len() as u32);
    w.raw(&[0; 80]);
    w.raw(image);
    w.raw(&sentinels::PREVIEW_END);
    w.into_bytes()
}

/// Neutral value of each field kind.
pub fn write_default(w: &mut BitWriter, kind: HeaderFieldKind, handle: u64) {
    match kind {
        HeaderFieldKind::Bit => w.bit(false),
        HeaderFieldKind::BitShort => w.bs(0),
        HeaderFieldKind::BitLong => w.bl(0),
        HeaderFieldKind::BitLongLong => w.bits(0, 3),
        HeaderFieldKind::BitDouble => w.bd(1.0),
        HeaderFieldKind::RawChar => w.rc(0),
        HeaderFieldKind::Point2Raw => {
            w.rd(0.0);
            w.rd(0.0);
        }
        HeaderFieldKind::Point3Bit => {
            w.bd(0.0);
            w.bd(0.0);
            w.bd(0.0);
        }
        HeaderFieldKind::Color => w.bs(256),
        HeaderFieldKind::Handle => w.handle(5, handle),
        HeaderFieldKind::Text | HeaderFieldKind::VariableText => w.tv(""),
        HeaderFieldKind::Date | HeaderFieldKind::TimeSpan => {
            w.bl(2_451_545);
            w.bl(0);
        }
    }
}
