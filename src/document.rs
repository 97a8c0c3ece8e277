//! Decoded drawing returned by the reader.

use crate::classes::{ClassTable, DwgClass};
use crate::free_space::ObjFreeSpace;
use crate::header::HeaderVariables;
use crate::io::dwg::file_header::{DwgFileHeader, SecondFileHeader};
use crate::notification::NotificationCollection;
use crate::object_map::{ObjectKind, ObjectMap, ObjectRecord};
use crate::preview::DwgPreview;
use crate::template::TemplateSection;
use crate::types::{DwgVersion, Handle};

/// Everything one open operation decoded, in section order.
///
/// Optional sections are `None` when the file does not locate them or the
/// reader was configured to skip them.
#[derive(Debug, Clone, Default)]
pub struct DwgDocument {
    pub version: DwgVersion,
    pub file_header: DwgFileHeader,
    /// System variables from `AcDb:Header`.
    pub header: HeaderVariables,
    pub classes: ClassTable,
    pub object_map: ObjectMap,
    /// Classified object records, in object map order.
    pub objects: Vec<ObjectRecord>,
    pub free_space: Option<ObjFreeSpace>,
    pub template: Option<TemplateSection>,
    /// R13/R14 only.
    pub second_header: Option<SecondFileHeader>,
    pub preview: Option<DwgPreview>,
    pub notifications: NotificationCollection,
}

impl DwgDocument {
    pub fn new(file_header: DwgFileHeader) -> Self {
        Self {
            version: file_header.version,
            file_header,
            ..Default::default()
        }
    }

    /// Classified record for a handle.
    pub fn object(&self, handle: Handle) -> Option<&ObjectRecord> {
        self.objects.iter().find(|o| o.handle == handle)
    }

    /// Class descriptor a record's type code resolves to, if any.
    pub fn class_of(&self, record: &ObjectRecord) -> Option<&DwgClass> {
        match record.kind {
            ObjectKind::Class(number) => self.classes.get(number),
            ObjectKind::BuiltIn(_) => None,
        }
    }

    /// Number of records whose type code names a class descriptor.
    pub fn class_object_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| matches!(o.kind, ObjectKind::Class(_)))
            .count()
    }
}
