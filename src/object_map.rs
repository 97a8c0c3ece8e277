//! Handle to file offset map from the `AcDb:Handles` section, and the
//! object records classified from it.

use ahash::AHashMap;

use crate::io::dwg::object_type::DwgObjectType;
use crate::types::Handle;

/// One absolute (handle, offset) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectMapEntry {
    pub handle: Handle,
    /// Absolute file offset of the object record.
    pub offset: u32,
}

impl ObjectMapEntry {
    pub fn new(handle: u64, offset: u32) -> Self {
        Self {
            handle: Handle::new(handle),
            offset,
        }
    }
}

/// Ordered object map with a handle index.
#[derive(Debug, Clone, Default)]
pub struct ObjectMap {
    entries: Vec<ObjectMapEntry>,
    index: AHashMap<Handle, usize>,
}

impl ObjectMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry in stream order.
    ///
    /// Returns the offset previously recorded for the same handle, if any.
    /// The index then points at the newest entry.
    pub fn push(&mut self, entry: ObjectMapEntry) -> Option<u32> {
        let previous = self
            .index
            .insert(entry.handle, self.entries.len())
            .map(|i| self.entries[i].offset);
        self.entries.push(entry);
        previous
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were decoded.
    pub fn entries(&self) -> &[ObjectMapEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectMapEntry> {
        self.entries.iter()
    }

    pub fn get(&self, handle: Handle) -> Option<&ObjectMapEntry> {
        self.index.get(&handle).map(|&i| &self.entries[i])
    }

    pub fn offset_of(&self, handle: Handle) -> Option<u32> {
        self.get(handle).map(|e| e.offset)
    }
}

impl<'a> IntoIterator for &'a ObjectMap {
    type Item = &'a ObjectMapEntry;
    type IntoIter = std::slice::Iter<'a, ObjectMapEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// What an object record's type code resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Fixed type code below 0x52.
    BuiltIn(DwgObjectType),
    /// Class number resolved through the class table.
    Class(u16),
}

impl ObjectKind {
    pub fn type_code(&self) -> u16 {
        match self {
            ObjectKind::BuiltIn(ty) => ty.code(),
            ObjectKind::Class(number) => *number,
        }
    }
}

/// Header of one object record. The payload is not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    pub handle: Handle,
    pub offset: u32,
    /// Declared size (MS) of the record in bytes.
    pub size: u32,
    pub kind: ObjectKind,
}
