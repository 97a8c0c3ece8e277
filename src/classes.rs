//! Class descriptors from the `AcDb:Classes` section.
//!
//! Each descriptor binds a class number (500 and up) to the names of a
//! custom object or entity type. The table is an arena indexed by
//! `class number - 500` and lives only as long as the document it was
//! decoded into.

use bitflags::bitflags;

use crate::io::dwg::constants::FIRST_CLASS_NUMBER;

bitflags! {
    /// Operations allowed on proxies of a class (R14+).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ProxyFlags: u16 {
        const ERASE_ALLOWED = 1;
        const TRANSFORM_ALLOWED = 2;
        const COLOR_CHANGE_ALLOWED = 4;
        const LAYER_CHANGE_ALLOWED = 8;
        const LINETYPE_CHANGE_ALLOWED = 16;
        const LINETYPE_SCALE_CHANGE_ALLOWED = 32;
        const VISIBILITY_CHANGE_ALLOWED = 64;
        const CLONING_ALLOWED = 128;
        const LINEWEIGHT_CHANGE_ALLOWED = 256;
        const PLOT_STYLE_NAME_CHANGE_ALLOWED = 512;
        const ALL_OPERATIONS_EXCEPT_CLONING_ALLOWED = 895;
        const ALL_OPERATIONS_ALLOWED = 1023;
        const DISABLES_PROXY_WARNING_DIALOG = 1024;
        const R13_FORMAT_PROXY = 32768;
    }
}

/// Item class id of classes whose instances are entities.
pub const ITEM_CLASS_ENTITY: u16 = 0x1F2;
/// Item class id of classes whose instances are non-graphical objects.
pub const ITEM_CLASS_OBJECT: u16 = 0x1F3;

/// One class descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DwgClass {
    /// Class number, 500 or higher.
    pub class_number: u16,
    /// R13: the second BS is a class version.
    pub legacy_version: Option<u16>,
    /// R14+: the second BS holds proxy flags.
    pub proxy_flags: Option<ProxyFlags>,
    pub application_name: String,
    /// C++ class name.
    pub cpp_class_name: String,
    pub dxf_name: String,
    /// Set when the class was a proxy (zombie) when last saved.
    pub was_a_proxy: bool,
    /// 0x1F2 for entity classes, 0x1F3 for object classes.
    pub item_class_id: u16,
    /// R2004+: number of instances in the drawing.
    pub instance_count: Option<i32>,
    /// R2004+
    pub dwg_version: Option<i32>,
    /// R2004+
    pub maintenance_version: Option<i32>,
}

impl DwgClass {
    pub fn is_entity(&self) -> bool {
        self.item_class_id == ITEM_CLASS_ENTITY
    }
}

/// Class descriptors of one drawing, indexed by `class number - 500`.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    slots: Vec<Option<DwgClass>>,
    count: usize,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor, replacing any previous one with the same number.
    ///
    /// Returns `false` when the class number is below 500 and cannot be
    /// stored.
    pub fn insert(&mut self, class: DwgClass) -> bool {
        let Some(index) = class.class_number.checked_sub(FIRST_CLASS_NUMBER) else {
            return false;
        };
        let index = index as usize;
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        if self.slots[index].replace(class).is_none() {
            self.count += 1;
        }
        true
    }

    /// Look up by class number (the type code of an object record).
    pub fn get(&self, class_number: u16) -> Option<&DwgClass> {
        let index = class_number.checked_sub(FIRST_CLASS_NUMBER)? as usize;
        self.slots.get(index)?.as_ref()
    }

    pub fn get_by_dxf_name(&self, dxf_name: &str) -> Option<&DwgClass> {
        self.iter().find(|c| c.dxf_name.eq_ignore_ascii_case(dxf_name))
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Highest class number declared, if any.
    pub fn max_class_number(&self) -> Option<u16> {
        self.iter().map(|c| c.class_number).max()
    }

    /// Descriptors in class number order.
    pub fn iter(&self) -> impl Iterator<Item = &DwgClass> {
        self.slots.iter().flatten()
    }
}
