//! Contents of the `AcDb:ObjFreeSpace` section.

use crate::types::JulianDate;

/// Object free-space statistics kept by the drawing database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjFreeSpace {
    /// Approximate number of objects in the drawing.
    pub object_count: u32,
    /// Last update time (TDUPDATE).
    pub update_date: JulianDate,
    /// Offset of the objects section.
    pub objects_offset: u32,
    /// 64-bit bookkeeping values, usually four of them.
    pub values: Vec<u64>,
}
