//! Built-in object type codes.
//!
//! Codes below [`BUILTIN_TYPE_LIMIT`] have fixed meanings. Codes from 500
//! upward are class numbers resolved through the class table.

/// First code that is not a built-in type.
pub const BUILTIN_TYPE_LIMIT: u16 = 0x52;

/// Fixed object type codes.
///
/// These are the numeric type identifiers written at the start of each
/// object record addressed by the object map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum DwgObjectType {
    Undefined = 0,
    Text = 1,
    Attrib = 2,
    Attdef = 3,
    Block = 4,
    Endblk = 5,
    Seqend = 6,
    Insert = 7,
    Minsert = 8,
    Unknown9 = 9,
    Vertex2D = 0x0A,
    Vertex3D = 0x0B,
    VertexMesh = 0x0C,
    VertexPface = 0x0D,
    VertexPfaceFace = 0x0E,
    Polyline2D = 0x0F,
    Polyline3D = 0x10,
    Arc = 0x11,
    Circle = 0x12,
    Line = 0x13,
    DimensionOrdinate = 0x14,
    DimensionLinear = 0x15,
    DimensionAligned = 0x16,
    DimensionAng3Pt = 0x17,
    DimensionAng2Ln = 0x18,
    DimensionRadius = 0x19,
    DimensionDiameter = 0x1A,
    Point = 0x1B,
    Face3D = 0x1C,
    PolylinePface = 0x1D,
    PolylineMesh = 0x1E,
    Solid = 0x1F,
    Trace = 0x20,
    Shape = 0x21,
    Viewport = 0x22,
    Ellipse = 0x23,
    Spline = 0x24,
    Region = 0x25,
    Solid3D = 0x26,
    Body = 0x27,
    Ray = 0x28,
    Xline = 0x29,
    Dictionary = 0x2A,
    OleFrame = 0x2B,
    Mtext = 0x2C,
    Leader = 0x2D,
    Tolerance = 0x2E,
    Mline = 0x2F,
    BlockControlObj = 0x30,
    BlockHeader = 0x31,
    LayerControlObj = 0x32,
    Layer = 0x33,
    StyleControlObj = 0x34,
    Style = 0x35,
    Unknown36 = 0x36,
    Unknown37 = 0x37,
    LtypeControlObj = 0x38,
    Ltype = 0x39,
    Unknown3A = 0x3A,
    Unknown3B = 0x3B,
    ViewControlObj = 0x3C,
    View = 0x3D,
    UcsControlObj = 0x3E,
    Ucs = 0x3F,
    VportControlObj = 0x40,
    Vport = 0x41,
    AppidControlObj = 0x42,
    Appid = 0x43,
    DimstyleControlObj = 0x44,
    Dimstyle = 0x45,
    VpEntHdrCtrlObj = 0x46,
    VpEntHdr = 0x47,
    Group = 0x48,
    MlineStyle = 0x49,
    Ole2Frame = 0x4A,
    Dummy = 0x4B,
    LongTransaction = 0x4C,
    LwPolyline = 0x4D,
    Hatch = 0x4E,
    XRecord = 0x4F,
    AcDbPlaceholder = 0x50,
    VbaProject = 0x51,
}

impl DwgObjectType {
    /// Look up a built-in code. Returns `None` at or above
    /// [`BUILTIN_TYPE_LIMIT`].
    pub fn from_code(code: u16) -> Option<Self> {
        let ty = match code {
            0 => Self::Undefined,
            1 => Self::Text,
            2 => Self::Attrib,
            3 => Self::Attdef,
            4 => Self::Block,
            5 => Self::Endblk,
            6 => Self::Seqend,
            7 => Self::Insert,
            8 => Self::Minsert,
            9 => Self::Unknown9,
            0x0A => Self::Vertex2D,
            0x0B => Self::Vertex3D,
            0x0C => Self::VertexMesh,
            0x0D => Self::VertexPface,
            0x0E => Self::VertexPfaceFace,
            0x0F => Self::Polyline2D,
            0x10 => Self::Polyline3D,
            0x11 => Self::Arc,
            0x12 => Self::Circle,
            0x13 => Self::Line,
            0x14 => Self::DimensionOrdinate,
            0x15 => Self::DimensionLinear,
            0x16 => Self::DimensionAligned,
            0x17 => Self::DimensionAng3Pt,
            0x18 => Self::DimensionAng2Ln,
            0x19 => Self::DimensionRadius,
            0x1A => Self::DimensionDiameter,
            0x1B => Self::Point,
            0x1C => Self::Face3D,
            0x1D => Self::PolylinePface,
            0x1E => Self::PolylineMesh,
            0x1F => Self::Solid,
            0x20 => Self::Trace,
            0x21 => Self::Shape,
            0x22 => Self::Viewport,
            0x23 => Self::Ellipse,
            0x24 => Self::Spline,
            0x25 => Self::Region,
            0x26 => Self::Solid3D,
            0x27 => Self::Body,
            0x28 => Self::Ray,
            0x29 => Self::Xline,
            0x2A => Self::Dictionary,
            0x2B => Self::OleFrame,
            0x2C => Self::Mtext,
            0x2D => Self::Leader,
            0x2E => Self::Tolerance,
            0x2F => Self::Mline,
            0x30 => Self::BlockControlObj,
            0x31 => Self::BlockHeader,
            0x32 => Self::LayerControlObj,
            0x33 => Self::Layer,
            0x34 => Self::StyleControlObj,
            0x35 => Self::Style,
            0x36 => Self::Unknown36,
            0x37 => Self::Unknown37,
            0x38 => Self::LtypeControlObj,
            0x39 => Self::Ltype,
            0x3A => Self::Unknown3A,
            0x3B => Self::Unknown3B,
            0x3C => Self::ViewControlObj,
            0x3D => Self::View,
            0x3E => Self::UcsControlObj,
            0x3F => Self::Ucs,
            0x40 => Self::VportControlObj,
            0x41 => Self::Vport,
            0x42 => Self::AppidControlObj,
            0x43 => Self::Appid,
            0x44 => Self::DimstyleControlObj,
            0x45 => Self::Dimstyle,
            0x46 => Self::VpEntHdrCtrlObj,
            0x47 => Self::VpEntHdr,
            0x48 => Self::Group,
            0x49 => Self::MlineStyle,
            0x4A => Self::Ole2Frame,
            0x4B => Self::Dummy,
            0x4C => Self::LongTransaction,
            0x4D => Self::LwPolyline,
            0x4E => Self::Hatch,
            0x4F => Self::XRecord,
            0x50 => Self::AcDbPlaceholder,
            0x51 => Self::VbaProject,
            _ => return None,
        };
        Some(ty)
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    /// Whether records of this type are graphical entities.
    pub fn is_entity(self) -> bool {
        let code = self.code();
        ((0x01..=0x2F).contains(&code) && self != Self::Dictionary)
            || matches!(self, Self::Ole2Frame | Self::LwPolyline | Self::Hatch)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Text => "Text",
            Self::Attrib => "Attrib",
            Self::Attdef => "Attdef",
            Self::Block => "Block",
            Self::Endblk => "Endblk",
            Self::Seqend => "Seqend",
            Self::Insert => "Insert",
            Self::Minsert => "Minsert",
            Self::Unknown9 => "Unknown9",
            Self::Vertex2D => "Vertex2D",
            Self::Vertex3D => "Vertex3D",
            Self::VertexMesh => "VertexMesh",
            Self::VertexPface => "VertexPface",
            Self::VertexPfaceFace => "VertexPfaceFace",
            Self::Polyline2D => "Polyline2D",
            Self::Polyline3D => "Polyline3D",
            Self::Arc => "Arc",
            Self::Circle => "Circle",
            Self::Line => "Line",
            Self::DimensionOrdinate => "DimensionOrdinate",
            Self::DimensionLinear => "DimensionLinear",
            Self::DimensionAligned => "DimensionAligned",
            Self::DimensionAng3Pt => "DimensionAng3Pt",
            Self::DimensionAng2Ln => "DimensionAng2Ln",
            Self::DimensionRadius => "DimensionRadius",
            Self::DimensionDiameter => "DimensionDiameter",
            Self::Point => "Point",
            Self::Face3D => "Face3D",
            Self::PolylinePface => "PolylinePface",
            Self::PolylineMesh => "PolylineMesh",
            Self::Solid => "Solid",
            Self::Trace => "Trace",
            Self::Shape => "Shape",
            Self::Viewport => "Viewport",
            Self::Ellipse => "Ellipse",
            Self::Spline => "Spline",
            Self::Region => "Region",
            Self::Solid3D => "Solid3D",
            Self::Body => "Body",
            Self::Ray => "Ray",
            Self::Xline => "Xline",
            Self::Dictionary => "Dictionary",
            Self::OleFrame => "OleFrame",
            Self::Mtext => "Mtext",
            Self::Leader => "Leader",
            Self::Tolerance => "Tolerance",
            Self::Mline => "Mline",
            Self::BlockControlObj => "BlockControlObj",
            Self::BlockHeader => "BlockHeader",
            Self::LayerControlObj => "LayerControlObj",
            Self::Layer => "Layer",
            Self::StyleControlObj => "StyleControlObj",
            Self::Style => "Style",
            Self::Unknown36 => "Unknown36",
            Self::Unknown37 => "Unknown37",
            Self::LtypeControlObj => "LtypeControlObj",
            Self::Ltype => "Ltype",
            Self::Unknown3A => "Unknown3A",
            Self::Unknown3B => "Unknown3B",
            Self::ViewControlObj => "ViewControlObj",
            Self::View => "View",
            Self::UcsControlObj => "UcsControlObj",
            Self::Ucs => "Ucs",
            Self::VportControlObj => "VportControlObj",
            Self::Vport => "Vport",
            Self::AppidControlObj => "AppidControlObj",
            Self::Appid => "Appid",
            Self::DimstyleControlObj => "DimstyleControlObj",
            Self::Dimstyle => "Dimstyle",
            Self::VpEntHdrCtrlObj => "VpEntHdrCtrlObj",
            Self::VpEntHdr => "VpEntHdr",
            Self::Group => "Group",
            Self::MlineStyle => "MlineStyle",
            Self::Ole2Frame => "Ole2Frame",
            Self::Dummy => "Dummy",
            Self::LongTransaction => "LongTransaction",
            Self::LwPolyline => "LwPolyline",
            Self::Hatch => "Hatch",
            Self::XRecord => "XRecord",
            Self::AcDbPlaceholder => "AcDbPlaceholder",
            Self::VbaProject => "VbaProject",
        }
    }
}

impl std::fmt::Display for DwgObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
