//! On-disk order of the `AcDb:Header` variables.
//!
//! Each entry names a variable, its primitive encoding and the revisions in
//! which it is stored. The table is walked front to back by the header
//! reader; fields outside the active revision are skipped without consuming
//! bits. Unnamed slots use `UNKNOWN_*` names so every field of a revision
//! has a distinct key.

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::types::{DwgVersion, VersionRange};

/// Primitive encoding of one header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFieldKind {
    /// B
    Bit,
    /// BS
    BitShort,
    /// BL
    BitLong,
    /// BLL
    BitLongLong,
    /// BD
    BitDouble,
    /// RC
    RawChar,
    /// 2RD
    Point2Raw,
    /// 3BD
    Point3Bit,
    /// CMC
    Color,
    /// H
    Handle,
    /// T (narrow only)
    Text,
    /// TV
    VariableText,
    /// Julian day + milliseconds (2×BL)
    Date,
    /// Day count + milliseconds (2×BL)
    TimeSpan,
}

/// Extra presence rule evaluated against fields already read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCondition {
    /// Present only when the named integer field holds `value`.
    Equals { field: &'static str, value: i64 },
}

/// One schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    pub name: &'static str,
    pub kind: HeaderFieldKind,
    pub range: VersionRange,
    pub condition: Option<HeaderCondition>,
}

impl HeaderField {
    pub const fn new(name: &'static str, kind: HeaderFieldKind, range: VersionRange) -> Self {
        Self {
            name,
            kind,
            range,
            condition: None,
        }
    }

    pub const fn when(mut self, condition: HeaderCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether the field is stored on disk for `version`, ignoring any
    /// value condition.
    pub fn applies_to(&self, version: DwgVersion) -> bool {
        self.range.contains(version)
    }
}

use self::HeaderFieldKind as K;
use crate::types::VersionRange as V;

const fn all(name: &'static str, kind: HeaderFieldKind) -> HeaderField {
    HeaderField::new(name, kind, V::ALL)
}

const fn r13_14(name: &'static str, kind: HeaderFieldKind) -> HeaderField {
    HeaderField::new(name, kind, V::R13_R14)
}

const fn r2000(name: &'static str, kind: HeaderFieldKind) -> HeaderField {
    HeaderField::new(name, kind, V::R2000_PLUS)
}

const fn r2004(name: &'static str, kind: HeaderFieldKind) -> HeaderField {
    HeaderField::new(name, kind, V::R2004_PLUS)
}

const fn r2007(name: &'static str, kind: HeaderFieldKind) -> HeaderField {
    HeaderField::new(name, kind, V::R2007_PLUS)
}

/// Header variables of R13 through R2010, in stream order.
pub static HEADER_SCHEMA: &[HeaderField] = &[
    all("UNKNOWN_BD1", K::BitDouble),
    all("UNKNOWN_BD2", K::BitDouble),
    all("UNKNOWN_BD3", K::BitDouble),
    all("UNKNOWN_BD4", K::BitDouble),
    all("UNKNOWN_TV1", K::VariableText),
    all("UNKNOWN_TV2", K::VariableText),
    all("UNKNOWN_TV3", K::VariableText),
    all("UNKNOWN_TV4", K::VariableText),
    all("UNKNOWN_BL1", K::BitLong),
    all("UNKNOWN_BL2", K::BitLong),
    r13_14("UNKNOWN_BS1", K::BitShort),
    HeaderField::new("VPORT_ENTITY_HEADER", K::Handle, V::PRE_R2004),
    all("DIMASO", K::Bit),
    all("DIMSHO", K::Bit),
    r13_14("DIMSAV", K::Bit),
    all("PLINEGEN", K::Bit),
    all("ORTHOMODE", K::Bit),
    all("REGENMODE", K::Bit),
    all("FILLMODE", K::Bit),
    all("QTEXTMODE", K::Bit),
    all("PSLTSCALE", K::Bit),
    all("LIMCHECK", K::Bit),
    r13_14("BLIPMODE", K::Bit),
    r2004("UNKNOWN_B1", K::Bit),
    all("USRTIMER", K::Bit),
    all("SKPOLY", K::Bit),
    all("ANGDIR", K::Bit),
    all("SPLFRAME", K::Bit),
    r13_14("ATTREQ", K::Bit),
    r13_14("ATTDIA", K::Bit),
    all("MIRRTEXT", K::Bit),
    all("WORLDVIEW", K::Bit),
    r13_14("WIREFRAME", K::Bit),
    all("TILEMODE", K::Bit),
    all("PLIMCHECK", K::Bit),
    all("VISRETAIN", K::Bit),
    r13_14("DELOBJ", K::Bit),
    all("DISPSILH", K::Bit),
    all("PELLIPSE", K::Bit),
    all("PROXYGRAPHICS", K::BitShort),
    r13_14("DRAGMODE", K::BitShort),
    all("TREEDEPTH", K::BitShort),
    all("LUNITS", K::BitShort),
    all("LUPREC", K::BitShort),
    all("AUNITS", K::BitShort),
    all("AUPREC", K::BitShort),
    r13_14("OSMODE", K::BitShort),
    all("ATTMODE", K::BitShort),
    r13_14("COORDS", K::BitShort),
    all("PDMODE", K::BitShort),
    r13_14("PICKSTYLE", K::BitShort),
    r2004("UNKNOWN_BL3", K::BitLong),
    r2004("UNKNOWN_BL4", K::BitLong),
    r2004("UNKNOWN_BL5", K::BitLong),
    all("USERI1", K::BitShort),
    all("USERI2", K::BitShort),
    all("USERI3", K::BitShort),
    all("USERI4", K::BitShort),
    all("USERI5", K::BitShort),
    all("SPLINESEGS", K::BitShort),
    all("SURFU", K::BitShort),
    all("SURFV", K::BitShort),
    all("SURFTYPE", K::BitShort),
    all("SURFTAB1", K::BitShort),
    all("SURFTAB2", K::BitShort),
    all("SPLINETYPE", K::BitShort),
    all("SHADEDGE", K::BitShort),
    all("SHADEDIF", K::BitShort),
    all("UNITMODE", K::BitShort),
    all("MAXACTVP", K::BitShort),
    all("ISOLINES", K::BitShort),
    all("CMLJUST", K::BitShort),
    all("TEXTQLTY", K::BitShort),
    all("LTSCALE", K::BitDouble),
    all("TEXTSIZE", K::BitDouble),
    all("TRACEWID", K::BitDouble),
    all("SKETCHINC", K::BitDouble),
    all("FILLETRAD", K::BitDouble),
    all("THICKNESS", K::BitDouble),
    all("ANGBASE", K::BitDouble),
    all("PDSIZE", K::BitDouble),
    all("PLINEWID", K::BitDouble),
    all("USERR1", K::BitDouble),
    all("USERR2", K::BitDouble),
    all("USERR3", K::BitDouble),
    all("USERR4", K::BitDouble),
    all("USERR5", K::BitDouble),
    all("CHAMFERA", K::BitDouble),
    all("CHAMFERB", K::BitDouble),
    all("CHAMFERC", K::BitDouble),
    all("CHAMFERD", K::BitDouble),
    all("FACETRES", K::BitDouble),
    all("CMLSCALE", K::BitDouble),
    all("CELTSCALE", K::BitDouble),
    all("MENUNAME", K::VariableText),
    all("TDCREATE", K::Date),
    all("TDUPDATE", K::Date),
    r2004("UNKNOWN_BL6", K::BitLong),
    r2004("UNKNOWN_BL7", K::BitLong),
    r2004("UNKNOWN_BL8", K::BitLong),
    all("TDINDWG", K::TimeSpan),
    all("TDUSRTIMER", K::TimeSpan),
    all("CECOLOR", K::Color),
    all("HANDSEED", K::Handle),
    all("CLAYER", K::Handle),
    all("TEXTSTYLE", K::Handle),
    all("CELTYPE", K::Handle),
    r2007("CMATERIAL", K::Handle),
    all("DIMSTYLE", K::Handle),
    all("CMLSTYLE", K::Handle),
    r2000("PSVPSCALE", K::BitDouble),
    // Paper space
    all("PINSBASE", K::Point3Bit),
    all("PEXTMIN", K::Point3Bit),
    all("PEXTMAX", K::Point3Bit),
    all("PLIMMIN", K::Point2Raw),
    all("PLIMMAX", K::Point2Raw),
    all("PELEVATION", K::BitDouble),
    all("PUCSORG", K::Point3Bit),
    all("PUCSXDIR", K::Point3Bit),
    all("PUCSYDIR", K::Point3Bit),
    all("PUCSNAME", K::Handle),
    r2000("PUCSORTHOREF", K::Handle),
    r2000("PUCSORTHOVIEW", K::BitShort),
    r2000("PUCSBASE", K::Handle),
    r2000("PUCSORGTOP", K::Point3Bit),
    r2000("PUCSORGBOTTOM", K::Point3Bit),
    r2000("PUCSORGLEFT", K::Point3Bit),
    r2000("PUCSORGRIGHT", K::Point3Bit),
    r2000("PUCSORGFRONT", K::Point3Bit),
    r2000("PUCSORGBACK", K::Point3Bit),
    // Model space
    all("INSBASE", K::Point3Bit),
    all("EXTMIN", K::Point3Bit),
    all("EXTMAX", K::Point3Bit),
    all("LIMMIN", K::Point2Raw),
    all("LIMMAX", K::Point2Raw),
    all("ELEVATION", K::BitDouble),
    all("UCSORG", K::Point3Bit),
    all("UCSXDIR", K::Point3Bit),
    all("UCSYDIR", K::Point3Bit),
    all("UCSNAME", K::Handle),
    r2000("UCSORTHOREF", K::Handle),
    r2000("UCSORTHOVIEW", K::BitShort),
    r2000("UCSBASE", K::Handle),
    r2000("UCSORGTOP", K::Point3Bit),
    r2000("UCSORGBOTTOM", K::Point3Bit),
    r2000("UCSORGLEFT", K::Point3Bit),
    r2000("UCSORGRIGHT", K::Point3Bit),
    r2000("UCSORGFRONT", K::Point3Bit),
    r2000("UCSORGBACK", K::Point3Bit),
    r2000("DIMPOST", K::VariableText),
    r2000("DIMAPOST", K::VariableText),
    // Dimension variables, R13/R14 layout
    r13_14("DIMTOL", K::Bit),
    r13_14("DIMLIM", K::Bit),
    r13_14("DIMTIH", K::Bit),
    r13_14("DIMTOH", K::Bit),
    r13_14("DIMSE1", K::Bit),
    r13_14("DIMSE2", K::Bit),
    r13_14("DIMALT", K::Bit),
    r13_14("DIMTOFL", K::Bit),
    r13_14("DIMSAH", K::Bit),
    r13_14("DIMTIX", K::Bit),
    r13_14("DIMSOXD", K::Bit),
    r13_14("DIMALTD", K::RawChar),
    r13_14("DIMZIN", K::RawChar),
    r13_14("DIMSD1", K::Bit),
    r13_14("DIMSD2", K::Bit),
    r13_14("DIMTOLJ", K::RawChar),
    r13_14("DIMJUST", K::RawChar),
    r13_14("DIMFIT", K::RawChar),
    r13_14("DIMUPT", K::Bit),
    r13_14("DIMTZIN", K::RawChar),
    r13_14("DIMALTZ", K::RawChar),
    r13_14("DIMALTTZ", K::RawChar),
    r13_14("DIMTAD", K::RawChar),
    r13_14("DIMUNIT", K::BitShort),
    r13_14("DIMAUNIT", K::BitShort),
    r13_14("DIMDEC", K::BitShort),
    r13_14("DIMTDEC", K::BitShort),
    r13_14("DIMALTU", K::BitShort),
    r13_14("DIMALTTD", K::BitShort),
    r13_14("DIMTXSTY", K::Handle),
    all("DIMSCALE", K::BitDouble),
    all("DIMASZ", K::BitDouble),
    all("DIMEXO", K::BitDouble),
    all("DIMDLI", K::BitDouble),
    all("DIMEXE", K::BitDouble),
    all("DIMRND", K::BitDouble),
    all("DIMDLE", K::BitDouble),
    all("DIMTP", K::BitDouble),
    all("DIMTM", K::BitDouble),
    r2007("DIMFXL", K::BitDouble),
    r2007("DIMJOGANG", K::BitDouble),
    r2007("DIMTFILL", K::BitShort),
    r2007("DIMTFILLCLR", K::Color),
    r2000("DIMTOL", K::Bit),
    r2000("DIMLIM", K::Bit),
    r2000("DIMTIH", K::Bit),
    r2000("DIMTOH", K::Bit),
    r2000("DIMSE1", K::Bit),
    r2000("DIMSE2", K::Bit),
    r2000("DIMTAD", K::BitShort),
    r2000("DIMZIN", K::BitShort),
    r2000("DIMAZIN", K::BitShort),
    r2007("DIMARCSYM", K::BitShort),
    all("DIMTXT", K::BitDouble),
    all("DIMCEN", K::BitDouble),
    all("DIMTSZ", K::BitDouble),
    all("DIMALTF", K::BitDouble),
    all("DIMLFAC", K::BitDouble),
    all("DIMTVP", K::BitDouble),
    all("DIMTFAC", K::BitDouble),
    all("DIMGAP", K::BitDouble),
    r13_14("DIMPOST", K::Text),
    r13_14("DIMAPOST", K::Text),
    r13_14("DIMBLK", K::Text),
    r13_14("DIMBLK1", K::Text),
    r13_14("DIMBLK2", K::Text),
    r2000("DIMALTRND", K::BitDouble),
    r2000("DIMALT", K::Bit),
    r2000("DIMALTD", K::BitShort),
    r2000("DIMTOFL", K::Bit),
    r2000("DIMSAH", K::Bit),
    r2000("DIMTIX", K::Bit),
    r2000("DIMSOXD", K::Bit),
    all("DIMCLRD", K::Color),
    all("DIMCLRE", K::Color),
    all("DIMCLRT", K::Color),
    r2000("DIMADEC", K::BitShort),
    r2000("DIMDEC", K::BitShort),
    r2000("DIMTDEC", K::BitShort),
    r2000("DIMALTU", K::BitShort),
    r2000("DIMALTTD", K::BitShort),
    r2000("DIMAUNIT", K::BitShort),
    r2000("DIMFRAC", K::BitShort),
    r2000("DIMLUNIT", K::BitShort),
    r2000("DIMDSEP", K::BitShort),
    r2000("DIMTMOVE", K::BitShort),
    r2000("DIMJUST", K::BitShort),
    r2000("DIMSD1", K::Bit),
    r2000("DIMSD2", K::Bit),
    r2000("DIMTOLJ", K::BitShort),
    r2000("DIMTZIN", K::BitShort),
    r2000("DIMALTZ", K::BitShort),
    r2000("DIMALTTZ", K::BitShort),
    r2000("DIMUPT", K::Bit),
    r2000("DIMATFIT", K::BitShort),
    r2007("DIMFXLON", K::Bit),
    HeaderField::new("DIMTXTDIRECTION", K::Bit, V::R2010_PLUS),
    HeaderField::new("DIMALTMZF", K::BitDouble, V::R2010_PLUS),
    HeaderField::new("DIMALTMZS", K::VariableText, V::R2010_PLUS),
    HeaderField::new("DIMMZF", K::BitDouble, V::R2010_PLUS),
    HeaderField::new("DIMMZS", K::VariableText, V::R2010_PLUS),
    r2000("DIMTXSTY", K::Handle),
    r2000("DIMLDRBLK", K::Handle),
    r2000("DIMBLK", K::Handle),
    r2000("DIMBLK1", K::Handle),
    r2000("DIMBLK2", K::Handle),
    r2007("DIMLTYPE", K::Handle),
    r2007("DIMLTEX1", K::Handle),
    r2007("DIMLTEX2", K::Handle),
    r2000("DIMLWD", K::BitShort),
    r2000("DIMLWE", K::BitShort),
    // Table control objects
    all("BLOCK_CONTROL_OBJECT", K::Handle),
    all("LAYER_CONTROL_OBJECT", K::Handle),
    all("STYLE_CONTROL_OBJECT", K::Handle),
    all("LINETYPE_CONTROL_OBJECT", K::Handle),
    all("VIEW_CONTROL_OBJECT", K::Handle),
    all("UCS_CONTROL_OBJECT", K::Handle),
    all("VPORT_CONTROL_OBJECT", K::Handle),
    all("APPID_CONTROL_OBJECT", K::Handle),
    all("DIMSTYLE_CONTROL_OBJECT", K::Handle),
    HeaderField::new("VPORT_ENTITY_HEADER_CONTROL_OBJECT", K::Handle, V::R13_R2000),
    all("DICTIONARY_ACAD_GROUP", K::Handle),
    all("DICTIONARY_ACAD_MLINESTYLE", K::Handle),
    all("DICTIONARY_NAMED_OBJECTS", K::Handle),
    r2000("TSTACKALIGN", K::BitShort),
    r2000("TSTACKSIZE", K::BitShort),
    r2000("HYPERLINKBASE", K::VariableText),
    r2000("STYLESHEET", K::VariableText),
    r2000("DICTIONARY_LAYOUTS", K::Handle),
    r2000("DICTIONARY_PLOTSETTINGS", K::Handle),
    r2000("DICTIONARY_PLOTSTYLES", K::Handle),
    r2004("DICTIONARY_MATERIALS", K::Handle),
    r2004("DICTIONARY_COLORS", K::Handle),
    r2007("DICTIONARY_VISUALSTYLE", K::Handle),
    // Packed CELWEIGHT, ENDCAPS, JOINSTYLE, LWDISPLAY, XEDIT, EXTNAMES,
    // PSTYLEMODE and OLESTARTUP
    r2000("FLAGS", K::BitLong),
    r2000("INSUNITS", K::BitShort),
    r2000("CEPSNTYPE", K::BitShort),
    r2000("CPSNID", K::Handle).when(HeaderCondition::Equals {
        field: "CEPSNTYPE",
        value: 3,
    }),
    r2000("FINGERPRINTGUID", K::VariableText),
    r2000("VERSIONGUID", K::VariableText),
    r2004("SORTENTS", K::RawChar),
    r2004("INDEXCTL", K::RawChar),
    r2004("HIDETEXT", K::RawChar),
    r2004("XCLIPFRAME", K::RawChar),
    r2004("DIMASSOC", K::RawChar),
    r2004("HALOGAP", K::RawChar),
    r2004("OBSCUREDCOLOR", K::BitShort),
    r2004("INTERSECTIONCOLOR", K::BitShort),
    r2004("OBSCUREDLTYPE", K::RawChar),
    r2004("INTERSECTIONDISPLAY", K::RawChar),
    r2004("PROJECTNAME", K::VariableText),
    all("BLOCK_RECORD_PAPER_SPACE", K::Handle),
    all("BLOCK_RECORD_MODEL_SPACE", K::Handle),
    all("LTYPE_BYLAYER", K::Handle),
    all("LTYPE_BYBLOCK", K::Handle),
    all("LTYPE_CONTINUOUS", K::Handle),
    r2007("CAMERADISPLAY", K::Bit),
    r2007("UNKNOWN_BL9", K::BitLong),
    r2007("UNKNOWN_BL10", K::BitLong),
    r2007("UNKNOWN_BD5", K::BitDouble),
    r2007("STEPSPERSEC", K::BitDouble),
    r2007("STEPSIZE", K::BitDouble),
    r2007("3DDWFPREC", K::BitDouble),
    r2007("LENSLENGTH", K::BitDouble),
    r2007("CAMERAHEIGHT", K::BitDouble),
    r2007("SOLIDHIST", K::RawChar),
    r2007("SHOWHIST", K::RawChar),
    r2007("PSOLWIDTH", K::BitDouble),
    r2007("PSOLHEIGHT", K::BitDouble),
    r2007("LOFTANG1", K::BitDouble),
    r2007("LOFTANG2", K::BitDouble),
    r2007("LOFTMAG1", K::BitDouble),
    r2007("LOFTMAG2", K::BitDouble),
    r2007("LOFTPARAM", K::BitShort),
    r2007("LOFTNORMALS", K::RawChar),
    r2007("LATITUDE", K::BitDouble),
    r2007("LONGITUDE", K::BitDouble),
    r2007("NORTHDIRECTION", K::BitDouble),
    r2007("TIMEZONE", K::BitLong),
    r2007("LIGHTGLYPHDISPLAY", K::RawChar),
    r2007("TILEMODELIGHTSYNCH", K::RawChar),
    r2007("DWFFRAME", K::RawChar),
    r2007("DGNFRAME", K::RawChar),
    r2007("UNKNOWN_B2", K::Bit),
    r2007("INTERFERECOLOR", K::Color),
    r2007("INTERFEREOBJVS", K::Handle),
    r2007("INTERFEREVPVS", K::Handle),
    r2007("DRAGVS", K::Handle),
    r2007("CSHADOW", K::RawChar),
    r2007("SHADOWPLANELOCATION", K::BitDouble),
];

static SCHEMA_INDEX: Lazy<AHashMap<&'static str, Vec<usize>>> = Lazy::new(|| {
    let mut index: AHashMap<&'static str, Vec<usize>> = AHashMap::new();
    for (i, field) in HEADER_SCHEMA.iter().enumerate() {
        index.entry(field.name).or_default().push(i);
    }
    index
});

/// Schema entry for `name` as stored in `version`.
///
/// Some variables changed encoding between revisions (e.g. `DIMALTD` is RC
/// in R13/R14 and BS later); the entry whose range covers `version` wins.
pub fn field(name: &str, version: DwgVersion) -> Option<&'static HeaderField> {
    SCHEMA_INDEX
        .get(name)?
        .iter()
        .map(|&i| &HEADER_SCHEMA[i])
        .find(|f| f.applies_to(version))
}

/// Fields stored for `version`, in stream order, ignoring value conditions.
pub fn fields_for(version: DwgVersion) -> impl Iterator<Item = &'static HeaderField> {
    HEADER_SCHEMA.iter().filter(move |f| f.applies_to(version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique_per_version() {
        for version in DwgVersion::ALL {
            let mut seen = HashSet::new();
            for f in fields_for(version) {
                assert!(seen.insert(f.name), "{} repeated in {}", f.name, version);
            }
        }
    }

    #[test]
    fn test_field_lookup_by_version() {
        let r14 = field("DIMALTD", DwgVersion::R14).unwrap();
        assert_eq!(r14.kind, HeaderFieldKind::RawChar);
        let r2000 = field("DIMALTD", DwgVersion::R2000).unwrap();
        assert_eq!(r2000.kind, HeaderFieldKind::BitShort);
        assert!(field("PSVPSCALE", DwgVersion::R14).is_none());
        assert!(field("NOPE", DwgVersion::R2000).is_none());
    }

    #[test]
    fn test_cpsnid_is_conditional() {
        let cpsnid = field("CPSNID", DwgVersion::R2000).unwrap();
        assert_eq!(
            cpsnid.condition,
            Some(HeaderCondition::Equals {
                field: "CEPSNTYPE",
                value: 3
            })
        );
    }

    #[test]
    fn test_handseed_follows_cecolor() {
        let names: Vec<&str> = fields_for(DwgVersion::R14).map(|f| f.name).collect();
        let cecolor = names.iter().position(|&n| n == "CECOLOR").unwrap();
        assert_eq!(names[cecolor + 1], "HANDSEED");
    }

    #[test]
    fn test_version_gating_changes_field_count() {
        let r14 = fields_for(DwgVersion::R14).count();
        let r2000 = fields_for(DwgVersion::R2000).count();
        let r2004 = fields_for(DwgVersion::R2004).count();
        assert!(r14 < r2000);
        assert!(r2000 < r2004);
        assert!(fields_for(DwgVersion::None).next().is_none());
    }
}
