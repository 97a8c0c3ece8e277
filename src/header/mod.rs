//! Drawing header variables.
//!
//! Values are stored by variable name in stream order. Which names are
//! present depends on the revision the drawing was saved in; see
//! [`schema::HEADER_SCHEMA`].

pub mod schema;

use std::fmt;

use indexmap::IndexMap;

use crate::types::{CmColor, Handle, HandleReference, JulianDate, Vector2, Vector3};

pub use schema::{HeaderCondition, HeaderField, HeaderFieldKind, HEADER_SCHEMA};

/// One decoded header variable.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Bool(bool),
    Char(u8),
    Short(i16),
    Long(i32),
    LongLong(u64),
    Double(f64),
    Point2(Vector2),
    Point3(Vector3),
    Color(CmColor),
    Handle(HandleReference),
    Text(String),
    Date(JulianDate),
}

impl HeaderValue {
    /// Integer view of the value, for the integer kinds and booleans.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HeaderValue::Bool(b) => Some(*b as i64),
            HeaderValue::Char(v) => Some(*v as i64),
            HeaderValue::Short(v) => Some(*v as i64),
            HeaderValue::Long(v) => Some(*v as i64),
            HeaderValue::LongLong(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HeaderValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HeaderValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            HeaderValue::Handle(r) => Some(r.handle),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Bool(v) => write!(f, "{v}"),
            HeaderValue::Char(v) => write!(f, "{v}"),
            HeaderValue::Short(v) => write!(f, "{v}"),
            HeaderValue::Long(v) => write!(f, "{v}"),
            HeaderValue::LongLong(v) => write!(f, "{v}"),
            HeaderValue::Double(v) => write!(f, "{v}"),
            HeaderValue::Point2(p) => write!(f, "{p}"),
            HeaderValue::Point3(p) => write!(f, "{p}"),
            HeaderValue::Color(c) => write!(f, "{:?}", c.color()),
            HeaderValue::Handle(r) => write!(f, "{r}"),
            HeaderValue::Text(s) => write!(f, "{s:?}"),
            HeaderValue::Date(d) => write!(f, "{d}"),
        }
    }
}

/// Header variables of one drawing, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderVariables {
    values: IndexMap<&'static str, HeaderValue>,
}

impl HeaderVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: HeaderValue) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_i64()
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_f64()
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name)?.as_bool()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }

    pub fn get_handle(&self, name: &str) -> Option<Handle> {
        self.get(name)?.as_handle()
    }

    /// Next handle the drawing would assign.
    pub fn handle_seed(&self) -> Option<Handle> {
        self.get_handle("HANDSEED")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &HeaderValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}
