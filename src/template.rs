//! Contents of the `AcDb:Template` section.

use std::fmt;

/// Drawing units system (MEASUREMENT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Measurement {
    #[default]
    English,
    Metric,
}

impl Measurement {
    pub fn from_value(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::English),
            1 => Some(Self::Metric),
            _ => None,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "English"),
            Self::Metric => write!(f, "Metric"),
        }
    }
}

/// Template description and units of the drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSection {
    pub description: String,
    pub measurement: Measurement,
}
