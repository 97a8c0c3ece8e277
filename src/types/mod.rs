//! Core value types shared by the decoders

pub mod color;
pub mod handle;
pub mod julian;
pub mod vector;
pub mod version;

pub use color::{CmColor, Color};
pub use handle::{Handle, HandleReference};
pub use julian::JulianDate;
pub use vector::{Vector2, Vector3};
pub use version::{DwgVersion, VersionRange};
