//! Error types for clonegen-extract.

use crate::shape::ShapeError;
use thiserror::Error;

/// Errors surfaced while extracting a class from a translation unit.
///
/// These are per-class failures: the caller isolates them and keeps
/// processing its remaining classes.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A field's type cannot be mapped onto a supported copy shape.
    #[error("field `{field}` of class `{class}`: {source}")]
    UnsupportedShape {
        class: String,
        field: String,
        source: ShapeError,
    },

    /// The target name matches more than one class definition.
    #[error("class name `{name}` matches {count} definitions; qualify the name to disambiguate")]
    AmbiguousClass { name: String, count: usize },
}
