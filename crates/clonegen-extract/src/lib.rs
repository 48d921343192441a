//! Field extraction for clone-code generation.
//!
//! Given the owned AST of one translation unit, this crate locates a class
//! declaration by (optionally qualified) name, collects its directly
//! declared data members in declaration order, classifies each member's
//! type into a copy [`Shape`], and resolves the transitive base-class
//! chain. Everything here is pure: no libclang state, no I/O.

mod error;
mod shape;
mod walk;

pub use error::ExtractError;
pub use shape::{classify, ClassRecord, FieldDescriptor, RecordRule, Shape, ShapeError};
pub use walk::find_class;
