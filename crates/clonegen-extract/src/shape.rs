//! Field shape classification.

use clonegen_clang::CppType;
use thiserror::Error;

/// Copy shape of a single data member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Copied with a single assignment.
    Scalar,
    /// Fixed-size array copied with one bounded loop.
    Array1D(usize),
    /// Two-dimensional fixed-size array copied with nested bounded loops.
    Array2D(usize, usize),
    /// Aggregate value copied as a whole; one assignment invokes the
    /// aggregate's own copy semantics.
    OpaqueAggregate,
}

impl Shape {
    /// Primary-dimension sort key: scalars first, then aggregates, then
    /// arrays by outer count. Cosmetic ordering only, but it must be
    /// deterministic.
    pub fn sort_key(self) -> i64 {
        match self {
            Shape::Scalar => -1,
            Shape::OpaqueAggregate => 0,
            Shape::Array1D(count) => count as i64,
            Shape::Array2D(outer, _) => outer as i64,
        }
    }
}

/// A single data member, named and classified, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub shape: Shape,
}

/// Everything extracted for one class.
///
/// `fields` are in declaration order; `bases` is the transitive inheritance
/// chain, nearest ancestor first. Built fresh per run and discarded after
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub class_name: String,
    pub fields: Vec<FieldDescriptor>,
    pub bases: Vec<String>,
}

/// Classification policy for by-value record fields.
///
/// Some in-house array-like value types (FastArray wrappers and the like)
/// surface in the AST as ordinary record types rather than native arrays,
/// yet must be copied as one value. The default treats every by-value
/// record that way; an allow-list narrows the rule to known type names.
#[derive(Debug, Clone, Default)]
pub enum RecordRule {
    /// Treat every by-value record field as an opaque aggregate.
    #[default]
    AllRecords,
    /// Treat only the listed record type names as opaque aggregates; other
    /// records fall back to `Scalar`, which also renders as one assignment.
    /// Entries match the canonical spelling or its last `::` segment.
    AllowList(Vec<String>),
}

impl RecordRule {
    fn is_aggregate(&self, name: &str) -> bool {
        match self {
            RecordRule::AllRecords => true,
            RecordRule::AllowList(names) => {
                let simple = name.rsplit("::").next().unwrap_or(name);
                names.iter().any(|n| n == name || n == simple)
            }
        }
    }
}

/// A type whose shape the generator refuses to emit code for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Arrays nested deeper than two dimensions are rejected rather than
    /// silently copied with too few loops.
    #[error("array nesting deeper than two dimensions is not supported: {spelling}")]
    DeepArray { spelling: String },
}

/// Classify a field's declared type.
///
/// The type is resolved to its canonical form first, so typedef layers
/// never influence the outcome. Pure function of the type node and rule.
pub fn classify(ty: &CppType, rule: &RecordRule) -> Result<Shape, ShapeError> {
    match ty.canonical() {
        CppType::Record { name } => {
            if rule.is_aggregate(name) {
                Ok(Shape::OpaqueAggregate)
            } else {
                Ok(Shape::Scalar)
            }
        }
        CppType::ConstantArray { element, count } => match element.canonical() {
            CppType::ConstantArray {
                element: inner,
                count: inner_count,
            } => {
                if matches!(inner.canonical(), CppType::ConstantArray { .. }) {
                    Err(ShapeError::DeepArray {
                        spelling: ty.spelling(),
                    })
                } else {
                    Ok(Shape::Array2D(*count, *inner_count))
                }
            }
            _ => Ok(Shape::Array1D(*count)),
        },
        _ => Ok(Shape::Scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_default(ty: &CppType) -> Shape {
        classify(ty, &RecordRule::default()).unwrap()
    }

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify_default(&CppType::int()), Shape::Scalar);
        assert_eq!(classify_default(&CppType::Bool), Shape::Scalar);
        assert_eq!(classify_default(&CppType::Double), Shape::Scalar);
        assert_eq!(
            classify_default(&CppType::Enum {
                name: "BillboardType".to_string()
            }),
            Shape::Scalar
        );
    }

    #[test]
    fn test_classify_pointers_and_references_as_scalars() {
        let ptr = CppType::Pointer {
            pointee: Box::new(CppType::record("Renderable")),
            is_const: false,
        };
        assert_eq!(classify_default(&ptr), Shape::Scalar);

        let reference = CppType::Reference {
            referent: Box::new(CppType::float()),
            is_const: true,
        };
        assert_eq!(classify_default(&reference), Shape::Scalar);
    }

    #[test]
    fn test_classify_arrays() {
        assert_eq!(
            classify_default(&CppType::array(CppType::float(), 4)),
            Shape::Array1D(4)
        );
        assert_eq!(
            classify_default(&CppType::array(CppType::array(CppType::float(), 4), 4)),
            Shape::Array2D(4, 4)
        );
    }

    #[test]
    fn test_classify_resolves_typedefs_first() {
        // typedef float Vec3[3]; Vec3 v;
        let vec3 = CppType::typedef("Vec3", CppType::array(CppType::float(), 3));
        assert_eq!(classify_default(&vec3), Shape::Array1D(3));

        // typedef of a record still classifies by the canonical record
        let alias = CppType::typedef("TextureArray", CppType::record("PbsBakedTextureArray"));
        assert_eq!(classify_default(&alias), Shape::OpaqueAggregate);
    }

    #[test]
    fn test_classify_record_value_as_aggregate() {
        let tex = CppType::record("PbsBakedTextureArray");
        assert_eq!(classify_default(&tex), Shape::OpaqueAggregate);
    }

    #[test]
    fn test_allow_list_narrows_aggregate_rule() {
        let rule = RecordRule::AllowList(vec!["PbsBakedTextureArray".to_string()]);
        assert_eq!(
            classify(&CppType::record("PbsBakedTextureArray"), &rule).unwrap(),
            Shape::OpaqueAggregate
        );
        // qualified canonical spelling matches by its last segment
        assert_eq!(
            classify(&CppType::record("Ogre::PbsBakedTextureArray"), &rule).unwrap(),
            Shape::OpaqueAggregate
        );
        // unlisted records degrade to a plain assignment
        assert_eq!(
            classify(&CppType::record("Vector3"), &rule).unwrap(),
            Shape::Scalar
        );
    }

    #[test]
    fn test_deep_array_rejected() {
        let deep = CppType::array(CppType::array(CppType::array(CppType::float(), 2), 3), 4);
        let err = classify(&deep, &RecordRule::default()).unwrap_err();
        assert!(matches!(err, ShapeError::DeepArray { .. }));
    }

    #[test]
    fn test_sort_key_ordering() {
        assert!(Shape::Scalar.sort_key() < Shape::OpaqueAggregate.sort_key());
        assert!(Shape::OpaqueAggregate.sort_key() < Shape::Array1D(2).sort_key());
        assert!(Shape::Array1D(2).sort_key() < Shape::Array1D(6).sort_key());
        assert_eq!(Shape::Array2D(4, 4).sort_key(), Shape::Array1D(4).sort_key());
    }
}
