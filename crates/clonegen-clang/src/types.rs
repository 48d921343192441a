//! C++ type representation.

/// A C++ type as it appears on a field declaration.
///
/// Only the structure relevant to copy-code generation is modeled: enough to
/// tell arithmetic types, pointers, fixed-size arrays, and by-value record
/// types apart, and to strip typedef layers down to the canonical type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CppType {
    /// bool
    Bool,
    /// char, signed char, unsigned char
    Char { signed: bool },
    /// short, unsigned short
    Short { signed: bool },
    /// int, unsigned int
    Int { signed: bool },
    /// long, unsigned long
    Long { signed: bool },
    /// long long, unsigned long long
    LongLong { signed: bool },
    /// float
    Float,
    /// double
    Double,
    /// Pointer type: T*
    Pointer {
        pointee: Box<CppType>,
        is_const: bool,
    },
    /// Reference type: T& or T&&
    Reference {
        referent: Box<CppType>,
        is_const: bool,
    },
    /// Fixed-size array type: T[N]
    ConstantArray {
        element: Box<CppType>,
        count: usize,
    },
    /// struct/class value type
    Record { name: String },
    /// Enumeration type
    Enum { name: String },
    /// Typedef/alias together with its fully-resolved canonical type
    Typedef {
        name: String,
        canonical: Box<CppType>,
    },
    /// Anything else libclang reports, kept by spelling for diagnostics
    Other(String),
}

impl CppType {
    /// Create a signed int type.
    pub fn int() -> Self {
        CppType::Int { signed: true }
    }

    /// Create an unsigned int type.
    pub fn uint() -> Self {
        CppType::Int { signed: false }
    }

    /// Create a float type.
    pub fn float() -> Self {
        CppType::Float
    }

    /// Create a fixed-size array of this element type.
    pub fn array(element: CppType, count: usize) -> Self {
        CppType::ConstantArray {
            element: Box::new(element),
            count,
        }
    }

    /// Create a record value type.
    pub fn record(name: &str) -> Self {
        CppType::Record {
            name: name.to_string(),
        }
    }

    /// Create a typedef wrapping its canonical type.
    pub fn typedef(name: &str, canonical: CppType) -> Self {
        CppType::Typedef {
            name: name.to_string(),
            canonical: Box::new(canonical),
        }
    }

    /// Resolve every typedef/alias layer to the underlying concrete type.
    pub fn canonical(&self) -> &CppType {
        let mut ty = self;
        while let CppType::Typedef { canonical, .. } = ty {
            ty = canonical.as_ref();
        }
        ty
    }

    /// C++-flavored spelling, for error messages.
    pub fn spelling(&self) -> String {
        match self {
            CppType::Bool => "bool".to_string(),
            CppType::Char { signed: true } => "char".to_string(),
            CppType::Char { signed: false } => "unsigned char".to_string(),
            CppType::Short { signed: true } => "short".to_string(),
            CppType::Short { signed: false } => "unsigned short".to_string(),
            CppType::Int { signed: true } => "int".to_string(),
            CppType::Int { signed: false } => "unsigned int".to_string(),
            CppType::Long { signed: true } => "long".to_string(),
            CppType::Long { signed: false } => "unsigned long".to_string(),
            CppType::LongLong { signed: true } => "long long".to_string(),
            CppType::LongLong { signed: false } => "unsigned long long".to_string(),
            CppType::Float => "float".to_string(),
            CppType::Double => "double".to_string(),
            CppType::Pointer { pointee, is_const } => {
                let qualifier = if *is_const { "const " } else { "" };
                format!("{}{} *", qualifier, pointee.spelling())
            }
            CppType::Reference { referent, is_const } => {
                let qualifier = if *is_const { "const " } else { "" };
                format!("{}{} &", qualifier, referent.spelling())
            }
            CppType::ConstantArray { element, count } => {
                // nested arrays spell inner dimensions after the outer one
                let mut dims = format!("[{}]", count);
                let mut inner = element.as_ref();
                while let CppType::ConstantArray { element, count } = inner.canonical() {
                    dims.push_str(&format!("[{}]", count));
                    inner = element.as_ref();
                }
                format!("{} {}", inner.spelling(), dims)
            }
            CppType::Record { name } | CppType::Enum { name } => name.clone(),
            CppType::Typedef { name, .. } => name.clone(),
            CppType::Other(spelling) => spelling.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_strips_typedef_layers() {
        let vec3 = CppType::typedef("Vec3", CppType::array(CppType::float(), 3));
        assert_eq!(vec3.canonical(), &CppType::array(CppType::float(), 3));

        // aliases of aliases resolve all the way down
        let alias = CppType::typedef("Real", CppType::typedef("real_t", CppType::Float));
        assert_eq!(alias.canonical(), &CppType::Float);

        // non-typedef types are their own canonical type
        assert_eq!(CppType::int().canonical(), &CppType::int());
    }

    #[test]
    fn test_spelling_of_arrays() {
        assert_eq!(CppType::array(CppType::float(), 4).spelling(), "float [4]");
        assert_eq!(
            CppType::array(CppType::array(CppType::float(), 4), 2).spelling(),
            "float [2][4]"
        );
    }

    #[test]
    fn test_spelling_of_qualified_pointers() {
        let ty = CppType::Pointer {
            pointee: Box::new(CppType::record("ParticleSystem")),
            is_const: true,
        };
        assert_eq!(ty.spelling(), "const ParticleSystem *");
    }
}
