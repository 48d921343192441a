//! Clang AST parsing using libclang.

use crate::ast::{ClangAst, ClangNode, ClangNodeKind, Diagnostic, Severity, SourceLocation};
use crate::types::CppType;
use miette::{miette, Result};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::ptr;

/// Build the compiler argument list for parsing a header as C++.
pub fn compiler_args(include_dirs: &[PathBuf]) -> Vec<String> {
    let mut args = vec!["-x".to_string(), "c++".to_string()];
    for dir in include_dirs {
        args.push("-I".to_string());
        args.push(dir.display().to_string());
    }
    args
}

/// Parser that uses libclang to parse C++ headers.
///
/// Each parser owns its own `CXIndex`; create one per worker rather than
/// sharing across threads.
pub struct ClangParser {
    index: clang_sys::CXIndex,
}

impl ClangParser {
    /// Create a new Clang parser. The libclang library must already be
    /// loaded (see [`crate::load_frontend`]).
    pub fn new() -> Result<Self> {
        unsafe {
            let index = clang_sys::clang_createIndex(0, 0);
            if index.is_null() {
                return Err(miette!("Failed to create clang index"));
            }
            Ok(Self { index })
        }
    }

    /// Parse a C++ header into an owned AST.
    ///
    /// Diagnostics are collected, not acted on: a header that partially
    /// fails to parse still yields a usable partial AST. Only a failure to
    /// create the translation unit at all is an error.
    pub fn parse_file(&self, path: &Path, args: &[String]) -> Result<ClangAst> {
        let path_str = path.to_string_lossy();
        let c_path =
            CString::new(path_str.as_ref()).map_err(|_| miette!("Invalid path: {}", path_str))?;
        let c_args = to_cstrings(args)?;
        let arg_ptrs: Vec<*const c_char> = c_args.iter().map(|s| s.as_ptr()).collect();

        unsafe {
            let tu = clang_sys::clang_parseTranslationUnit(
                self.index,
                c_path.as_ptr(),
                arg_ptrs.as_ptr(),
                arg_ptrs.len() as i32,
                ptr::null_mut(),
                0,
                clang_sys::CXTranslationUnit_None,
            );

            if tu.is_null() {
                return Err(miette!("Failed to parse file: {}", path_str));
            }

            let diagnostics = collect_diagnostics(tu);
            let cursor = clang_sys::clang_getTranslationUnitCursor(tu);
            let root = convert_cursor(cursor);

            clang_sys::clang_disposeTranslationUnit(tu);

            Ok(ClangAst {
                translation_unit: root,
                diagnostics,
            })
        }
    }

    /// Parse C++ source code from a string.
    pub fn parse_string(&self, source: &str, filename: &str, args: &[String]) -> Result<ClangAst> {
        let c_filename =
            CString::new(filename).map_err(|_| miette!("Invalid file name: {}", filename))?;
        let c_source =
            CString::new(source).map_err(|_| miette!("Source contains interior NUL byte"))?;
        let c_args = to_cstrings(args)?;
        let arg_ptrs: Vec<*const c_char> = c_args.iter().map(|s| s.as_ptr()).collect();

        let unsaved_file = clang_sys::CXUnsavedFile {
            Filename: c_filename.as_ptr(),
            Contents: c_source.as_ptr(),
            Length: source.len() as u64,
        };

        unsafe {
            let tu = clang_sys::clang_parseTranslationUnit(
                self.index,
                c_filename.as_ptr(),
                arg_ptrs.as_ptr(),
                arg_ptrs.len() as i32,
                &unsaved_file as *const _ as *mut _,
                1,
                clang_sys::CXTranslationUnit_None,
            );

            if tu.is_null() {
                return Err(miette!("Failed to parse source code"));
            }

            let diagnostics = collect_diagnostics(tu);
            let cursor = clang_sys::clang_getTranslationUnitCursor(tu);
            let root = convert_cursor(cursor);

            clang_sys::clang_disposeTranslationUnit(tu);

            Ok(ClangAst {
                translation_unit: root,
                diagnostics,
            })
        }
    }
}

impl Drop for ClangParser {
    fn drop(&mut self) {
        unsafe {
            clang_sys::clang_disposeIndex(self.index);
        }
    }
}

/// Collect every diagnostic of a translation unit, formatted by libclang.
unsafe fn collect_diagnostics(tu: clang_sys::CXTranslationUnit) -> Vec<Diagnostic> {
    let count = clang_sys::clang_getNumDiagnostics(tu);
    let mut diagnostics = Vec::with_capacity(count as usize);
    for i in 0..count {
        let diag = clang_sys::clang_getDiagnostic(tu, i);
        let severity = convert_severity(clang_sys::clang_getDiagnosticSeverity(diag));
        let formatted = clang_sys::clang_formatDiagnostic(
            diag,
            clang_sys::clang_defaultDiagnosticDisplayOptions(),
        );
        diagnostics.push(Diagnostic {
            severity,
            message: cx_string_to_string(formatted),
        });
        clang_sys::clang_disposeDiagnostic(diag);
    }
    diagnostics
}

fn convert_severity(raw: clang_sys::CXDiagnosticSeverity) -> Severity {
    if raw >= clang_sys::CXDiagnostic_Fatal {
        Severity::Fatal
    } else if raw >= clang_sys::CXDiagnostic_Error {
        Severity::Error
    } else if raw >= clang_sys::CXDiagnostic_Warning {
        Severity::Warning
    } else if raw >= clang_sys::CXDiagnostic_Note {
        Severity::Note
    } else {
        Severity::Ignored
    }
}

/// Convert a Clang cursor and its subtree to an owned AST node.
fn convert_cursor(cursor: clang_sys::CXCursor) -> ClangNode {
    unsafe {
        let kind = clang_sys::clang_getCursorKind(cursor);
        let location = get_location(cursor);
        let node_kind = convert_cursor_kind(cursor, kind);

        let mut children: Vec<ClangNode> = Vec::new();

        extern "C" fn visitor(
            child: clang_sys::CXCursor,
            _parent: clang_sys::CXCursor,
            data: clang_sys::CXClientData,
        ) -> clang_sys::CXChildVisitResult {
            unsafe {
                let children = &mut *(data as *mut Vec<ClangNode>);

                // Skip null cursors
                if clang_sys::clang_Cursor_isNull(child) != 0 {
                    return clang_sys::CXChildVisit_Continue;
                }

                children.push(convert_cursor(child));
                clang_sys::CXChildVisit_Continue
            }
        }

        clang_sys::clang_visitChildren(
            cursor,
            visitor,
            &mut children as *mut Vec<ClangNode> as clang_sys::CXClientData,
        );

        ClangNode {
            kind: node_kind,
            children,
            location,
        }
    }
}

/// Get source location from cursor.
fn get_location(cursor: clang_sys::CXCursor) -> SourceLocation {
    unsafe {
        let loc = clang_sys::clang_getCursorLocation(cursor);
        let mut file: clang_sys::CXFile = ptr::null_mut();
        let mut line: u32 = 0;
        let mut column: u32 = 0;

        clang_sys::clang_getSpellingLocation(
            loc,
            &mut file,
            &mut line,
            &mut column,
            ptr::null_mut(),
        );

        let file_name = if !file.is_null() {
            let name = clang_sys::clang_getFileName(file);
            Some(cx_string_to_string(name))
        } else {
            None
        };

        SourceLocation {
            file: file_name,
            line,
            column,
        }
    }
}

/// Convert a Clang cursor kind to an owned AST node kind.
fn convert_cursor_kind(
    cursor: clang_sys::CXCursor,
    kind: clang_sys::CXCursorKind,
) -> ClangNodeKind {
    unsafe {
        match kind {
            clang_sys::CXCursor_TranslationUnit => ClangNodeKind::TranslationUnit,

            clang_sys::CXCursor_Namespace => {
                let name = cursor_spelling(cursor);
                let name_opt = if name.is_empty() { None } else { Some(name) };
                ClangNodeKind::Namespace { name: name_opt }
            }

            clang_sys::CXCursor_StructDecl | clang_sys::CXCursor_ClassDecl => {
                ClangNodeKind::RecordDecl {
                    name: cursor_spelling(cursor),
                    is_class: kind == clang_sys::CXCursor_ClassDecl,
                    is_definition: clang_sys::clang_isCursorDefinition(cursor) != 0,
                }
            }

            clang_sys::CXCursor_FieldDecl => ClangNodeKind::FieldDecl {
                name: cursor_spelling(cursor),
                ty: convert_type(clang_sys::clang_getCursorType(cursor)),
            },

            clang_sys::CXCursor_CXXBaseSpecifier => {
                // Resolve the specifier to the base's definition so the
                // inheritance chain can be followed on owned data. An
                // unresolvable base (forward declaration only) keeps its
                // spelled name and terminates the chain there.
                let definition = clang_sys::clang_getCursorDefinition(cursor);
                if clang_sys::clang_Cursor_isNull(definition) != 0 {
                    ClangNodeKind::BaseSpecifier {
                        name: clean_type_name(&cursor_spelling(cursor)),
                        definition: None,
                    }
                } else {
                    ClangNodeKind::BaseSpecifier {
                        name: cursor_spelling(definition),
                        definition: Some(Box::new(convert_cursor(definition))),
                    }
                }
            }

            _ => {
                let kind_spelling = clang_sys::clang_getCursorKindSpelling(kind);
                ClangNodeKind::Unknown(cx_string_to_string(kind_spelling))
            }
        }
    }
}

/// Convert a Clang type to the owned type representation.
fn convert_type(ty: clang_sys::CXType) -> CppType {
    unsafe {
        match ty.kind {
            clang_sys::CXType_Bool => CppType::Bool,
            clang_sys::CXType_Char_S | clang_sys::CXType_SChar => CppType::Char { signed: true },
            clang_sys::CXType_Char_U | clang_sys::CXType_UChar => CppType::Char { signed: false },
            clang_sys::CXType_Short => CppType::Short { signed: true },
            clang_sys::CXType_UShort => CppType::Short { signed: false },
            clang_sys::CXType_Int => CppType::Int { signed: true },
            clang_sys::CXType_UInt => CppType::Int { signed: false },
            clang_sys::CXType_Long => CppType::Long { signed: true },
            clang_sys::CXType_ULong => CppType::Long { signed: false },
            clang_sys::CXType_LongLong => CppType::LongLong { signed: true },
            clang_sys::CXType_ULongLong => CppType::LongLong { signed: false },
            clang_sys::CXType_Float => CppType::Float,
            clang_sys::CXType_Double => CppType::Double,

            clang_sys::CXType_Pointer => {
                let pointee = clang_sys::clang_getPointeeType(ty);
                let is_const = clang_sys::clang_isConstQualifiedType(pointee) != 0;
                CppType::Pointer {
                    pointee: Box::new(convert_type(pointee)),
                    is_const,
                }
            }

            clang_sys::CXType_LValueReference | clang_sys::CXType_RValueReference => {
                let referent = clang_sys::clang_getPointeeType(ty);
                let is_const = clang_sys::clang_isConstQualifiedType(referent) != 0;
                CppType::Reference {
                    referent: Box::new(convert_type(referent)),
                    is_const,
                }
            }

            clang_sys::CXType_ConstantArray => {
                let count = clang_sys::clang_getArraySize(ty);
                if count < 0 {
                    CppType::Other(type_spelling(ty))
                } else {
                    let element = clang_sys::clang_getArrayElementType(ty);
                    CppType::ConstantArray {
                        element: Box::new(convert_type(element)),
                        count: count as usize,
                    }
                }
            }

            // Typedefs carry their fully-resolved canonical type, so
            // classification never has to ask libclang again.
            clang_sys::CXType_Typedef => CppType::Typedef {
                name: type_spelling(ty),
                canonical: Box::new(convert_type(clang_sys::clang_getCanonicalType(ty))),
            },

            // Elaborated types ("struct Foo", "Ogre::Foo") wrap the type
            // they name.
            clang_sys::CXType_Elaborated => convert_type(clang_sys::clang_Type_getNamedType(ty)),

            clang_sys::CXType_Record => CppType::Record {
                name: clean_type_name(&type_spelling(ty)),
            },

            clang_sys::CXType_Enum => CppType::Enum {
                name: clean_type_name(&type_spelling(ty)),
            },

            _ => CppType::Other(type_spelling(ty)),
        }
    }
}

fn to_cstrings(args: &[String]) -> Result<Vec<CString>> {
    args.iter()
        .map(|arg| CString::new(arg.as_str()).map_err(|_| miette!("Invalid argument: {}", arg)))
        .collect()
}

/// Strip the elaboration keywords libclang leaves on some spellings.
fn clean_type_name(name: &str) -> String {
    name.trim_start_matches("struct ")
        .trim_start_matches("class ")
        .trim_start_matches("enum ")
        .trim_start_matches("const ")
        .to_string()
}

/// Convert a CXString to a Rust String.
fn cx_string_to_string(cx_string: clang_sys::CXString) -> String {
    unsafe {
        let c_str = clang_sys::clang_getCString(cx_string);
        let result = if c_str.is_null() {
            String::new()
        } else {
            CStr::from_ptr(c_str).to_string_lossy().into_owned()
        };
        clang_sys::clang_disposeString(cx_string);
        result
    }
}

/// Get the spelling of a cursor.
fn cursor_spelling(cursor: clang_sys::CXCursor) -> String {
    unsafe {
        let spelling = clang_sys::clang_getCursorSpelling(cursor);
        cx_string_to_string(spelling)
    }
}

/// Get the spelling of a type.
fn type_spelling(ty: clang_sys::CXType) -> String {
    unsafe {
        let spelling = clang_sys::clang_getTypeSpelling(ty);
        cx_string_to_string(spelling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_args_language_prefix() {
        assert_eq!(compiler_args(&[]), vec!["-x", "c++"]);
    }

    #[test]
    fn test_compiler_args_include_dirs() {
        let dirs = vec![PathBuf::from("include"), PathBuf::from("/usr/include")];
        assert_eq!(
            compiler_args(&dirs),
            vec!["-x", "c++", "-I", "include", "-I", "/usr/include"]
        );
    }

    #[test]
    fn test_clean_type_name() {
        assert_eq!(clean_type_name("struct Foo"), "Foo");
        assert_eq!(clean_type_name("class Ogre::ParticleSystem"), "Ogre::ParticleSystem");
        assert_eq!(clean_type_name("Bar"), "Bar");
    }
}
