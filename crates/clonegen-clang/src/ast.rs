//! Owned Clang AST representation.
//!
//! This module provides a simplified view of the Clang AST that survives the
//! translation unit it was parsed from, so extraction and rendering never
//! touch libclang state.

use crate::types::CppType;

/// A parsed translation unit together with its diagnostics.
#[derive(Debug)]
pub struct ClangAst {
    /// Root translation unit
    pub translation_unit: ClangNode,
    /// Frontend diagnostics; never fatal by themselves
    pub diagnostics: Vec<Diagnostic>,
}

/// A node in the Clang AST.
#[derive(Debug)]
pub struct ClangNode {
    /// Kind of this node
    pub kind: ClangNodeKind,
    /// Child nodes
    pub children: Vec<ClangNode>,
    /// Source location info (for error messages)
    pub location: SourceLocation,
}

impl ClangNode {
    /// A leaf node with a default location. Mostly useful in tests.
    pub fn new(kind: ClangNodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            location: SourceLocation::default(),
        }
    }

    /// A node with children and a default location.
    pub fn with_children(kind: ClangNodeKind, children: Vec<ClangNode>) -> Self {
        Self {
            kind,
            children,
            location: SourceLocation::default(),
        }
    }
}

/// Source location for error reporting.
#[derive(Debug, Clone, Default)]
pub struct SourceLocation {
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

/// Kinds of Clang AST nodes the extractor cares about.
#[derive(Debug)]
pub enum ClangNodeKind {
    /// Translation unit (root)
    TranslationUnit,
    /// Namespace declaration; `None` for anonymous namespaces
    Namespace { name: Option<String> },
    /// Struct/class declaration
    RecordDecl {
        name: String,
        is_class: bool,
        /// Forward declarations carry no members and never match a lookup
        is_definition: bool,
    },
    /// Non-static field declaration
    FieldDecl { name: String, ty: CppType },
    /// Base-class specifier, resolved to the base's definition where the
    /// frontend can, so the inheritance chain is walkable on owned data
    BaseSpecifier {
        name: String,
        definition: Option<Box<ClangNode>>,
    },
    /// Any other node kind; children are kept so traversal can descend
    /// through linkage specs, templates, and the like
    Unknown(String),
}

/// Severity of a frontend diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ignored,
    Note,
    Warning,
    Error,
    Fatal,
}

/// A frontend diagnostic, pre-formatted by libclang.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
