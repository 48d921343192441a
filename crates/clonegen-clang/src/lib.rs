//! libclang integration for the clonegen generator.
//!
//! This crate provides:
//! - runtime loading of the libclang shared library
//! - C++ header parsing via libclang
//! - an owned AST snapshot (`ClangNode`) that is cheap to traverse and can
//!   be built by hand in tests, without a frontend in the loop
//! - a C++ type model with canonical (typedef-free) resolution
//!
//! # Architecture
//!
//! ```text
//! C++ Header → libclang → ClangNode tree → field extraction
//! ```

mod ast;
mod load;
mod parse;
mod types;

pub use ast::{ClangAst, ClangNode, ClangNodeKind, Diagnostic, Severity, SourceLocation};
pub use load::load_frontend;
pub use parse::{compiler_args, ClangParser};
pub use types::CppType;
