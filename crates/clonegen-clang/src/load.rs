//! Runtime loading of the libclang shared library.

use miette::{miette, Result};
use std::path::Path;

/// Load libclang into the process, optionally from an explicit location.
///
/// Must succeed before any [`crate::ClangParser`] is created; a missing or
/// unloadable library is a startup precondition failure, not a per-class
/// error. `library` may point at the shared object itself or at the
/// directory containing it.
pub fn load_frontend(library: Option<&Path>) -> Result<()> {
    if let Some(path) = library {
        std::env::set_var("LIBCLANG_PATH", path);
    }
    clang_sys::load().map_err(|e| miette!("Failed to load libclang: {}", e))
}
