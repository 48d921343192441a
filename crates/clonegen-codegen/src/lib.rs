//! C++ clone-routine text generation.
//!
//! Turns extracted [`clonegen_extract::ClassRecord`] data into the textual
//! `_cloneFrom` bodies and assembles the final generated document. The
//! emitted text is a stable artifact: same input, byte-identical output.

mod assemble;
mod render;

pub use assemble::assemble_document;
pub use render::{render_clone_body, sort_fields};
