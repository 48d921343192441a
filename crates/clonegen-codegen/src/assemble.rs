//! Final document assembly.

use std::fmt::Write;

/// Warning comment at the top of every generated file.
const FILE_HEADER: &str = "\n// This file has been auto-generated by clonegen.\n// Please DO NOT manually edit this file. Any subsequent invocation of\n// clonegen will overwrite your modifications.\n";

/// Assemble the generated document.
///
/// Layout is fixed: warning comment, one include per requested class in
/// request order (unconditionally, even for classes that yielded no
/// members), the namespace using-declaration, then every non-empty body in
/// request order. `\n` line endings throughout.
pub fn assemble_document(
    class_names: &[String],
    bodies: &[String],
    namespace: &str,
    header_prefix: &str,
) -> String {
    let mut doc = String::from(FILE_HEADER);
    for name in class_names {
        let _ = writeln!(doc, "#include \"{}{}.h\"", header_prefix, name);
    }
    let _ = write!(doc, "using namespace {};", namespace);
    for body in bodies {
        doc.push_str(body);
    }
    doc
}
