//! Rendering of one `_cloneFrom` body.

use clonegen_extract::{FieldDescriptor, Shape};
use std::fmt::Write;

/// Sort fields for rendering: stable, ascending by primary array dimension
/// (scalars, then aggregates, then arrays smallest outer count first).
/// Equal keys keep declaration order, so output order is a pure function of
/// the `{name, shape}` set, not of traversal order.
pub fn sort_fields(fields: &mut [FieldDescriptor]) {
    fields.sort_by_key(|field| field.shape.sort_key());
}

/// Render the `_cloneFrom` body for one class.
///
/// Fields are emitted in the order given; callers sort with [`sort_fields`]
/// first. `base_class_names` delegates to its first entry only: each level
/// of the hierarchy copies what it directly declares and hands the rest to
/// its nearest base. A class with no fields renders nothing at all.
pub fn render_clone_body(
    class_name: &str,
    fields: &[FieldDescriptor],
    base_class_names: &[String],
    most_base: &str,
) -> String {
    if fields.is_empty() {
        return String::new();
    }

    let mut members = String::new();
    for field in fields {
        render_member(&mut members, field);
    }
    // the body template supplies the final newline
    members.pop();

    let base_call = match base_class_names.first() {
        Some(class) => format!("    {}::_cloneFrom( _original );", class),
        None => String::new(),
    };

    let mut out = String::new();
    out.push('\n');
    out.push_str(
        "//-----------------------------------------------------------------------------\n",
    );
    let _ = writeln!(
        out,
        "void {}::_cloneFrom( const {} *_original )",
        class_name, most_base
    );
    out.push_str("{\n");
    let _ = writeln!(
        out,
        "    OGRE_ASSERT_HIGH( dynamic_cast<const {} *>( _original ) );",
        class_name
    );
    out.push_str(&base_call);
    out.push('\n');
    let _ = writeln!(
        out,
        "    const {0} *original = static_cast<const {0} *>( _original );",
        class_name
    );
    out.push_str(&members);
    out.push('\n');
    out.push_str("}\n");
    out
}

/// One copy statement per field: assignment for scalars and aggregate
/// values, bounded loops for arrays.
fn render_member(out: &mut String, field: &FieldDescriptor) {
    let name = &field.name;
    match field.shape {
        Shape::Scalar | Shape::OpaqueAggregate => {
            let _ = writeln!(out, "    this->{0} = original->{0};", name);
        }
        Shape::Array1D(count) => {
            let _ = writeln!(out, "    for( size_t i = 0u; i<{}u; ++i )", count);
            let _ = writeln!(out, "        this->{0}[i] = original->{0}[i];", name);
        }
        Shape::Array2D(outer, inner) => {
            let _ = writeln!(out, "    for( size_t i = 0u; i<{}u; ++i )", outer);
            let _ = writeln!(out, "        for( size_t j = 0u; j<{}u; ++j )", inner);
            let _ = writeln!(out, "            this->{0}[i][j] = original->{0}[i][j];", name);
        }
    }
}
