//! Integration tests for class lookup and field extraction.
//!
//! These build the owned AST by hand, the same shape the libclang parser
//! produces, so no frontend is needed.

use clonegen_clang::{ClangNode, ClangNodeKind, CppType};
use clonegen_extract::{find_class, ExtractError, RecordRule, Shape};

fn namespace(name: &str, children: Vec<ClangNode>) -> ClangNode {
    ClangNode::with_children(
        ClangNodeKind::Namespace {
            name: Some(name.to_string()),
        },
        children,
    )
}

fn class(name: &str, children: Vec<ClangNode>) -> ClangNode {
    ClangNode::with_children(
        ClangNodeKind::RecordDecl {
            name: name.to_string(),
            is_class: true,
            is_definition: true,
        },
        children,
    )
}

fn forward_decl(name: &str) -> ClangNode {
    ClangNode::new(ClangNodeKind::RecordDecl {
        name: name.to_string(),
        is_class: true,
        is_definition: false,
    })
}

fn field(name: &str, ty: CppType) -> ClangNode {
    ClangNode::new(ClangNodeKind::FieldDecl {
        name: name.to_string(),
        ty,
    })
}

fn base(name: &str, definition: Option<ClangNode>) -> ClangNode {
    ClangNode::new(ClangNodeKind::BaseSpecifier {
        name: name.to_string(),
        definition: definition.map(Box::new),
    })
}

fn translation_unit(children: Vec<ClangNode>) -> ClangNode {
    ClangNode::with_children(ClangNodeKind::TranslationUnit, children)
}

#[test]
fn test_find_class_nested_in_namespace() {
    let tu = translation_unit(vec![namespace(
        "Ogre",
        vec![class(
            "ParticleSystem",
            vec![
                field("mQuota", CppType::int()),
                field("mBounds", CppType::array(CppType::float(), 6)),
            ],
        )],
    )]);

    let record = find_class(&tu, "ParticleSystem", &RecordRule::default())
        .unwrap()
        .expect("class should be found");

    assert_eq!(record.class_name, "ParticleSystem");
    assert_eq!(record.fields.len(), 2);
    assert_eq!(record.fields[0].name, "mQuota");
    assert_eq!(record.fields[0].shape, Shape::Scalar);
    assert_eq!(record.fields[1].name, "mBounds");
    assert_eq!(record.fields[1].shape, Shape::Array1D(6));
    assert!(record.bases.is_empty());
}

#[test]
fn test_fields_keep_declaration_order() {
    let tu = translation_unit(vec![class(
        "Emitter",
        vec![
            field("mDirection", CppType::array(CppType::float(), 3)),
            field("mRate", CppType::float()),
            field("mName", CppType::record("String")),
        ],
    )]);

    let record = find_class(&tu, "Emitter", &RecordRule::default())
        .unwrap()
        .expect("class should be found");

    let names: Vec<&str> = record.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["mDirection", "mRate", "mName"]);
}

#[test]
fn test_not_found_yields_none() {
    let tu = translation_unit(vec![namespace(
        "Ogre",
        vec![class("ParticleSystem", vec![])],
    )]);

    let record = find_class(&tu, "BillboardSet", &RecordRule::default()).unwrap();
    assert!(record.is_none());
}

#[test]
fn test_forward_declarations_never_match() {
    // a forward declaration followed by the real definition must not count
    // as two matches
    let tu = translation_unit(vec![
        forward_decl("ParticleSystem"),
        namespace(
            "Ogre",
            vec![class("ParticleSystem", vec![field("mQuota", CppType::int())])],
        ),
    ]);

    let record = find_class(&tu, "ParticleSystem", &RecordRule::default())
        .unwrap()
        .expect("the definition should match");
    assert_eq!(record.fields.len(), 1);
}

#[test]
fn test_same_name_in_two_namespaces_is_ambiguous() {
    let tu = translation_unit(vec![
        namespace("Ogre", vec![class("Controller", vec![])]),
        namespace("Audio", vec![class("Controller", vec![])]),
    ]);

    let err = find_class(&tu, "Controller", &RecordRule::default()).unwrap_err();
    match err {
        ExtractError::AmbiguousClass { name, count } => {
            assert_eq!(name, "Controller");
            assert_eq!(count, 2);
        }
        other => panic!("expected AmbiguousClass, got {other}"),
    }
}

#[test]
fn test_qualified_name_disambiguates() {
    let tu = translation_unit(vec![
        namespace(
            "Ogre",
            vec![class("Controller", vec![field("mValue", CppType::float())])],
        ),
        namespace("Audio", vec![class("Controller", vec![])]),
    ]);

    let record = find_class(&tu, "Ogre::Controller", &RecordRule::default())
        .unwrap()
        .expect("qualified lookup should find exactly one class");
    assert_eq!(record.fields.len(), 1);
}

#[test]
fn test_class_nested_inside_class() {
    let tu = translation_unit(vec![class(
        "Outer",
        vec![class("Inner", vec![field("mFlag", CppType::Bool)])],
    )]);

    let record = find_class(&tu, "Outer::Inner", &RecordRule::default())
        .unwrap()
        .expect("nested class should be found");
    assert_eq!(record.class_name, "Inner");
    assert_eq!(record.fields[0].shape, Shape::Scalar);
}

#[test]
fn test_base_chain_is_transitive_nearest_first() {
    let grandparent = class("MovableObject", vec![]);
    let parent = class(
        "ParticleSystem",
        vec![base("MovableObject", Some(grandparent))],
    );
    let tu = translation_unit(vec![namespace(
        "Ogre",
        vec![class(
            "PfxParticleSystem",
            vec![
                base("ParticleSystem", Some(parent)),
                field("mQuota", CppType::int()),
            ],
        )],
    )]);

    let record = find_class(&tu, "PfxParticleSystem", &RecordRule::default())
        .unwrap()
        .expect("class should be found");
    assert_eq!(record.bases, ["ParticleSystem", "MovableObject"]);
}

#[test]
fn test_unresolved_base_keeps_name_and_ends_chain() {
    let tu = translation_unit(vec![class(
        "Derived",
        vec![base("OpaqueBase", None), field("mValue", CppType::int())],
    )]);

    let record = find_class(&tu, "Derived", &RecordRule::default())
        .unwrap()
        .expect("class should be found");
    assert_eq!(record.bases, ["OpaqueBase"]);
}

#[test]
fn test_deep_array_field_is_a_loud_failure() {
    let deep = CppType::array(CppType::array(CppType::array(CppType::float(), 2), 3), 4);
    let tu = translation_unit(vec![class("Lut", vec![field("mTable", deep)])]);

    let err = find_class(&tu, "Lut", &RecordRule::default()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("mTable"), "error names the field: {message}");
    assert!(message.contains("Lut"), "error names the class: {message}");
}

#[test]
fn test_traversal_descends_through_unknown_nodes() {
    // linkage specs and similar nodes keep their children; the walker must
    // descend through them
    let wrapper = ClangNode::with_children(
        ClangNodeKind::Unknown("LinkageSpec".to_string()),
        vec![class("Wrapped", vec![field("mValue", CppType::int())])],
    );
    let tu = translation_unit(vec![wrapper]);

    let record = find_class(&tu, "Wrapped", &RecordRule::default())
        .unwrap()
        .expect("class behind an unknown node should be found");
    assert_eq!(record.fields.len(), 1);
}
