//! Locating the target class in the AST and building its record.

use crate::error::ExtractError;
use crate::shape::{classify, ClassRecord, FieldDescriptor, RecordRule};
use clonegen_clang::{ClangNode, ClangNodeKind};

/// Locate `target` in the translation unit and build its [`ClassRecord`].
///
/// `target` may be a bare class name or a `::`-qualified path; a qualified
/// path must match the trailing lexical scope of the declaration. Only
/// record definitions are candidates, so forward declarations of the same
/// class never produce a spurious match. More than one matching definition
/// is an error; zero matches yields `Ok(None)`.
pub fn find_class(
    root: &ClangNode,
    target: &str,
    rule: &RecordRule,
) -> Result<Option<ClassRecord>, ExtractError> {
    let segments: Vec<&str> = target.split("::").filter(|s| !s.is_empty()).collect();
    let Some((&simple_name, qualifier)) = segments.split_last() else {
        return Ok(None);
    };

    let mut matches = Vec::new();
    let mut scope = Vec::new();
    collect_matches(root, simple_name, qualifier, &mut scope, &mut matches);

    match matches.as_slice() {
        [] => Ok(None),
        [(name, node)] => extract_record(name, node, rule).map(Some),
        found => Err(ExtractError::AmbiguousClass {
            name: target.to_string(),
            count: found.len(),
        }),
    }
}

/// Depth-first search for matching record definitions, tracking the lexical
/// scope path (namespace and enclosing record names). The traversal never
/// stops early: the target may be nested arbitrarily deep, and every match
/// must be seen to detect ambiguity.
fn collect_matches<'a>(
    node: &'a ClangNode,
    simple_name: &str,
    qualifier: &[&str],
    scope: &mut Vec<String>,
    matches: &mut Vec<(String, &'a ClangNode)>,
) {
    for child in &node.children {
        match &child.kind {
            ClangNodeKind::RecordDecl {
                name,
                is_definition,
                ..
            } => {
                if *is_definition && name == simple_name && scope_matches(scope, qualifier) {
                    matches.push((name.clone(), child));
                }
                // the target may be a nested class of this record
                scope.push(name.clone());
                collect_matches(child, simple_name, qualifier, scope, matches);
                scope.pop();
            }
            ClangNodeKind::Namespace { name } => match name {
                Some(namespace) => {
                    scope.push(namespace.clone());
                    collect_matches(child, simple_name, qualifier, scope, matches);
                    scope.pop();
                }
                // anonymous namespaces add no path segment
                None => collect_matches(child, simple_name, qualifier, scope, matches),
            },
            _ => collect_matches(child, simple_name, qualifier, scope, matches),
        }
    }
}

/// A qualifier matches when it is a suffix of the declaration's scope path,
/// so `Ogre::ParticleSystem` finds the class regardless of how deeply the
/// `Ogre` namespace itself is nested.
fn scope_matches(scope: &[String], qualifier: &[&str]) -> bool {
    if qualifier.is_empty() {
        return true;
    }
    if qualifier.len() > scope.len() {
        return false;
    }
    scope[scope.len() - qualifier.len()..]
        .iter()
        .zip(qualifier)
        .all(|(seen, wanted)| seen == wanted)
}

/// Collect the matched declaration's direct fields (declaration order) and
/// its transitive base chain.
fn extract_record(
    class_name: &str,
    node: &ClangNode,
    rule: &RecordRule,
) -> Result<ClassRecord, ExtractError> {
    let mut fields = Vec::new();
    let mut bases = Vec::new();

    for child in &node.children {
        match &child.kind {
            ClangNodeKind::FieldDecl { name, ty } => {
                let shape = classify(ty, rule).map_err(|source| ExtractError::UnsupportedShape {
                    class: class_name.to_string(),
                    field: name.clone(),
                    source,
                })?;
                fields.push(FieldDescriptor {
                    name: name.clone(),
                    shape,
                });
            }
            ClangNodeKind::BaseSpecifier { name, definition } => {
                bases.push(name.clone());
                if let Some(base) = definition {
                    collect_base_chain(base, &mut bases);
                }
            }
            _ => {}
        }
    }

    Ok(ClassRecord {
        class_name: class_name.to_string(),
        fields,
        bases,
    })
}

/// Extend the chain with the base's own bases, nearest ancestor first.
/// Specifiers without a resolvable definition keep their name and end the
/// chain on that branch.
fn collect_base_chain(node: &ClangNode, bases: &mut Vec<String>) {
    for child in &node.children {
        if let ClangNodeKind::BaseSpecifier { name, definition } = &child.kind {
            bases.push(name.clone());
            if let Some(base) = definition {
                collect_base_chain(base, bases);
            }
        }
    }
}
